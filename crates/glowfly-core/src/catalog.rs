// ── Read-only config lookups ──
//
// The device configuration is fetched once per session and never
// mutated after; every lookup takes the config by reference. Missing
// config (failed load) and missing entries degrade to explicit
// fallbacks, never panics.

use glowfly_api::models::EffectInfo;
use glowfly_api::DeviceConfig;

/// Placeholder shown when an effect index cannot be resolved
/// (config not loaded, or index absent from the registry).
pub const UNKNOWN_EFFECT: &str = "N/A";

/// The holiday-list sentinel meaning "no override, pick by calendar".
pub const HOLIDAY_NONE: &str = "None";

/// Display label for the `"None"` holiday sentinel.
pub const HOLIDAY_AUTOMATIC: &str = "Automatic";

/// Find the registry entry for an effect index.
pub fn find_effect(config: &DeviceConfig, index: u16) -> Option<&EffectInfo> {
    config.fx.iter().find(|fx| fx.registry_index == index)
}

/// Description of the effect at `index`, if the registry knows it.
pub fn describe_effect(config: Option<&DeviceConfig>, index: u16) -> Option<&str> {
    config
        .and_then(|c| find_effect(c, index))
        .map(|fx| fx.description.as_str())
}

/// Description of the effect at `index`, with the `"N/A"` fallback
/// applied — the form the status surfaces render directly.
pub fn effect_label(config: Option<&DeviceConfig>, index: u16) -> &str {
    describe_effect(config, index).unwrap_or(UNKNOWN_EFFECT)
}

/// Display name for a holiday value: the `"None"` sentinel reads as
/// `"Automatic"`, everything else is shown verbatim. The underlying
/// value (what gets written back to the device) is never rewritten.
pub fn holiday_display_name(holiday: &str) -> &str {
    if holiday == HOLIDAY_NONE {
        HOLIDAY_AUTOMATIC
    } else {
        holiday
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use glowfly_api::models::EffectInfo;
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_config() -> DeviceConfig {
        DeviceConfig {
            cur_effect: 3,
            cur_effect_name: "FxC2".into(),
            board_name: "pixel-den".into(),
            board_uid: "E66038B7134F".into(),
            fw_version: "1.5.2".into(),
            fw_branch: "main".into(),
            build_time: "Jun 15 2025 10:30:00".into(),
            mac: "AA:BB:CC:00:11:22".into(),
            clean_boot: true,
            watchdog_reboots_count: 0,
            last_watchdog_reboot: None,
            auto: true,
            holiday: "None".into(),
            holiday_list: vec!["None".into(), "Halloween".into()],
            fx: vec![
                EffectInfo {
                    registry_index: 0,
                    name: "FxA1".into(),
                    description: "Sleep light".into(),
                },
                EffectInfo {
                    registry_index: 3,
                    name: "FxC2".into(),
                    description: "Rainbow march".into(),
                },
            ],
        }
    }

    #[test]
    fn effect_lookup_matches_by_registry_index() {
        let config = sample_config();
        assert_eq!(describe_effect(Some(&config), 3), Some("Rainbow march"));
        assert_eq!(effect_label(Some(&config), 0), "Sleep light");
    }

    #[test]
    fn effect_lookup_degrades_to_placeholder() {
        let config = sample_config();
        // Index not in the registry.
        assert_eq!(effect_label(Some(&config), 42), UNKNOWN_EFFECT);
        // Config never loaded.
        assert_eq!(effect_label(None, 3), UNKNOWN_EFFECT);
    }

    #[test]
    fn holiday_none_sentinel_displays_as_automatic() {
        assert_eq!(holiday_display_name("None"), "Automatic");
        assert_eq!(holiday_display_name("Halloween"), "Halloween");
    }
}
