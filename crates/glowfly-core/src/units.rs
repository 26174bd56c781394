// ── Pure numeric/string transforms ──
//
// Stateless helpers shared by every presentation surface. The brightness
// pair approximates the inverse of the LED driver's square-law perceptual
// dimming curve: percent² ≈ raw.

/// Shorten `s` to at most `max_len` characters, replacing the tail with
/// `"..."` when it overflows. Strings that fit are returned unchanged.
///
/// `max_len <= 3` is not special-cased: the head saturates to empty and
/// the result is just the ellipsis.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{head}...")
    } else {
        s.to_owned()
    }
}

/// Map a raw LED driver value (0-255) to the perceptually-linear percent
/// (0-100) shown to the user: `round(sqrt(raw*256) * 100 / 256)`.
pub fn brightness_raw_to_percent(raw: u8) -> u8 {
    let raw = f64::from(raw);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        ((raw * 256.0).sqrt() * 100.0 / 256.0).round() as u8
    }
}

/// Map a user-facing percent (0-100) back to the raw driver value:
/// `floor((percent*256/100)² / 256)`, clamped to 255. Flooring keeps a
/// percent that came from a driver value within one step of that value;
/// the unclamped formula reaches 256 at 100%.
pub fn brightness_percent_to_raw(percent: u8) -> u8 {
    let p = f64::from(percent) * 256.0 / 100.0;
    let raw = (p * p / 256.0).floor();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        raw.min(255.0) as u8
    }
}

/// Celsius to Fahrenheit, for the secondary temperature readout.
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Label for one audio-histogram bucket: the bucket's lower threshold,
/// prefixed with `>` for the open-ended top bucket.
pub fn histogram_label(
    threshold_base: u32,
    bucket_index: u32,
    bucket_width: u32,
    is_last: bool,
) -> String {
    let value = threshold_base + bucket_index * bucket_width;
    if is_last {
        format!(">{value}")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn truncate_overflowing_string() {
        assert_eq!(truncate("abcdefghij", 5), "ab...");
    }

    #[test]
    fn truncate_leaves_short_string_alone() {
        assert_eq!(truncate("short", 60), "short");
        assert_eq!(truncate("exact", 5), "exact");
    }

    #[test]
    fn truncate_tiny_limits_collapse_to_ellipsis() {
        assert_eq!(truncate("abcdefghij", 3), "...");
        assert_eq!(truncate("abcdefghij", 2), "...");
        assert_eq!(truncate("abcdefghij", 0), "...");
    }

    #[test]
    fn brightness_raw_to_percent_endpoints() {
        assert_eq!(brightness_raw_to_percent(0), 0);
        assert_eq!(brightness_raw_to_percent(255), 100);
    }

    #[test]
    fn brightness_percent_to_raw_endpoints() {
        assert_eq!(brightness_percent_to_raw(0), 0);
        // Unclamped, 100% computes to 256 — must clamp to the driver max.
        assert_eq!(brightness_percent_to_raw(100), 255);
    }

    #[test]
    fn brightness_percent_to_raw_floors_between_steps() {
        // 87% is what raw 192 displays as; rounding would come back as
        // 194, two steps off. Flooring lands on 193.
        assert_eq!(brightness_percent_to_raw(87), 193);
        assert_eq!(brightness_percent_to_raw(71), 129);
        assert_eq!(brightness_percent_to_raw(50), 64);
    }

    #[test]
    fn brightness_round_trip_within_one() {
        for raw in [0u8, 64, 128, 192, 255] {
            let back = brightness_percent_to_raw(brightness_raw_to_percent(raw));
            let diff = i16::from(back) - i16::from(raw);
            assert!(
                diff.abs() <= 1,
                "raw {raw} round-tripped to {back} (diff {diff})"
            );
        }
    }

    #[test]
    fn fahrenheit_conversion() {
        assert!((celsius_to_fahrenheit(0.0) - 32.0).abs() < f64::EPSILON);
        assert!((celsius_to_fahrenheit(45.5) - 113.9).abs() < 1e-9);
    }

    #[test]
    fn histogram_label_marks_only_the_last_bucket() {
        assert_eq!(histogram_label(950, 0, 10, false), "950");
        assert_eq!(histogram_label(950, 3, 10, false), "980");
        assert_eq!(histogram_label(950, 5, 10, true), ">1000");
    }
}
