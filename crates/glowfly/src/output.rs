//! Output formatting for the `--output` flag.
//!
//! Detail commands (`status`, `info`, `tasks`, `config show`) hand-build
//! their table-mode text; list commands derive `Tabled` rows. The
//! structured formats (`json`, `json-compact`, `yaml`) always serialize
//! the payload itself so scripts see exactly what the board sent, and
//! `plain` emits one identifier per line.

use std::io::{self, IsTerminal, Write};

use tabled::{Table, Tabled, settings::Style};

use crate::cli::{ColorMode, OutputFormat};

/// Whether ANSI color should be emitted for `mode` on the current stdout.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// Render a list command's items. `to_row` builds the `Tabled` row for
/// table mode; `id` picks the one-per-line identifier for plain mode.
pub fn render_list<T, R>(
    format: &OutputFormat,
    items: &[T],
    to_row: impl Fn(&T) -> R,
    id: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => render_table(&items.iter().map(to_row).collect::<Vec<_>>()),
        OutputFormat::Json => json(items, true),
        OutputFormat::JsonCompact => json(items, false),
        OutputFormat::Yaml => yaml(items),
        OutputFormat::Plain => items.iter().map(id).collect::<Vec<_>>().join("\n"),
    }
}

/// Render a detail report. `table` and `plain` are lazy: the structured
/// formats serialize `data` and never invoke them.
pub fn render_report<T: serde::Serialize>(
    format: &OutputFormat,
    data: &T,
    table: impl FnOnce() -> String,
    plain: impl FnOnce() -> String,
) -> String {
    match format {
        OutputFormat::Table => table(),
        OutputFormat::Json => json(data, true),
        OutputFormat::JsonCompact => json(data, false),
        OutputFormat::Yaml => yaml(data),
        OutputFormat::Plain => plain(),
    }
}

/// Write to stdout unless `--quiet` suppressed it.
pub fn print_output(rendered: &str, quiet: bool) {
    if quiet || rendered.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{rendered}");
}

pub(crate) fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn json<T: serde::Serialize + ?Sized>(data: &T, pretty: bool) -> String {
    if pretty {
        serde_json::to_string_pretty(data)
    } else {
        serde_json::to_string(data)
    }
    .expect("serialization should not fail")
}

fn yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).expect("serialization should not fail")
}
