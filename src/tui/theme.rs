//! Chart palette.
//!
//! Styles are static configuration, not per-render state. Metric colors are
//! stable across every widget that shows the metric (bars, gauges, cards,
//! line series) so the views read consistently.

use ratatui::style::Color;

pub const ACCENT: Color = Color::Rgb(0x63, 0x66, 0xf1);
pub const CASES: Color = Color::Rgb(0xff, 0x6b, 0x6b);
pub const DEATHS: Color = Color::Rgb(0xff, 0x8c, 0x42);
pub const RECOVERED: Color = Color::Rgb(0x51, 0xcf, 0x66);
pub const ACTIVE: Color = Color::Rgb(0xff, 0xbb, 0x28);
pub const DIM: Color = Color::Gray;
pub const WARN: Color = Color::Yellow;

/// Color for a projected metric label.
pub fn metric_color(label: &str) -> Color {
    match label {
        "Cases" | "Today Cases" | "Total Cases" => CASES,
        "Deaths" | "Today Deaths" | "Total Deaths" => DEATHS,
        "Recovered" | "Today Recovered" | "Total Recovered" => RECOVERED,
        "Active" => ACTIVE,
        _ => ACCENT,
    }
}
