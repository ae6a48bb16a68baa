//! Formatted terminal output for the non-interactive commands.
//!
//! We keep formatting code in one place so:
//! - the transform code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use chrono::DateTime;

use crate::data::GlobalSnapshot;
use crate::domain::ChartPoint;
use crate::transform;

/// Thousands-separated integer, e.g. `676024901` -> `676,024,901`.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Compact axis-style count, e.g. `676024901` -> `676.0M`.
pub fn format_compact(value: u64) -> String {
    const BILLION: u64 = 1_000_000_000;
    const MILLION: u64 = 1_000_000;
    const THOUSAND: u64 = 1_000;

    if value >= BILLION {
        format!("{:.1}B", value as f64 / BILLION as f64)
    } else if value >= MILLION {
        format!("{:.1}M", value as f64 / MILLION as f64)
    } else if value >= THOUSAND {
        format!("{:.1}K", value as f64 / THOUSAND as f64)
    } else {
        value.to_string()
    }
}

/// Millisecond epoch timestamp as a UTC datetime, or `-` if out of range.
pub fn format_updated(updated_ms: u64) -> String {
    DateTime::from_timestamp_millis(updated_ms as i64)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Full text summary of the current global snapshot.
pub fn format_snapshot_summary(snapshot: &GlobalSnapshot) -> String {
    let mut out = String::new();

    out.push_str("=== epiwatch - Global COVID-19 Snapshot ===\n");
    out.push_str(&format!("Updated: {}\n", format_updated(snapshot.updated)));

    out.push_str("\nTotal statistics:\n");
    for nv in transform::total_stats(snapshot) {
        out.push_str(&format!("  {:<16}{:>16}\n", nv.label, format_count(nv.value)));
    }

    out.push_str("\nCases distribution:\n");
    let distribution = transform::distribution(snapshot);
    let total: u64 = distribution.iter().map(|nv| nv.value).sum();
    for nv in distribution {
        let pct = if total > 0 {
            nv.value as f64 * 100.0 / total as f64
        } else {
            0.0
        };
        out.push_str(&format!(
            "  {:<16}{:>16}  ({pct:.1}%)\n",
            nv.label,
            format_count(nv.value),
        ));
    }

    out.push_str("\nToday:\n");
    for nv in transform::today_stats(snapshot) {
        out.push_str(&format!("  {:<16}{:>16}\n", nv.label, format_count(nv.value)));
    }

    out.push_str(&format!(
        "\nCritical: {} | Tests: {} | Population: {}\n",
        format_count(snapshot.critical),
        format_count(snapshot.tests),
        format_count(snapshot.population),
    ));
    out.push_str(&format!(
        "Per million: cases={:.1} deaths={:.1} tests={:.1}\n",
        snapshot.cases_per_one_million,
        snapshot.deaths_per_one_million,
        snapshot.tests_per_one_million,
    ));

    out
}

/// Text summary of the normalized historical series: range, latest point,
/// and the trailing `last` rows.
pub fn format_history_summary(points: &[ChartPoint], last: usize) -> String {
    let mut out = String::new();

    out.push_str("=== epiwatch - Historical COVID-19 Series ===\n");

    let Some(latest) = points.last() else {
        out.push_str("No historical points returned by the feed.\n");
        return out;
    };
    let first = &points[0];

    out.push_str(&format!(
        "Points: n={} | {} to {}\n",
        points.len(),
        first.date,
        latest.date
    ));
    out.push_str(&format!(
        "Latest ({}): cases={} deaths={} recovered={}\n",
        latest.date,
        format_count(latest.cases),
        format_count(latest.deaths),
        format_count(latest.recovered),
    ));

    out.push_str(&format!("\nTrailing {} rows:\n", last.min(points.len())));
    out.push_str(&format!(
        "  {:<12}{:>16}{:>14}{:>14}\n",
        "date", "cases", "deaths", "recovered"
    ));
    let start = points.len().saturating_sub(last);
    for p in &points[start..] {
        out.push_str(&format!(
            "  {:<12}{:>16}{:>14}{:>14}\n",
            p.date.to_string(),
            format_count(p.cases),
            format_count(p.deaths),
            format_count(p.recovered),
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn counts_get_thousands_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(676_024_901), "676,024,901");
    }

    #[test]
    fn compact_counts_use_k_m_b_suffixes() {
        assert_eq!(format_compact(950), "950");
        assert_eq!(format_compact(1_500), "1.5K");
        assert_eq!(format_compact(2_300_000), "2.3M");
        assert_eq!(format_compact(1_200_000_000), "1.2B");
    }

    #[test]
    fn history_summary_reports_the_last_point_as_latest() {
        let points = vec![
            ChartPoint {
                date: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
                cases: 10,
                deaths: 1,
                recovered: 5,
            },
            ChartPoint {
                date: NaiveDate::from_ymd_opt(2021, 1, 2).unwrap(),
                cases: 12,
                deaths: 1,
                recovered: 6,
            },
        ];
        let summary = format_history_summary(&points, 10);
        assert!(summary.contains("Latest (2021-01-02): cases=12 deaths=1 recovered=6"));
        assert!(summary.contains("n=2"));
    }

    #[test]
    fn history_summary_handles_an_empty_series() {
        let summary = format_history_summary(&[], 10);
        assert!(summary.contains("No historical points"));
    }
}
