//! Shared domain types.
//!
//! These are the chart-facing shapes: the wire payloads live in `data`, the
//! transforms in `transform` reduce them to the types here.

use chrono::NaiveDate;

/// One normalized date/metric record used for time-series rendering.
///
/// `date` displays as ISO-8601 (`YYYY-MM-DD`). Points carry cumulative counts
/// and appear in feed order; the last point is the "latest" summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub cases: u64,
    pub deaths: u64,
    pub recovered: u64,
}

/// A single labeled value, the record shape bar/proportion charts consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedValue {
    pub label: &'static str,
    pub value: u64,
}

/// The active-tab selector. Session-local, defaults to the current view,
/// mutated only by explicit tab selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewSelector {
    #[default]
    Current,
    Historical,
}

impl ViewSelector {
    pub fn toggle(self) -> Self {
        match self {
            ViewSelector::Current => ViewSelector::Historical,
            ViewSelector::Historical => ViewSelector::Current,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ViewSelector::Current => "Current Statistics",
            ViewSelector::Historical => "Historical Data",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_selector_defaults_to_current_and_toggles() {
        assert_eq!(ViewSelector::default(), ViewSelector::Current);
        assert_eq!(ViewSelector::Current.toggle(), ViewSelector::Historical);
        assert_eq!(ViewSelector::Historical.toggle(), ViewSelector::Current);
    }
}
