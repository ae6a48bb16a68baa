//! Historical series normalization.
//!
//! Reshapes the three date-keyed cumulative series into one ordered sequence
//! of [`ChartPoint`]s, one per date key of `cases`, preserving feed order
//! exactly (never re-sorted). The last element is the "latest" summary.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::data::HistoricalSeries;
use crate::domain::ChartPoint;
use crate::error::DataError;

/// Normalize a historical payload into chart points.
///
/// Output length equals the number of keys in `cases`; output order equals
/// the iteration order of `cases`. The `deaths` and `recovered` series must
/// cover every `cases` key; a missing key fails with
/// [`DataError::MalformedResponse`] rather than producing a hole.
pub fn normalize_history(series: &HistoricalSeries) -> Result<Vec<ChartPoint>, DataError> {
    let deaths: HashMap<&str, u64> = series.deaths.iter().collect();
    let recovered: HashMap<&str, u64> = series.recovered.iter().collect();

    let mut points = Vec::with_capacity(series.cases.len());
    for (key, cases) in series.cases.iter() {
        let date = parse_date_key(key)?;
        let deaths = *deaths.get(key).ok_or_else(|| {
            DataError::MalformedResponse(format!("deaths series is missing date key '{key}'"))
        })?;
        let recovered = *recovered.get(key).ok_or_else(|| {
            DataError::MalformedResponse(format!("recovered series is missing date key '{key}'"))
        })?;
        points.push(ChartPoint {
            date,
            cases,
            deaths,
            recovered,
        });
    }

    Ok(points)
}

/// Parse a feed date key (`M/D/YY`, non-zero-padded, two-digit year) into a
/// calendar date in the 2000s.
///
/// Anything else — wrong token count, non-numeric tokens, a year that is not
/// exactly two digits, or an impossible calendar date — is
/// [`DataError::MalformedDateKey`].
pub fn parse_date_key(key: &str) -> Result<NaiveDate, DataError> {
    let malformed = || DataError::MalformedDateKey(key.to_string());

    let mut tokens = key.split('/');
    let (Some(month), Some(day), Some(year), None) =
        (tokens.next(), tokens.next(), tokens.next(), tokens.next())
    else {
        return Err(malformed());
    };

    if year.len() != 2 {
        return Err(malformed());
    }

    let month: u32 = month.parse().map_err(|_| malformed())?;
    let day: u32 = day.parse().map_err(|_| malformed())?;
    let year: u32 = year.parse().map_err(|_| malformed())?;

    NaiveDate::from_ymd_opt(2000 + year as i32, month, day).ok_or_else(malformed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DateSeries;

    fn two_day_series() -> HistoricalSeries {
        HistoricalSeries {
            cases: DateSeries::from_pairs(&[("1/1/21", 10), ("1/2/21", 12)]),
            deaths: DateSeries::from_pairs(&[("1/1/21", 1), ("1/2/21", 1)]),
            recovered: DateSeries::from_pairs(&[("1/1/21", 5), ("1/2/21", 6)]),
        }
    }

    #[test]
    fn date_keys_map_to_zero_padded_iso_dates() {
        assert_eq!(parse_date_key("3/5/21").unwrap().to_string(), "2021-03-05");
        assert_eq!(parse_date_key("12/31/20").unwrap().to_string(), "2020-12-31");
        assert_eq!(parse_date_key("1/22/20").unwrap().to_string(), "2020-01-22");
    }

    #[test]
    fn malformed_date_keys_are_rejected() {
        for key in ["3/5", "3/5/21/4", "", "a/b/cd", "3/5/2021", "2/30/21", "13/1/21"] {
            assert_eq!(
                parse_date_key(key),
                Err(DataError::MalformedDateKey(key.to_string())),
                "key {key:?} should be rejected"
            );
        }
    }

    #[test]
    fn normalization_preserves_length_and_feed_order() {
        let points = normalize_history(&two_day_series()).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(
            points[0],
            ChartPoint {
                date: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
                cases: 10,
                deaths: 1,
                recovered: 5,
            }
        );
        assert_eq!(
            points[1],
            ChartPoint {
                date: NaiveDate::from_ymd_opt(2021, 1, 2).unwrap(),
                cases: 12,
                deaths: 1,
                recovered: 6,
            }
        );
    }

    #[test]
    fn latest_is_the_last_element_by_feed_order() {
        // Feed order is authoritative even when it is not chronological:
        // "latest" means last-published, never max or sorted-last.
        let series = HistoricalSeries {
            cases: DateSeries::from_pairs(&[("1/2/21", 12), ("1/1/21", 10)]),
            deaths: DateSeries::from_pairs(&[("1/2/21", 1), ("1/1/21", 1)]),
            recovered: DateSeries::from_pairs(&[("1/2/21", 6), ("1/1/21", 5)]),
        };
        let points = normalize_history(&series).unwrap();
        let latest = points.last().unwrap();
        assert_eq!(latest.date, NaiveDate::from_ymd_opt(2021, 1, 1).unwrap());
        assert_eq!(latest.cases, 10);
    }

    #[test]
    fn misaligned_series_fail_instead_of_leaving_holes() {
        let series = HistoricalSeries {
            cases: DateSeries::from_pairs(&[("1/1/21", 10), ("1/2/21", 12)]),
            deaths: DateSeries::from_pairs(&[("1/1/21", 1)]),
            recovered: DateSeries::from_pairs(&[("1/1/21", 5), ("1/2/21", 6)]),
        };
        match normalize_history(&series) {
            Err(DataError::MalformedResponse(msg)) => {
                assert!(msg.contains("1/2/21"), "message should name the key: {msg}");
            }
            other => panic!("expected MalformedResponse, got {other:?}"),
        }
    }

    #[test]
    fn empty_series_normalizes_to_an_empty_sequence() {
        let series = HistoricalSeries {
            cases: DateSeries::default(),
            deaths: DateSeries::default(),
            recovered: DateSeries::default(),
        };
        assert!(normalize_history(&series).unwrap().is_empty());
    }
}
