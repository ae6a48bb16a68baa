//! disease.sh API integration for global COVID-19 statistics.
//!
//! Two read-only endpoints are consumed:
//!
//! - `/all` — the current global aggregate snapshot (one flat record)
//! - `/historical/all?lastdays=all` — three date-keyed cumulative series
//!
//! Payloads are decoded into typed structs at the fetch boundary; a shape
//! mismatch fails fast as [`DataError::MalformedResponse`] instead of leaking
//! missing fields into the views.

use std::fmt;
use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::error::DataError;

pub const DEFAULT_BASE_URL: &str = "https://disease.sh/v3/covid-19";

const SNAPSHOT_PATH: &str = "/all";
const HISTORICAL_PATH: &str = "/historical/all";

/// Transport retry policy: attempts per request and fixed spacing between them.
pub const DEFAULT_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Current global aggregate statistics (point-in-time).
///
/// Field names follow the feed's camelCase keys. All counters are cumulative
/// non-negative integers; the per-million / per-capita metrics are derived by
/// the feed and passed through untouched.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSnapshot {
    /// Last-updated timestamp, milliseconds since the Unix epoch.
    pub updated: u64,
    pub cases: u64,
    pub today_cases: u64,
    pub deaths: u64,
    pub today_deaths: u64,
    pub recovered: u64,
    pub today_recovered: u64,
    pub active: u64,
    pub critical: u64,
    pub cases_per_one_million: f64,
    pub deaths_per_one_million: f64,
    pub tests: u64,
    pub tests_per_one_million: f64,
    pub population: u64,
    pub one_case_per_people: f64,
    pub one_death_per_people: f64,
    pub one_test_per_people: f64,
    pub active_per_one_million: f64,
    pub recovered_per_one_million: f64,
    pub critical_per_one_million: f64,
}

/// One date-keyed cumulative series, in feed order.
///
/// The feed publishes dates in ascending chronological order and the chart
/// contract preserves that order exactly, so we cannot decode into a plain
/// `HashMap`. A custom map visitor keeps the entries as they appear on the
/// wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateSeries {
    entries: Vec<(String, u64)>,
}

impl DateSeries {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in feed order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), *value))
    }

    #[cfg(test)]
    pub fn from_pairs(pairs: &[(&str, u64)]) -> Self {
        Self {
            entries: pairs
                .iter()
                .map(|(key, value)| (key.to_string(), *value))
                .collect(),
        }
    }
}

impl<'de> Deserialize<'de> for DateSeries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DateSeriesVisitor;

        impl<'de> Visitor<'de> for DateSeriesVisitor {
            type Value = DateSeries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of date keys to cumulative counts")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, u64>()? {
                    entries.push(entry);
                }
                Ok(DateSeries { entries })
            }
        }

        deserializer.deserialize_map(DateSeriesVisitor)
    }
}

/// Full-history payload: three cumulative series sharing one date-key set.
///
/// Key alignment is a feed guarantee; it is validated during normalization,
/// not here.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoricalSeries {
    pub cases: DateSeries,
    pub deaths: DateSeries,
    pub recovered: DateSeries,
}

#[derive(Clone)]
pub struct CovidClient {
    client: Client,
    base_url: String,
    retries: u32,
    retry_delay: Duration,
}

impl CovidClient {
    pub fn new(base_url: impl Into<String>, retries: u32, retry_delay: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            retries: retries.max(1),
            retry_delay,
        }
    }

    pub fn fetch_snapshot(&self) -> Result<GlobalSnapshot, DataError> {
        self.get_json(SNAPSHOT_PATH, &[])
    }

    pub fn fetch_historical(&self) -> Result<HistoricalSeries, DataError> {
        self.get_json(HISTORICAL_PATH, &[("lastdays", "all")])
    }

    /// GET + decode with bounded retry.
    ///
    /// Only transport failures are retried; a response that arrived but failed
    /// to decode will not improve on a second attempt.
    fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, DataError> {
        let url = format!("{}{path}", self.base_url);
        let mut last_err = None;

        for attempt in 0..self.retries {
            if attempt > 0 {
                thread::sleep(self.retry_delay);
            }
            match self.try_get(&url, query) {
                Ok(value) => return Ok(value),
                Err(err @ DataError::Network(_)) => last_err = Some(err),
                Err(err) => return Err(err),
            }
        }

        Err(last_err
            .unwrap_or_else(|| DataError::Network(format!("request to {url} failed"))))
    }

    fn try_get<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, DataError> {
        let resp = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(|e| DataError::Network(format!("request to {url} failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DataError::Network(format!(
                "{url} returned status {status}"
            )));
        }

        let body = resp
            .text()
            .map_err(|e| DataError::Network(format!("failed to read {url} response: {e}")))?;

        serde_json::from_str(&body).map_err(|e| {
            DataError::MalformedResponse(format!("failed to decode {url} response: {e}"))
        })
    }
}

impl Default for CovidClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_RETRIES, DEFAULT_RETRY_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_series_preserves_json_object_order() {
        let json = r#"{"1/22/20": 555, "1/23/20": 654, "1/24/20": 941}"#;
        let series: DateSeries = serde_json::from_str(json).unwrap();
        let keys: Vec<&str> = series.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["1/22/20", "1/23/20", "1/24/20"]);
        let values: Vec<u64> = series.iter().map(|(_, value)| value).collect();
        assert_eq!(values, vec![555, 654, 941]);
    }

    #[test]
    fn historical_payload_decodes_all_three_series() {
        let json = r#"{
            "cases": {"1/1/21": 10, "1/2/21": 12},
            "deaths": {"1/1/21": 1, "1/2/21": 1},
            "recovered": {"1/1/21": 5, "1/2/21": 6}
        }"#;
        let series: HistoricalSeries = serde_json::from_str(json).unwrap();
        assert_eq!(series.cases.len(), 2);
        assert_eq!(series.deaths.len(), 2);
        assert_eq!(series.recovered.len(), 2);
    }

    #[test]
    fn snapshot_decode_rejects_missing_fields() {
        // A truncated record must fail as a decode error, not produce zeros.
        let json = r#"{"updated": 1, "cases": 2}"#;
        let decoded: Result<GlobalSnapshot, _> = serde_json::from_str(json);
        assert!(decoded.is_err());
    }

    #[test]
    fn snapshot_decodes_camel_case_feed_record() {
        let json = r#"{
            "updated": 1678300000000,
            "cases": 100, "todayCases": 4,
            "deaths": 10, "todayDeaths": 1,
            "recovered": 80, "todayRecovered": 3,
            "active": 10, "critical": 2,
            "casesPerOneMillion": 12.5, "deathsPerOneMillion": 1.25,
            "tests": 500, "testsPerOneMillion": 62.5,
            "population": 8000000,
            "oneCasePerPeople": 80000.0, "oneDeathPerPeople": 800000.0,
            "oneTestPerPeople": 16000.0,
            "activePerOneMillion": 1.25, "recoveredPerOneMillion": 10.0,
            "criticalPerOneMillion": 0.25
        }"#;
        let snapshot: GlobalSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.today_cases, 4);
        assert_eq!(snapshot.active, 10);
        assert_eq!(snapshot.population, 8_000_000);
    }
}
