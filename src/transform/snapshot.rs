//! Snapshot projections.
//!
//! Three small fixed-shape reductions of the global snapshot, pure and total:
//! the charts branch on nothing, they just render what these return.

use crate::data::GlobalSnapshot;
use crate::domain::NamedValue;

/// Four totals for the grouped bar chart, in documented order.
pub fn total_stats(snapshot: &GlobalSnapshot) -> [NamedValue; 4] {
    [
        NamedValue { label: "Cases", value: snapshot.cases },
        NamedValue { label: "Deaths", value: snapshot.deaths },
        NamedValue { label: "Recovered", value: snapshot.recovered },
        NamedValue { label: "Active", value: snapshot.active },
    ]
}

/// Three-way case distribution for proportion display.
pub fn distribution(snapshot: &GlobalSnapshot) -> [NamedValue; 3] {
    [
        NamedValue { label: "Active", value: snapshot.active },
        NamedValue { label: "Recovered", value: snapshot.recovered },
        NamedValue { label: "Deaths", value: snapshot.deaths },
    ]
}

/// Today's deltas for the second bar chart.
pub fn today_stats(snapshot: &GlobalSnapshot) -> [NamedValue; 3] {
    [
        NamedValue { label: "Today Cases", value: snapshot.today_cases },
        NamedValue { label: "Today Deaths", value: snapshot.today_deaths },
        NamedValue { label: "Today Recovered", value: snapshot.today_recovered },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> GlobalSnapshot {
        GlobalSnapshot {
            updated: 0,
            cases: 100,
            today_cases: 4,
            deaths: 10,
            today_deaths: 1,
            recovered: 80,
            today_recovered: 3,
            active: 10,
            critical: 2,
            cases_per_one_million: 0.0,
            deaths_per_one_million: 0.0,
            tests: 0,
            tests_per_one_million: 0.0,
            population: 0,
            one_case_per_people: 0.0,
            one_death_per_people: 0.0,
            one_test_per_people: 0.0,
            active_per_one_million: 0.0,
            recovered_per_one_million: 0.0,
            critical_per_one_million: 0.0,
        }
    }

    #[test]
    fn total_stats_projects_in_documented_order() {
        let values: Vec<u64> = total_stats(&snapshot()).iter().map(|nv| nv.value).collect();
        assert_eq!(values, vec![100, 10, 80, 10]);
        let labels: Vec<&str> = total_stats(&snapshot()).iter().map(|nv| nv.label).collect();
        assert_eq!(labels, vec!["Cases", "Deaths", "Recovered", "Active"]);
    }

    #[test]
    fn distribution_projects_active_recovered_deaths() {
        let values: Vec<u64> = distribution(&snapshot()).iter().map(|nv| nv.value).collect();
        assert_eq!(values, vec![10, 80, 10]);
    }

    #[test]
    fn today_stats_projects_the_daily_deltas() {
        let values: Vec<u64> = today_stats(&snapshot()).iter().map(|nv| nv.value).collect();
        assert_eq!(values, vec![4, 1, 3]);
    }
}
