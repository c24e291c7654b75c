// src/sort.rs

use crate::models::LogEntry;
use std::cmp::Ordering;

/// Ordering applied to the log. Cycles in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortMode {
    #[default]
    ByDate,
    ByDistance,
    ByPace,
}

impl SortMode {
    pub const ALL: [SortMode; 3] = [SortMode::ByDate, SortMode::ByDistance, SortMode::ByPace];

    /// The mode after this one, wrapping from the last back to the first.
    pub fn next(self) -> SortMode {
        match self {
            SortMode::ByDate => SortMode::ByDistance,
            SortMode::ByDistance => SortMode::ByPace,
            SortMode::ByPace => SortMode::ByDate,
        }
    }

    pub fn comparator(self) -> fn(&LogEntry, &LogEntry) -> Ordering {
        match self {
            SortMode::ByDate => by_date,
            SortMode::ByDistance => by_distance,
            SortMode::ByPace => by_pace,
        }
    }

    /// Stable sort, so exact ties keep their insertion order.
    pub fn sort(self, entries: &mut [LogEntry]) {
        entries.sort_by(self.comparator());
    }
}

/// Most recent run first.
fn by_date(a: &LogEntry, b: &LogEntry) -> Ordering {
    b.timestamp().cmp(&a.timestamp())
}

/// Longest run first.
fn by_distance(a: &LogEntry, b: &LogEntry) -> Ordering {
    b.distance_km().total_cmp(&a.distance_km())
}

/// Fastest run first; runs without a pace go last.
fn by_pace(a: &LogEntry, b: &LogEntry) -> Ordering {
    match (a.pace(), b.pace()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use proptest::prelude::*;

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap() + Duration::days(n)
    }

    fn run(day_offset: i64, minutes: f64, km: f64) -> LogEntry {
        LogEntry::new(day(day_offset), minutes, km)
    }

    #[test]
    fn by_distance_puts_longest_first() {
        let mut entries = vec![run(0, 10.0, 2.0), run(1, 25.0, 5.0), run(2, 6.0, 1.0)];
        SortMode::ByDistance.sort(&mut entries);
        let km: Vec<f64> = entries.iter().map(LogEntry::distance_km).collect();
        assert_eq!(km, vec![5.0, 2.0, 1.0]);
    }

    #[test]
    fn by_pace_puts_fastest_first() {
        // paces 6.0, 4.5, 5.0 min/km
        let mut entries = vec![run(0, 60.0, 10.0), run(1, 45.0, 10.0), run(2, 50.0, 10.0)];
        SortMode::ByPace.sort(&mut entries);
        let paces: Vec<f64> = entries.iter().filter_map(LogEntry::pace).collect();
        assert_eq!(paces, vec![4.5, 5.0, 6.0]);
    }

    #[test]
    fn by_date_puts_most_recent_first() {
        let mut entries = vec![run(3, 30.0, 5.0), run(10, 30.0, 5.0), run(1, 30.0, 5.0)];
        SortMode::ByDate.sort(&mut entries);
        let dates: Vec<_> = entries.iter().map(LogEntry::timestamp).collect();
        assert_eq!(dates, vec![day(10), day(3), day(1)]);
    }

    #[test]
    fn entries_without_pace_sort_last() {
        let mut entries = vec![run(0, 10.0, 0.0), run(1, 30.0, 5.0), run(2, 80.0, 10.0)];
        SortMode::ByPace.sort(&mut entries);
        assert_eq!(entries[0].pace(), Some(6.0));
        assert_eq!(entries[1].pace(), Some(8.0));
        assert_eq!(entries[2].pace(), None);
    }

    #[test]
    fn cycling_three_times_returns_to_start() {
        let mode = SortMode::ByDate;
        assert_eq!(mode.next(), SortMode::ByDistance);
        assert_eq!(mode.next().next(), SortMode::ByPace);
        assert_eq!(mode.next().next().next(), SortMode::ByDate);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let first = run(0, 20.0, 4.0);
        let second = run(5, 30.0, 4.0);
        let mut entries = vec![first.clone(), second.clone()];
        SortMode::ByDistance.sort(&mut entries);
        assert_eq!(entries, vec![first, second]);
    }

    fn arb_entry() -> impl Strategy<Value = LogEntry> {
        (0i64..400, 0.0f64..300.0, 0.0f64..50.0)
            .prop_map(|(offset, minutes, km)| run(offset, minutes, km))
    }

    proptest! {
        #[test]
        fn sorting_is_idempotent(entries in prop::collection::vec(arb_entry(), 0..40)) {
            for mode in SortMode::ALL {
                let mut once = entries.clone();
                mode.sort(&mut once);
                let mut twice = once.clone();
                mode.sort(&mut twice);
                prop_assert_eq!(once, twice);
            }
        }

        #[test]
        fn sorted_output_is_ordered(entries in prop::collection::vec(arb_entry(), 0..40)) {
            for mode in SortMode::ALL {
                let mut sorted = entries.clone();
                mode.sort(&mut sorted);
                let cmp = mode.comparator();
                for pair in sorted.windows(2) {
                    prop_assert_ne!(cmp(&pair[0], &pair[1]), Ordering::Greater);
                }
            }
        }

        #[test]
        fn comparators_are_antisymmetric(a in arb_entry(), b in arb_entry()) {
            for mode in SortMode::ALL {
                let cmp = mode.comparator();
                prop_assert_eq!(cmp(&a, &b), cmp(&b, &a).reverse());
            }
        }

        #[test]
        fn pace_matches_division(minutes in 0.0f64..300.0, km in 0.01f64..50.0) {
            let entry = run(0, minutes, km);
            prop_assert_eq!(entry.pace(), Some(minutes / km));
        }
    }
}
