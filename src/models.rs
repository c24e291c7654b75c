// src/models.rs

use chrono::{DateTime, Utc};

/// Surrogate key assigned by the entry store. In-memory ordering never uses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub i64);

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One recorded run. All fields are fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    timestamp: DateTime<Utc>,
    duration_minutes: f64,
    distance_km: f64,
}

impl LogEntry {
    pub fn new(timestamp: DateTime<Utc>, duration_minutes: f64, distance_km: f64) -> Self {
        Self {
            timestamp,
            duration_minutes,
            distance_km,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn duration_minutes(&self) -> f64 {
        self.duration_minutes
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    /// Minutes per kilometre, or `None` when no distance was covered.
    pub fn pace(&self) -> Option<f64> {
        if self.distance_km > 0.0 {
            Some(self.duration_minutes / self.distance_km)
        } else {
            None
        }
    }
}

/// A row read back from the entry store.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryRecord {
    pub id: EntryId,
    pub entry: LogEntry,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn pace_is_duration_over_distance() {
        let entry = LogEntry::new(at(1), 27.5, 5.0);
        assert_eq!(entry.pace(), Some(27.5 / 5.0));
        assert_eq!(entry.pace(), Some(5.5));
    }

    #[test]
    fn pace_is_undefined_without_distance() {
        let entry = LogEntry::new(at(1), 12.0, 0.0);
        assert_eq!(entry.pace(), None);
    }

    #[test]
    fn accessors_return_constructor_values() {
        let entry = LogEntry::new(at(3), 42.25, 8.4);
        assert_eq!(entry.timestamp(), at(3));
        assert_eq!(entry.duration_minutes(), 42.25);
        assert_eq!(entry.distance_km(), 8.4);
    }

    #[test]
    fn entry_id_displays_with_hash() {
        assert_eq!(EntryId(7).to_string(), "#7");
    }
}
