// src/format.rs

use crate::models::LogEntry;
use crate::sort::SortMode;
use chrono::{DateTime, Utc};

pub fn format_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%a, %d. %B %Y").to_string()
}

pub fn format_distance(km: f64) -> String {
    format!("{:.2} km", km)
}

/// Fractional minutes as `MM:SS`.
pub fn format_minutes(minutes: f64) -> String {
    let total_seconds = (minutes * 60.0).round().max(0.0) as u64;
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

pub fn format_pace(pace: Option<f64>) -> String {
    match pace {
        Some(p) if p.is_finite() => format!("{} /km", format_minutes(p)),
        _ => "--:-- /km".to_string(),
    }
}

pub fn sort_mode_label(mode: SortMode) -> &'static str {
    match mode {
        SortMode::ByDate => "Sorted by date (most recent first)",
        SortMode::ByDistance => "Sorted by distance (longest first)",
        SortMode::ByPace => "Sorted by pace (fastest first)",
    }
}

/// One line of the log listing.
pub fn format_entry(position: usize, entry: &LogEntry) -> String {
    format!(
        "[{}] {} | {} | {} min | {}",
        position,
        format_date(entry.timestamp()),
        format_distance(entry.distance_km()),
        format_minutes(entry.duration_minutes()),
        format_pace(entry.pace())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn minutes_render_as_clock() {
        assert_eq!(format_minutes(27.5), "27:30");
        assert_eq!(format_minutes(5.0), "05:00");
        assert_eq!(format_minutes(4.999), "05:00");
        assert_eq!(format_minutes(0.0), "00:00");
    }

    #[test]
    fn pace_without_distance_renders_placeholder() {
        assert_eq!(format_pace(None), "--:-- /km");
        assert_eq!(format_pace(Some(5.25)), "05:15 /km");
    }

    #[test]
    fn entry_line_has_all_columns() {
        let entry = LogEntry::new(Utc.with_ymd_and_hms(2026, 10, 17, 0, 0, 0).unwrap(), 27.5, 5.0);
        assert_eq!(
            format_entry(1, &entry),
            "[1] Sat, 17. October 2026 | 5.00 km | 27:30 min | 05:30 /km"
        );
    }

    #[test]
    fn distance_has_two_decimals() {
        assert_eq!(format_distance(10.0), "10.00 km");
        assert_eq!(format_distance(7.456), "7.46 km");
    }
}
