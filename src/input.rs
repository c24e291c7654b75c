// src/input.rs

use crate::error::{Result, RunlogError};
use crate::models::LogEntry;
use chrono::{DateTime, Local, NaiveDate, Utc};

/// A run as entered by the user, already validated.
#[derive(Debug, Clone, PartialEq)]
pub struct RunInput {
    timestamp: DateTime<Utc>,
    duration_minutes: f64,
    distance_km: f64,
}

impl RunInput {
    /// Validate the form fields: a date, a distance and a time split into minutes and seconds.
    pub fn new(date: NaiveDate, distance_km: f64, minutes: u32, seconds: u32) -> Result<Self> {
        if !distance_km.is_finite() || distance_km <= 0.0 {
            return Err(RunlogError::InvalidInput(format!(
                "Distance must be a positive number of kilometres, got {}",
                distance_km
            )));
        }
        if seconds >= 60 {
            return Err(RunlogError::InvalidInput(format!(
                "Seconds must be below 60, got {}",
                seconds
            )));
        }
        Ok(Self {
            timestamp: date.and_time(chrono::NaiveTime::MIN).and_utc(),
            duration_minutes: f64::from(minutes) + f64::from(seconds) / 60.0,
            distance_km,
        })
    }

    /// Parse the raw text of all three fields.
    pub fn parse(date: &str, distance: &str, duration: &str) -> Result<Self> {
        let date = parse_date(date)?;
        let distance_km = parse_distance(distance)?;
        let (minutes, seconds) = parse_duration(duration)?;
        Self::new(date, distance_km, minutes, seconds)
    }

    pub fn into_entry(self) -> LogEntry {
        LogEntry::new(self.timestamp, self.duration_minutes, self.distance_km)
    }
}

/// Accepts `today`, `yesterday`, `YYYY-MM-DD` and `DD.MM.YYYY`. Shorthands follow the local calendar.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    let today = Local::now().date_naive();
    match s.to_lowercase().as_str() {
        "today" => return Ok(today),
        "yesterday" => {
            return today
                .pred_opt()
                .ok_or_else(|| RunlogError::InvalidInput("No day before today".to_string()))
        }
        _ => {}
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%d.%m.%Y"))
        .map_err(|_| {
            RunlogError::InvalidInput(format!(
                "Invalid date '{}'. Use today, yesterday, YYYY-MM-DD or DD.MM.YYYY.",
                s
            ))
        })
}

/// Kilometres as a decimal number; a comma is accepted as the decimal separator.
pub fn parse_distance(s: &str) -> Result<f64> {
    let normalized = s.trim().replace(',', ".");
    let km: f64 = normalized
        .parse()
        .map_err(|_| RunlogError::InvalidInput(format!("Invalid distance: {}", s.trim())))?;
    if !km.is_finite() || km <= 0.0 {
        return Err(RunlogError::InvalidInput(format!(
            "Distance must be greater than zero, got {}",
            s.trim()
        )));
    }
    Ok(km)
}

/// `MM:SS` or whole minutes. Returns `(minutes, seconds)`.
pub fn parse_duration(s: &str) -> Result<(u32, u32)> {
    let s = s.trim();
    let invalid = || RunlogError::InvalidInput(format!("Invalid time '{}'. Use MM:SS.", s));

    let (minutes, seconds) = match s.split_once(':') {
        Some((m, sec)) => {
            let m = m.trim();
            let sec = sec.trim();
            if m.is_empty() || sec.is_empty() {
                return Err(invalid());
            }
            (m.parse::<u32>().map_err(|_| invalid())?, sec.parse::<u32>().map_err(|_| invalid())?)
        }
        None => (s.parse::<u32>().map_err(|_| invalid())?, 0),
    };
    if seconds >= 60 {
        return Err(RunlogError::InvalidInput(format!(
            "Seconds must be below 60 in '{}'",
            s
        )));
    }
    Ok((minutes, seconds))
}
