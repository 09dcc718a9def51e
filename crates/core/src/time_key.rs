//! Composite slot identity shared by availability, booking and assignment rows.
//!
//! Upstream tables disagree on whether times carry seconds (`10:00:00` versus
//! `10:00`), so every key is built from the minute-precision prefix of the
//! time. Inputs shorter than five characters are kept as they are.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::errors::TourError;

const NORMALIZED_TIME_LEN: usize = 5;

/// Truncates a time string to `HH:MM`.
pub fn normalize_time(time: &str) -> &str {
    match time.char_indices().nth(NORMALIZED_TIME_LEN) {
        Some((idx, _)) => &time[..idx],
        None => time,
    }
}

/// Builds the string form of a slot key: `resource_date_HH:MM`.
pub fn slot_key(resource_id: &str, date: &str, time: &str) -> String {
    format!("{}_{}_{}", resource_id, date, normalize_time(time))
}

/// Splits a start timestamp such as `2026-01-10T10:00:00` or
/// `2026-01-10 10:00:00+01` into its date and time parts.
///
/// Returns `None` when there is no separator, either side is empty, or the
/// date part is not a calendar date.
pub fn split_timestamp(timestamp: &str) -> Option<(&str, &str)> {
    let (date, time) = timestamp.trim().split_once(['T', ' '])?;
    if date.is_empty() || time.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    Some((date, time))
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeKey {
    resource_id: String,
    date: String,
    time: String,
}

impl TimeKey {
    pub fn new(resource_id: impl Into<String>, date: impl Into<String>, time: &str) -> Self {
        Self {
            resource_id: resource_id.into(),
            date: date.into(),
            time: normalize_time(time).to_string(),
        }
    }

    pub fn resource_id(&self) -> &str {
        &self.resource_id
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    /// Minutes since midnight, or `None` if the time is not `HH:MM`.
    pub fn minutes_of_day(&self) -> Option<u32> {
        let time = NaiveTime::parse_from_str(&self.time, "%H:%M").ok()?;
        Some(time.hour() * 60 + time.minute())
    }

    pub fn calendar_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

impl fmt::Display for TimeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&slot_key(&self.resource_id, &self.date, &self.time))
    }
}

impl FromStr for TimeKey {
    type Err = TourError;

    /// Parses `resource_date_time`. Resource ids may themselves contain
    /// underscores, so the key is split from the right.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.rsplitn(3, '_');
        let (Some(time), Some(date), Some(resource_id)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(TourError::Validation(format!("Invalid slot key: {}", s)));
        };

        if resource_id.is_empty() || date.is_empty() || time.is_empty() {
            return Err(TourError::Validation(format!("Invalid slot key: {}", s)));
        }

        Ok(TimeKey::new(resource_id, date, time))
    }
}

impl TryFrom<String> for TimeKey {
    type Error = TourError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeKey> for String {
    fn from(key: TimeKey) -> Self {
        key.to_string()
    }
}
