use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::time_key::{normalize_time, TimeKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    Available,
    Limited,
    SoldOut,
    Closed,
}

impl AvailabilityStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "AVAILABLE" => Some(AvailabilityStatus::Available),
            "LIMITED" => Some(AvailabilityStatus::Limited),
            "SOLD_OUT" | "SOLDOUT" => Some(AvailabilityStatus::SoldOut),
            "CLOSED" => Some(AvailabilityStatus::Closed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Availability {
    pub activity_id: String,
    pub activity_title: String,
    pub local_date: String,
    pub local_time: String,
    pub vacancy_opening: u32,
    pub vacancy_sold: u32,
    pub vacancy_available: u32,
    pub status: AvailabilityStatus,
}

impl Availability {
    pub fn time_key(&self) -> TimeKey {
        TimeKey::new(self.activity_id.as_str(), self.local_date.as_str(), &self.local_time)
    }

    /// Non-empty activity, a `YYYY-MM-DD` date and a time starting `HH:MM`.
    pub fn is_well_formed(&self) -> bool {
        !self.activity_id.trim().is_empty()
            && NaiveDate::parse_from_str(&self.local_date, "%Y-%m-%d").is_ok()
            && NaiveTime::parse_from_str(normalize_time(&self.local_time), "%H:%M").is_ok()
    }
}
