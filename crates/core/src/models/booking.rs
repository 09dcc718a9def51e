use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Confirmed,
    Pending,
    Cancelled,
    Unknown,
}

impl BookingStatus {
    /// Lenient parse of the free-text status column.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "CONFIRMED" => BookingStatus::Confirmed,
            "PENDING" => BookingStatus::Pending,
            "CANCELLED" | "CANCELED" => BookingStatus::Cancelled,
            _ => BookingStatus::Unknown,
        }
    }

    pub fn is_cancelled(self) -> bool {
        matches!(self, BookingStatus::Cancelled)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub category: Option<String>,
    pub quantity: Option<u32>,
    pub name: Option<String>,
    pub age: Option<u32>,
}

/// One revision of a reservation line. Several rows may share a
/// `booking_id`; only the most recently created one is authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub booking_id: String,
    pub activity_id: String,
    pub activity_title: String,
    pub start_date_time: String,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub total_price: f64,
    #[serde(default)]
    pub participants: Vec<Participant>,
}
