use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{assignment::Assignment, availability::Availability, booking::Booking};

/// Date-range filter handed to the fetch collaborator. Both ends inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub activity_id: Option<String>,
}

impl CalendarQuery {
    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            from: date,
            to: date,
            activity_id: None,
        }
    }
}

/// Raw rows returned for a [`CalendarQuery`], not yet reconciled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalendarRows {
    pub availabilities: Vec<Availability>,
    pub bookings: Vec<Booking>,
    pub assignments: Vec<Assignment>,
}
