use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tourdesk_core::{
    models::{
        assignment::{Assignment, StaffMember, StaffRole},
        availability::{Availability, AvailabilityStatus},
        booking::{Booking, BookingStatus, Participant},
    },
    time_key::TimeKey,
};
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAvailability {
    pub activity_id: String,
    pub activity_title: String,
    pub local_date: String,
    pub local_time: String,
    pub vacancy_opening: i32,
    pub vacancy_sold: i32,
    pub vacancy_available: i32,
    pub status: String,
}

impl DbAvailability {
    pub fn into_model(self) -> Availability {
        let status = AvailabilityStatus::parse(&self.status).unwrap_or_else(|| {
            warn!(
                activity_id = %self.activity_id,
                status = %self.status,
                "Unknown availability status, treating slot as closed"
            );
            AvailabilityStatus::Closed
        });

        Availability {
            activity_id: self.activity_id,
            activity_title: self.activity_title,
            local_date: self.local_date,
            local_time: self.local_time,
            vacancy_opening: non_negative(self.vacancy_opening),
            vacancy_sold: non_negative(self.vacancy_sold),
            vacancy_available: non_negative(self.vacancy_available),
            status,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBooking {
    pub id: i64,
    pub booking_id: String,
    pub activity_id: String,
    pub activity_title: String,
    pub start_date_time: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub total_price: f64,
}

impl DbBooking {
    pub fn into_model(self, participants: Vec<Participant>) -> Booking {
        Booking {
            booking_id: self.booking_id,
            activity_id: self.activity_id,
            activity_title: self.activity_title,
            start_date_time: self.start_date_time,
            status: BookingStatus::parse(&self.status),
            created_at: self.created_at,
            total_price: self.total_price,
            participants,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbParticipant {
    pub booking_row_id: i64,
    pub category: Option<String>,
    pub quantity: Option<i32>,
    pub passenger_name: Option<String>,
    pub age: Option<i32>,
}

impl DbParticipant {
    pub fn into_model(self) -> Participant {
        Participant {
            category: self.category,
            quantity: self.quantity.and_then(|q| u32::try_from(q).ok()),
            name: self.passenger_name,
            age: self.age.and_then(|a| u32::try_from(a).ok()),
        }
    }
}

/// Joins booking revision rows with their participant rows.
pub fn assemble_bookings(bookings: Vec<DbBooking>, participants: Vec<DbParticipant>) -> Vec<Booking> {
    let mut by_booking: HashMap<i64, Vec<Participant>> = HashMap::new();
    for participant in participants {
        by_booking
            .entry(participant.booking_row_id)
            .or_default()
            .push(participant.into_model());
    }

    bookings
        .into_iter()
        .map(|booking| {
            let participants = by_booking.remove(&booking.id).unwrap_or_default();
            booking.into_model(participants)
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAssignment {
    pub activity_id: String,
    pub local_date: String,
    pub local_time: String,
    pub staff_id: String,
    pub staff_name: String,
    pub role: String,
}

impl DbAssignment {
    /// `None` when the stored role is not one the engine knows.
    pub fn into_model(self) -> Option<Assignment> {
        let role = match self.role.parse::<StaffRole>() {
            Ok(role) => role,
            Err(_) => {
                warn!(staff_id = %self.staff_id, role = %self.role, "Skipping assignment with unknown role");
                return None;
            }
        };

        Some(Assignment {
            slot: TimeKey::new(self.activity_id, self.local_date, &self.local_time),
            resource_id: self.staff_id,
            resource_name: self.staff_name,
            role,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbStaff {
    pub id: String,
    pub name: String,
    pub role: String,
}

impl DbStaff {
    pub fn into_model(self) -> Option<StaffMember> {
        let role = self.role.parse::<StaffRole>().ok()?;
        Some(StaffMember {
            id: self.id,
            name: self.name,
            role,
        })
    }
}

fn non_negative(value: i32) -> u32 {
    u32::try_from(value).unwrap_or(0)
}
