#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use tourdesk_core::{
    models::{
        assignment::{Assignment, StaffRole},
        availability::{Availability, AvailabilityStatus},
        booking::{Booking, BookingStatus, Participant},
    },
    time_key::TimeKey,
};

pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 12, 1, hour, minute, 0).unwrap()
}

pub fn availability(activity_id: &str, date: &str, time: &str, opening: u32, sold: u32) -> Availability {
    Availability {
        activity_id: activity_id.to_string(),
        activity_title: format!("Activity {}", activity_id),
        local_date: date.to_string(),
        local_time: time.to_string(),
        vacancy_opening: opening,
        vacancy_sold: sold,
        vacancy_available: opening.saturating_sub(sold),
        status: AvailabilityStatus::Available,
    }
}

pub fn participant(category: &str, quantity: u32) -> Participant {
    Participant {
        category: Some(category.to_string()),
        quantity: Some(quantity),
        name: None,
        age: None,
    }
}

pub fn booking(
    booking_id: &str,
    activity_id: &str,
    start: &str,
    created_at: DateTime<Utc>,
    participants: Vec<Participant>,
) -> Booking {
    Booking {
        booking_id: booking_id.to_string(),
        activity_id: activity_id.to_string(),
        activity_title: format!("Activity {}", activity_id),
        start_date_time: start.to_string(),
        status: BookingStatus::Confirmed,
        created_at,
        total_price: 50.0,
        participants,
    }
}

pub fn guide(activity_id: &str, date: &str, time: &str, guide_id: &str) -> Assignment {
    staff(activity_id, date, time, guide_id, StaffRole::Guide)
}

pub fn staff(activity_id: &str, date: &str, time: &str, resource_id: &str, role: StaffRole) -> Assignment {
    Assignment {
        slot: TimeKey::new(activity_id, date, time),
        resource_id: resource_id.to_string(),
        resource_name: format!("Staff {}", resource_id),
        role,
    }
}
