#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use chrono::{TimeZone, Utc};
use tourdesk_api::{build_router, ApiState};
use tourdesk_core::{
    models::{
        assignment::{Assignment, StaffMember, StaffRole},
        availability::{Availability, AvailabilityStatus},
        booking::{Booking, BookingStatus, Participant},
        calendar::CalendarRows,
    },
    settings::EngineSettings,
    time_key::TimeKey,
};
use tourdesk_db::mock::{MockAssignmentStore, MockCalendarSource};

pub const DAY: &str = "2026-01-10";
pub const TARGET_SLOT: &str = "217949_2026-01-10_10:00";

pub struct TestContext {
    pub source: MockCalendarSource,
    pub store: MockAssignmentStore,
    pub settings: EngineSettings,
    pub enforce_conflicts_on_write: bool,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            source: MockCalendarSource::new(),
            store: MockAssignmentStore::new(),
            settings: EngineSettings::default(),
            enforce_conflicts_on_write: false,
        }
    }

    /// Source that answers every calendar fetch with `rows`.
    pub fn with_rows(mut self, rows: CalendarRows) -> Self {
        self.source
            .expect_fetch_calendar()
            .returning(move |_| Ok(rows.clone()));
        self
    }

    pub fn server(self) -> TestServer {
        let state = Arc::new(ApiState {
            source: Arc::new(self.source),
            store: Arc::new(self.store),
            settings: self.settings,
            enforce_conflicts_on_write: self.enforce_conflicts_on_write,
        });
        TestServer::new(build_router(state)).unwrap()
    }
}

pub fn availability(activity_id: &str, time: &str, opening: u32, sold: u32) -> Availability {
    Availability {
        activity_id: activity_id.to_string(),
        activity_title: format!("Tour {}", activity_id),
        local_date: DAY.to_string(),
        local_time: time.to_string(),
        vacancy_opening: opening,
        vacancy_sold: sold,
        vacancy_available: opening.saturating_sub(sold),
        status: AvailabilityStatus::Available,
    }
}

pub fn booking(booking_id: &str, activity_id: &str, time: &str, category: &str, quantity: u32) -> Booking {
    Booking {
        booking_id: booking_id.to_string(),
        activity_id: activity_id.to_string(),
        activity_title: format!("Tour {}", activity_id),
        start_date_time: format!("{}T{}:00", DAY, time),
        status: BookingStatus::Confirmed,
        created_at: Utc.with_ymd_and_hms(2025, 12, 1, 9, 0, 0).unwrap(),
        total_price: 40.0,
        participants: vec![Participant {
            category: Some(category.to_string()),
            quantity: Some(quantity),
            name: None,
            age: None,
        }],
    }
}

pub fn guide(activity_id: &str, time: &str, guide_id: &str) -> Assignment {
    Assignment {
        slot: TimeKey::new(activity_id, DAY, time),
        resource_id: guide_id.to_string(),
        resource_name: format!("Guide {}", guide_id),
        role: StaffRole::Guide,
    }
}

pub fn staff_member(id: &str) -> StaffMember {
    StaffMember {
        id: id.to_string(),
        name: format!("Guide {}", id),
        role: StaffRole::Guide,
    }
}

/// One day with three slots:
/// - 217949 at 10:00, guide g1 assigned
/// - 300100 at 11:30, guide g2 assigned
/// - 300100 at 15:00, nobody assigned
pub fn day_rows() -> CalendarRows {
    CalendarRows {
        availabilities: vec![
            availability("217949", "10:00", 20, 5),
            availability("300100", "11:30", 15, 2),
            availability("300100", "15:00", 15, 0),
        ],
        bookings: vec![
            booking("B1", "217949", "10:00", "Adult", 2),
            booking("B2", "217949", "10:00", "Child 6-12", 1),
            booking("B3", "300100", "11:30", "Adult", 2),
        ],
        assignments: vec![guide("217949", "10:00", "g1"), guide("300100", "11:30", "g2")],
    }
}
