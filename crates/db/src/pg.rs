use async_trait::async_trait;
use tourdesk_core::{
    models::{
        assignment::{StaffMember, StaffRole},
        calendar::{CalendarQuery, CalendarRows},
    },
    time_key::TimeKey,
};
use tracing::debug;

use crate::{
    collaborators::{AssignmentStore, CalendarSource},
    models::assemble_bookings,
    repositories::{assignment, availability, booking, staff},
    DbPool,
};

/// PostgreSQL-backed implementation of both collaborators.
#[derive(Clone)]
pub struct PgTourStore {
    pool: DbPool,
}

impl PgTourStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CalendarSource for PgTourStore {
    async fn fetch_calendar(&self, query: &CalendarQuery) -> eyre::Result<CalendarRows> {
        let activity_id = query.activity_id.as_deref();

        let availabilities =
            availability::get_availabilities_in_range(&self.pool, query.from, query.to, activity_id).await?;
        let bookings = booking::get_bookings_in_range(&self.pool, query.from, query.to, activity_id).await?;
        let row_ids: Vec<i64> = bookings.iter().map(|b| b.id).collect();
        let participants = booking::get_participants_for_bookings(&self.pool, &row_ids).await?;
        let assignments =
            assignment::get_assignments_in_range(&self.pool, query.from, query.to, activity_id).await?;

        debug!(
            "Fetched calendar {}..{}: {} availability, {} booking, {} assignment rows",
            query.from,
            query.to,
            availabilities.len(),
            bookings.len(),
            assignments.len()
        );

        Ok(CalendarRows {
            availabilities: availabilities.into_iter().map(|row| row.into_model()).collect(),
            bookings: assemble_bookings(bookings, participants),
            assignments: assignments.into_iter().filter_map(|row| row.into_model()).collect(),
        })
    }

    async fn fetch_staff(&self, role: StaffRole) -> eyre::Result<Vec<StaffMember>> {
        let rows = staff::get_active_staff_by_role(&self.pool, role).await?;
        Ok(rows.into_iter().filter_map(|row| row.into_model()).collect())
    }
}

#[async_trait]
impl AssignmentStore for PgTourStore {
    async fn add_assignment(&self, slot: &TimeKey, resource_id: &str, role: StaffRole) -> eyre::Result<()> {
        assignment::insert_assignment(&self.pool, slot, resource_id, role).await
    }

    async fn remove_assignment(&self, slot: &TimeKey, resource_id: &str, role: StaffRole) -> eyre::Result<()> {
        assignment::delete_assignment(&self.pool, slot, resource_id, role).await
    }
}
