//! Boundaries between the engine and storage. The engine only ever sees the
//! rows these return and the operations it asks them to perform.

use async_trait::async_trait;
use mockall::automock;
use tourdesk_core::{
    models::{
        assignment::{StaffMember, StaffRole},
        calendar::{CalendarQuery, CalendarRows},
    },
    time_key::TimeKey,
};

/// Date-range fetches of availability, booking and assignment rows.
#[automock]
#[async_trait]
pub trait CalendarSource: Send + Sync {
    async fn fetch_calendar(&self, query: &CalendarQuery) -> eyre::Result<CalendarRows>;

    /// Active staff that can fill `role`.
    async fn fetch_staff(&self, role: StaffRole) -> eyre::Result<Vec<StaffMember>>;
}

/// Persists individual assignment changes. Each call succeeds or fails on
/// its own; there is no transaction spanning several calls.
#[automock]
#[async_trait]
pub trait AssignmentStore: Send + Sync {
    async fn add_assignment(&self, slot: &TimeKey, resource_id: &str, role: StaffRole) -> eyre::Result<()>;

    async fn remove_assignment(&self, slot: &TimeKey, resource_id: &str, role: StaffRole) -> eyre::Result<()>;
}
