use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    assignment::{AssignedStaff, StaffRole},
    availability::AvailabilityStatus,
    booking::Booking,
};
use crate::time_key::TimeKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    Available,
    Limited,
    SoldOut,
    Closed,
    /// Synthesized for bookings that have no availability row.
    #[serde(rename = "no-availability-record")]
    NoAvailabilityRecord,
}

impl From<AvailabilityStatus> for SlotStatus {
    fn from(status: AvailabilityStatus) -> Self {
        match status {
            AvailabilityStatus::Available => SlotStatus::Available,
            AvailabilityStatus::Limited => SlotStatus::Limited,
            AvailabilityStatus::SoldOut => SlotStatus::SoldOut,
            AvailabilityStatus::Closed => SlotStatus::Closed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationMarker {
    pub booking_id: String,
    pub created_at: DateTime<Utc>,
}

/// Reconciled view of one activity/date/time. Recomputed on every fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub key: TimeKey,
    pub activity_title: String,
    pub status: SlotStatus,
    pub vacancy_opening: u32,
    pub vacancy_sold: u32,
    pub vacancy_available: u32,
    pub booking_count: u32,
    pub total_amount: f64,
    pub participants: BTreeMap<String, u32>,
    pub total_participants: u32,
    pub bookings: Vec<Booking>,
    pub first_reservation: Option<ReservationMarker>,
    pub last_reservation: Option<ReservationMarker>,
    pub assignments: BTreeMap<StaffRole, Vec<AssignedStaff>>,
}

impl Slot {
    pub fn assigned(&self, role: StaffRole) -> &[AssignedStaff] {
        self.assignments
            .get(&role)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_assigned(&self, role: StaffRole, resource_id: &str) -> bool {
        self.assigned(role)
            .iter()
            .any(|staff| staff.resource_id == resource_id)
    }

    pub fn assigned_ids(&self, role: StaffRole) -> BTreeSet<String> {
        self.assigned(role)
            .iter()
            .map(|staff| staff.resource_id.clone())
            .collect()
    }
}

/// Non-fatal issues found while reconciling, reported as counts only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileWarnings {
    pub malformed_bookings: usize,
    pub malformed_availability: usize,
    pub duplicate_availability: usize,
    pub cancelled_excluded: usize,
    pub unmatched_assignments: usize,
}

impl ReconcileWarnings {
    pub fn skipped_records(&self) -> usize {
        self.malformed_bookings
            + self.malformed_availability
            + self.duplicate_availability
            + self.unmatched_assignments
    }

    pub fn is_empty(&self) -> bool {
        *self == ReconcileWarnings::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reconciliation {
    pub slots: Vec<Slot>,
    /// Display order of participant categories across every slot.
    pub category_order: Vec<String>,
    pub warnings: ReconcileWarnings,
}

impl Reconciliation {
    pub fn slot(&self, key: &TimeKey) -> Option<&Slot> {
        self.slots.iter().find(|slot| &slot.key == key)
    }
}
