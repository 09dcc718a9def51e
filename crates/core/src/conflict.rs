//! Staff conflict checks for the assignment editors.
//!
//! A guide already assigned to another slot on the same day, less than the
//! window apart, is busy for the target slot. The check is advisory: it
//! decides what the editor offers, and [`crate::assignment_diff`] does not
//! re-validate.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{
    assignment::{StaffMember, StaffRole},
    slot::Slot,
};
use crate::settings::{ConflictPolicy, RolePolicies, DEFAULT_CONFLICT_WINDOW_MINUTES};
use crate::time_key::TimeKey;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictInfo {
    pub resource_id: String,
    pub resource_name: String,
    pub slot: TimeKey,
    pub slot_time: String,
    pub activity_title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConflictDetector {
    role: StaffRole,
    window_minutes: u32,
}

impl ConflictDetector {
    pub fn new(window_minutes: u32) -> Self {
        Self::for_role(StaffRole::Guide, window_minutes)
    }

    pub fn for_role(role: StaffRole, window_minutes: u32) -> Self {
        Self {
            role,
            window_minutes,
        }
    }

    /// Detector for `role`, or `None` when the role shares freely.
    pub fn from_policies(policies: &RolePolicies, role: StaffRole) -> Option<Self> {
        match policies.policy(role) {
            ConflictPolicy::Exclusive { window_minutes } => Some(Self::for_role(role, window_minutes)),
            ConflictPolicy::Shared => None,
        }
    }

    pub fn window_minutes(&self) -> u32 {
        self.window_minutes
    }

    /// First slot on the target's date, other than the target itself, that
    /// lies strictly less than the window away and already lists `candidate`.
    pub fn is_busy<'s>(
        &self,
        candidate: &str,
        target: &Slot,
        slots: impl IntoIterator<Item = &'s Slot>,
    ) -> Option<ConflictInfo> {
        let target_minutes = target.key.minutes_of_day()?;

        for other in slots {
            if other.key == target.key || other.key.date() != target.key.date() {
                continue;
            }
            let Some(other_minutes) = other.key.minutes_of_day() else {
                continue;
            };
            if other_minutes.abs_diff(target_minutes) >= self.window_minutes {
                continue;
            }

            if let Some(staff) = other
                .assigned(self.role)
                .iter()
                .find(|staff| staff.resource_id == candidate)
            {
                debug!(
                    candidate,
                    target = %target.key,
                    conflicting = %other.key,
                    "Candidate busy within conflict window"
                );
                return Some(ConflictInfo {
                    resource_id: staff.resource_id.clone(),
                    resource_name: staff.resource_name.clone(),
                    slot: other.key.clone(),
                    slot_time: other.key.time().to_string(),
                    activity_title: other.activity_title.clone(),
                });
            }
        }

        None
    }
}

impl Default for ConflictDetector {
    fn default() -> Self {
        Self::new(DEFAULT_CONFLICT_WINDOW_MINUTES)
    }
}

/// Whether a resource could be picked for a slot in the current editing session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateStatus {
    pub resource_id: String,
    pub resource_name: String,
    pub selected: bool,
    pub conflict: Option<ConflictInfo>,
    pub selectable: bool,
}

/// Annotates each candidate for `target`.
///
/// Conflicts only block new selections. A candidate already in
/// `session_selected` stays selectable so it can be toggled off.
pub fn annotate_candidates(
    policies: &RolePolicies,
    role: StaffRole,
    target: &Slot,
    slots: &[Slot],
    candidates: &[StaffMember],
    session_selected: &BTreeSet<String>,
) -> Vec<CandidateStatus> {
    let detector = ConflictDetector::from_policies(policies, role);

    candidates
        .iter()
        .map(|candidate| {
            let selected = session_selected.contains(&candidate.id);
            let conflict = detector
                .as_ref()
                .and_then(|detector| detector.is_busy(&candidate.id, target, slots));
            CandidateStatus {
                resource_id: candidate.id.clone(),
                resource_name: candidate.name.clone(),
                selected,
                selectable: selected || conflict.is_none(),
                conflict,
            }
        })
        .collect()
}
