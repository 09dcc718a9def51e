//! Minimal add/remove set to move a slot's assignments for one role from
//! what is persisted to what the editor selected.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::assignment::StaffRole;
use crate::time_key::TimeKey;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentDiff {
    pub to_add: BTreeSet<String>,
    pub to_remove: BTreeSet<String>,
}

impl AssignmentDiff {
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }

    /// Operations to submit, removals first.
    pub fn operations(&self, slot: &TimeKey, role: StaffRole) -> Vec<AssignmentOp> {
        let removals = self.to_remove.iter().map(|resource_id| AssignmentOp {
            kind: AssignmentOpKind::Remove,
            slot: slot.clone(),
            resource_id: resource_id.clone(),
            role,
        });
        let additions = self.to_add.iter().map(|resource_id| AssignmentOp {
            kind: AssignmentOpKind::Add,
            slot: slot.clone(),
            resource_id: resource_id.clone(),
            role,
        });
        removals.chain(additions).collect()
    }
}

pub fn diff(existing: &BTreeSet<String>, selected: &BTreeSet<String>) -> AssignmentDiff {
    AssignmentDiff {
        to_add: selected.difference(existing).cloned().collect(),
        to_remove: existing.difference(selected).cloned().collect(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentOpKind {
    Add,
    Remove,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentOp {
    pub kind: AssignmentOpKind,
    pub slot: TimeKey,
    pub resource_id: String,
    pub role: StaffRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedOperation {
    pub operation: AssignmentOp,
    pub reason: String,
}

/// Result of submitting a diff. Failures are listed per resource; nothing is
/// retried.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyOutcome {
    pub applied: Vec<AssignmentOp>,
    pub failed: Vec<FailedOperation>,
}

impl ApplyOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}
