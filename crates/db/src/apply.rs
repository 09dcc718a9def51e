use tourdesk_core::{
    assignment_diff::{ApplyOutcome, AssignmentDiff, AssignmentOpKind, FailedOperation},
    models::assignment::StaffRole,
    time_key::TimeKey,
};
use tracing::{debug, warn};

use crate::collaborators::AssignmentStore;

/// Submits `diff` for one slot and role, removals first.
///
/// Every operation is attempted even if an earlier one fails; failures are
/// returned per resource so the caller can decide what to retry.
pub async fn apply_diff<S>(store: &S, slot: &TimeKey, role: StaffRole, diff: &AssignmentDiff) -> ApplyOutcome
where
    S: AssignmentStore + ?Sized,
{
    let mut outcome = ApplyOutcome::default();

    if diff.is_empty() {
        debug!("Nothing to apply for {} on slot {}", role, slot);
        return outcome;
    }

    for operation in diff.operations(slot, role) {
        let result = match operation.kind {
            AssignmentOpKind::Remove => {
                store
                    .remove_assignment(&operation.slot, &operation.resource_id, operation.role)
                    .await
            }
            AssignmentOpKind::Add => {
                store
                    .add_assignment(&operation.slot, &operation.resource_id, operation.role)
                    .await
            }
        };

        match result {
            Ok(()) => outcome.applied.push(operation),
            Err(e) => {
                warn!(
                    "Failed to {:?} {} {} on slot {}: {}",
                    operation.kind, operation.role, operation.resource_id, operation.slot, e
                );
                outcome.failed.push(FailedOperation {
                    operation,
                    reason: e.to_string(),
                });
            }
        }
    }

    debug!(
        "Applied {} of {} assignment operations on slot {}",
        outcome.applied.len(),
        outcome.applied.len() + outcome.failed.len(),
        slot
    );
    outcome
}
