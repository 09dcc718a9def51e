//! # Assignment Handlers
//!
//! Backing endpoints for the guide, escort and printing assignment editors.
//!
//! Both endpoints reload the whole day of the target slot so the conflict
//! check sees assignments on every activity, not only the one being edited.
//! Data fetched here can already be stale when the submission arrives; the
//! conflict check is advisory and concurrent edits to the same slot resolve
//! last-write-wins in the store.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, sync::Arc};
use tourdesk_core::{
    assignment_diff::{diff, ApplyOutcome},
    conflict::{annotate_candidates, CandidateStatus, ConflictDetector},
    errors::TourError,
    models::{
        assignment::StaffRole,
        calendar::CalendarQuery,
        slot::{Reconciliation, Slot},
    },
    reconcile::{ReconcileOptions, SlotReconciler},
    time_key::TimeKey,
};
use tourdesk_db::apply::apply_diff;

use crate::{middleware::error_handling::AppError, ApiState};

/// Query parameters for the candidates endpoint
#[derive(Debug, Deserialize)]
pub struct CandidatesParams {
    /// Role being edited
    pub role: StaffRole,

    /// Comma-separated resource ids selected in the current editing session.
    /// Defaults to the resources currently assigned to the slot.
    pub selected: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CandidatesResponse {
    pub slot: TimeKey,
    pub role: StaffRole,
    pub candidates: Vec<CandidateStatus>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateAssignmentsRequest {
    pub selected: Vec<String>,
}

fn parse_slot_key(raw: &str) -> Result<TimeKey, TourError> {
    let key: TimeKey = raw.parse()?;
    if key.calendar_date().is_none() {
        return Err(TourError::Validation(format!("Invalid date in slot key: {}", raw)));
    }
    Ok(key)
}

/// Reconciles every slot on the key's date.
async fn load_day(state: &ApiState, key: &TimeKey) -> Result<Reconciliation, AppError> {
    let date = key
        .calendar_date()
        .ok_or_else(|| TourError::Validation(format!("Invalid date in slot key: {}", key)))?;

    let rows = state.source.fetch_calendar(&CalendarQuery::single_day(date)).await?;
    Ok(SlotReconciler::new(&state.settings).reconcile(rows, ReconcileOptions::default()))
}

fn find_slot<'a>(day: &'a Reconciliation, key: &TimeKey) -> Result<&'a Slot, TourError> {
    day.slot(key)
        .ok_or_else(|| TourError::NotFound(format!("Slot {} not found", key)))
}

/// Lists staff for a role with their conflict status for a slot
///
/// # Endpoint
///
/// ```text
/// GET /api/slots/217949_2026-01-10_10:00/candidates?role=guide&selected=g1,g2
/// ```
///
/// A candidate with a conflict is not selectable unless it is already part
/// of the session selection, so an existing assignment can still be
/// toggled off.
///
/// # Errors
///
/// * `TourError::Validation` - malformed slot key
/// * `TourError::NotFound` - no slot exists for the key
/// * `TourError::Persistence` - the fetch collaborator failed
#[axum::debug_handler]
pub async fn list_candidates(
    State(state): State<Arc<ApiState>>,
    Path(slot_key): Path<String>,
    Query(params): Query<CandidatesParams>,
) -> Result<Json<CandidatesResponse>, AppError> {
    let key = parse_slot_key(&slot_key)?;
    let day = load_day(&state, &key).await?;
    let target = find_slot(&day, &key)?;

    let session_selected: BTreeSet<String> = match &params.selected {
        Some(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect(),
        None => target.assigned_ids(params.role),
    };

    let staff = state.source.fetch_staff(params.role).await?;
    let candidates = annotate_candidates(
        &state.settings.role_policies,
        params.role,
        target,
        &day.slots,
        &staff,
        &session_selected,
    );

    Ok(Json(CandidatesResponse {
        slot: key,
        role: params.role,
        candidates,
    }))
}

/// Replaces the assignments of one role on a slot with the submitted selection
///
/// # Endpoint
///
/// ```text
/// PUT /api/slots/217949_2026-01-10_10:00/assignments/guide
/// { "selected": ["g1", "g3"] }
/// ```
///
/// The difference against the stored assignments is applied removals first.
/// Returns `200 OK` when every operation succeeded and `207 Multi-Status`
/// when some failed; the body lists each failed resource.
///
/// # Errors
///
/// * `TourError::Validation` - malformed slot key
/// * `TourError::NotFound` - no slot exists for the key
/// * `TourError::Conflict` - write-side enforcement is on and an added
///   resource is busy within its role's window
/// * `TourError::Persistence` - the fetch collaborator failed
#[axum::debug_handler]
pub async fn update_assignments(
    State(state): State<Arc<ApiState>>,
    Path((slot_key, role)): Path<(String, StaffRole)>,
    Json(payload): Json<UpdateAssignmentsRequest>,
) -> Result<(StatusCode, Json<ApplyOutcome>), AppError> {
    let key = parse_slot_key(&slot_key)?;
    let day = load_day(&state, &key).await?;
    let target = find_slot(&day, &key)?;

    let existing = target.assigned_ids(role);
    let selected: BTreeSet<String> = payload
        .selected
        .into_iter()
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .collect();
    let changes = diff(&existing, &selected);

    if state.enforce_conflicts_on_write {
        if let Some(detector) = ConflictDetector::from_policies(&state.settings.role_policies, role) {
            let busy: Vec<String> = changes
                .to_add
                .iter()
                .filter_map(|id| detector.is_busy(id, target, &day.slots))
                .map(|conflict| {
                    format!(
                        "{} is assigned to {} at {}",
                        conflict.resource_name, conflict.activity_title, conflict.slot_time
                    )
                })
                .collect();
            if !busy.is_empty() {
                return Err(AppError(TourError::Conflict(busy.join("; "))));
            }
        }
    }

    tracing::info!(
        "Updating {} assignments on {}: +{} -{}",
        role,
        key,
        changes.to_add.len(),
        changes.to_remove.len()
    );

    let outcome = apply_diff(state.store.as_ref(), &key, role, &changes).await;
    let status = if outcome.is_complete() {
        StatusCode::OK
    } else {
        StatusCode::MULTI_STATUS
    };

    Ok((status, Json(outcome)))
}
