//! # Calendar Handlers
//!
//! The calendar screens (guide, escort and staff calendars) all render the
//! same reconciled view: one slot per activity/date/time with booking and
//! participant totals, capacity, and the staff currently assigned.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use tourdesk_core::{
    errors::TourError,
    models::{calendar::CalendarQuery, slot::Reconciliation},
    reconcile::{ReconcileOptions, SlotReconciler},
};

use crate::{middleware::error_handling::AppError, ApiState};

/// Query parameters for the calendar endpoint
#[derive(Debug, Deserialize)]
pub struct CalendarParams {
    /// First day of the range (inclusive)
    pub from: NaiveDate,

    /// Last day of the range (inclusive)
    pub to: NaiveDate,

    /// Restrict the view to one activity
    pub activity_id: Option<String>,

    /// Count cancelled bookings in the totals
    pub include_cancelled: Option<bool>,
}

/// Returns the reconciled calendar for a date range
///
/// # Endpoint
///
/// ```text
/// GET /api/calendar?from=2026-01-10&to=2026-01-12&activity_id=217949
/// ```
///
/// # Errors
///
/// * `TourError::Validation` - `from` is after `to`
/// * `TourError::Persistence` - the fetch collaborator failed
#[axum::debug_handler]
pub async fn get_calendar(
    State(state): State<Arc<ApiState>>,
    Query(params): Query<CalendarParams>,
) -> Result<Json<Reconciliation>, AppError> {
    if params.from > params.to {
        return Err(AppError(TourError::Validation(format!(
            "Invalid range: {} is after {}",
            params.from, params.to
        ))));
    }

    let query = CalendarQuery {
        from: params.from,
        to: params.to,
        activity_id: params.activity_id.filter(|id| !id.trim().is_empty()),
    };
    let rows = state.source.fetch_calendar(&query).await?;

    let options = ReconcileOptions {
        include_cancelled: params.include_cancelled.unwrap_or(false),
    };
    let reconciliation = SlotReconciler::new(&state.settings).reconcile(rows, options);

    Ok(Json(reconciliation))
}
