use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::Value;
use tourdesk_core::models::{
    booking::BookingStatus,
    slot::{Reconciliation, SlotStatus},
};

use crate::test_utils::{availability, booking, day_rows, TestContext};

#[tokio::test]
async fn test_calendar_returns_reconciled_slots() {
    let server = TestContext::new().with_rows(day_rows()).server();

    let response = server
        .get("/api/calendar")
        .add_query_param("from", "2026-01-10")
        .add_query_param("to", "2026-01-10")
        .await;

    response.assert_status_ok();
    let calendar: Reconciliation = response.json();

    assert_eq!(calendar.slots.len(), 3);
    assert!(calendar.warnings.is_empty());
    assert_eq!(calendar.category_order, vec!["Adult", "Child 6-12"]);

    let first = &calendar.slots[0];
    assert_eq!(first.key.to_string(), "217949_2026-01-10_10:00");
    assert_eq!(first.booking_count, 2);
    assert_eq!(first.total_participants, 3);
    assert_eq!(first.participants.get("Adult"), Some(&2));
    assert_eq!(first.assigned_ids(tourdesk_core::models::assignment::StaffRole::Guide).len(), 1);
}

#[tokio::test]
async fn test_calendar_passes_filters_to_source() {
    let mut ctx = TestContext::new();
    ctx.source
        .expect_fetch_calendar()
        .withf(|query| {
            query.from.to_string() == "2026-01-10"
                && query.to.to_string() == "2026-01-12"
                && query.activity_id.as_deref() == Some("217949")
        })
        .times(1)
        .returning(|_| Ok(Default::default()));
    let server = ctx.server();

    let response = server
        .get("/api/calendar")
        .add_query_param("from", "2026-01-10")
        .add_query_param("to", "2026-01-12")
        .add_query_param("activity_id", "217949")
        .await;

    response.assert_status_ok();
    let calendar: Reconciliation = response.json();
    assert!(calendar.slots.is_empty());
}

#[tokio::test]
async fn test_calendar_cancelled_bookings_excluded_by_default() {
    let mut rows = day_rows();
    let mut cancelled = booking("B9", "300100", "15:00", "Adult", 4);
    cancelled.status = BookingStatus::Cancelled;
    rows.bookings.push(cancelled);
    let server = TestContext::new().with_rows(rows).server();

    let response = server
        .get("/api/calendar")
        .add_query_param("from", "2026-01-10")
        .add_query_param("to", "2026-01-10")
        .await;
    let calendar: Reconciliation = response.json();

    assert_eq!(calendar.warnings.cancelled_excluded, 1);
    let late = calendar.slots.iter().find(|s| s.key.time() == "15:00").unwrap();
    assert_eq!(late.booking_count, 0);

    let response = server
        .get("/api/calendar")
        .add_query_param("from", "2026-01-10")
        .add_query_param("to", "2026-01-10")
        .add_query_param("include_cancelled", "true")
        .await;
    let calendar: Reconciliation = response.json();

    let late = calendar.slots.iter().find(|s| s.key.time() == "15:00").unwrap();
    assert_eq!(late.booking_count, 1);
    assert_eq!(late.total_participants, 4);
}

#[tokio::test]
async fn test_calendar_orphan_booking_gets_synthesized_slot() {
    let mut rows = day_rows();
    rows.availabilities = vec![availability("217949", "10:00", 20, 5)];
    let server = TestContext::new().with_rows(rows).server();

    let response = server
        .get("/api/calendar")
        .add_query_param("from", "2026-01-10")
        .add_query_param("to", "2026-01-10")
        .await;
    let calendar: Reconciliation = response.json();

    let orphan = calendar.slots.iter().find(|s| s.key.time() == "11:30").unwrap();
    assert_eq!(orphan.status, SlotStatus::NoAvailabilityRecord);
    assert_eq!(orphan.vacancy_opening, 0);
    assert_eq!(orphan.booking_count, 1);

    let raw: Value = response.json();
    let statuses: Vec<&str> = raw["slots"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|slot| slot["status"].as_str())
        .collect();
    assert!(statuses.contains(&"no-availability-record"));
}

#[tokio::test]
async fn test_calendar_rejects_inverted_range() {
    // No expectation on the source: it must not be called
    let server = TestContext::new().server();

    let response = server
        .get("/api/calendar")
        .add_query_param("from", "2026-01-12")
        .add_query_param("to", "2026-01-10")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("Invalid range"));
}

#[tokio::test]
async fn test_calendar_source_failure_is_internal_error() {
    let mut ctx = TestContext::new();
    ctx.source
        .expect_fetch_calendar()
        .returning(|_| Err(eyre::eyre!("connection refused")));
    let server = ctx.server();

    let response = server
        .get("/api/calendar")
        .add_query_param("from", "2026-01-10")
        .add_query_param("to", "2026-01-10")
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}
