use axum::http::StatusCode;
use mockall::predicate;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tourdesk_api::handlers::assignments::CandidatesResponse;
use tourdesk_core::{
    assignment_diff::{ApplyOutcome, AssignmentOpKind},
    models::assignment::StaffRole,
};

use crate::test_utils::{day_rows, staff_member, TestContext, TARGET_SLOT};

fn with_guides(mut ctx: TestContext) -> TestContext {
    ctx.source
        .expect_fetch_staff()
        .with(predicate::eq(StaffRole::Guide))
        .returning(|_| Ok(vec![staff_member("g1"), staff_member("g2"), staff_member("g3")]));
    ctx
}

#[tokio::test]
async fn test_candidates_flag_busy_guides() {
    let server = with_guides(TestContext::new().with_rows(day_rows())).server();

    let response = server
        .get(&format!("/api/slots/{}/candidates", TARGET_SLOT))
        .add_query_param("role", "guide")
        .await;

    response.assert_status_ok();
    let body: CandidatesResponse = response.json();
    assert_eq!(body.slot.to_string(), TARGET_SLOT);
    assert_eq!(body.candidates.len(), 3);

    // g1 is the current assignment and defaults to selected
    let g1 = &body.candidates[0];
    assert!(g1.selected);
    assert!(g1.conflict.is_none());
    assert!(g1.selectable);

    // g2 guides 300100 at 11:30, 90 minutes away
    let g2 = &body.candidates[1];
    assert!(!g2.selected);
    assert!(!g2.selectable);
    let conflict = g2.conflict.as_ref().unwrap();
    assert_eq!(conflict.slot_time, "11:30");
    assert_eq!(conflict.activity_title, "Tour 300100");

    let g3 = &body.candidates[2];
    assert!(!g3.selected);
    assert!(g3.selectable);
}

#[tokio::test]
async fn test_candidates_session_selection_keeps_conflicted_guide_selectable() {
    let server = with_guides(TestContext::new().with_rows(day_rows())).server();

    let response = server
        .get(&format!("/api/slots/{}/candidates", TARGET_SLOT))
        .add_query_param("role", "guide")
        .add_query_param("selected", "g2, g3")
        .await;

    response.assert_status_ok();
    let body: CandidatesResponse = response.json();

    let g1 = &body.candidates[0];
    assert!(!g1.selected);

    let g2 = &body.candidates[1];
    assert!(g2.selected);
    assert!(g2.conflict.is_some());
    assert!(g2.selectable);
}

#[tokio::test]
async fn test_candidates_shared_role_has_no_conflicts() {
    let mut ctx = TestContext::new().with_rows(day_rows());
    ctx.source
        .expect_fetch_staff()
        .with(predicate::eq(StaffRole::Escort))
        .returning(|_| Ok(vec![staff_member("g2")]));
    let server = ctx.server();

    let response = server
        .get(&format!("/api/slots/{}/candidates", TARGET_SLOT))
        .add_query_param("role", "escort")
        .await;

    let body: CandidatesResponse = response.json();
    assert_eq!(body.role, StaffRole::Escort);
    assert!(body.candidates[0].conflict.is_none());
    assert!(body.candidates[0].selectable);
}

#[tokio::test]
async fn test_candidates_reject_malformed_slot_key() {
    let server = TestContext::new().server();

    let response = server
        .get("/api/slots/not-a-key/candidates")
        .add_query_param("role", "guide")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .get("/api/slots/217949_2026-13-45_10:00/candidates")
        .add_query_param("role", "guide")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_candidates_unknown_slot_is_not_found() {
    let server = TestContext::new().with_rows(day_rows()).server();

    let response = server
        .get("/api/slots/217949_2026-01-10_18:00/candidates")
        .add_query_param("role", "guide")
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_applies_removals_then_additions() {
    let mut ctx = TestContext::new().with_rows(day_rows());
    let mut seq = mockall::Sequence::new();
    ctx.store
        .expect_remove_assignment()
        .withf(|slot, id, role| slot.to_string() == TARGET_SLOT && id == "g1" && *role == StaffRole::Guide)
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _| Ok(()));
    ctx.store
        .expect_add_assignment()
        .withf(|slot, id, role| slot.to_string() == TARGET_SLOT && id == "g3" && *role == StaffRole::Guide)
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _| Ok(()));
    let server = ctx.server();

    let response = server
        .put(&format!("/api/slots/{}/assignments/guide", TARGET_SLOT))
        .json(&json!({ "selected": ["g3"] }))
        .await;

    response.assert_status_ok();
    let outcome: ApplyOutcome = response.json();
    assert!(outcome.is_complete());
    let kinds: Vec<AssignmentOpKind> = outcome.applied.iter().map(|op| op.kind).collect();
    assert_eq!(kinds, vec![AssignmentOpKind::Remove, AssignmentOpKind::Add]);
}

#[tokio::test]
async fn test_update_unchanged_selection_touches_nothing() {
    // No store expectations: any call would fail the test
    let server = TestContext::new().with_rows(day_rows()).server();

    let response = server
        .put(&format!("/api/slots/{}/assignments/guide", TARGET_SLOT))
        .json(&json!({ "selected": ["g1"] }))
        .await;

    response.assert_status_ok();
    let outcome: ApplyOutcome = response.json();
    assert_eq!(outcome, ApplyOutcome::default());
}

#[tokio::test]
async fn test_update_partial_failure_is_multi_status() {
    let mut ctx = TestContext::new().with_rows(day_rows());
    ctx.store
        .expect_add_assignment()
        .withf(|_, id, _| id == "g3")
        .returning(|_, _, _| Err(eyre::eyre!("write timed out")));
    ctx.store
        .expect_add_assignment()
        .withf(|_, id, _| id == "g4")
        .returning(|_, _, _| Ok(()));
    let server = ctx.server();

    let response = server
        .put(&format!("/api/slots/{}/assignments/guide", TARGET_SLOT))
        .json(&json!({ "selected": ["g1", "g3", "g4"] }))
        .await;

    response.assert_status(StatusCode::MULTI_STATUS);
    let outcome: ApplyOutcome = response.json();
    assert_eq!(outcome.applied.len(), 1);
    assert_eq!(outcome.applied[0].resource_id, "g4");
    assert_eq!(outcome.failed.len(), 1);
    assert_eq!(outcome.failed[0].operation.resource_id, "g3");
    assert!(outcome.failed[0].reason.contains("write timed out"));
}

#[tokio::test]
async fn test_update_allows_conflicting_guide_when_not_enforced() {
    let mut ctx = TestContext::new().with_rows(day_rows());
    ctx.store
        .expect_add_assignment()
        .withf(|_, id, _| id == "g2")
        .times(1)
        .returning(|_, _, _| Ok(()));
    let server = ctx.server();

    let response = server
        .put(&format!("/api/slots/{}/assignments/guide", TARGET_SLOT))
        .json(&json!({ "selected": ["g1", "g2"] }))
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_update_rejects_conflicting_guide_when_enforced() {
    let mut ctx = TestContext::new().with_rows(day_rows());
    ctx.enforce_conflicts_on_write = true;
    let server = ctx.server();

    let response = server
        .put(&format!("/api/slots/{}/assignments/guide", TARGET_SLOT))
        .json(&json!({ "selected": ["g1", "g2"] }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("Guide g2"));
}

#[tokio::test]
async fn test_update_rejects_unknown_role() {
    let server = TestContext::new().server();

    let response = server
        .put(&format!("/api/slots/{}/assignments/chef", TARGET_SLOT))
        .json(&json!({ "selected": [] }))
        .await;

    assert!(response.status_code().is_client_error());
}
