use axum::http::StatusCode;
use rstest::rstest;
use tourdesk_api::middleware::error_handling::map_error;
use tourdesk_core::errors::TourError;

#[rstest]
#[case(TourError::NotFound("Slot not found".to_string()), StatusCode::NOT_FOUND)]
#[case(TourError::Validation("Invalid slot key".to_string()), StatusCode::BAD_REQUEST)]
#[case(TourError::Conflict("Guide busy".to_string()), StatusCode::CONFLICT)]
#[case(TourError::Persistence(eyre::eyre!("Database error")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(
    TourError::Internal(Box::new(std::io::Error::new(std::io::ErrorKind::Other, "Internal error"))),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn test_error_status_mapping(#[case] error: TourError, #[case] expected: StatusCode) {
    let response = map_error(error);

    assert_eq!(response.status(), expected);
}

#[tokio::test]
async fn test_health_and_version() {
    let server = crate::test_utils::TestContext::new().server();

    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_json(&serde_json::json!({ "status": "ok" }));

    let response = server.get("/version").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["service"], "tourdesk-api");
}
