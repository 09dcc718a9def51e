//! # Error Handling Middleware
//!
//! This module provides a standardized way to handle errors in the TourDesk API.
//! It maps domain-specific errors to appropriate HTTP status codes and JSON
//! error responses, ensuring a consistent error handling experience across
//! the entire API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tourdesk_core::errors::TourError;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps domain-specific `TourError` instances and implements
/// `IntoResponse` to convert them into HTTP responses with appropriate
/// status codes and JSON payloads.
///
/// # Example
///
/// ```
/// use axum::Json;
/// use tourdesk_api::middleware::error_handling::AppError;
/// use tourdesk_core::{errors::TourError, time_key::TimeKey};
///
/// async fn handler(raw_key: String) -> Result<Json<String>, AppError> {
///     let key: TimeKey = raw_key.parse()?;
///     Ok(Json(key.to_string()))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub TourError);

/// Converts application errors to HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes
        let status = match &self.0 {
            TourError::NotFound(_) => StatusCode::NOT_FOUND,
            TourError::Validation(_) => StatusCode::BAD_REQUEST,
            TourError::Conflict(_) => StatusCode::CONFLICT,
            TourError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            TourError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        }

        // Get the error message and format as JSON
        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        // Combine status code and JSON body into a response
        (status, body).into_response()
    }
}

/// Automatic conversion from TourError to AppError
///
/// This implementation allows using `?` operator with functions that return
/// `Result<T, TourError>` in handler functions that return `Result<T, AppError>`.
impl From<TourError> for AppError {
    fn from(err: TourError) -> Self {
        AppError(err)
    }
}

/// Automatic conversion from eyre::Report to AppError
///
/// Collaborator failures surface as `eyre::Report`; they are wrapped in
/// `TourError::Persistence`.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(TourError::Persistence(err))
    }
}

/// Maps a TourError to an HTTP response
///
/// # Arguments
///
/// * `err` - The TourError to convert
///
/// # Returns
///
/// * `Response` - An HTTP response with appropriate status code and body
pub fn map_error(err: TourError) -> Response {
    AppError(err).into_response()
}
