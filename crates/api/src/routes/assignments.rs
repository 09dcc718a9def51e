use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/slots/:slot_key/candidates",
            get(handlers::assignments::list_candidates),
        )
        .route(
            "/api/slots/:slot_key/assignments/:role",
            put(handlers::assignments::update_assignments),
        )
}
