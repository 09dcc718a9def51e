//! # TourDesk API
//!
//! HTTP surface for the operations dashboard calendars and the staff
//! assignment editors. Handlers fetch rows through the collaborator traits in
//! `tourdesk-db`, run them through the `tourdesk-core` engine, and submit
//! computed assignment changes back through the store.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Middleware**: Error mapping to HTTP responses
//! - **Config**: Handle environment and application configuration

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::Router;
use eyre::{Result, WrapErr};
use tokio::net::TcpListener;
use tourdesk_core::settings::EngineSettings;
use tourdesk_db::{
    collaborators::{AssignmentStore, CalendarSource},
    pg::PgTourStore,
    DbPool,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Fetch collaborator for availability, booking, assignment and staff rows
    pub source: Arc<dyn CalendarSource>,

    /// Persistence collaborator for assignment changes
    pub store: Arc<dyn AssignmentStore>,

    /// Engine settings (exclusions, role policies, booking id prefixes)
    pub settings: EngineSettings,

    /// Re-run the conflict check when assignments are submitted
    pub enforce_conflicts_on_write: bool,
}

/// Builds the application router with all routes attached to `state`
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Reconciled calendar
        .merge(routes::calendar::routes())
        // Assignment editors
        .merge(routes::assignments::routes())
        // Attach shared state to all routes
        .with_state(state)
}

/// Starts the API server with the provided configuration and database connection
///
/// This function initializes logging, wires the PostgreSQL collaborators into
/// the shared state, configures routes, and starts the HTTP server.
///
/// # Arguments
///
/// * `config` - API configuration including host, port, and engine settings
/// * `db_pool` - PostgreSQL connection pool for database operations
pub async fn start_server(config: config::ApiConfig, db_pool: DbPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Create shared state with dependencies
    let store = Arc::new(PgTourStore::new(db_pool));
    let state = Arc::new(ApiState {
        source: store.clone(),
        store,
        settings: config.engine.clone(),
        enforce_conflicts_on_write: config.enforce_conflicts_on_write,
    });

    let app = build_router(state).layer(TraceLayer::new_for_http());

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .map(|origin| origin.parse())
            .collect::<Result<Vec<axum::http::HeaderValue>, _>>()
            .wrap_err("Invalid API_CORS_ORIGINS value")?;

        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::PUT,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(origins)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout)))
            .into_inner(),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
