//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the TourDesk API server.
//! It retrieves configuration values from environment variables and provides defaults
//! where appropriate.
//!
//! ## Environment Variables
//!
//! The following environment variables are used:
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 30)
//! - `CONFLICT_WINDOW_MINUTES`: Guide conflict window (default: 180)
//! - `CATEGORY_EXCLUSIONS`: JSON object mapping activity ids to participant
//!   categories that are never counted, e.g. `{"217949": ["6 a 12 años"]}`
//! - `BOOKING_ID_PREFIXES`: Comma-separated reseller prefixes stripped from
//!   booking ids (default: "ENRO-,TTG-,PRO-,VIA-,HED-,VET-")
//! - `ENFORCE_GUIDE_CONFLICTS_ON_WRITE`: Reject conflicting additions on
//!   submission instead of only flagging them in the editor (default: false)

use eyre::{Result, WrapErr};
use std::env;
use tourdesk_core::settings::{
    CategoryExclusions, EngineSettings, RolePolicies, DEFAULT_BOOKING_ID_PREFIXES,
    DEFAULT_CONFLICT_WINDOW_MINUTES,
};
use tracing::Level;

/// Configuration for the TourDesk API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use tourdesk_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}:{}", config.host, config.port);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Reconciliation and conflict settings handed to the engine
    pub engine: EngineSettings,

    /// Whether submissions re-run the conflict check
    pub enforce_conflicts_on_write: bool,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - The API_PORT or CONFLICT_WINDOW_MINUTES value cannot be parsed
    /// - CATEGORY_EXCLUSIONS is not a JSON object of string arrays
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = env::var("DATABASE_URL")
            .wrap_err("DATABASE_URL environment variable must be set")?;

        // Logging settings
        let log_level = parse_log_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| parse_list(&origins));

        // Performance settings
        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        // Engine settings
        let conflict_window = env::var("CONFLICT_WINDOW_MINUTES")
            .ok()
            .map(|raw| raw.parse::<u32>().wrap_err("Invalid CONFLICT_WINDOW_MINUTES value"))
            .transpose()?
            .unwrap_or(DEFAULT_CONFLICT_WINDOW_MINUTES);

        let category_exclusions = match env::var("CATEGORY_EXCLUSIONS") {
            Ok(raw) => parse_category_exclusions(&raw)?,
            Err(_) => CategoryExclusions::default(),
        };

        let booking_id_prefixes = env::var("BOOKING_ID_PREFIXES")
            .map(|raw| parse_list(&raw))
            .unwrap_or_else(|_| {
                DEFAULT_BOOKING_ID_PREFIXES
                    .iter()
                    .map(|prefix| prefix.to_string())
                    .collect()
            });

        let enforce_conflicts_on_write = env::var("ENFORCE_GUIDE_CONFLICTS_ON_WRITE")
            .map(|raw| parse_flag(&raw))
            .unwrap_or(false);

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            engine: EngineSettings {
                category_exclusions,
                role_policies: RolePolicies::with_guide_window(conflict_window),
                booking_id_prefixes,
            },
            enforce_conflicts_on_write,
        })
    }

    /// Returns the server address as a string
    ///
    /// # Returns
    ///
    /// * `String` - Formatted server address (e.g., "127.0.0.1:8080")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parses the `CATEGORY_EXCLUSIONS` JSON object.
pub fn parse_category_exclusions(raw: &str) -> Result<CategoryExclusions> {
    serde_json::from_str(raw).wrap_err("Invalid CATEGORY_EXCLUSIONS value")
}

pub fn parse_log_level(raw: &str) -> Level {
    match raw.trim().to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
