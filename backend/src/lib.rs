//! # Grocery Tracker Backend
//!
//! Records grocery expenses through a validating submission workflow and
//! serves the stored dataset back for display.
//!
//! ## Architecture
//!
//! ```text
//! HTTP clients (browser form, scripts)
//!     ↓
//! IO Layer (REST handlers, DTO mapping)
//!     ↓
//! Domain Layer (validation, submission workflow, table and summaries)
//!     ↓
//! Storage Layer (document store on SQLite)
//! ```
//!
//! Settings come from [`config::AppConfig`]; the binary in `main.rs` only
//! wires logging, configuration and the listener together.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::{ExpenseService, ExpenseTableService};
use crate::storage::DbConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub expense_service: ExpenseService<DbConnection>,
    pub expense_table_service: ExpenseTableService,
    pub range_summary_enabled: bool,
    pub chart_enabled: bool,
}

impl AppState {
    pub fn new(db_conn: DbConnection, config: &AppConfig) -> Self {
        Self {
            expense_service: ExpenseService::new(&db_conn, config.auto_refresh_after_insert),
            expense_table_service: ExpenseTableService::new(),
            range_summary_enabled: config.range_summary_enabled,
            chart_enabled: config.chart_enabled,
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up database");
    let db_conn = DbConnection::new(&config.database_url).await?;

    info!("Setting up application state");
    Ok(AppState::new(db_conn, config))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &AppConfig) -> Result<Router> {
    let origin = config
        .frontend_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("invalid frontend origin '{}'", config.frontend_origin))?;

    // CORS setup to allow frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let api_routes = Router::new()
        .merge(io::expense_apis::router())
        .merge(io::summary_apis::router());

    let mut router = Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health));

    if let Some(static_dir) = &config.static_dir {
        info!("Serving frontend from {}", static_dir.display());
        router = router.fallback_service(ServeDir::new(static_dir));
    }

    Ok(router.layer(cors).with_state(app_state))
}

async fn health() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_origin_is_an_error() {
        let config = AppConfig {
            frontend_origin: "bad\norigin".to_string(),
            ..AppConfig::default()
        };
        let db_conn = DbConnection::new_in_memory().await.unwrap();

        let result = create_router(AppState::new(db_conn, &config), &config);

        assert!(result.is_err());
    }
}
