//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for file upload, download, and delete
//! - Application state shared across handlers
//! - Router assembly with tracing and CORS layers

pub mod routes;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use fileshelf_core::storage::StorageBackend;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Storage backend, selected once at startup.
    pub storage: Arc<StorageBackend>,
}

/// Creates the main application router.
pub fn create_router(state: AppState, max_upload_size: usize) -> Router {
    Router::new()
        .merge(routes::api_routes())
        .layer(DefaultBodyLimit::max(max_upload_size))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
