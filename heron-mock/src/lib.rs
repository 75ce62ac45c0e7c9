//! Heron Mock - in-process mock of the admin REST API
//!
//! Serves the same envelope-wrapped endpoints the production backend
//! would, backed by seeded in-memory data. Used standalone during
//! development and embedded in client integration tests.

pub mod api;
pub mod auth;
pub mod error;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{AppState, MockData};

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the full application router with fresh seeded state
pub fn router() -> Router {
    router_with_state(AppState::new())
}

/// Build the router over externally owned state
pub fn router_with_state(state: AppState) -> Router {
    api::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
