//! HTTP surface of the Guidepost procedure engine.

use axum::Router;

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;

use state::AppState;

/// Builds the application router with every route mounted.
#[must_use]
pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/procedures", routes::procedures::router())
        .nest("/api/v1/languages", routes::languages::router())
        .with_state(app_state)
}
