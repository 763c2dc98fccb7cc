//! Guidepost API server entry point.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use guidepost_api::config::ServerConfig;
use guidepost_api::error::AppError;
use guidepost_api::state::AppState;
use guidepost_api::{build_router, telemetry};
use guidepost_store::pg_language_repository::PgLanguageRepository;
use guidepost_store::pg_step_repository::PgStepRepository;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = ServerConfig::from_env()?;
    let telemetry = telemetry::init(&config)?;

    tracing::info!("Starting Guidepost API server");

    // Create database connection pool.
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    if config.run_migrations {
        sqlx::migrate!("../../migrations").run(&pool).await?;
        tracing::info!("Migrations applied");
    }

    let app_state = AppState::new(
        Arc::new(PgStepRepository::new(pool.clone())),
        Arc::new(PgLanguageRepository::new(pool)),
    );

    // TODO: Replace CorsLayer::permissive() with the client's origin once it is hosted separately.
    let app = build_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    telemetry.shutdown();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
