//! API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use guidepost_core::error::DomainError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Database connection or pool error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Applying migrations failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Tracing or exporter setup failed.
    #[error("telemetry error: {0}")]
    Telemetry(String),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer error that implements `IntoResponse`.
#[derive(Debug)]
pub enum ApiError {
    /// A failure from the procedure engine or its repositories.
    Domain(DomainError),
    /// The procedure id path segment is not a non-negative integer.
    InvalidProcedureId(String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            Self::Domain(err) => {
                let (status, code) = match &err {
                    DomainError::ProcedureNotFound(_) => {
                        (StatusCode::NOT_FOUND, "procedure_not_found")
                    }
                    DomainError::StepIntegrity { .. } => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "step_integrity_error")
                    }
                    DomainError::Infrastructure(_) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "infrastructure_error")
                    }
                };
                if status.is_server_error() {
                    error!(error = %err, "request failed");
                }
                (status, code, err.to_string())
            }
            Self::InvalidProcedureId(raw) => (
                StatusCode::BAD_REQUEST,
                "invalid_procedure_id",
                format!("could not coerce '{raw}' to a procedure id"),
            ),
        };

        let body = ErrorBody {
            error: error_code,
            message,
        };

        (status, Json(body)).into_response()
    }
}
