//! PostgreSQL adapters for the Guidepost storage contracts.

pub mod pg_language_repository;
pub mod pg_step_repository;
pub mod schema;

use guidepost_core::error::DomainError;

/// Maps a database error into the domain's infrastructure variant.
pub(crate) fn infrastructure(err: sqlx::Error) -> DomainError {
    DomainError::Infrastructure(err.to_string())
}
