//! `PostgreSQL` implementation of the `LanguageRepository` trait.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use guidepost_core::error::DomainError;
use guidepost_core::ids::LanguageCode;
use guidepost_core::repository::{LanguageRecord, LanguageRepository};

use crate::infrastructure;
use crate::schema;

/// PostgreSQL-backed language repository.
#[derive(Debug, Clone)]
pub struct PgLanguageRepository {
    pool: PgPool,
}

impl PgLanguageRepository {
    /// Creates a new `PgLanguageRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Splits the stored comma-separated flag column, dropping blanks.
fn split_flags(flags: &str) -> Vec<String> {
    flags
        .split(',')
        .map(str::trim)
        .filter(|flag| !flag.is_empty())
        .map(str::to_owned)
        .collect()
}

#[async_trait]
impl LanguageRepository for PgLanguageRepository {
    async fn list_languages(&self) -> Result<Vec<LanguageRecord>, DomainError> {
        let rows = sqlx::query(schema::SELECT_LANGUAGES)
            .fetch_all(&self.pool)
            .await
            .map_err(infrastructure)?;

        rows.iter()
            .map(|row| -> Result<LanguageRecord, DomainError> {
                let english_name: String = row.try_get("english_name").map_err(infrastructure)?;
                let flags: String = row.try_get("flags").map_err(infrastructure)?;
                Ok(LanguageRecord {
                    id: LanguageCode::new(english_name),
                    name: row.try_get("name").map_err(infrastructure)?,
                    welcome: row.try_get("welcome").map_err(infrastructure)?,
                    flags: split_flags(&flags),
                })
            })
            .collect()
    }
}
