//! `PostgreSQL` implementation of the `StepRepository` trait.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row, Transaction};
use tracing::instrument;

use guidepost_core::error::DomainError;
use guidepost_core::ids::{LanguageCode, ProcedureId, StepId};
use guidepost_core::repository::{
    AdviceRecord, AnswerRecord, QuestionRecord, StepKind, StepRepository, StepSnapshot,
};

use crate::infrastructure;
use crate::schema;

/// PostgreSQL-backed step repository.
#[derive(Debug, Clone)]
pub struct PgStepRepository {
    pool: PgPool,
}

impl PgStepRepository {
    /// Creates a new `PgStepRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StepRepository for PgStepRepository {
    async fn begin_snapshot(&self) -> Result<Box<dyn StepSnapshot>, DomainError> {
        let mut tx = self.pool.begin().await.map_err(infrastructure)?;
        sqlx::query(schema::BEGIN_READ_SNAPSHOT)
            .execute(&mut *tx)
            .await
            .map_err(infrastructure)?;
        Ok(Box::new(PgStepSnapshot { tx }))
    }
}

/// A repeatable-read, read-only transaction. Dropping it rolls back.
pub struct PgStepSnapshot {
    tx: Transaction<'static, Postgres>,
}

fn step_id_column(row: &PgRow, column: &str) -> Result<Option<StepId>, DomainError> {
    row.try_get::<Option<i32>, _>(column)
        .map(|id| id.map(StepId))
        .map_err(infrastructure)
}

fn procedure_id_column(row: &PgRow, column: &str) -> Result<Option<ProcedureId>, DomainError> {
    row.try_get::<Option<i32>, _>(column)
        .map(|id| id.map(ProcedureId))
        .map_err(infrastructure)
}

#[async_trait]
impl StepSnapshot for PgStepSnapshot {
    #[instrument(level = "debug", skip(self))]
    async fn procedure_entry(
        &mut self,
        procedure_id: ProcedureId,
    ) -> Result<Option<StepId>, DomainError> {
        let row = sqlx::query(schema::SELECT_PROCEDURE_START)
            .bind(procedure_id.0)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(infrastructure)?;

        match row {
            Some(row) => step_id_column(&row, "start"),
            None => Ok(None),
        }
    }

    #[instrument(level = "debug", skip(self))]
    async fn step_kind(&mut self, step_id: StepId) -> Result<Option<StepKind>, DomainError> {
        let row = sqlx::query(schema::SELECT_STEP_KIND)
            .bind(step_id.0)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(infrastructure)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let kind_name: String = row.try_get("kind_name").map_err(infrastructure)?;
        match kind_name.as_str() {
            schema::STEP_KIND_QUESTION => Ok(Some(StepKind::Question)),
            schema::STEP_KIND_ADVICE => Ok(Some(StepKind::Advice)),
            other => Err(DomainError::integrity(
                step_id,
                format!("unknown step kind '{other}'"),
            )),
        }
    }

    #[instrument(level = "debug", skip(self))]
    async fn question(
        &mut self,
        step_id: StepId,
        language: &LanguageCode,
    ) -> Result<Option<QuestionRecord>, DomainError> {
        let row = sqlx::query(schema::SELECT_QUESTION)
            .bind(step_id.0)
            .bind(language.as_str())
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(infrastructure)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let answers = sqlx::query(schema::SELECT_ANSWERS)
            .bind(step_id.0)
            .bind(language.as_str())
            .fetch_all(&mut *self.tx)
            .await
            .map_err(infrastructure)?
            .iter()
            .map(|answer| -> Result<AnswerRecord, DomainError> {
                Ok(AnswerRecord {
                    canonical_text: answer.try_get("english_text").map_err(infrastructure)?,
                    overlay_text: answer.try_get("overlay_text").map_err(infrastructure)?,
                    next_step_id: step_id_column(answer, "next_step")?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(QuestionRecord {
            procedure_id: procedure_id_column(&row, "procedure")?,
            canonical_text: row.try_get("english_text").map_err(infrastructure)?,
            overlay_text: row.try_get("overlay_text").map_err(infrastructure)?,
            answers,
        }))
    }

    #[instrument(level = "debug", skip(self))]
    async fn advice(
        &mut self,
        step_id: StepId,
        language: &LanguageCode,
    ) -> Result<Option<AdviceRecord>, DomainError> {
        let row = sqlx::query(schema::SELECT_ADVICE)
            .bind(step_id.0)
            .bind(language.as_str())
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(infrastructure)?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(AdviceRecord {
            procedure_id: procedure_id_column(&row, "procedure")?,
            canonical_for_user: row.try_get("english_text").map_err(infrastructure)?,
            overlay_for_user: row.try_get("overlay_text").map_err(infrastructure)?,
            for_facilitator: row.try_get("facilitator_advice").map_err(infrastructure)?,
            next_step_id: step_id_column(&row, "next_step")?,
        }))
    }
}
