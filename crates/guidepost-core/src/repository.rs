//! Storage contracts consumed by the procedure engine.
//!
//! Step reads go through a [`StepSnapshot`], which an adapter must back with
//! a single consistent read scope so that a concurrent authoring edit cannot
//! produce dangling or half-updated edges mid-traversal.

use async_trait::async_trait;

use crate::error::DomainError;
use crate::ids::{LanguageCode, ProcedureId, StepId};

/// Discriminant of a stored step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// A multiple-choice question.
    Question,
    /// An advice node.
    Advice,
}

/// Stored answer row joined to its overlay for the requested language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    /// Text in the canonical language.
    pub canonical_text: String,
    /// Translated text, if the requested language has one.
    pub overlay_text: Option<String>,
    /// Next step, or `None` if the procedure ends here.
    pub next_step_id: Option<StepId>,
}

/// Stored question row with its answers, in authoring order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRecord {
    /// Procedure that owns this question, when recorded.
    pub procedure_id: Option<ProcedureId>,
    /// Question text in the canonical language.
    pub canonical_text: String,
    /// Translated question text, if any.
    pub overlay_text: Option<String>,
    /// Answers in authoring order.
    pub answers: Vec<AnswerRecord>,
}

/// Stored advice row joined to its overlay for the requested language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdviceRecord {
    /// Procedure that owns this advice, when recorded.
    pub procedure_id: Option<ProcedureId>,
    /// End-user text in the canonical language. `None` marks facilitator-only
    /// advice.
    pub canonical_for_user: Option<String>,
    /// Translated end-user text, if any.
    pub overlay_for_user: Option<String>,
    /// Guidance for staff. Never translated.
    pub for_facilitator: String,
    /// Continuation step, if any.
    pub next_step_id: Option<StepId>,
}

/// Stored language row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageRecord {
    /// Language identifier.
    pub id: LanguageCode,
    /// Display name in the language itself.
    pub name: String,
    /// Welcome text shown on the language selection screen.
    pub welcome: String,
    /// Ordered flag-icon codes.
    pub flags: Vec<String>,
}

/// Opens consistent read snapshots over the step store.
#[async_trait]
pub trait StepRepository: Send + Sync {
    /// Begins a read-only snapshot. All reads of one procedure resolution
    /// must go through the same snapshot.
    async fn begin_snapshot(&self) -> Result<Box<dyn StepSnapshot>, DomainError>;
}

/// Read access to steps within one consistent snapshot.
#[async_trait]
pub trait StepSnapshot: Send {
    /// Returns the entry step of a procedure, or `None` if it does not exist.
    async fn procedure_entry(
        &mut self,
        procedure_id: ProcedureId,
    ) -> Result<Option<StepId>, DomainError>;

    /// Returns the kind of a step, or `None` if it does not exist.
    async fn step_kind(&mut self, step_id: StepId) -> Result<Option<StepKind>, DomainError>;

    /// Loads a question and its answers with overlays for `language`.
    async fn question(
        &mut self,
        step_id: StepId,
        language: &LanguageCode,
    ) -> Result<Option<QuestionRecord>, DomainError>;

    /// Loads an advice with its overlay for `language`.
    async fn advice(
        &mut self,
        step_id: StepId,
        language: &LanguageCode,
    ) -> Result<Option<AdviceRecord>, DomainError>;
}

/// Read access to the configured languages.
#[async_trait]
pub trait LanguageRepository: Send + Sync {
    /// Lists every language, ordered by storage id.
    async fn list_languages(&self) -> Result<Vec<LanguageRecord>, DomainError>;
}
