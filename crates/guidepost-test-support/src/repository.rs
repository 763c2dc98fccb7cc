//! In-memory `StepRepository` implementations for tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use guidepost_core::error::DomainError;
use guidepost_core::ids::{LanguageCode, ProcedureId, StepId};
use guidepost_core::repository::{
    AdviceRecord, AnswerRecord, QuestionRecord, StepKind, StepRepository, StepSnapshot,
};

#[derive(Debug, Clone)]
struct QuestionFixture {
    procedure_id: Option<ProcedureId>,
    text: String,
    answers: Vec<(String, Option<StepId>)>,
}

#[derive(Debug, Clone)]
struct AdviceFixture {
    procedure_id: Option<ProcedureId>,
    for_user: Option<String>,
    for_facilitator: String,
    next_step_id: Option<StepId>,
}

#[derive(Debug, Default)]
struct StepData {
    procedures: HashMap<ProcedureId, StepId>,
    kinds: HashMap<StepId, StepKind>,
    questions: HashMap<StepId, QuestionFixture>,
    advices: HashMap<StepId, AdviceFixture>,
    step_overlays: HashMap<(StepId, String), String>,
    answer_overlays: HashMap<(StepId, usize, String), String>,
}

/// Builds the contents of an [`InMemoryStepRepository`].
///
/// Steps added after [`procedure`](Self::procedure) are owned by that
/// procedure.
#[derive(Debug, Default)]
pub struct StepFixtureBuilder {
    data: StepData,
    current_procedure: Option<ProcedureId>,
}

impl StepFixtureBuilder {
    /// Adds a procedure whose entry step is `start`.
    #[must_use]
    pub fn procedure(mut self, id: i32, start: i32) -> Self {
        self.data.procedures.insert(ProcedureId(id), StepId(start));
        self.current_procedure = Some(ProcedureId(id));
        self
    }

    /// Adds a question with `(text, next step)` answers in order.
    #[must_use]
    pub fn question(mut self, id: i32, text: &str, answers: &[(&str, Option<i32>)]) -> Self {
        self.data.kinds.insert(StepId(id), StepKind::Question);
        self.data.questions.insert(
            StepId(id),
            QuestionFixture {
                procedure_id: self.current_procedure,
                text: text.to_owned(),
                answers: answers
                    .iter()
                    .map(|(answer, link)| ((*answer).to_owned(), link.map(StepId)))
                    .collect(),
            },
        );
        self
    }

    /// Adds an advice. `for_user = None` makes it facilitator-only.
    #[must_use]
    pub fn advice(
        mut self,
        id: i32,
        for_user: Option<&str>,
        for_facilitator: &str,
        link: Option<i32>,
    ) -> Self {
        self.data.kinds.insert(StepId(id), StepKind::Advice);
        self.data.advices.insert(
            StepId(id),
            AdviceFixture {
                procedure_id: self.current_procedure,
                for_user: for_user.map(str::to_owned),
                for_facilitator: for_facilitator.to_owned(),
                next_step_id: link.map(StepId),
            },
        );
        self
    }

    /// Registers a step kind without the matching question/advice row.
    #[must_use]
    pub fn orphan_step(mut self, id: i32, kind: StepKind) -> Self {
        self.data.kinds.insert(StepId(id), kind);
        self
    }

    /// Adds a translation of a question's text.
    #[must_use]
    pub fn question_overlay(mut self, id: i32, language: &str, text: &str) -> Self {
        self.data
            .step_overlays
            .insert((StepId(id), language.to_owned()), text.to_owned());
        self
    }

    /// Adds a translation of the answer at `index` of a question.
    #[must_use]
    pub fn answer_overlay(mut self, id: i32, index: usize, language: &str, text: &str) -> Self {
        self.data
            .answer_overlays
            .insert((StepId(id), index, language.to_owned()), text.to_owned());
        self
    }

    /// Adds a translation of an advice's end-user text.
    #[must_use]
    pub fn advice_overlay(mut self, id: i32, language: &str, text: &str) -> Self {
        self.data
            .step_overlays
            .insert((StepId(id), language.to_owned()), text.to_owned());
        self
    }

    /// Finishes the fixture.
    #[must_use]
    pub fn build(self) -> InMemoryStepRepository {
        InMemoryStepRepository {
            data: Arc::new(self.data),
            lookups: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

/// A step repository backed by fixture data. Records every `step_kind`
/// lookup so tests can assert how often each step was resolved.
#[derive(Debug, Clone)]
pub struct InMemoryStepRepository {
    data: Arc<StepData>,
    lookups: Arc<Mutex<Vec<StepId>>>,
}

impl InMemoryStepRepository {
    /// Start building a fixture.
    #[must_use]
    pub fn builder() -> StepFixtureBuilder {
        StepFixtureBuilder::default()
    }

    /// Returns every step id passed to `step_kind`, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn step_kind_lookups(&self) -> Vec<StepId> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl StepRepository for InMemoryStepRepository {
    async fn begin_snapshot(&self) -> Result<Box<dyn StepSnapshot>, DomainError> {
        Ok(Box::new(InMemorySnapshot {
            data: Arc::clone(&self.data),
            lookups: Arc::clone(&self.lookups),
        }))
    }
}

struct InMemorySnapshot {
    data: Arc<StepData>,
    lookups: Arc<Mutex<Vec<StepId>>>,
}

impl InMemorySnapshot {
    fn overlay(&self, step_id: StepId, language: &LanguageCode) -> Option<String> {
        self.data
            .step_overlays
            .get(&(step_id, language.as_str().to_owned()))
            .cloned()
    }
}

#[async_trait]
impl StepSnapshot for InMemorySnapshot {
    async fn procedure_entry(
        &mut self,
        procedure_id: ProcedureId,
    ) -> Result<Option<StepId>, DomainError> {
        Ok(self.data.procedures.get(&procedure_id).copied())
    }

    async fn step_kind(&mut self, step_id: StepId) -> Result<Option<StepKind>, DomainError> {
        self.lookups.lock().unwrap().push(step_id);
        Ok(self.data.kinds.get(&step_id).copied())
    }

    async fn question(
        &mut self,
        step_id: StepId,
        language: &LanguageCode,
    ) -> Result<Option<QuestionRecord>, DomainError> {
        let Some(question) = self.data.questions.get(&step_id) else {
            return Ok(None);
        };
        let answers = question
            .answers
            .iter()
            .enumerate()
            .map(|(index, (text, next_step_id))| AnswerRecord {
                canonical_text: text.clone(),
                overlay_text: self
                    .data
                    .answer_overlays
                    .get(&(step_id, index, language.as_str().to_owned()))
                    .cloned(),
                next_step_id: *next_step_id,
            })
            .collect();
        Ok(Some(QuestionRecord {
            procedure_id: question.procedure_id,
            canonical_text: question.text.clone(),
            overlay_text: self.overlay(step_id, language),
            answers,
        }))
    }

    async fn advice(
        &mut self,
        step_id: StepId,
        language: &LanguageCode,
    ) -> Result<Option<AdviceRecord>, DomainError> {
        Ok(self.data.advices.get(&step_id).map(|advice| AdviceRecord {
            procedure_id: advice.procedure_id,
            canonical_for_user: advice.for_user.clone(),
            overlay_for_user: self.overlay(step_id, language),
            for_facilitator: advice.for_facilitator.clone(),
            next_step_id: advice.next_step_id,
        }))
    }
}

/// A step repository whose snapshots cannot be opened. Useful for testing
/// error-handling paths.
#[derive(Debug)]
pub struct FailingStepRepository;

#[async_trait]
impl StepRepository for FailingStepRepository {
    async fn begin_snapshot(&self) -> Result<Box<dyn StepSnapshot>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}
