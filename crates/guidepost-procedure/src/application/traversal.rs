//! Step graph traversal.
//!
//! Walks the graph reachable from a procedure's entry step with an explicit
//! work-list. The result map doubles as the visited set, so every step id is
//! resolved at most once even when the graph contains cycles or several
//! answers converge on the same step.

use std::collections::BTreeMap;

use guidepost_core::error::DomainError;
use guidepost_core::ids::{ProcedureId, StepId};
use guidepost_core::repository::{AdviceRecord, QuestionRecord, StepKind, StepSnapshot};
use tracing::{debug, error, warn};

use crate::domain::localization::LocalizationResolver;
use crate::domain::steps::{ResolvedAdvice, ResolvedAnswer, ResolvedQuestion, ResolvedStep};

/// Resolves every step reachable from `start`.
///
/// Visiting order is unspecified; only the reachable set and the
/// at-most-once guarantee hold.
///
/// # Errors
///
/// Returns `DomainError::StepIntegrity` if a reachable step is missing or
/// inconsistent in storage. Repository errors are propagated unchanged.
pub async fn resolve_reachable_steps(
    snapshot: &mut dyn StepSnapshot,
    procedure_id: ProcedureId,
    start: StepId,
    resolver: LocalizationResolver<'_>,
) -> Result<BTreeMap<StepId, ResolvedStep>, DomainError> {
    let mut resolved: BTreeMap<StepId, ResolvedStep> = BTreeMap::new();
    let mut work_list = vec![start];

    while let Some(step_id) = work_list.pop() {
        if resolved.contains_key(&step_id) {
            continue;
        }

        let step = resolve_step(snapshot, procedure_id, step_id, resolver)
            .await
            .inspect_err(|err| {
                if let DomainError::StepIntegrity { .. } = err {
                    error!(%procedure_id, %step_id, error = %err, "procedure graph is corrupt");
                }
            })?;

        work_list.extend(
            step.links()
                .into_iter()
                .filter(|link| !resolved.contains_key(link)),
        );
        resolved.insert(step_id, step);
    }

    debug!(%procedure_id, steps = resolved.len(), "resolved procedure graph");
    Ok(resolved)
}

async fn resolve_step(
    snapshot: &mut dyn StepSnapshot,
    procedure_id: ProcedureId,
    step_id: StepId,
    resolver: LocalizationResolver<'_>,
) -> Result<ResolvedStep, DomainError> {
    let kind = snapshot
        .step_kind(step_id)
        .await?
        .ok_or_else(|| DomainError::integrity(step_id, "step does not exist"))?;

    match kind {
        StepKind::Question => {
            let record = snapshot
                .question(step_id, resolver.language())
                .await?
                .ok_or_else(|| DomainError::integrity(step_id, "question row is missing"))?;
            flag_foreign_step(procedure_id, step_id, record.procedure_id);
            resolve_question(step_id, record, resolver).map(ResolvedStep::Question)
        }
        StepKind::Advice => {
            let record = snapshot
                .advice(step_id, resolver.language())
                .await?
                .ok_or_else(|| DomainError::integrity(step_id, "advice row is missing"))?;
            flag_foreign_step(procedure_id, step_id, record.procedure_id);
            Ok(ResolvedStep::Advice(resolve_advice(record, resolver)))
        }
    }
}

fn resolve_question(
    step_id: StepId,
    record: QuestionRecord,
    resolver: LocalizationResolver<'_>,
) -> Result<ResolvedQuestion, DomainError> {
    if record.answers.is_empty() {
        return Err(DomainError::integrity(step_id, "question has no answers"));
    }

    let answers = record
        .answers
        .into_iter()
        .map(|answer| ResolvedAnswer {
            answer: resolver.resolve(answer.canonical_text, answer.overlay_text),
            link: answer.next_step_id,
        })
        .collect();

    Ok(ResolvedQuestion {
        question: resolver.resolve(record.canonical_text, record.overlay_text),
        answers,
    })
}

fn resolve_advice(record: AdviceRecord, resolver: LocalizationResolver<'_>) -> ResolvedAdvice {
    ResolvedAdvice {
        for_user: resolver.resolve_nullable(record.canonical_for_user, record.overlay_for_user),
        for_facilitator: record.for_facilitator,
        link: record.next_step_id,
    }
}

// Edges into another procedure's steps are followed, not rejected.
fn flag_foreign_step(procedure_id: ProcedureId, step_id: StepId, owner: Option<ProcedureId>) {
    if let Some(owner) = owner.filter(|owner| *owner != procedure_id) {
        warn!(
            %procedure_id,
            %step_id,
            owner_procedure_id = %owner,
            "step reached through a cross-procedure edge"
        );
    }
}
