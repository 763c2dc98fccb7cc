//! Query handlers for procedure resolution.
//!
//! Both handlers are pure reads. Procedure resolution opens one snapshot per
//! call and recomputes the graph every time.

use guidepost_core::error::DomainError;
use guidepost_core::ids::{LanguageCode, ProcedureId};
use guidepost_core::repository::{LanguageRepository, StepRepository};
use serde::Serialize;
use tracing::{info, instrument};

use crate::application::traversal;
use crate::domain::localization::LocalizationResolver;
use crate::domain::steps::ResolvedProcedure;

/// Read-only view of a selectable language.
#[derive(Debug, Serialize)]
pub struct LanguageView {
    /// Language identifier to pass back as `language`.
    pub id: String,
    /// Display name in the language itself.
    pub name: String,
    /// Welcome text for the language selection screen.
    pub welcome: String,
    /// Ordered flag-icon codes.
    pub flags: Vec<String>,
}

/// Resolves the full step graph of a procedure in `language`.
///
/// Unknown languages are not an error; they resolve to canonical text.
///
/// # Errors
///
/// Returns `DomainError::ProcedureNotFound` if the procedure does not exist.
/// Returns `DomainError::StepIntegrity` if a reachable step cannot be resolved.
/// Returns `DomainError::Infrastructure` if the repository fails.
#[instrument(skip_all, fields(%procedure_id, %language))]
pub async fn resolve_procedure(
    procedure_id: ProcedureId,
    language: &LanguageCode,
    repo: &dyn StepRepository,
) -> Result<ResolvedProcedure, DomainError> {
    let mut snapshot = repo.begin_snapshot().await?;

    let start = snapshot
        .procedure_entry(procedure_id)
        .await?
        .ok_or(DomainError::ProcedureNotFound(procedure_id))?;

    let steps = traversal::resolve_reachable_steps(
        snapshot.as_mut(),
        procedure_id,
        start,
        LocalizationResolver::new(language),
    )
    .await?;

    info!(start = %start, steps = steps.len(), "procedure resolved");
    Ok(ResolvedProcedure { start, steps })
}

/// Lists the languages a client may request.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the repository fails.
pub async fn list_languages(
    repo: &dyn LanguageRepository,
) -> Result<Vec<LanguageView>, DomainError> {
    let languages = repo.list_languages().await?;
    Ok(languages
        .into_iter()
        .map(|language| LanguageView {
            id: language.id.as_str().to_owned(),
            name: language.name,
            welcome: language.welcome,
            flags: language.flags,
        })
        .collect())
}
