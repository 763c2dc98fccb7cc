//! Shared application state.

use std::sync::Arc;

use guidepost_core::repository::{LanguageRepository, StepRepository};

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Source of step snapshots for procedure resolution.
    pub step_repository: Arc<dyn StepRepository>,
    /// Source of the selectable languages.
    pub language_repository: Arc<dyn LanguageRepository>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        step_repository: Arc<dyn StepRepository>,
        language_repository: Arc<dyn LanguageRepository>,
    ) -> Self {
        Self {
            step_repository,
            language_repository,
        }
    }
}
