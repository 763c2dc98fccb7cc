//! Test language repositories.

use async_trait::async_trait;
use guidepost_core::error::DomainError;
use guidepost_core::repository::{LanguageRecord, LanguageRepository};

/// A language repository that returns a fixed list.
#[derive(Debug, Default)]
pub struct InMemoryLanguageRepository {
    languages: Vec<LanguageRecord>,
}

impl InMemoryLanguageRepository {
    /// Create a repository that lists `languages` in the given order.
    #[must_use]
    pub fn new(languages: Vec<LanguageRecord>) -> Self {
        Self { languages }
    }
}

#[async_trait]
impl LanguageRepository for InMemoryLanguageRepository {
    async fn list_languages(&self) -> Result<Vec<LanguageRecord>, DomainError> {
        Ok(self.languages.clone())
    }
}

/// A language repository that always returns an infrastructure error.
#[derive(Debug)]
pub struct FailingLanguageRepository;

#[async_trait]
impl LanguageRepository for FailingLanguageRepository {
    async fn list_languages(&self) -> Result<Vec<LanguageRecord>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}
