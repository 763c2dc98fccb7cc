//! Shared test repositories and fixtures for the Guidepost procedure engine.

mod language;
mod repository;

pub use language::{FailingLanguageRepository, InMemoryLanguageRepository};
pub use repository::{FailingStepRepository, InMemoryStepRepository, StepFixtureBuilder};
