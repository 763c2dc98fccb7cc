//! Identifier types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of the language whose text is stored in the canonical columns.
pub const CANONICAL_LANGUAGE: &str = "english";

/// Identifier of a published procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcedureId(pub i32);

impl fmt::Display for ProcedureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a step (question or advice) in the step graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepId(pub i32);

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A language identifier such as `"english"` or `"french"`.
///
/// Codes are not validated against the set of known languages; an unknown
/// code simply has no overlays.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Creates a language code from any string.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The canonical language code.
    #[must_use]
    pub fn canonical() -> Self {
        Self(CANONICAL_LANGUAGE.to_owned())
    }

    /// Returns `true` if this is the canonical language.
    #[must_use]
    pub fn is_canonical(&self) -> bool {
        self.0 == CANONICAL_LANGUAGE
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self::canonical()
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}
