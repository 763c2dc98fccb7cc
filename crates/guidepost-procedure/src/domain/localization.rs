//! Localization resolver.
//!
//! Picks the text to display for a requested language from a canonical value
//! and an optional overlay. Missing overlays are an expected steady state of
//! a corpus that is still being translated, so absence always falls back to
//! the canonical text instead of failing.

use guidepost_core::ids::LanguageCode;

/// Resolves overlay-or-canonical text for one requested language.
#[derive(Debug, Clone, Copy)]
pub struct LocalizationResolver<'a> {
    language: &'a LanguageCode,
}

impl<'a> LocalizationResolver<'a> {
    /// Creates a resolver for `language`.
    #[must_use]
    pub fn new(language: &'a LanguageCode) -> Self {
        Self { language }
    }

    /// Returns the language this resolver targets.
    #[must_use]
    pub fn language(&self) -> &LanguageCode {
        self.language
    }

    /// Returns the overlay if one exists, otherwise the canonical text.
    ///
    /// Overlays are ignored when the canonical language is requested, so the
    /// canonical columns are the single source of default-language text.
    #[must_use]
    pub fn resolve(&self, canonical: String, overlay: Option<String>) -> String {
        if self.language.is_canonical() {
            return canonical;
        }
        overlay.unwrap_or(canonical)
    }

    /// Like [`resolve`](Self::resolve) for a field whose canonical value may be
    /// null. A null canonical value stays null in every language.
    #[must_use]
    pub fn resolve_nullable(
        &self,
        canonical: Option<String>,
        overlay: Option<String>,
    ) -> Option<String> {
        canonical.map(|text| self.resolve(text, overlay))
    }
}
