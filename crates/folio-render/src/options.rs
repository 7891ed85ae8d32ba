//! Rendering options.

use folio_model::SectionPolicy;

/// Knobs that change how a page is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// What to do with a known section whose payload is malformed.
    pub policy: SectionPolicy,

    /// Write `custom_html` blocks verbatim instead of sanitizing them.
    pub trust_custom_html: bool,
}

impl RenderOptions {
    /// Sets strict section parsing.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.policy = SectionPolicy::from_strict(strict);
        self
    }

    /// Sets whether `custom_html` blocks are trusted.
    pub fn with_trusted_custom_html(mut self, trust: bool) -> Self {
        self.trust_custom_html = trust;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_are_lenient_and_untrusted() {
        let options = RenderOptions::default();
        assert_eq!(options.policy, SectionPolicy::Lenient);
        assert!(!options.trust_custom_html);
    }

    #[test]
    fn test_builder() {
        let options = RenderOptions::default()
            .with_strict(true)
            .with_trusted_custom_html(true);
        assert_eq!(options.policy, SectionPolicy::Strict);
        assert!(options.trust_custom_html);
    }
}
