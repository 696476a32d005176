//! Word lookup tables built from a style guide.
//!
//! Scanning asks two questions of every distinct word: is it a known
//! misspelling, and is it a word to avoid. Both are answered with a single
//! hash lookup against the maps built here.
//!
//! When the same word is registered by more than one term, the term that
//! comes later in document order wins.

use std::collections::HashMap;

use crate::style_guide::{Intention, StyleGuide, Term};
use crate::text::normalize_term;

/// Map from normalized word to the term that flags it.
pub type WordIndex<'g> = HashMap<String, &'g Term>;

/// Both lookup tables for one style guide.
#[derive(Debug, Clone, Default)]
pub struct TermIndex<'g> {
    /// Misspelling → canonical term.
    pub misspellings: WordIndex<'g>,
    /// Word to avoid → term.
    pub avoid: WordIndex<'g>,
}

impl<'g> TermIndex<'g> {
    /// Build both tables from a style guide.
    #[tracing::instrument(skip_all, fields(sections = guide.term_sections.len()))]
    pub fn build(guide: &'g StyleGuide) -> Self {
        let index = Self {
            misspellings: build_misspelling_index(guide),
            avoid: build_avoid_index(guide),
        };
        tracing::debug!(
            misspellings = index.misspellings.len(),
            avoid = index.avoid.len(),
            "term index built"
        );
        index
    }

    /// Whether neither table has any entries.
    pub fn is_empty(&self) -> bool {
        self.misspellings.is_empty() && self.avoid.is_empty()
    }
}

/// Map every related term of every `common` term to that term.
pub fn build_misspelling_index(guide: &StyleGuide) -> WordIndex<'_> {
    let mut index = WordIndex::new();
    for term in guide.terms_with(Intention::Common) {
        for related in &term.related_terms {
            index.insert(normalize_term(related), term);
        }
    }
    index
}

/// Map every comma-separated variant of every `avoid` term to that term.
///
/// Variants that normalize to an empty string (`"a,,b"`) are skipped.
pub fn build_avoid_index(guide: &StyleGuide) -> WordIndex<'_> {
    let mut index = WordIndex::new();
    for term in guide.terms_with(Intention::Avoid) {
        let Some(name) = term.name.as_deref() else {
            continue;
        };
        for part in name.split(',').map(normalize_term) {
            // An empty key would flag the empty words left by runs of spaces.
            if !part.is_empty() {
                index.insert(part, term);
            }
        }
    }
    index
}
