//! Style guide document model.
//!
//! A style guide groups terminology rules into sections. Each section has an
//! [`Intention`]: `common` sections list canonical terms together with their
//! frequent misspellings, `avoid` sections list words that should not be used
//! at all.
//!
//! Missing collections deserialize as empty rather than failing, so a section
//! without `terms` or a term without `relatedTerms` simply contributes nothing
//! to the lookup indexes.

use serde::{Deserialize, Serialize};

/// A complete style guide document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleGuide {
    /// Rule sections, in document order.
    pub term_sections: Vec<TermSection>,
}

/// One category of rules in a style guide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TermSection {
    /// What the terms in this section are for.
    pub intention: Intention,
    /// Terms in this section, in document order.
    pub terms: Vec<Term>,
}

/// Purpose of a [`TermSection`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Intention {
    /// Canonical terms with commonly misspelled variants.
    Common,
    /// Words to avoid.
    Avoid,
    /// Any other section kind; ignored during analysis.
    #[default]
    #[serde(other)]
    Other,
}

/// A single terminology rule.
///
/// For `common` sections the interesting fields are `canonical_name` and
/// `related_terms` (the misspellings). For `avoid` sections `name` holds a
/// comma-separated list of variants, e.g. `"utilize,utilise"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Term {
    /// Term name; comma-separated variants for `avoid` terms.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Preferred spelling for `common` terms.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_name: Option<String>,
    /// Misspellings that map to this term.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_terms: Vec<String>,
    /// Optional guidance shown alongside an issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Term {
    /// Human-readable label: the canonical name, falling back to `name`.
    pub fn display_name(&self) -> Option<&str> {
        self.canonical_name.as_deref().or(self.name.as_deref())
    }
}

impl StyleGuide {
    /// Iterate over terms of every section with the given intention.
    pub fn terms_with(&self, intention: Intention) -> impl Iterator<Item = &Term> {
        self.term_sections
            .iter()
            .filter(move |section| section.intention == intention)
            .flat_map(|section| section.terms.iter())
    }
}
