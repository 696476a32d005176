//! Issue scanning.
//!
//! Walks the normalized words of each text block and reports every distinct
//! word that the style guide flags. A word is reported once per block no
//! matter how often it occurs; the individual occurrences are recovered
//! later by [`crate::context`].

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::style_guide::{StyleGuide, Term};
use crate::term_index::TermIndex;
use crate::text::{TextBlock, normalized_word_list};

/// Why a word was flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum IssueKind {
    /// The word is a known misspelling of a canonical term.
    Common,
    /// The word is on the avoid list.
    Avoid,
}

impl IssueKind {
    /// Returns the kind as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Avoid => "avoid",
        }
    }
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One distinct flagged word in one text block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue<'g> {
    /// Why the word was flagged.
    pub kind: IssueKind,
    /// The raw text of the block the word came from.
    pub source_text: Arc<str>,
    /// Every normalized word of that block, shared by all its issues.
    pub word_list: Arc<[String]>,
    /// The normalized word that was flagged.
    pub matched_word: String,
    /// The term that flagged it.
    pub term: &'g Term,
}

/// Find all issues in a sequence of text blocks.
///
/// Issues come out in block order, and within a block in order of each
/// word's first occurrence. Misspellings take precedence over avoid words.
#[tracing::instrument(skip_all, fields(blocks = blocks.len()))]
pub fn find_issues<'g>(guide: &'g StyleGuide, blocks: &[TextBlock]) -> Vec<Issue<'g>> {
    let index = TermIndex::build(guide);
    let mut issues = Vec::new();

    for block in blocks {
        let words: Arc<[String]> = normalized_word_list(block).into();
        let source_text: Arc<str> = Arc::from(block.as_str());
        let mut processed: HashSet<&str> = HashSet::new();

        for word in words.iter() {
            if !processed.insert(word.as_str()) {
                continue;
            }

            let hit = if let Some(&term) = index.misspellings.get(word) {
                Some((IssueKind::Common, term))
            } else {
                index
                    .avoid
                    .get(word)
                    .map(|&term| (IssueKind::Avoid, term))
            };

            if let Some((kind, term)) = hit {
                issues.push(Issue {
                    kind,
                    source_text: Arc::clone(&source_text),
                    word_list: Arc::clone(&words),
                    matched_word: word.clone(),
                    term,
                });
            }
        }
    }

    tracing::debug!(issues = issues.len(), "scan complete");
    issues
}
