//! Text processing utilities.
//!
//! Provides the word splitting and per-word normalization that every
//! analysis step works from. Splitting is deliberately simple: words are
//! separated by single spaces and nothing else.

use regex::Regex;
use std::sync::LazyLock;

/// Punctuation stripped from a word during normalization.
///
/// Only the first match is removed, so `"end.:"` normalizes to `"end:"`.
static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,.:!]").expect("valid regex"));

/// A block of text submitted for analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBlock {
    /// Raw text; `None` behaves like an empty block.
    pub text: Option<String>,
}

impl TextBlock {
    /// Create a block from a string.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    /// The raw text, or `""` when absent.
    pub fn as_str(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }
}

/// Normalize a word: trim surrounding whitespace and drop the first
/// `,` `.` `:` or `!`.
///
/// The result is not trimmed again, so `"a, "` becomes `"a"` but `"a ,b"`
/// only loses the comma.
pub fn normalize_term(term: &str) -> String {
    PUNCTUATION.replace(term.trim(), "").into_owned()
}

/// Split a text block into raw words on single spaces.
///
/// Consecutive spaces produce empty words, mirroring a plain split. An empty
/// or absent block yields no words at all.
pub fn word_list(block: &TextBlock) -> Vec<&str> {
    match block.text.as_deref() {
        None | Some("") => Vec::new(),
        Some(text) => text.split(' ').collect(),
    }
}

/// Split and normalize a text block in one pass.
#[tracing::instrument(skip_all, fields(text_len = block.as_str().len()))]
pub fn normalized_word_list(block: &TextBlock) -> Vec<String> {
    word_list(block).into_iter().map(normalize_term).collect()
}
