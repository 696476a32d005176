//! Core library for termlint.
//!
//! Checks prose against a terminology style guide: words that are common
//! misspellings of a canonical term, and words that should be avoided. Every
//! flagged word is reported once, together with a short snippet of context
//! around each of its occurrences.
//!
//! # Modules
//!
//! - [`style_guide`] - Style guide document model
//! - [`text`] - Word splitting and normalization
//! - [`term_index`] - Word lookup tables built from a style guide
//! - [`scanner`] - Finding flagged words
//! - [`context`] - Context snippets around each occurrence
//! - [`fetch`] - Retrieving style guides over HTTP or from disk
//! - [`analyzer`] - Cached style guide plus analysis in one call
//! - [`markdown`] - Reducing markdown to plain words
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use termlint_core::analyzer::analyze_with_guide;
//! use termlint_core::StyleGuide;
//!
//! let guide: StyleGuide = serde_json::from_str(r#"{
//!     "termSections": [{
//!         "intention": "common",
//!         "terms": [{"canonicalName": "color", "relatedTerms": ["colour"]}]
//!     }]
//! }"#).unwrap();
//!
//! let issues = analyze_with_guide(&guide, "the colour is nice");
//! assert_eq!(issues.len(), 1);
//! assert_eq!(issues[0].matches[0].pre_text, "the ");
//! ```
#![deny(unsafe_code)]

pub mod analyzer;
pub mod config;
pub mod context;
pub mod error;
pub mod fetch;
pub mod markdown;
pub mod scanner;
pub mod style_guide;
pub mod term_index;
pub mod text;

pub use analyzer::{Analyzer, CachePolicy, IssueReport};
pub use config::{Config, ConfigLoader, LogLevel};
pub use context::Match;
pub use error::{ConfigError, ConfigResult, FetchError, FetchResult};
pub use fetch::{FileSource, HttpSource, LibraryRef, StyleGuideSource};
pub use scanner::IssueKind;
pub use style_guide::{Intention, StyleGuide, Term, TermSection};

/// Default maximum input size in bytes (5 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
