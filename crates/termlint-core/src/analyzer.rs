//! Style guide analysis of free text.
//!
//! [`Analyzer`] ties a [`StyleGuideSource`] to the scanning and context
//! steps. The document is fetched on first use and kept in the analyzer
//! until it expires under the configured [`CachePolicy`] or is dropped with
//! [`Analyzer::invalidate`].
//!
//! The cache lock is held while a fetch is in flight, so concurrent calls on
//! one analyzer share a single request.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use termlint_core::analyzer::Analyzer;
//! use termlint_core::fetch::{DEFAULT_BASE_URL, HttpSource, LibraryRef};
//!
//! # async fn run() -> termlint_core::FetchResult<()> {
//! let library = LibraryRef::new("acme", "brand");
//! let source = HttpSource::new(DEFAULT_BASE_URL, &library, Duration::from_secs(30))?;
//! let analyzer = Analyzer::new(source);
//!
//! for issue in analyzer.analyze("the colour is nice").await? {
//!     println!("{} ({}): {} matches", issue.word, issue.kind, issue.matches.len());
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::context::{Match, matches_with_context};
use crate::error::FetchResult;
use crate::fetch::StyleGuideSource;
use crate::scanner::{IssueKind, find_issues};
use crate::style_guide::{StyleGuide, Term};
use crate::text::TextBlock;

/// How long a fetched style guide stays valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CachePolicy {
    /// Keep the first successful fetch until [`Analyzer::invalidate`].
    #[default]
    Forever,
    /// Refetch once the cached copy is older than this.
    Ttl(Duration),
}

impl CachePolicy {
    /// Build a policy from an optional TTL in seconds.
    pub const fn from_ttl_secs(secs: Option<u64>) -> Self {
        match secs {
            Some(secs) => Self::Ttl(Duration::from_secs(secs)),
            None => Self::Forever,
        }
    }

    fn is_fresh(self, fetched_at: Instant) -> bool {
        match self {
            Self::Forever => true,
            Self::Ttl(ttl) => fetched_at.elapsed() < ttl,
        }
    }
}

/// All occurrences of one flagged word.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct IssueReport {
    /// Why the word was flagged.
    pub kind: IssueKind,
    /// The normalized flagged word.
    pub word: String,
    /// The style guide term that flagged it.
    pub term: Term,
    /// Each occurrence with its surrounding text.
    pub matches: Vec<Match>,
}

#[derive(Debug)]
struct CachedGuide {
    guide: Arc<StyleGuide>,
    fetched_at: Instant,
}

/// Analyzes text against one style guide.
#[derive(Debug)]
pub struct Analyzer<S> {
    source: S,
    policy: CachePolicy,
    cache: Mutex<Option<CachedGuide>>,
}

impl<S: StyleGuideSource> Analyzer<S> {
    /// Create an analyzer that caches its document forever.
    pub fn new(source: S) -> Self {
        Self {
            source,
            policy: CachePolicy::default(),
            cache: Mutex::new(None),
        }
    }

    /// Set the cache policy.
    #[must_use]
    pub fn with_cache_policy(mut self, policy: CachePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The source documents are fetched from.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Return the style guide, fetching it if there is no fresh copy.
    ///
    /// A failed fetch leaves the cache as it was; the next call tries again.
    pub async fn style_guide(&self) -> FetchResult<Arc<StyleGuide>> {
        let mut slot = self.cache.lock().await;

        if let Some(cached) = slot.as_ref()
            && self.policy.is_fresh(cached.fetched_at)
        {
            tracing::debug!("using cached style guide");
            return Ok(Arc::clone(&cached.guide));
        }

        tracing::info!(source = %self.source.describe(), "fetching style guide");
        let guide = Arc::new(self.source.fetch().await?);
        *slot = Some(CachedGuide {
            guide: Arc::clone(&guide),
            fetched_at: Instant::now(),
        });
        Ok(guide)
    }

    /// Drop the cached document so the next call fetches it again.
    pub async fn invalidate(&self) {
        tracing::debug!("style guide cache invalidated");
        *self.cache.lock().await = None;
    }

    /// Analyze `text`, returning one report per distinct flagged word.
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    pub async fn analyze(&self, text: &str) -> FetchResult<Vec<IssueReport>> {
        let guide = self.style_guide().await?;
        Ok(analyze_with_guide(&guide, text))
    }
}

/// Analyze `text` against an already available style guide.
///
/// Reports follow the order in which flagged words first appear.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn analyze_with_guide(guide: &StyleGuide, text: &str) -> Vec<IssueReport> {
    let reports: Vec<IssueReport> = find_issues(guide, &[TextBlock::new(text)])
        .into_iter()
        .map(|issue| IssueReport {
            kind: issue.kind,
            matches: matches_with_context(&issue.word_list, &issue.matched_word),
            word: issue.matched_word,
            term: issue.term.clone(),
        })
        .collect();
    tracing::info!(issues = reports.len(), "analysis complete");
    reports
}
