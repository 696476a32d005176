//! Style guide retrieval.
//!
//! A [`StyleGuideSource`] produces a [`StyleGuide`] on demand. Two sources
//! are provided:
//!
//! - [`HttpSource`] issues `GET {base}/styleguide/{org}/{library}[?key=...]`
//!   and unwraps the `{ success, result }` envelope.
//! - [`FileSource`] reads the same document from disk, with or without the
//!   envelope, for offline use.
//!
//! Neither source retries; every failure is returned as a [`FetchError`].

use std::future::Future;
use std::time::Duration;

use camino::Utf8PathBuf;
use reqwest::Url;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;

use crate::error::{FetchError, FetchResult};
use crate::style_guide::StyleGuide;

/// Default style guide API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.brand.ai";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Something that can produce a style guide document.
pub trait StyleGuideSource {
    /// Fetch the document. Called again only when the cached copy is gone.
    fn fetch(&self) -> impl Future<Output = FetchResult<StyleGuide>> + Send;

    /// Short description of where documents come from, for logs.
    fn describe(&self) -> String;
}

/// Identifies one style guide library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryRef {
    /// Organization that owns the library.
    pub organization: String,
    /// Library name.
    pub library: String,
    /// Share key for private libraries.
    pub key: Option<String>,
}

impl LibraryRef {
    /// Create a reference to a public library.
    pub fn new(organization: impl Into<String>, library: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            library: library.into(),
            key: None,
        }
    }

    /// Attach a share key for a private library.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Build the document URL below `base`.
    ///
    /// Path segments and the key are percent-encoded.
    pub fn url(&self, base: &str) -> FetchResult<Url> {
        let mut url = Url::parse(base)
            .map_err(|e| FetchError::InvalidUrl(format!("{base}: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| FetchError::InvalidUrl(format!("{base}: cannot be a base URL")))?
            .pop_if_empty()
            .extend(["styleguide", self.organization.as_str(), self.library.as_str()]);
        if let Some(ref key) = self.key {
            url.query_pairs_mut().append_pair("key", key);
        }
        Ok(url)
    }
}

/// Response wrapper returned by the style guide API.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    result: Option<StyleGuide>,
}

/// Turn an HTTP status and body into a style guide.
///
/// Anything but `200` is an [`FetchError::Http`]. A `200` whose body is not a
/// JSON envelope, reports `success: false`, or lacks `result` is a
/// [`FetchError::Protocol`].
pub fn parse_envelope(status: u16, body: &str) -> FetchResult<StyleGuide> {
    if status != 200 {
        return Err(FetchError::Http { status });
    }
    if body.trim().is_empty() {
        return Err(FetchError::Protocol("empty response body".to_string()));
    }
    let envelope: Envelope =
        serde_json::from_str(body).map_err(|e| FetchError::Protocol(e.to_string()))?;
    if !envelope.success {
        return Err(FetchError::Protocol(
            "server reported an unsuccessful response".to_string(),
        ));
    }
    envelope
        .result
        .ok_or_else(|| FetchError::Protocol("response has no result".to_string()))
}

/// Fetches a style guide over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    url: Url,
}

impl HttpSource {
    /// Create a source for `library` under `base`, e.g. [`DEFAULT_BASE_URL`].
    pub fn new(base: &str, library: &LibraryRef, timeout: Duration) -> FetchResult<Self> {
        let url = library.url(base)?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::Transport)?;
        Ok(Self { client, url })
    }

    /// The document URL this source requests.
    pub const fn url(&self) -> &Url {
        &self.url
    }
}

impl StyleGuideSource for HttpSource {
    #[tracing::instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> FetchResult<StyleGuide> {
        let response = self
            .client
            .get(self.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(FetchError::Transport)?;
        tracing::debug!(status, body_len = body.len(), "style guide response received");
        parse_envelope(status, &body)
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}

/// Reads a style guide from a local JSON file.
///
/// The file may hold either the API envelope or the bare document.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: Utf8PathBuf,
}

impl FileSource {
    /// Create a source reading `path`.
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StyleGuideSource for FileSource {
    #[tracing::instrument(skip(self), fields(path = %self.path))]
    async fn fetch(&self) -> FetchResult<StyleGuide> {
        let body = tokio::fs::read_to_string(self.path.as_std_path())
            .await
            .map_err(|source| FetchError::Io {
                path: self.path.clone(),
                source,
            })?;
        parse_document(&body)
    }

    fn describe(&self) -> String {
        self.path.to_string()
    }
}

/// Parse a local document, accepting the envelope or a bare style guide.
fn parse_document(body: &str) -> FetchResult<StyleGuide> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| FetchError::Protocol(e.to_string()))?;
    if value.get("success").is_some() {
        return parse_envelope(200, body);
    }
    serde_json::from_value(value).map_err(|e| FetchError::Protocol(e.to_string()))
}
