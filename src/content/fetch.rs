//! Content fetcher for local files and HTTP sources.
//!
//! The fetcher is a trait seam so the rest of the pipeline can be
//! exercised against an in-memory implementation in tests.

use std::path::PathBuf;

use tracing::debug;

use crate::error::FetchError;

// ============================================================================
// ContentSource
// ============================================================================

/// Where notebook content comes from: a local path or an HTTP(S) URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    /// Local filesystem path.
    Path(PathBuf),
    /// HTTP or HTTPS URL.
    Url(String),
}

impl ContentSource {
    /// Classifies a CLI-supplied string as a URL or a path.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Self::Url(raw.to_string())
        } else {
            Self::Path(PathBuf::from(raw))
        }
    }

    /// Label used for metrics: `"path"` or `"url"`.
    #[must_use]
    pub const fn kind_label(&self) -> &'static str {
        match self {
            Self::Path(_) => "path",
            Self::Url(_) => "url",
        }
    }
}

impl std::fmt::Display for ContentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

// ============================================================================
// ContentFetcher trait
// ============================================================================

/// Retrieves raw notebook text from a [`ContentSource`].
#[async_trait::async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Fetches the raw text behind the source.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] on transport failure, non-success HTTP
    /// status, or a missing/unreadable local file.
    async fn fetch(&self, source: &ContentSource) -> Result<String, FetchError>;
}

// ============================================================================
// Fetcher
// ============================================================================

/// Default fetcher: `tokio::fs` for paths, `reqwest` for URLs.
#[derive(Debug, Clone, Default)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    /// Creates a fetcher with a default HTTP client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ContentFetcher for Fetcher {
    async fn fetch(&self, source: &ContentSource) -> Result<String, FetchError> {
        match source {
            ContentSource::Path(path) => {
                debug!(path = %path.display(), "reading content file");
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|_| FetchError::MissingFile { path: path.clone() })
            }
            ContentSource::Url(url) => {
                debug!(%url, "fetching content");
                let response =
                    self.client
                        .get(url)
                        .send()
                        .await
                        .map_err(|e| FetchError::Transport {
                            url: url.clone(),
                            message: e.to_string(),
                        })?;

                let status = response.status();
                if !status.is_success() {
                    return Err(FetchError::Status {
                        url: url.clone(),
                        status: status.as_u16(),
                    });
                }

                response.text().await.map_err(|e| FetchError::Transport {
                    url: url.clone(),
                    message: e.to_string(),
                })
            }
        }
    }
}
