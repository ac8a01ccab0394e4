//! Error types for webpage-binder.
//!
//! Only [`Error`] ever reaches the caller as a failure. [`FetchError`] is
//! raised by the fetch collaborator and always recovered inside the pipeline
//! (the page, stylesheet or image is skipped and a warning recorded).
//! [`RenderError`] is fatal to a run and is wrapped in [`Error::Render`].

/// Failure reported by a [`crate::fetch::Fetcher`].
///
/// Protocol failures (a response arrived with a non-success status) are kept
/// apart from transport failures so callers can tell them apart in warnings,
/// although the pipeline treats both the same way.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The server answered with a non-2xx status.
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// Connection, DNS, TLS or body read failure.
    #[error("network error for {url}: {reason}")]
    Network { url: String, reason: String },

    /// The reference cannot be served by this fetcher (e.g. `mailto:`).
    #[error("unsupported URL {url}")]
    UnsupportedScheme { url: String },
}

impl FetchError {
    /// The URL the failed request was made for.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Status { url, .. } | Self::Network { url, .. } | Self::UnsupportedScheme { url } => url,
        }
    }
}

/// The renderer rejected the assembled document.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The renderer ran but reported a failure.
    #[error("{renderer} failed: {reason}")]
    Failed { renderer: String, reason: String },

    /// No renderer is configured for the requested format.
    #[error("no {format} renderer configured")]
    NotConfigured { format: &'static str },

    /// The renderer process could not be spawned or piped.
    #[error("{renderer} could not be run: {source}")]
    Io {
        renderer: String,
        #[source]
        source: std::io::Error,
    },
}

/// Error type for a conversion run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Every page failed to fetch, or no URLs were given.
    #[error("No valid content to generate document")]
    NoValidContent,

    /// More URLs than the configured maximum were supplied.
    #[error("{given} URLs supplied, at most {max} are allowed")]
    TooManyUrls { given: usize, max: usize },

    /// The renderer failed; no partial output is returned.
    #[error("Failed to generate document: {0}")]
    Render(#[from] RenderError),

    /// The HTTP client could not be constructed.
    #[error("HTTP client setup failed: {reason}")]
    Client { reason: String },
}

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;
