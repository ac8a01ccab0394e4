//! Fetch collaborator.
//!
//! The pipeline never talks to the network directly; it asks a [`Fetcher`]
//! for page text, stylesheet text and image bytes, one request at a time.
//! [`HttpFetcher`] is the blocking HTTP implementation, [`MemoryFetcher`]
//! serves pre-fetched content (offline runs, fixtures, benchmarks).

use std::collections::HashMap;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;
use url::Url;

use crate::encoding;
use crate::error::{Error, FetchError};
use crate::options::Options;
use crate::url_utils;

/// Source of remote text and bytes.
pub trait Fetcher {
    /// Fetch a text resource (page or stylesheet), decoded to UTF-8.
    fn fetch_text(&self, url: &str) -> Result<String, FetchError>;

    /// Fetch a binary resource (image).
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        (**self).fetch_text(url)
    }

    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        (**self).fetch_bytes(url)
    }
}

/// Blocking HTTP fetcher.
///
/// No retries. Timeouts are whatever [`Options::timeout`] says, or the
/// transport default when unset.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(options: &Options) -> Result<Self, Error> {
        let mut builder = Client::builder();
        if let Some(user_agent) = &options.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| Error::Client {
            reason: e.to_string(),
        })?;
        Ok(Self { client })
    }

    /// GET `url`, failing on transport errors and non-2xx statuses.
    fn get(&self, url: &str) -> Result<(Option<String>, Vec<u8>), FetchError> {
        check_scheme(url)?;

        debug!("GET {url}");
        let network = |e: reqwest::Error| FetchError::Network {
            url: url.to_string(),
            reason: e.to_string(),
        };

        let response = self.client.get(url).send().map_err(network)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().map_err(network)?;
        Ok((content_type, body.to_vec()))
    }
}

/// Only `http` and `https` are fetched, in any letter case.
fn check_scheme(url: &str) -> Result<(), FetchError> {
    if Url::parse(url).is_ok_and(|parsed| url_utils::is_http(&parsed)) {
        Ok(())
    } else {
        Err(FetchError::UnsupportedScheme { url: url.to_string() })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let (content_type, body) = self.get(url)?;
        Ok(encoding::transcode_to_utf8(&body, content_type.as_deref()))
    }

    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.get(url).map(|(_, body)| body)
    }
}

/// In-memory fetcher keyed by exact URL.
///
/// Unknown URLs fail with HTTP 404; URLs registered through
/// [`MemoryFetcher::with_status`] fail with that status.
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    resources: HashMap<String, Result<Vec<u8>, u16>>,
}

impl MemoryFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url`.
    #[must_use]
    pub fn with(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.resources.insert(url.to_string(), Ok(body.into()));
        self
    }

    /// Answer `url` with a non-success status.
    #[must_use]
    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.resources.insert(url.to_string(), Err(status));
        self
    }

    fn lookup(&self, url: &str) -> Result<&[u8], FetchError> {
        match self.resources.get(url) {
            Some(Ok(body)) => Ok(body),
            Some(Err(status)) => Err(FetchError::Status {
                url: url.to_string(),
                status: *status,
            }),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

impl Fetcher for MemoryFetcher {
    fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        self.lookup(url).map(|body| encoding::transcode_to_utf8(body, None))
    }

    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.lookup(url).map(<[u8]>::to_vec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_fetcher_serves_registered() {
        let fetcher = MemoryFetcher::new()
            .with("https://a.test/", "<p>hi</p>")
            .with("https://a.test/x.png", vec![0x89, b'P', b'N', b'G']);

        assert_eq!(fetcher.fetch_text("https://a.test/"), Ok("<p>hi</p>".to_string()));
        assert_eq!(
            fetcher.fetch_bytes("https://a.test/x.png"),
            Ok(vec![0x89, b'P', b'N', b'G'])
        );
    }

    #[test]
    fn test_memory_fetcher_status_errors() {
        let fetcher = MemoryFetcher::new().with_status("https://a.test/down", 503);

        assert_eq!(
            fetcher.fetch_text("https://a.test/down"),
            Err(FetchError::Status {
                url: "https://a.test/down".into(),
                status: 503
            })
        );
        assert!(matches!(
            fetcher.fetch_bytes("https://a.test/missing"),
            Err(FetchError::Status { status: 404, .. })
        ));
    }

    #[test]
    fn test_http_fetcher_rejects_non_http() {
        let Ok(fetcher) = HttpFetcher::new(&Options::default()) else {
            panic!("client should build with default options");
        };

        let err = fetcher.fetch_bytes("mailto:someone@example.com");
        assert_eq!(
            err,
            Err(FetchError::UnsupportedScheme {
                url: "mailto:someone@example.com".into()
            })
        );
    }

    #[test]
    fn test_scheme_check_ignores_case() {
        assert_eq!(check_scheme("HTTPS://Example.com/post"), Ok(()));
        assert_eq!(check_scheme("Http://example.com/"), Ok(()));
        assert_eq!(
            check_scheme("FTP://example.com/"),
            Err(FetchError::UnsupportedScheme {
                url: "FTP://example.com/".into()
            })
        );
        assert!(check_scheme("/relative.css").is_err());
    }

    #[test]
    fn test_fetcher_by_reference() {
        fn first_byte(fetcher: impl Fetcher, url: &str) -> Option<u8> {
            fetcher.fetch_bytes(url).ok().and_then(|b| b.first().copied())
        }

        let fetcher = MemoryFetcher::new().with("https://a.test/b", vec![7]);
        assert_eq!(first_byte(&fetcher, "https://a.test/b"), Some(7));
    }
}
