//! Warning log for one conversion run.
//!
//! Every recoverable problem (an unreachable page, stylesheet or image, or a
//! page whose main content could not be located) becomes a [`Warning`]. The
//! orchestrator owns a single [`Diagnostics`] per run and lends it by `&mut`
//! to each stage; nothing is global.

use std::fmt;

use serde::Serialize;
use tracing::warn;

/// A recoverable problem encountered while building the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// The page itself could not be fetched; it contributes nothing.
    PageFetch { url: String, reason: String },

    /// A linked stylesheet could not be fetched and was left as a link.
    Stylesheet { url: String, reason: String },

    /// An image could not be fetched or decoded and was dropped.
    Image { url: String, reason: String },

    /// No main-content region matched; the whole page was used.
    FullPageFallback { url: String },
}

impl Warning {
    /// The URL this warning is about.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::PageFetch { url, .. }
            | Self::Stylesheet { url, .. }
            | Self::Image { url, .. }
            | Self::FullPageFallback { url } => url,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PageFetch { url, reason } => {
                write!(f, "Failed to retrieve the webpage content for URL: {url} ({reason})")
            }
            Self::Stylesheet { url, reason } => {
                write!(f, "Failed to retrieve CSS file {url}: {reason}")
            }
            Self::Image { url, reason } => write!(f, "Failed to retrieve image {url}: {reason}"),
            Self::FullPageFallback { url } => {
                write!(f, "Main content not found in {url}, using full page content.")
            }
        }
    }
}

/// Ordered warning collector.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning and log it.
    pub fn push(&mut self, warning: Warning) {
        warn!("{warning}");
        self.warnings.push(warning);
    }

    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    #[must_use]
    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_preserves_order() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Warning::FullPageFallback { url: "https://a.test/".into() });
        diagnostics.push(Warning::Image {
            url: "https://a.test/x.png".into(),
            reason: "HTTP 404".into(),
        });

        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics.warnings()[0].url(), "https://a.test/");
        assert_eq!(diagnostics.warnings()[1].url(), "https://a.test/x.png");
    }

    #[test]
    fn test_display_names_the_url() {
        let warning = Warning::PageFetch {
            url: "https://down.test/page".into(),
            reason: "HTTP 500".into(),
        };
        assert!(warning.to_string().contains("https://down.test/page"));

        let warning = Warning::Stylesheet {
            url: "https://a.test/site.css".into(),
            reason: "HTTP 404".into(),
        };
        assert_eq!(
            warning.to_string(),
            "Failed to retrieve CSS file https://a.test/site.css: HTTP 404"
        );
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let warning = Warning::FullPageFallback { url: "https://a.test/".into() };
        let json = serde_json::to_string(&warning).unwrap_or_default();
        assert_eq!(json, r#"{"kind":"full_page_fallback","url":"https://a.test/"}"#);
    }
}
