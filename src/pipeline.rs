//! Pipeline orchestration.
//!
//! For each source URL, in order: fetch the page, inline its stylesheets,
//! select its main content, and normalize the result into styled markup.
//! A page that cannot be fetched is skipped with a warning and contributes
//! nothing. The surviving pages are then combined:
//!
//! - PDF: the styled markup of every page is concatenated and handed to the
//!   [`PdfRenderer`] as is.
//! - DOCX: every page's styled markup is translated into document blocks and
//!   the sequences are concatenated for the [`WordRenderer`].
//!
//! Known limitation: on the DOCX path all relative image references are
//! resolved against the base URL of the *last* page that was processed, so a
//! relative image from an earlier page on a different site can mis-resolve.

use tracing::{debug, info};
use url::Url;

use crate::blocks;
use crate::diagnostics::{Diagnostics, Warning};
use crate::dom;
use crate::error::{Error, Result};
use crate::fetch::Fetcher;
use crate::inline::inline_stylesheets;
use crate::options::Options;
use crate::render::{PdfRenderer, WordRenderer};
use crate::result::{CombinedDocument, ConversionOutput, Format, GeneratedDocument};
use crate::selector::extract_main_content;
use crate::style;
use crate::url_utils::page_base_url;

/// A fetched page before any processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSource {
    pub url: String,
    pub markup: String,
    /// Origin plus root path; relative references join against this.
    pub base_url: Url,
}

/// A page after inlining, content selection and normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedPage {
    pub url: String,
    pub base_url: Url,
    /// Styled markup, always with `html` and `head`.
    pub styled: String,
    /// Main-content rule that matched, `None` on full-page fallback.
    pub rule: Option<&'static str>,
}

/// Sequential conversion pipeline over borrowed collaborators.
pub struct Pipeline<'a> {
    fetcher: &'a dyn Fetcher,
    pdf: &'a dyn PdfRenderer,
    word: &'a dyn WordRenderer,
    options: Options,
}

impl<'a> Pipeline<'a> {
    #[must_use]
    pub fn new(
        fetcher: &'a dyn Fetcher,
        pdf: &'a dyn PdfRenderer,
        word: &'a dyn WordRenderer,
        options: Options,
    ) -> Self {
        Self {
            fetcher,
            pdf,
            word,
            options,
        }
    }

    /// Fetch one page. Failures are recorded and yield `None`.
    ///
    /// The request goes to the parsed form of `url` (lowercase scheme and
    /// host); warnings and [`PageSource::url`] keep the caller's spelling.
    pub fn fetch_page(&self, url: &str, diagnostics: &mut Diagnostics) -> Option<PageSource> {
        let parsed = Url::parse(url.trim()).ok();
        let (Some(parsed), Some(base_url)) = (parsed, page_base_url(url)) else {
            diagnostics.push(Warning::PageFetch {
                url: url.to_string(),
                reason: "not a valid absolute URL".to_string(),
            });
            return None;
        };

        match self.fetcher.fetch_text(parsed.as_str()) {
            Ok(markup) => Some(PageSource {
                url: url.to_string(),
                markup,
                base_url,
            }),
            Err(err) => {
                diagnostics.push(Warning::PageFetch {
                    url: url.to_string(),
                    reason: err.to_string(),
                });
                None
            }
        }
    }

    /// Inline stylesheets, select the main content and normalize it.
    pub fn process_source(&self, source: &PageSource, diagnostics: &mut Diagnostics) -> ProcessedPage {
        let doc = dom::parse(&source.markup);
        let with_css = if self.options.inline_stylesheets {
            inline_stylesheets(&doc, &source.base_url, self.fetcher, diagnostics)
        } else {
            dom::document_html(&doc)
        };

        let main = extract_main_content(&dom::parse(&with_css), &source.url, diagnostics);
        let styled = style::normalize(&main.html, &self.options);

        ProcessedPage {
            url: source.url.clone(),
            base_url: source.base_url.clone(),
            styled,
            rule: main.rule,
        }
    }

    /// Fetch and process one page.
    pub fn process_page(&self, url: &str, diagnostics: &mut Diagnostics) -> Option<ProcessedPage> {
        let source = self.fetch_page(url, diagnostics)?;
        let page = self.process_source(&source, diagnostics);
        info!("processed {url} ({})", page.rule.unwrap_or("full page"));
        Some(page)
    }

    /// Process every URL and combine the pages for `format`, without rendering.
    ///
    /// Empty and whitespace-only URLs are ignored. Fails with
    /// [`Error::TooManyUrls`] before fetching anything, and with
    /// [`Error::NoValidContent`] when no page survived.
    pub fn assemble<S: AsRef<str>>(
        &self,
        urls: &[S],
        format: Format,
        diagnostics: &mut Diagnostics,
    ) -> Result<CombinedDocument> {
        let urls: Vec<&str> = urls
            .iter()
            .map(|u| u.as_ref().trim())
            .filter(|u| !u.is_empty())
            .collect();
        if urls.len() > self.options.max_urls {
            return Err(Error::TooManyUrls {
                given: urls.len(),
                max: self.options.max_urls,
            });
        }

        let pages: Vec<ProcessedPage> = urls
            .iter()
            .filter_map(|url| self.process_page(url, diagnostics))
            .collect();
        let Some(last) = pages.last() else {
            return Err(Error::NoValidContent);
        };
        debug!("{} of {} pages produced content", pages.len(), urls.len());

        match format {
            Format::Pdf => Ok(CombinedDocument::Markup(
                pages.iter().map(|page| page.styled.as_str()).collect(),
            )),
            Format::Docx => {
                let base = &last.base_url;
                let blocks = pages
                    .iter()
                    .flat_map(|page| {
                        blocks::translate(&page.styled, base, self.fetcher, &self.options, diagnostics)
                    })
                    .collect();
                Ok(CombinedDocument::Blocks(blocks))
            }
        }
    }

    /// Hand a combined document to the matching renderer.
    pub fn render(&self, document: &CombinedDocument) -> Result<GeneratedDocument> {
        match document {
            CombinedDocument::Markup(markup) => {
                let bytes = self.pdf.render_pdf(markup)?;
                Ok(GeneratedDocument::new(Format::Pdf, bytes))
            }
            CombinedDocument::Blocks(blocks) => {
                let bytes = self.word.render_docx(blocks)?;
                Ok(GeneratedDocument::new(Format::Docx, bytes))
            }
        }
    }

    /// Run the whole conversion and return the document with all warnings.
    pub fn convert<S: AsRef<str>>(&self, urls: &[S], format: Format) -> ConversionOutput {
        let mut diagnostics = Diagnostics::new();
        let result = self
            .assemble(urls, format, &mut diagnostics)
            .and_then(|document| self.render(&document));

        ConversionOutput {
            result,
            warnings: diagnostics.into_warnings(),
        }
    }
}
