//! # webpage-binder
//!
//! Bind one or more web pages into a single offline document.
//!
//! Each page is fetched, its external stylesheets are inlined, its main
//! content region is selected (navigation, headers, footers and sidebars
//! stripped) and a minimal baseline style is applied. The pages are then
//! combined in input order and handed to a renderer: styled markup for a PDF
//! engine, or a list of abstract document blocks for a word-processor writer.
//!
//! ## Quick Start
//!
//! ```rust
//! use webpage_binder::fetch::MemoryFetcher;
//! use webpage_binder::render::Unconfigured;
//! use webpage_binder::{CombinedDocument, Diagnostics, DocumentBlock, Format, Options, Pipeline};
//!
//! let fetcher = MemoryFetcher::new().with(
//!     "https://example.com/post",
//!     "<nav>Menu</nav><main><h1>Title</h1><p>Body text</p></main>",
//! );
//! let options = Options { keep_blank_text: false, ..Options::default() };
//! let pipeline = Pipeline::new(&fetcher, &Unconfigured, &Unconfigured, options);
//!
//! let mut diagnostics = Diagnostics::new();
//! let combined = pipeline.assemble(&["https://example.com/post"], Format::Docx, &mut diagnostics)?;
//! assert_eq!(
//!     combined,
//!     CombinedDocument::Blocks(vec![
//!         DocumentBlock::heading(1, "Title"),
//!         DocumentBlock::paragraph("Body text"),
//!     ])
//! );
//! assert!(diagnostics.is_empty());
//! # Ok::<(), webpage_binder::Error>(())
//! ```
//!
//! ## Failure model
//!
//! A page, stylesheet or image that cannot be fetched is skipped and becomes
//! a [`Warning`]; the run goes on. Only two conditions end a run: no page
//! produced content ([`Error::NoValidContent`]) and the renderer failed
//! ([`Error::Render`]). Warnings are returned either way.

mod error;
mod options;
mod result;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// URL utilities for validation and resolution.
pub mod url_utils;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Fetch collaborator: trait, HTTP and in-memory implementations.
pub mod fetch;

/// Warning model and per-run collector.
pub mod diagnostics;

/// Stylesheet inlining.
pub mod inline;

/// Selector infrastructure and the main-content rule chain.
pub mod selector;

/// Baseline styling of extracted content.
pub mod style;

/// Document blocks and the markup-to-block translator.
pub mod blocks;

/// Rendering collaborators.
pub mod render;

/// Per-page processing and multi-page assembly.
pub mod pipeline;

// Public API - re-exports
pub use blocks::DocumentBlock;
pub use diagnostics::{Diagnostics, Warning};
pub use error::{Error, FetchError, RenderError, Result};
pub use options::Options;
pub use pipeline::Pipeline;
pub use result::{CombinedDocument, ConversionOutput, Format, GeneratedDocument};

use fetch::HttpFetcher;
use render::{CommandRenderer, WordRenderer};

/// Converts `urls` to a PDF over HTTP, rendered by `weasyprint - -`.
///
/// Client construction failures are reported in the output like any other
/// fatal error.
#[must_use]
pub fn convert_to_pdf<S: AsRef<str>>(urls: &[S], options: &Options) -> ConversionOutput {
    let pdf = CommandRenderer::weasyprint();
    convert_over_http(urls, Format::Pdf, &pdf, &render::Unconfigured, options)
}

/// Converts `urls` to a DOCX over HTTP, rendered by `writer`.
#[must_use]
pub fn convert_to_docx<S: AsRef<str>, W: WordRenderer>(
    urls: &[S],
    writer: &W,
    options: &Options,
) -> ConversionOutput {
    convert_over_http(urls, Format::Docx, &render::Unconfigured, writer, options)
}

fn convert_over_http<S: AsRef<str>>(
    urls: &[S],
    format: Format,
    pdf: &dyn render::PdfRenderer,
    word: &dyn WordRenderer,
    options: &Options,
) -> ConversionOutput {
    let fetcher = match HttpFetcher::new(options) {
        Ok(fetcher) => fetcher,
        Err(err) => {
            return ConversionOutput {
                result: Err(err),
                warnings: Vec::new(),
            }
        }
    };
    Pipeline::new(&fetcher, pdf, word, options.clone()).convert(urls, format)
}
