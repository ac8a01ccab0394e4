//! Caller-facing output types.
//!
//! A run always ends in a [`ConversionOutput`]: either the finished document
//! bytes or the reason there are none, together with every warning recorded
//! along the way.

use serde::Serialize;

use crate::blocks::DocumentBlock;
use crate::diagnostics::Warning;
use crate::error::Error;

/// Target document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Styled markup handed to a PDF engine.
    Pdf,
    /// Document blocks handed to a word-processor writer.
    Docx,
}

impl Format {
    /// File name the finished document is offered under.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Pdf => "combined_webpage.pdf",
            Self::Docx => "combined_webpage.docx",
        }
    }

    /// MIME type of the finished document.
    #[must_use]
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

/// The finished, rendered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    pub bytes: Vec<u8>,
    pub file_name: &'static str,
    pub mime_type: &'static str,
}

impl GeneratedDocument {
    #[must_use]
    pub fn new(format: Format, bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            file_name: format.file_name(),
            mime_type: format.mime_type(),
        }
    }
}

/// All pages' contributions, ready for the renderer.
///
/// Page order always equals input URL order.
#[derive(Debug, Clone, PartialEq)]
pub enum CombinedDocument {
    /// Concatenated styled markup of every page (PDF path).
    Markup(String),
    /// Concatenated block sequences of every page (DOCX path).
    Blocks(Vec<DocumentBlock>),
}

/// Outcome of one conversion run.
#[derive(Debug)]
pub struct ConversionOutput {
    /// The document, or why there is none.
    pub result: Result<GeneratedDocument, Error>,

    /// Warnings recorded during the run, in the order they occurred.
    pub warnings: Vec<Warning>,
}

impl ConversionOutput {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// The document bytes, if the run succeeded.
    #[must_use]
    pub fn bytes(&self) -> Option<&[u8]> {
        self.result.as_ref().ok().map(|doc| doc.bytes.as_slice())
    }
}
