//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use webpage_binder::render::{PdfRenderer, WordRenderer};
use webpage_binder::{DocumentBlock, RenderError};

pub const PDF_BYTES: &[u8] = b"%PDF-1.7 test";
pub const DOCX_BYTES: &[u8] = b"PK\x03\x04 test";

/// Renderer that records what it was asked to render.
#[derive(Default)]
pub struct RecordingRenderer {
    pub calls: Cell<usize>,
    pub markup: RefCell<Option<String>>,
    pub blocks: RefCell<Option<Vec<DocumentBlock>>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rendered_blocks(&self) -> Vec<DocumentBlock> {
        self.blocks.borrow().clone().unwrap_or_default()
    }

    pub fn rendered_markup(&self) -> String {
        self.markup.borrow().clone().unwrap_or_default()
    }
}

impl PdfRenderer for RecordingRenderer {
    fn render_pdf(&self, markup: &str) -> Result<Vec<u8>, RenderError> {
        self.calls.set(self.calls.get() + 1);
        *self.markup.borrow_mut() = Some(markup.to_string());
        Ok(PDF_BYTES.to_vec())
    }
}

impl WordRenderer for RecordingRenderer {
    fn render_docx(&self, blocks: &[DocumentBlock]) -> Result<Vec<u8>, RenderError> {
        self.calls.set(self.calls.get() + 1);
        *self.blocks.borrow_mut() = Some(blocks.to_vec());
        Ok(DOCX_BYTES.to_vec())
    }
}

/// Blocks without the whitespace-only paragraphs.
pub fn meaningful(blocks: &[DocumentBlock]) -> Vec<DocumentBlock> {
    blocks
        .iter()
        .filter(|block| !matches!(block, DocumentBlock::Paragraph { text } if text.trim().is_empty()))
        .cloned()
        .collect()
}
