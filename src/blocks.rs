//! Document blocks and the DOM-to-block translator.
//!
//! The structured (word-processor) output path does not render markup; it
//! consumes an ordered list of [`DocumentBlock`]s. [`translate`] produces that
//! list with a depth-first, document-order walk:
//!
//! - `h1`-`h3` become headings, `p` becomes a paragraph, each carrying the
//!   element's full text; images inside them follow the text block, and
//!   their text nodes are not emitted again,
//! - `img` is resolved against the base URL and fetched; a failed fetch drops
//!   the image with a warning,
//! - any other element emits nothing itself but its children are walked,
//! - text nodes met along the way become paragraphs verbatim.
//!
//! The walk keeps its own stack, so nesting depth is bounded only by memory.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use dom_query::{NodeRef, Selection};
use serde::{Serialize, Serializer};
use tracing::debug;
use url::Url;

use crate::diagnostics::{Diagnostics, Warning};
use crate::dom;
use crate::fetch::Fetcher;
use crate::options::Options;
use crate::url_utils::{create_absolute_url, is_data_uri};

/// Elements whose text is not document content.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Abstract, renderer-agnostic unit of output content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DocumentBlock {
    /// Heading of level 1 to 3.
    Heading { level: u8, text: String },

    /// Paragraph of plain text. May be whitespace only.
    Paragraph { text: String },

    /// Embedded image bytes shown at a fixed width.
    Image {
        #[serde(serialize_with = "as_base64")]
        bytes: Vec<u8>,
        width_inches: f32,
    },
}

impl DocumentBlock {
    #[must_use]
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self::Heading {
            level,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::Paragraph { text: text.into() }
    }

    #[must_use]
    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image { .. })
    }
}

fn as_base64<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD.encode(bytes))
}

/// Decode a base64 `data:` URI payload.
fn decode_data_uri(uri: &str) -> Result<Vec<u8>, String> {
    let (header, payload) = uri
        .trim()
        .split_once(',')
        .ok_or_else(|| "malformed data URI".to_string())?;

    if !header.to_ascii_lowercase().ends_with(";base64") {
        return Err("only base64 data URIs are supported".to_string());
    }

    let payload: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    STANDARD.decode(payload).map_err(|e| e.to_string())
}

/// Shorten long references (data URIs) for warnings.
fn display_reference(reference: &str) -> String {
    const MAX: usize = 64;
    match reference.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &reference[..cut]),
        None => reference.to_string(),
    }
}

struct Translator<'a, F: Fetcher + ?Sized> {
    base: &'a Url,
    fetcher: &'a F,
    options: &'a Options,
    blocks: Vec<DocumentBlock>,
}

impl<F: Fetcher + ?Sized> Translator<'_, F> {
    fn walk(&mut self, start: &NodeRef, diagnostics: &mut Diagnostics) {
        let mut stack: Vec<NodeRef> = start.children().into_iter().rev().collect();

        while let Some(node) = stack.pop() {
            if node.is_text() {
                self.text(&node.text());
                continue;
            }

            let Some(tag) = dom::node_tag(&node) else {
                continue;
            };
            match tag.as_str() {
                "h1" | "h2" | "h3" => {
                    let level = match tag.as_str() {
                        "h1" => 1,
                        "h2" => 2,
                        _ => 3,
                    };
                    let text = dom::text_content(&Selection::from(node)).to_string();
                    self.blocks.push(DocumentBlock::Heading { level, text });
                    self.nested_images(node, diagnostics);
                }
                "p" => {
                    let text = dom::text_content(&Selection::from(node)).to_string();
                    self.blocks.push(DocumentBlock::Paragraph { text });
                    self.nested_images(node, diagnostics);
                }
                "img" => self.image(&Selection::from(node), diagnostics),
                t if self.options.skip_raw_text_elements && RAW_TEXT_ELEMENTS.contains(&t) => {}
                _ => stack.extend(node.children().into_iter().rev()),
            }
        }
    }

    /// Images inside a text block, after its text, in document order.
    fn nested_images(&mut self, node: NodeRef, diagnostics: &mut Diagnostics) {
        let images = Selection::from(node).select("img");
        for img in images.nodes() {
            self.image(&Selection::from(*img), diagnostics);
        }
    }

    fn text(&mut self, text: &str) {
        if self.options.keep_blank_text || !text.trim().is_empty() {
            self.blocks.push(DocumentBlock::paragraph(text));
        }
    }

    fn image(&mut self, img: &Selection, diagnostics: &mut Diagnostics) {
        let Some(src) = dom::get_attribute(img, "src").filter(|s| !s.trim().is_empty()) else {
            return;
        };

        let fetched = if is_data_uri(&src) {
            decode_data_uri(&src).map_err(|reason| (display_reference(&src), reason))
        } else {
            let url = create_absolute_url(&src, self.base);
            self.fetcher
                .fetch_bytes(&url)
                .map_err(|e| (url, e.to_string()))
        };

        match fetched {
            Ok(bytes) => {
                debug!("embedded image {} ({} bytes)", display_reference(&src), bytes.len());
                self.blocks.push(DocumentBlock::Image {
                    bytes,
                    width_inches: self.options.image_width_inches,
                });
            }
            Err((url, reason)) => diagnostics.push(Warning::Image { url, reason }),
        }
    }
}

/// Translate markup into document blocks.
///
/// The walk starts at `body` when present, else at the document root.
/// Relative image references resolve against `base`.
pub fn translate<F: Fetcher + ?Sized>(
    html: &str,
    base: &Url,
    fetcher: &F,
    options: &Options,
    diagnostics: &mut Diagnostics,
) -> Vec<DocumentBlock> {
    let doc = dom::parse(html);
    let body = doc.select("body");
    let start = body.nodes().first().copied().unwrap_or_else(|| doc.root());

    let mut translator = Translator {
        base,
        fetcher,
        options,
        blocks: Vec::new(),
    };
    translator.walk(&start, diagnostics);
    translator.blocks
}
