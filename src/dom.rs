//! DOM Operations Adapter
//!
//! A small set of helpers over the `dom_query` crate. Every stage of the
//! pipeline parses and serializes through here, so parsing rules (html5ever,
//! which always synthesizes `html`, `head` and `body`) are the same everywhere.

pub use dom_query::{Document, NodeRef, Selection};
pub use tendril::StrTendril;

// === Parsing and Serialization ===

/// Parse an HTML document or fragment.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// Serialize a whole document back to markup.
#[inline]
#[must_use]
pub fn document_html(doc: &Document) -> String {
    doc.html().to_string()
}

/// Outer HTML of the first node in the selection.
#[inline]
#[must_use]
pub fn outer_html(sel: &Selection) -> StrTendril {
    sel.html()
}

// === Attributes ===

/// Any attribute value.
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Element `id` attribute.
#[inline]
#[must_use]
pub fn id(sel: &Selection) -> Option<String> {
    get_attribute(sel, "id")
}

/// Whether a whitespace-separated attribute (`class`, `rel`) contains `token`.
///
/// Matching is exact per token, so `main-content-wrapper` does not count as
/// `main-content`.
#[must_use]
pub fn has_token(sel: &Selection, attr: &str, token: &str) -> bool {
    sel.attr(attr)
        .is_some_and(|value| value.split_ascii_whitespace().any(|t| t == token))
}

// === Tag / Node Information ===

/// Lowercase tag name of the first node in the selection.
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes().first().and_then(node_tag)
}

/// Lowercase tag name of an element node, `None` for text and other nodes.
#[must_use]
pub fn node_tag(node: &NodeRef) -> Option<String> {
    if !node.is_element() {
        return None;
    }
    node.node_name().map(|t| t.to_ascii_lowercase())
}

/// All text content of the node and its descendants.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

// === Tree Manipulation ===

/// Remove every node in the selection, with its subtree.
#[inline]
pub fn remove(sel: &Selection) {
    sel.remove();
}

/// Replace every node in the selection with parsed markup.
#[inline]
pub fn replace_with_html(sel: &Selection, html: &str) {
    sel.replace_with_html(html);
}

/// Insert markup as the last child.
#[inline]
pub fn append_html(sel: &Selection, html: &str) {
    sel.append_html(html);
}

/// Insert markup as the first child.
#[inline]
pub fn prepend_html(sel: &Selection, html: &str) {
    sel.prepend_html(html);
}
