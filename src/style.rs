//! Style normalization.
//!
//! Gives extracted content a minimal valid document shell and appends the
//! baseline presentation rules used by both output paths. Existing markup is
//! never removed or altered; applying the normalizer twice only appends a
//! second, redundant style block.

use dom_query::Document;

use crate::dom;
use crate::options::Options;

/// Baseline presentation rules.
#[must_use]
pub fn baseline_css(options: &Options) -> String {
    format!(
        "
    @import url('https://fonts.googleapis.com/css2?family=Roboto:wght@400;700&display=swap');

    body {{
        font-family: {font};
        line-height: {line_height};
        margin: 0;
        padding: 20px;
    }}
    h1, h2, h3, h4, h5, h6 {{
        font-weight: 700;
    }}
    img {{
        display: block;
        margin-left: auto;
        margin-right: auto;
        width: {width}%;
        height: auto;
    }}
    p {{
        text-align: justify;
    }}
    ",
        font = options.body_font_family,
        line_height = options.line_height,
        width = options.image_width_percent,
    )
}

/// Make sure the document has an `html` root with a `head` as its first child.
///
/// The html5ever parser already synthesizes both for any input, so in
/// practice only the `head` check can ever fire (after a caller removed it).
fn ensure_shell(doc: &Document) {
    let html = doc.select("html");
    if html.is_empty() {
        return;
    }
    if doc.select("html > head").is_empty() {
        dom::prepend_html(&html, "<head></head>");
    }
}

/// Normalize a fragment or full document and return the styled markup.
#[must_use]
pub fn normalize(html: &str, options: &Options) -> String {
    let doc = dom::parse(html);
    ensure_shell(&doc);
    let head = doc.select("html > head").first();
    dom::append_html(&head, &format!("<style>{}</style>", baseline_css(options)));
    dom::document_html(&doc)
}
