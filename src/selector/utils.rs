//! Predicates used to build main-content rules.
//!
//! Missing attributes read as empty strings so rules stay plain comparisons.

use crate::dom;
use dom_query::Selection;

/// Element id, empty when absent.
#[inline]
#[must_use]
pub fn id(sel: &Selection) -> String {
    dom::id(sel).unwrap_or_default()
}

/// Lowercase tag name, empty for non-elements.
#[inline]
#[must_use]
pub fn tag(sel: &Selection) -> String {
    dom::tag_name(sel).unwrap_or_default()
}

#[inline]
#[must_use]
pub fn is_tag(sel: &Selection, expected: &str) -> bool {
    tag(sel) == expected
}

/// `<tag class="... name ...">`, with `name` matched as a whole class token.
///
/// ```rust
/// use webpage_binder::dom;
/// use webpage_binder::selector::utils::is_tag_with_class;
///
/// let doc = dom::parse(r#"<div class="page content">x</div><div class="contents">y</div>"#);
/// let divs = doc.select("div");
///
/// assert!(is_tag_with_class(&divs.first(), "div", "content"));
/// assert!(!is_tag_with_class(&divs.last(), "div", "content"));
/// ```
#[inline]
#[must_use]
pub fn is_tag_with_class(sel: &Selection, expected_tag: &str, name: &str) -> bool {
    is_tag(sel, expected_tag) && dom::has_token(sel, "class", name)
}

/// `<tag id="name">`, exact match.
#[inline]
#[must_use]
pub fn is_tag_with_id(sel: &Selection, expected_tag: &str, name: &str) -> bool {
    is_tag(sel, expected_tag) && id(sel) == name
}
