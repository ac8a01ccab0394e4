//! Selector Infrastructure
//!
//! Rules are plain predicate functions over a [`Selection`]. The main-content
//! heuristics are a single ordered table of such rules (see [`content`]),
//! evaluated with first-match-wins semantics.

use dom_query::Selection;

pub mod content;
pub mod utils;

pub use content::{extract_main_content, MainContent, MAIN_CONTENT_RULES};

/// A selector rule that tests if a selection matches certain criteria.
pub type Rule = fn(&Selection) -> bool;

/// Query for the first descendant matching the rule.
///
/// Descendants are visited in document order; the root itself is not tested.
///
/// # Example
///
/// ```rust
/// use webpage_binder::selector::{self, utils};
/// use webpage_binder::dom;
///
/// let doc = dom::parse(r#"<div><main><p>text</p></main></div>"#);
///
/// fn is_main(sel: &dom_query::Selection) -> bool {
///     utils::is_tag(sel, "main")
/// }
///
/// let main = selector::query(&doc.select("div"), is_main);
/// assert!(main.is_some());
/// ```
#[must_use]
pub fn query<'a>(root: &Selection<'a>, rule: Rule) -> Option<Selection<'a>> {
    for node in root.select("*").nodes() {
        let sel = Selection::from(*node);
        if rule(&sel) {
            return Some(sel);
        }
    }
    None
}
