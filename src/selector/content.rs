//! Main-content selection
//!
//! Locates the region of a page that holds its substantive content. The
//! heuristics live in [`MAIN_CONTENT_RULES`]; the first rule with a match
//! anywhere in the document wins. Structural chrome nested inside the chosen
//! region is dropped before it is serialized.
//!
//! This is best-effort: a page may keep some chrome or lose some content.

use dom_query::{Document, Selection};
use tracing::debug;

use crate::diagnostics::{Diagnostics, Warning};
use crate::dom;
use crate::selector::utils::{is_tag, is_tag_with_class, is_tag_with_id};
use crate::selector::{query, Rule};

/// Main-content rules in priority order. First match wins.
pub static MAIN_CONTENT_RULES: &[(&str, Rule)] = &[
    ("main", is_main),
    ("article", is_article),
    ("div.main-content", is_main_content_class),
    ("div#main-content", is_main_content_id),
    ("div.content", is_content_class),
    ("div#content", is_content_id),
    ("div.primary-content", is_primary_content_class),
];

/// Elements treated as boilerplate even inside the main region.
const CHROME_SELECTOR: &str = "nav, header, footer, aside";

fn is_main(sel: &Selection) -> bool {
    is_tag(sel, "main")
}

fn is_article(sel: &Selection) -> bool {
    is_tag(sel, "article")
}

fn is_main_content_class(sel: &Selection) -> bool {
    is_tag_with_class(sel, "div", "main-content")
}

fn is_main_content_id(sel: &Selection) -> bool {
    is_tag_with_id(sel, "div", "main-content")
}

fn is_content_class(sel: &Selection) -> bool {
    is_tag_with_class(sel, "div", "content")
}

fn is_content_id(sel: &Selection) -> bool {
    is_tag_with_id(sel, "div", "content")
}

fn is_primary_content_class(sel: &Selection) -> bool {
    is_tag_with_class(sel, "div", "primary-content")
}

/// Result of main-content selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainContent {
    /// Serialized main region, or the whole document on fallback.
    pub html: String,

    /// Name of the rule that matched, `None` on full-page fallback.
    pub rule: Option<&'static str>,
}

/// Find the first element matched by the rule table, with the rule's name.
#[must_use]
pub fn find_main_content<'a>(root: &Selection<'a>) -> Option<(&'static str, Selection<'a>)> {
    MAIN_CONTENT_RULES
        .iter()
        .find_map(|(name, rule)| query(root, *rule).map(|sel| (*name, sel)))
}

/// Extract the main content of a parsed page.
///
/// On a match, `nav`/`header`/`footer`/`aside` descendants of the region are
/// removed from `doc` and the region's outer HTML is returned. Without a
/// match the whole document is serialized unchanged and a
/// [`Warning::FullPageFallback`] naming `page_url` is recorded.
pub fn extract_main_content(
    doc: &Document,
    page_url: &str,
    diagnostics: &mut Diagnostics,
) -> MainContent {
    let root = doc.select("html");

    if let Some((rule, region)) = find_main_content(&root) {
        let chrome = region.select(CHROME_SELECTOR);
        debug!(
            "{page_url}: main content matched `{rule}`, dropping {} chrome elements",
            chrome.length()
        );
        dom::remove(&chrome);
        return MainContent {
            html: dom::outer_html(&region).to_string(),
            rule: Some(rule),
        };
    }

    diagnostics.push(Warning::FullPageFallback {
        url: page_url.to_string(),
    });
    MainContent {
        html: dom::document_html(doc),
        rule: None,
    }
}
