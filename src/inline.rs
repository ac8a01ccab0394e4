//! Stylesheet inlining.
//!
//! Every `<link rel="stylesheet">` whose target can be fetched is replaced in
//! place by a `<style>` element carrying the fetched CSS verbatim. A link that
//! cannot be fetched stays as it is and produces one warning; the remaining
//! links are still processed.

use dom_query::{Document, Selection};
use tracing::debug;
use url::Url;

use crate::diagnostics::{Diagnostics, Warning};
use crate::dom;
use crate::fetch::Fetcher;
use crate::url_utils::create_absolute_url;

/// Stylesheet links in document order.
fn stylesheet_links<'a>(doc: &'a Document) -> Vec<Selection<'a>> {
    doc.select("link[rel]")
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .filter(|link| dom::has_token(link, "rel", "stylesheet"))
        .collect()
}

/// Inline all resolvable stylesheets of `doc` and return the serialized page.
///
/// Relative `href`s are joined against `base`. Links without an `href` are
/// left alone silently.
pub fn inline_stylesheets<F: Fetcher + ?Sized>(
    doc: &Document,
    base: &Url,
    fetcher: &F,
    diagnostics: &mut Diagnostics,
) -> String {
    for link in stylesheet_links(doc) {
        let Some(href) = dom::get_attribute(&link, "href") else {
            continue;
        };
        let href = create_absolute_url(&href, base);
        if href.is_empty() {
            continue;
        }

        match fetcher.fetch_text(&href) {
            Ok(css) => {
                debug!("inlined stylesheet {href} ({} bytes)", css.len());
                dom::replace_with_html(&link, &format!("<style type=\"text/css\">{css}</style>"));
            }
            Err(err) => diagnostics.push(Warning::Stylesheet {
                url: href,
                reason: err.to_string(),
            }),
        }
    }

    dom::document_html(doc)
}
