// src/extract/html.rs
// =============================================================================
// This module extracts link targets from HTML documents.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// Besides anchors we also collect resource references (images, scripts,
// stylesheets, frames, media) because a missing image is just as broken as
// a missing page.
// =============================================================================

use scraper::{ElementRef, Html, Selector};
use url::Url;

use super::resolve_url;

// Elements that reference another resource, with the attribute holding the URL.
// One combined selector keeps the results in document order.
const LINK_SELECTOR: &str = "a[href], area[href], link[href], img[src], script[src], \
                             iframe[src], source[src], video[src], audio[src]";

// Extracts all link targets from HTML content
//
// Parameters:
//   html: the HTML content to parse
//   base: the URL of the page (for resolving relative links)
//
// Returns: absolute http(s) URLs in document order (duplicates included,
// the caller deduplicates)
//
// Example:
//   html = "<a href='/docs'>Docs</a>"
//   base = "https://example.com"
//   result = ["https://example.com/docs"]
pub fn extract_html_links(html: &str, base: &Url) -> Vec<String> {
    let document = Html::parse_document(html);

    let selector = match Selector::parse(LINK_SELECTOR) {
        Ok(selector) => selector,
        Err(_) => return Vec::new(),
    };

    // A <base href> in the document wins over the URL we fetched it from
    let base = document_base(&document, base).unwrap_or_else(|| base.clone());

    document
        .select(&selector)
        .filter_map(reference_of)
        .filter_map(|raw| resolve_url(&base, raw))
        .collect()
}

// Returns the raw URL an element points to, picking the attribute by tag name
fn reference_of(element: ElementRef<'_>) -> Option<&str> {
    let value = element.value();
    match value.name() {
        "a" | "area" | "link" => value.attr("href"),
        _ => value.attr("src"),
    }
}

// Resolves the first <base href> against the document URL, if present
fn document_base(document: &Html, url: &Url) -> Option<Url> {
    let selector = Selector::parse("base[href]").ok()?;
    let href = document.select(&selector).next()?.value().attr("href")?;
    url.join(href.trim()).ok()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why one selector with commas instead of one per tag?
//    - document.select() walks the tree once and yields matches in document
//      order, so links come out in the order a reader sees them
//
// 2. Why Selector::parse(...) with a match instead of unwrap()?
//    - The selector is a constant, so it never fails in practice
//    - Returning an empty Vec keeps the "extraction never fails" promise
//      without a panic path
//
// 3. What does url.join() do with an absolute href?
//    - It replaces the base entirely, so the same call handles both
//      "/docs" and "https://other.com/docs"
// -----------------------------------------------------------------------------
