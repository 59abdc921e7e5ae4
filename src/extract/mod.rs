// src/extract/mod.rs
// =============================================================================
// Link extraction: turns document text into the list of URLs to check.
//
// Submodules:
// - html: anchors and resource references from HTML pages
// - markdown: links and images from Markdown files
//
// Whatever the document kind, the result is deduplicated, keeps first-seen
// order, and only contains absolute http(s) URLs. Extraction never fails;
// a document without links gives an empty Vec.
// =============================================================================

mod html;
mod markdown;

use std::collections::HashSet;
use url::Url;

use crate::fetch::DocumentKind;

/// Extracts the unique link targets of a document, in first-seen order.
pub fn extract_links(text: &str, base: &Url, kind: DocumentKind) -> Vec<String> {
    let found = match kind {
        DocumentKind::Html => html::extract_html_links(text, base),
        DocumentKind::Markdown => markdown::extract_markdown_links(text, base),
    };

    let mut seen = HashSet::new();
    found
        .into_iter()
        .filter(|url| seen.insert(url.clone()))
        .collect()
}

// Resolves a possibly-relative reference to an absolute URL
//
// Examples:
//   base = "https://example.com/page"
//   "/docs"              -> Some("https://example.com/docs")
//   "../other"           -> Some("https://example.com/other")
//   "https://other.com"  -> Some("https://other.com/")
//   "/docs#intro"        -> Some("https://example.com/docs")
//   "#section"           -> None (same page)
//   "javascript:void(0)" -> None (not HTTP)
//   ""                   -> None
pub(crate) fn resolve_url(base: &Url, raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() || raw.starts_with('#') {
        return None;
    }

    // join() handles absolute references too: they simply replace the base
    let mut url = base.join(raw).ok()?;
    if !is_checkable(&url) {
        return None;
    }
    url.set_fragment(None);

    Some(url.to_string())
}

// Only HTTP and HTTPS can be checked; mailto:, tel:, data:, file: etc. are skipped
fn is_checkable(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https") && url.host_str().is_some()
}
