// src/extract/markdown.rs
// =============================================================================
// This module extracts link targets from Markdown text.
//
// We use the `pulldown-cmark` crate which:
// - Parses Markdown into events (heading, paragraph, link, etc.)
// - Follows the CommonMark specification
// - Resolves reference-style links ([text][ref]) for us
//
// Raw HTML blocks inside the Markdown are handed to the HTML extractor so
// `<img src=...>` in a README is checked too.
// =============================================================================

use pulldown_cmark::{Event, Parser, Tag};
use url::Url;

use super::{html::extract_html_links, resolve_url};

// Extracts all link and image targets from Markdown text
//
// Example input:
//   "Check out [Rust](https://www.rust-lang.org) and [docs](./docs/)!"
//   base = "https://example.com/"
//
// Example output:
//   ["https://www.rust-lang.org/", "https://example.com/docs/"]
pub fn extract_markdown_links(markdown: &str, base: &Url) -> Vec<String> {
    let mut links = Vec::new();

    for event in Parser::new(markdown) {
        match event {
            // In pulldown-cmark 0.9 both are (link_type, dest_url, title)
            Event::Start(Tag::Link(_, dest_url, _)) | Event::Start(Tag::Image(_, dest_url, _)) => {
                if let Some(url) = resolve_url(base, &dest_url) {
                    links.push(url);
                }
            }
            Event::Html(fragment) => {
                links.extend(extract_html_links(&fragment, base));
            }
            _ => {}
        }
    }

    links
}
