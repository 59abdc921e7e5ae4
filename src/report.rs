// src/report.rs
// =============================================================================
// Turns a finished CrawlResult into the report the user reads.
//
// Two formats:
// - text: one line per link (status, target, where it was found), then a
//   summary block
// - json: a single pretty-printed object, handy for CI scripts
//
// The writer is generic so the same code prints to stdout and to the -o file.
// =============================================================================

use serde::Serialize;
use std::io::{self, Write};

use crate::config::OutputFormat;
use crate::model::{CrawlResult, Link, LinkStatus, Summary};

#[derive(Serialize)]
struct JsonReport<'a> {
    source: &'a str,
    summary: Summary,
    links: Vec<&'a Link>,
}

pub fn write_report<W: Write>(
    out: &mut W,
    result: &CrawlResult,
    format: OutputFormat,
    broken_only: bool,
) -> io::Result<()> {
    let links: Vec<&Link> = result
        .links()
        .filter(|link| !broken_only || link.status.is_failure())
        .collect();

    match format {
        OutputFormat::Json => {
            let report = JsonReport {
                source: result.source(),
                summary: result.summary(),
                links,
            };
            serde_json::to_writer_pretty(&mut *out, &report).map_err(io::Error::from)?;
            writeln!(out)
        }
        OutputFormat::Text => write_text(out, result, &links),
    }
}

fn write_text<W: Write>(out: &mut W, result: &CrawlResult, links: &[&Link]) -> io::Result<()> {
    if result.is_empty() {
        writeln!(out, "No links found in {}", result.source())?;
        return Ok(());
    }

    for link in links {
        writeln!(out, "{}", format_line(link))?;
    }
    if links.is_empty() {
        writeln!(out, "No broken links found.")?;
    }

    let summary = result.summary();
    writeln!(out)?;
    writeln!(out, "📊 Summary for {}:", result.source())?;
    writeln!(out, "   ✅ OK: {}", summary.ok)?;
    writeln!(out, "   ❌ Broken: {}", summary.broken)?;
    writeln!(out, "   ⚠️  Unreachable: {}", summary.unreachable)?;
    writeln!(out, "   📋 Total: {}", summary.total)?;
    Ok(())
}

// One report line:
//   OK 200       https://example.com/ (from https://site.test)
//   BROKEN 404   https://site.test/missing (from https://site.test)
//   UNREACHABLE  https://down.test/ (from https://site.test): request timed out
pub fn format_line(link: &Link) -> String {
    let mut line = format!(
        "{:<12} {} (from {})",
        format_status(link),
        link.target_url,
        link.source_location
    );
    if let Some(detail) = &link.detail {
        line.push_str(": ");
        line.push_str(detail);
    }
    line
}

fn format_status(link: &Link) -> String {
    let label = match link.status {
        LinkStatus::Ok => "OK",
        LinkStatus::Broken => "BROKEN",
        LinkStatus::Unreachable => "UNREACHABLE",
        LinkStatus::Unchecked => "UNCHECKED",
    };
    match link.http_code {
        Some(code) => format!("{} {}", label, code),
        None => label.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Verdict;

    fn sample() -> CrawlResult {
        let mut result = CrawlResult::from_targets(
            "https://site.test",
            vec![
                "https://site.test/missing".to_string(),
                "https://example.com/".to_string(),
                "https://down.test/".to_string(),
            ],
        );
        result.record("https://site.test/missing", Verdict::broken(404));
        result.record("https://example.com/", Verdict::ok(200));
        result.record("https://down.test/", Verdict::unreachable("request timed out"));
        result
    }

    fn render(result: &CrawlResult, format: OutputFormat, broken_only: bool) -> String {
        let mut buffer = Vec::new();
        write_report(&mut buffer, result, format, broken_only).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_text_lines() {
        let text = render(&sample(), OutputFormat::Text, false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "BROKEN 404   https://site.test/missing (from https://site.test)"
        );
        assert_eq!(
            lines[1],
            "OK 200       https://example.com/ (from https://site.test)"
        );
        assert_eq!(
            lines[2],
            "UNREACHABLE  https://down.test/ (from https://site.test): request timed out"
        );
        assert!(text.contains("Total: 3"));
    }

    #[test]
    fn test_broken_only_hides_ok_links() {
        let text = render(&sample(), OutputFormat::Text, true);
        assert!(!text.contains("OK 200"));
        assert!(text.contains("BROKEN 404"));
        assert!(text.contains("UNREACHABLE"));
    }

    #[test]
    fn test_no_links() {
        let result = CrawlResult::new("index.html");
        let text = render(&result, OutputFormat::Text, false);
        assert_eq!(text, "No links found in index.html\n");
    }

    #[test]
    fn test_json_report() {
        let json = render(&sample(), OutputFormat::Json, false);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["source"], "https://site.test");
        assert_eq!(value["summary"]["broken"], 1);
        assert_eq!(value["summary"]["unreachable"], 1);
        assert_eq!(value["links"][0]["status"], "broken");
        assert_eq!(value["links"][0]["http_code"], 404);
        assert_eq!(value["links"][1]["target_url"], "https://example.com/");
    }
}
