// src/scan.rs
// =============================================================================
// Ties the pipeline together: fetch the root document, extract its links,
// check them, and hand back the CrawlResult for reporting.
//
// The optional --max-time deadline covers the whole run. If it expires while
// the root document is still downloading, the scan fails; if it expires
// during link checking, the remaining links are reported as unreachable.
// =============================================================================

use tokio::time::Instant;
use tracing::{info, warn};

use crate::checker::{check_all, CheckOptions, Checker, HttpChecker};
use crate::client::HttpClients;
use crate::config::ScanConfig;
use crate::error::{Result, ScanError};
use crate::extract::extract_links;
use crate::fetch::{fetch_document, Document};
use crate::model::CrawlResult;

/// Runs a complete scan as described by `config`
pub async fn run_scan(config: &ScanConfig) -> Result<CrawlResult> {
    let deadline = config.max_time.map(|limit| Instant::now() + limit);
    let clients = HttpClients::new(config.request_timeout, config.ignore_ssl)?;
    if clients.ignores_ssl() {
        warn!("Certificate errors will be retried without verification (--ignore-ssl)");
    }

    let fetch = fetch_document(&config.target, &clients, &config.file_base);
    let document = match deadline {
        Some(deadline) => tokio::time::timeout_at(deadline, fetch)
            .await
            .map_err(|_| {
                ScanError::fetch(config.target.to_string(), "scan time limit exceeded")
            })??,
        None => fetch.await?,
    };

    let checker = HttpChecker::new(clients);
    let options = CheckOptions {
        concurrency: config.concurrency,
        deadline,
    };

    Ok(scan_document(&document, &checker, options).await)
}

/// Extracts the links of an already fetched document and checks them
pub async fn scan_document<C>(document: &Document, checker: &C, options: CheckOptions) -> CrawlResult
where
    C: Checker + ?Sized,
{
    let links = extract_links(&document.body, &document.base, document.kind);
    info!("Found {} unique link(s) in {}", links.len(), document.location);

    let mut result = CrawlResult::from_targets(document.location.clone(), links);
    check_all(checker, &mut result, options).await;

    let summary = result.summary();
    info!(
        "Checked {} link(s): {} ok, {} broken, {} unreachable",
        summary.total, summary.ok, summary.broken, summary.unreachable
    );
    result
}
