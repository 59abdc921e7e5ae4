// src/checker/pool.rs
// =============================================================================
// Runs link checks concurrently and records their verdicts.
//
// How it works:
// 1. Every Unchecked link in the CrawlResult is parsed; malformed URLs are
//    recorded Broken right away and never reach the network
// 2. The rest become a stream of probe futures, at most `concurrency` of
//    them in flight (buffer_unordered)
// 3. Verdicts are recorded as they complete. Completion order does not
//    matter because results are keyed by URL
// 4. If the run deadline passes, in-flight requests are dropped and every
//    link still Unchecked is recorded Unreachable
// =============================================================================

use futures::stream::{self, StreamExt};
use tokio::time::Instant;
use tracing::{debug, info, warn};
use url::Url;

use super::{classify, Checker};
use crate::model::{CrawlResult, Verdict};

pub const DEFAULT_CONCURRENCY: usize = 50;

#[derive(Debug, Clone, Copy)]
pub struct CheckOptions {
    /// Maximum number of requests in flight
    pub concurrency: usize,
    /// Abort everything still running at this instant
    pub deadline: Option<Instant>,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            deadline: None,
        }
    }
}

// Checks every link of `result` that has no verdict yet
//
// Each URL is probed exactly once and written exactly once: the stream owns
// the pending URLs, and only this function writes into `result`.
pub async fn check_all<C>(checker: &C, result: &mut CrawlResult, options: CheckOptions)
where
    C: Checker + ?Sized,
{
    let mut to_probe = Vec::new();
    for target in result.pending() {
        match parse_checkable(&target) {
            Ok(url) => to_probe.push((target, url)),
            Err(reason) => {
                debug!("Not checking {}: {}", target, reason);
                result.record(&target, Verdict::malformed(reason));
            }
        }
    }

    if to_probe.is_empty() {
        return;
    }

    let concurrency = options.concurrency.max(1);
    info!(
        "Checking {} link(s), up to {} at a time",
        to_probe.len(),
        concurrency
    );

    let mut checks = stream::iter(to_probe.into_iter().map(|(target, url)| async move {
        let probe = checker.probe(&url).await;
        (target, probe)
    }))
    .buffer_unordered(concurrency);

    let drain = async {
        while let Some((target, probe)) = checks.next().await {
            let verdict = classify(probe);
            debug!("{} -> {:?} {:?}", target, verdict.status, verdict.http_code);
            result.record(&target, verdict);
        }
    };

    let finished = match options.deadline {
        Some(deadline) => tokio::time::timeout_at(deadline, drain).await.is_ok(),
        None => {
            drain.await;
            true
        }
    };

    if !finished {
        let abandoned = result.abandon_pending("scan time limit exceeded");
        warn!(
            "Time limit reached, {} link(s) left unchecked were marked unreachable",
            abandoned
        );
    }
}

// A URL we can send a request to: absolute, http(s), with a host
fn parse_checkable(target: &str) -> Result<Url, String> {
    let url = Url::parse(target).map_err(|e| format!("malformed URL: {}", e))?;
    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url),
        "http" | "https" => Err("malformed URL: missing host".to_string()),
        scheme => Err(format!("unsupported scheme '{}'", scheme)),
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is buffer_unordered?
//    - StreamExt::buffer_unordered(N) polls up to N futures at once and yields
//      their outputs as they finish, not in input order
//    - That is fine here: every output carries its own URL
//
// 2. Why not tokio::spawn each check?
//    - Spawned tasks need 'static data, so the checker would have to be
//      wrapped in an Arc
//    - A buffered stream runs everything on the current task and borrows
//      the checker directly
//
// 3. How does the deadline abort requests?
//    - tokio::time::timeout_at drops the `drain` future when time runs out
//    - Dropping it drops the stream, which drops every in-flight request
//
// 4. Why C: Checker + ?Sized?
//    - ?Sized lets callers pass a &dyn Checker as well as a concrete type
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::Probe;
    use crate::model::LinkStatus;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    // Answers from a fixed table, counting calls; unknown URLs hang forever
    struct StubChecker {
        answers: HashMap<String, Probe>,
        calls: AtomicUsize,
    }

    impl StubChecker {
        fn new(answers: &[(&str, Probe)]) -> Self {
            Self {
                answers: answers
                    .iter()
                    .map(|(url, probe)| (url.to_string(), probe.clone()))
                    .collect(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Checker for StubChecker {
        async fn probe(&self, url: &Url) -> Probe {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.answers.get(url.as_str()) {
                Some(probe) => probe.clone(),
                None => std::future::pending().await,
            }
        }
    }

    #[tokio::test]
    async fn test_verdicts_are_recorded_by_url() {
        let checker = StubChecker::new(&[
            ("https://site.test/missing", Probe::Status(404)),
            ("https://example.com/", Probe::Status(200)),
        ]);
        let mut result = CrawlResult::from_targets(
            "https://site.test",
            vec![
                "https://site.test/missing".to_string(),
                "https://example.com/".to_string(),
            ],
        );

        check_all(&checker, &mut result, CheckOptions::default()).await;

        let missing = result.get("https://site.test/missing").unwrap();
        assert_eq!(missing.status, LinkStatus::Broken);
        assert_eq!(missing.http_code, Some(404));
        assert_eq!(
            result.get("https://example.com/").unwrap().status,
            LinkStatus::Ok
        );
        assert_eq!(checker.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_malformed_url_is_broken_without_network() {
        let checker = StubChecker::new(&[]);
        let mut result = CrawlResult::from_targets(
            "index.html",
            vec!["not a url".to_string(), "ftp://files.test/x".to_string()],
        );

        check_all(&checker, &mut result, CheckOptions::default()).await;

        assert_eq!(checker.calls.load(Ordering::SeqCst), 0);
        for link in result.links() {
            assert_eq!(link.status, LinkStatus::Broken);
            assert_eq!(link.http_code, None);
            assert!(link.detail.is_some());
        }
    }

    #[tokio::test]
    async fn test_each_url_checked_once_with_small_pool() {
        let answers: Vec<(String, Probe)> = (0..20)
            .map(|i| (format!("https://site.test/{}", i), Probe::Status(200)))
            .collect();
        let borrowed: Vec<(&str, Probe)> = answers
            .iter()
            .map(|(u, p)| (u.as_str(), p.clone()))
            .collect();
        let checker = StubChecker::new(&borrowed);
        let mut result = CrawlResult::from_targets(
            "https://site.test",
            answers.iter().map(|(u, _)| u.clone()),
        );

        let options = CheckOptions {
            concurrency: 3,
            deadline: None,
        };
        check_all(&checker, &mut result, options).await;

        assert_eq!(checker.calls.load(Ordering::SeqCst), 20);
        assert_eq!(result.summary().ok, 20);
    }

    #[tokio::test]
    async fn test_deadline_marks_in_flight_unreachable() {
        let checker = StubChecker::new(&[("https://site.test/fast", Probe::Status(200))]);
        let mut result = CrawlResult::from_targets(
            "https://site.test",
            vec![
                "https://site.test/fast".to_string(),
                "https://site.test/hangs".to_string(),
            ],
        );

        let options = CheckOptions {
            concurrency: 2,
            deadline: Some(Instant::now() + Duration::from_millis(100)),
        };
        check_all(&checker, &mut result, options).await;

        assert_eq!(
            result.get("https://site.test/fast").unwrap().status,
            LinkStatus::Ok
        );
        let hung = result.get("https://site.test/hangs").unwrap();
        assert_eq!(hung.status, LinkStatus::Unreachable);
        assert_eq!(hung.detail.as_deref(), Some("scan time limit exceeded"));
    }

    #[tokio::test]
    async fn test_already_checked_links_are_skipped() {
        let checker = StubChecker::new(&[("https://site.test/a", Probe::Status(500))]);
        let mut result = CrawlResult::from_targets(
            "https://site.test",
            vec!["https://site.test/a".to_string()],
        );
        result.record("https://site.test/a", Verdict::ok(200));

        check_all(&checker, &mut result, CheckOptions::default()).await;

        assert_eq!(checker.calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            result.get("https://site.test/a").unwrap().status,
            LinkStatus::Ok
        );
    }
}
