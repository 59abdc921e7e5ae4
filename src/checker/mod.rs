// src/checker/mod.rs
// =============================================================================
// This module contains all link checking logic.
//
// Submodules:
// - http: the real Checker, makes HTTP requests with reqwest
// - pool: runs many checks concurrently and folds verdicts into a CrawlResult
//
// The Checker trait is the seam between "how do we ask a URL for its status"
// and "what do we do with the answer". Tests plug in a stub checker; the
// binary uses HttpChecker.
// =============================================================================

mod http;
mod pool;

pub use http::HttpChecker;
pub use pool::{check_all, CheckOptions};

use async_trait::async_trait;
use url::Url;

use crate::model::Verdict;

/// Raw answer from probing one URL, before classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    /// The server answered with this status code
    Status(u16),
    /// No answer at all: DNS, connect, TLS, timeout. Holds a short reason.
    Failed(String),
}

/// Something that can find out what a URL answers
#[async_trait]
pub trait Checker: Send + Sync {
    async fn probe(&self, url: &Url) -> Probe;
}

// Turns a probe into a verdict
//
// HTTP status codes:
// - 200-399: OK (redirects count as working)
// - 400-599: Broken, code recorded
// - anything else a server sends (1xx, nonsense codes): Broken, code recorded
// - no answer: Unreachable
pub fn classify(probe: Probe) -> Verdict {
    match probe {
        Probe::Status(code @ 200..=399) => Verdict::ok(code),
        Probe::Status(code) => Verdict::broken(code),
        Probe::Failed(reason) => Verdict::unreachable(reason),
    }
}
