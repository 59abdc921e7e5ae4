// src/model.rs
// =============================================================================
// The data that flows through a scan.
//
// A Link is created Unchecked by the extractor, gets exactly one Verdict from
// the checker, and is never changed after that. CrawlResult owns every Link
// of one run, keyed by target URL, and remembers extraction order so the
// report comes out in the same order the links appeared in the document.
// =============================================================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Outcome of checking one link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LinkStatus {
    /// Extracted but not checked yet
    Unchecked,
    /// Answered with 200-399
    Ok,
    /// Answered with an HTTP error status (or the URL is malformed)
    Broken,
    /// Could not be contacted at all: DNS, TCP, TLS or timeout failure
    Unreachable,
}

impl LinkStatus {
    pub fn is_failure(&self) -> bool {
        matches!(self, LinkStatus::Broken | LinkStatus::Unreachable)
    }
}

/// What the checker decided about a link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub status: LinkStatus,
    pub http_code: Option<u16>,
    pub detail: Option<String>,
}

impl Verdict {
    pub fn ok(code: u16) -> Self {
        Self {
            status: LinkStatus::Ok,
            http_code: Some(code),
            detail: None,
        }
    }

    pub fn broken(code: u16) -> Self {
        Self {
            status: LinkStatus::Broken,
            http_code: Some(code),
            detail: None,
        }
    }

    /// Broken without ever touching the network
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self {
            status: LinkStatus::Broken,
            http_code: None,
            detail: Some(reason.into()),
        }
    }

    pub fn unreachable(reason: impl Into<String>) -> Self {
        Self {
            status: LinkStatus::Unreachable,
            http_code: None,
            detail: Some(reason.into()),
        }
    }
}

/// One hyperlink found in the root document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// The page (or file) the link was found on
    pub source_location: String,
    /// Absolute URL the link points to
    pub target_url: String,
    #[serde(flatten)]
    pub status: LinkStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Link {
    pub fn new(source_location: &str, target_url: String) -> Self {
        Self {
            source_location: source_location.to_string(),
            target_url,
            status: LinkStatus::Unchecked,
            http_code: None,
            detail: None,
        }
    }

    pub fn is_checked(&self) -> bool {
        self.status != LinkStatus::Unchecked
    }
}

/// Counts per status, used by the report summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub ok: usize,
    pub broken: usize,
    pub unreachable: usize,
    pub unchecked: usize,
    pub total: usize,
}

/// Every link of one run, unique by target URL
#[derive(Debug, Clone)]
pub struct CrawlResult {
    source: String,
    links: HashMap<String, Link>,
    // Extraction order, so reports are stable no matter how checks complete
    order: Vec<String>,
}

impl CrawlResult {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            links: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Builds a result with one Unchecked link per target, dropping duplicates
    pub fn from_targets<I>(source: impl Into<String>, targets: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut result = Self::new(source);
        for target in targets {
            result.insert(target);
        }
        result
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Adds an Unchecked link. Returns false if the URL is already present.
    pub fn insert(&mut self, target_url: String) -> bool {
        if self.links.contains_key(&target_url) {
            return false;
        }
        let link = Link::new(&self.source, target_url.clone());
        self.links.insert(target_url.clone(), link);
        self.order.push(target_url);
        true
    }

    /// Stores the verdict for a link.
    ///
    /// Each link is written once: returns false (and changes nothing) when
    /// the URL is unknown or already has a verdict.
    pub fn record(&mut self, target_url: &str, verdict: Verdict) -> bool {
        match self.links.get_mut(target_url) {
            Some(link) if !link.is_checked() => {
                link.status = verdict.status;
                link.http_code = verdict.http_code;
                link.detail = verdict.detail;
                true
            }
            _ => false,
        }
    }

    /// Marks every link still Unchecked as Unreachable. Returns how many.
    pub fn abandon_pending(&mut self, reason: &str) -> usize {
        let pending = self.pending();
        for url in &pending {
            self.record(url, Verdict::unreachable(reason));
        }
        pending.len()
    }

    /// URLs that have no verdict yet, in extraction order
    pub fn pending(&self) -> Vec<String> {
        self.links()
            .filter(|link| !link.is_checked())
            .map(|link| link.target_url.clone())
            .collect()
    }

    #[cfg(test)]
    pub fn get(&self, target_url: &str) -> Option<&Link> {
        self.links.get(target_url)
    }

    /// Links in extraction order
    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.order.iter().filter_map(|url| self.links.get(url))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn summary(&self) -> Summary {
        let mut summary = Summary {
            total: self.len(),
            ..Summary::default()
        };
        for link in self.links.values() {
            match link.status {
                LinkStatus::Ok => summary.ok += 1,
                LinkStatus::Broken => summary.broken += 1,
                LinkStatus::Unreachable => summary.unreachable += 1,
                LinkStatus::Unchecked => summary.unchecked += 1,
            }
        }
        summary
    }
}
