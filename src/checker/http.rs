// src/checker/http.rs
// =============================================================================
// This module checks if URLs are alive by making HTTP requests.
//
// Key functionality:
// - Makes HTTP HEAD requests (lightweight, no body download)
// - Falls back to GET when the server does not support HEAD
// - Detects failure modes (timeout, DNS, connection, SSL) and reports them
//   as a short reason instead of an error
// - Retries once without certificate verification when --ignore-ssl is set
//   (handled by HttpClients::send)
// =============================================================================

use async_trait::async_trait;
use reqwest::StatusCode;
use std::error::Error as StdError;
use tracing::debug;
use url::Url;

use super::{Checker, Probe};
use crate::client::{is_certificate_error, HttpClients};

/// Checks links over HTTP(S) with reqwest
#[derive(Debug, Clone)]
pub struct HttpChecker {
    clients: HttpClients,
}

impl HttpChecker {
    pub fn new(clients: HttpClients) -> Self {
        Self { clients }
    }

    async fn get(&self, url: &Url) -> Probe {
        match self.clients.send(|client| client.get(url.clone())).await {
            Ok(response) => Probe::Status(response.status().as_u16()),
            Err(e) => Probe::Failed(categorize_error(&e)),
        }
    }
}

#[async_trait]
impl Checker for HttpChecker {
    async fn probe(&self, url: &Url) -> Probe {
        // First, try a HEAD request (faster, no body download)
        match self.clients.send(|client| client.head(url.clone())).await {
            Ok(response) if head_unsupported(response.status()) => {
                debug!("HEAD not supported by {} ({}), using GET", url, response.status());
                self.get(url).await
            }
            Ok(response) => Probe::Status(response.status().as_u16()),
            Err(e) if may_be_head_specific(&e) => {
                debug!("HEAD failed for {} ({}), using GET", url, e);
                self.get(url).await
            }
            Err(e) => Probe::Failed(categorize_error(&e)),
        }
    }
}

// Status codes servers use to say "I don't do HEAD"
fn head_unsupported(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::METHOD_NOT_ALLOWED | StatusCode::NOT_IMPLEMENTED
    )
}

// Some servers drop the connection or send garbage on HEAD. Network-level
// failures (DNS, refused, TLS) would fail the same way on GET.
//
// A HEAD that times out is not retried with GET: a second request would
// double the time spent on every dead host. Servers that silently ignore
// HEAD are therefore reported as "request timed out".
fn may_be_head_specific(error: &reqwest::Error) -> bool {
    !error.is_timeout() && !error.is_connect() && !is_certificate_error(error)
}

// Categorizes reqwest errors into a short reason for the report
//
// reqwest errors can happen for many reasons:
// - Network timeout
// - DNS resolution failure
// - SSL certificate issues
// - Too many redirects
// - etc.
fn categorize_error(error: &reqwest::Error) -> String {
    let chain = error_chain(error);

    if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_redirect() {
        "too many redirects".to_string()
    } else if is_certificate_error(error) {
        "SSL certificate error".to_string()
    } else if error.is_connect() {
        // Connection errors often mean DNS issues or host unreachable
        if chain.contains("dns") {
            "could not resolve hostname".to_string()
        } else {
            "connection failed".to_string()
        }
    } else {
        error.to_string()
    }
}

// Messages of the error's causes, lowercased. The top-level message is left
// out because it contains the request URL.
fn error_chain(error: &(dyn StdError + 'static)) -> String {
    let mut messages = Vec::new();
    let mut current = error.source();
    while let Some(e) = current {
        messages.push(e.to_string().to_lowercase());
        current = e.source();
    }
    messages.join(": ")
}
