// src/client.rs
// =============================================================================
// HTTP clients shared by the fetcher and the link checker.
//
// We build one reqwest Client with normal certificate verification and, only
// when --ignore-ssl is set, a second one that accepts any certificate. A
// request always goes out on the verifying client first; the insecure client
// is used for a single retry after a certificate failure.
//
// reqwest::Client is an Arc internally, so cloning HttpClients is cheap and
// every clone shares the same connection pool.
// =============================================================================

use reqwest::{Client, RequestBuilder, Response};
use std::error::Error as StdError;
use std::time::Duration;
use tracing::warn;

use crate::error::Result;

const USER_AGENT: &str = concat!("vscan/", env!("CARGO_PKG_VERSION"));
const MAX_REDIRECTS: usize = 5;

#[derive(Debug, Clone)]
pub struct HttpClients {
    secure: Client,
    insecure: Option<Client>,
}

impl HttpClients {
    /// Builds the clients with a per-request timeout
    pub fn new(timeout: Duration, ignore_ssl: bool) -> Result<Self> {
        let secure = builder(timeout).build()?;
        let insecure = if ignore_ssl {
            Some(builder(timeout).danger_accept_invalid_certs(true).build()?)
        } else {
            None
        };

        Ok(Self { secure, insecure })
    }

    pub fn ignores_ssl(&self) -> bool {
        self.insecure.is_some()
    }

    /// Sends a request, retrying once without certificate verification when
    /// the first attempt fails on a certificate and --ignore-ssl is set.
    ///
    /// `request` builds the same request on whichever client it is given.
    pub async fn send<F>(&self, request: F) -> reqwest::Result<Response>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        match request(&self.secure).send().await {
            Err(err) if is_certificate_error(&err) => match &self.insecure {
                Some(insecure) => {
                    warn!(
                        "Certificate verification failed for {}, retrying without it",
                        err.url().map(|u| u.as_str()).unwrap_or("request")
                    );
                    request(insecure).send().await
                }
                None => Err(err),
            },
            other => other,
        }
    }
}

fn builder(timeout: Duration) -> reqwest::ClientBuilder {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .connect_timeout(timeout)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
}

// True when a cause of the error is a TLS certificate problem: unknown
// issuer, self-signed, expired, wrong host name.
//
// reqwest does not expose a dedicated kind for this, so we look at the
// messages, the same way we detect DNS failures. The walk starts at the
// source: the top-level reqwest message embeds the request URL, and a URL
// like /docs/certificate-renewal must not look like a TLS failure.
pub fn is_certificate_error(err: &(dyn StdError + 'static)) -> bool {
    let mut current = err.source();
    while let Some(e) = current {
        let message = e.to_string().to_lowercase();
        if message.contains("certificate")
            || message.contains("unknownissuer")
            || message.contains("self signed")
            || message.contains("self-signed")
        {
            return true;
        }
        current = e.source();
    }
    false
}
