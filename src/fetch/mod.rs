// src/fetch/mod.rs
// =============================================================================
// The fetcher: retrieves the root document we are going to scan.
//
// Remote targets are downloaded with GET (redirects are followed by the
// client, and relative links resolve against the final URL). Local targets
// are read from disk and resolve relative links against a configurable base
// URL, since a file has no URL of its own.
//
// Failures here are fatal for the run: an unreadable file is an Input error,
// an unreachable page or a non-2xx answer is a Fetch error.
// =============================================================================

mod target;

pub use target::Target;

use std::path::Path;
use tracing::{debug, info};
use url::Url;

use crate::client::HttpClients;
use crate::error::{Result, ScanError};

/// How a document's text should be parsed for links
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Html,
    Markdown,
}

impl DocumentKind {
    fn from_path(path: &str) -> Self {
        let extension = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match extension.as_deref() {
            Some("md") | Some("markdown") => DocumentKind::Markdown,
            _ => DocumentKind::Html,
        }
    }

    fn from_content_type(content_type: &str, url: &Url) -> Self {
        if content_type.contains("markdown") {
            DocumentKind::Markdown
        } else if content_type.contains("html") {
            DocumentKind::Html
        } else {
            Self::from_path(url.path())
        }
    }
}

/// A fetched root document
#[derive(Debug, Clone)]
pub struct Document {
    /// How the user named it (URL or path), used as the links' source location
    pub location: String,
    /// URL that relative links resolve against
    pub base: Url,
    pub body: String,
    pub kind: DocumentKind,
}

// Fetches the root document
//
// Parameters:
//   target: URL or local path
//   clients: shared HTTP clients (carry the timeout and --ignore-ssl choice)
//   file_base: base URL for resolving links found in local files
pub async fn fetch_document(
    target: &Target,
    clients: &HttpClients,
    file_base: &Url,
) -> Result<Document> {
    match target {
        Target::Remote(url) => fetch_remote(url, clients).await,
        Target::Local(path) => read_local(path, file_base).await,
    }
}

async fn fetch_remote(url: &Url, clients: &HttpClients) -> Result<Document> {
    info!("Fetching {}", url);

    let response = clients
        .send(|client| client.get(url.clone()))
        .await
        .map_err(|e| ScanError::fetch(url.as_str(), describe(&e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScanError::fetch(url.as_str(), format!("HTTP {}", status)));
    }

    // After redirects this may differ from what we asked for
    let base = response.url().clone();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_ascii_lowercase();
    let kind = DocumentKind::from_content_type(&content_type, &base);

    let body = response
        .text()
        .await
        .map_err(|e| ScanError::fetch(url.as_str(), describe(&e)))?;

    debug!("Fetched {} bytes from {} ({:?})", body.len(), base, kind);

    Ok(Document {
        location: url.to_string(),
        base,
        body,
        kind,
    })
}

async fn read_local(path: &Path, file_base: &Url) -> Result<Document> {
    info!("Reading {}", path.display());

    let body = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ScanError::Input(format!("cannot read {}: {}", path.display(), e)))?;

    let location = path.display().to_string();
    let kind = DocumentKind::from_path(&location);

    Ok(Document {
        location,
        base: file_base.clone(),
        body,
        kind,
    })
}

// Short description of a transport failure for the error message
fn describe(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_connect() {
        format!("connection failed ({})", error)
    } else {
        error.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn clients() -> HttpClients {
        HttpClients::new(Duration::from_secs(5), false).unwrap()
    }

    fn localhost() -> Url {
        Url::parse("http://localhost").unwrap()
    }

    #[tokio::test]
    async fn test_fetch_remote_html() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html; charset=utf-8")
                    .set_body_string("<a href='/x'>x</a>"),
            )
            .mount(&mock_server)
            .await;

        let target = Target::parse(&mock_server.uri()).unwrap();
        let doc = fetch_document(&target, &clients(), &localhost())
            .await
            .unwrap();

        assert_eq!(doc.kind, DocumentKind::Html);
        assert_eq!(doc.body, "<a href='/x'>x</a>");
        assert_eq!(doc.base.as_str(), format!("{}/", mock_server.uri()));
    }

    #[tokio::test]
    async fn test_fetch_remote_error_status_is_fetch_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let target = Target::parse(&mock_server.uri()).unwrap();
        let err = fetch_document(&target, &clients(), &localhost())
            .await
            .unwrap_err();

        match err {
            ScanError::Fetch { reason, .. } => assert!(reason.contains("500")),
            other => panic!("expected Fetch error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_remote_unreachable_is_fetch_error() {
        // Port 9 (discard) on localhost is almost never listening
        let target = Target::parse("http://127.0.0.1:9/").unwrap();
        let err = fetch_document(&target, &clients(), &localhost())
            .await
            .unwrap_err();
        assert!(matches!(err, ScanError::Fetch { .. }));
    }

    #[tokio::test]
    async fn test_read_local_markdown() {
        let mut file = tempfile::Builder::new().suffix(".md").tempfile().unwrap();
        writeln!(file, "[docs](/docs)").unwrap();

        let target = Target::Local(file.path().to_path_buf());
        let doc = fetch_document(&target, &clients(), &localhost())
            .await
            .unwrap();

        assert_eq!(doc.kind, DocumentKind::Markdown);
        assert_eq!(doc.base, localhost());
        assert_eq!(doc.location, file.path().display().to_string());
    }

    #[tokio::test]
    async fn test_missing_local_file_is_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let target = Target::Local(dir.path().join("missing.html"));
        let err = fetch_document(&target, &clients(), &localhost())
            .await
            .unwrap_err();
        assert!(matches!(err, ScanError::Input(_)));
    }

    #[test]
    fn test_kind_from_content_type() {
        let url = Url::parse("https://example.com/README.md").unwrap();
        assert_eq!(
            DocumentKind::from_content_type("text/markdown", &url),
            DocumentKind::Markdown
        );
        assert_eq!(
            DocumentKind::from_content_type("text/html", &url),
            DocumentKind::Html
        );
        // Unknown type falls back to the path extension
        assert_eq!(
            DocumentKind::from_content_type("text/plain", &url),
            DocumentKind::Markdown
        );
    }
}
