// src/fetch/target.rs
// =============================================================================
// What the user asked us to scan: a remote URL or a local file.
//
// Anything starting with http:// or https:// (any case) is treated as a URL
// and must parse with a host. Everything else is a file path.
// =============================================================================

use std::fmt;
use std::path::PathBuf;
use url::Url;

use crate::error::{Result, ScanError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Remote(Url),
    Local(PathBuf),
}

impl Target {
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ScanError::Input(
                "please provide a URL or file path to scan".to_string(),
            ));
        }

        let lower = raw.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            let url = Url::parse(raw)
                .map_err(|e| ScanError::Input(format!("invalid URL '{}': {}", raw, e)))?;
            if url.host_str().map_or(true, str::is_empty) {
                return Err(ScanError::Input(format!("URL has no host: {}", raw)));
            }
            return Ok(Target::Remote(url));
        }

        Ok(Target::Local(PathBuf::from(raw)))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Remote(url) => write!(f, "{}", url),
            Target::Local(path) => write!(f, "{}", path.display()),
        }
    }
}
