// src/error.rs
// =============================================================================
// Errors that abort a scan.
//
// Only two things can stop a run: bad input (arguments, unreadable target)
// and a root document we cannot fetch. A broken or unreachable *link* is not
// an error at all, it is a LinkStatus recorded in the report.
// =============================================================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    /// Bad CLI arguments, an invalid URL, or a local target we cannot read
    #[error("invalid input: {0}")]
    Input(String),

    /// The root document could not be retrieved
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ScanError {
    pub fn fetch(url: impl Into<String>, reason: impl ToString) -> Self {
        ScanError::Fetch {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
