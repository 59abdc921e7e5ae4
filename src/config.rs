// src/config.rs
// =============================================================================
// Validated settings for one scan, built from the parsed command line.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::cli::Cli;
use crate::error::{Result, ScanError};
use crate::fetch::Target;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub target: Target,
    pub output: Option<PathBuf>,
    pub verbose: bool,
    pub ignore_ssl: bool,
    pub request_timeout: Duration,
    pub concurrency: usize,
    pub max_time: Option<Duration>,
    pub file_base: Url,
    pub format: OutputFormat,
    pub broken_only: bool,
}

impl ScanConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let target = Target::parse(&cli.target)?;

        if cli.timeout == 0 {
            return Err(ScanError::Input("--timeout must be at least 1 second".into()));
        }
        if cli.concurrency == 0 {
            return Err(ScanError::Input("--concurrency must be at least 1".into()));
        }
        if cli.max_time == Some(0) {
            return Err(ScanError::Input("--max-time must be at least 1 second".into()));
        }

        let file_base = Url::parse(&cli.base_url)
            .map_err(|e| ScanError::Input(format!("invalid --base-url '{}': {}", cli.base_url, e)))?;

        Ok(Self {
            target,
            output: cli.output.clone(),
            verbose: cli.verbose,
            ignore_ssl: cli.ignore_ssl,
            request_timeout: Duration::from_secs(cli.timeout),
            concurrency: cli.concurrency,
            max_time: cli.max_time.map(Duration::from_secs),
            file_base,
            format: if cli.json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
            broken_only: cli.broken_only,
        })
    }
}
