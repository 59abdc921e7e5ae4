// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using a
// struct and attributes. clap gives us -h/--help and -V/--version for free.
//
// The values here are raw user input. config.rs validates them and turns
// them into a ScanConfig the rest of the program works with.
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "vscan",
    version,
    about = "Find broken links in a website or HTML document",
    long_about = "vscan fetches a web page or reads a local HTML/Markdown file, extracts every \
                  link and resource reference, requests each one and reports which are broken \
                  (HTTP 4xx/5xx) or unreachable (DNS, connection, TLS or timeout failure)."
)]
pub struct Cli {
    /// URL or local file path to scan
    ///
    /// Example: vscan -t https://example.com
    #[arg(short = 't', long, value_name = "URL|PATH")]
    pub target: String,

    /// Also write the report to this file
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Enable verbose output (debug logging on stderr)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Retry links that fail certificate verification without verifying
    ///
    /// Useful for self-signed test servers. Do not use on untrusted networks.
    #[arg(long)]
    pub ignore_ssl: bool,

    /// Timeout for each HTTP request, in seconds
    #[arg(long, value_name = "SECS", default_value_t = 10)]
    pub timeout: u64,

    /// Maximum number of links checked at the same time
    #[arg(short = 'c', long, value_name = "N", default_value_t = 50)]
    pub concurrency: usize,

    /// Give up on the whole scan after this many seconds; links still being
    /// checked are reported as unreachable
    #[arg(long, value_name = "SECS")]
    pub max_time: Option<u64>,

    /// Base URL for resolving relative links in local files
    #[arg(long, value_name = "URL", default_value = "http://localhost")]
    pub base_url: String,

    /// Output results in JSON format instead of text lines
    #[arg(long)]
    pub json: bool,

    /// Only report broken and unreachable links
    #[arg(long)]
    pub broken_only: bool,
}
