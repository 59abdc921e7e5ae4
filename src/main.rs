// src/main.rs
// =============================================================================
// This is the entry point of the vscan CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap (-h prints help and exits 0)
// 2. Set up logging on stderr
// 3. Run the scan: fetch -> extract -> check
// 4. Print the report to stdout, and to the -o file if given
// 5. Exit 0 when the scan completed (even if links are broken), 2 when it
//    could not run (bad input, root document unreachable)
// =============================================================================

mod checker; // src/checker/ - link checking and the worker pool
mod cli; // src/cli.rs - command-line parsing
mod client; // src/client.rs - shared reqwest clients
mod config; // src/config.rs - validated settings
mod error; // src/error.rs - fatal errors
mod extract; // src/extract/ - link extraction from HTML and Markdown
mod fetch; // src/fetch/ - root document retrieval
mod logging; // src/logging.rs - tracing setup
mod model; // src/model.rs - Link and CrawlResult
mod report; // src/report.rs - text and JSON output
mod scan; // src/scan.rs - the pipeline

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::info;

use cli::Cli;
use config::{OutputFormat, ScanConfig};
use model::CrawlResult;

#[tokio::main]
async fn main() {
    // Usage errors exit with clap's code 2, help/version with 0
    let cli = Cli::parse();

    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> Result<()> {
    let config = ScanConfig::from_cli(&cli)?;
    logging::init_logging(config.verbose);

    let result = scan::run_scan(&config).await?;

    {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        report::write_report(&mut out, &result, config.format, config.broken_only)
            .context("failed to write report to stdout")?;
    }

    if let Some(path) = &config.output {
        write_output_file(path, &result, config.format, config.broken_only)?;
        info!("Results saved to {}", path.display());
    }

    Ok(())
}

// Writes the same report as stdout into the -o file, replacing it
fn write_output_file(
    path: &Path,
    result: &CrawlResult,
    format: OutputFormat,
    broken_only: bool,
) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot create output file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    report::write_report(&mut writer, result, format, broken_only)
        .and_then(|()| writer.flush())
        .with_context(|| format!("failed to write {}", path.display()))
}
