//! # News Readme
//!
//! Refreshes a block of a Markdown document (usually `README.md`) with the
//! latest results from the Naver news search API.
//!
//! ## Usage
//!
//! ```sh
//! NAVER_CLIENT_ID=... NAVER_CLIENT_SECRET=... news_readme --query 기업
//! ```
//!
//! The document must contain the marker pair
//! `<!-- NEWS:START -->` ... `<!-- NEWS:END -->`; everything between them is
//! replaced on each run.
//!
//! ## Architecture
//!
//! One linear pass, meant to be started by an external scheduler:
//! 1. **Configuration**: flags / environment / `.env` resolved into a `Config`
//! 2. **Fetch**: a single search request with a bounded timeout
//! 3. **Render**: sanitized results formatted as a Markdown table
//! 4. **Patch**: the marker region rewritten, only if it changed
//!
//! Any failure exits with status 1 and leaves the document untouched.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod config;
mod error;
mod models;
mod outputs;
mod pipeline;
mod utils;

use api::ReqwestTransport;
use cli::Cli;
use outputs::readme::PatchOutcome;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Before tracing so RUST_LOG can come from .env
    let dotenv = dotenvy::dotenv();

    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_readme starting up");

    match dotenv {
        Ok(path) => info!(path = %path.display(), "Loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => error!(error = %e, "Ignoring unreadable .env"),
    }

    let args = Cli::parse();
    let readme = args.readme.clone();

    let result = match ReqwestTransport::new() {
        Ok(transport) => pipeline::run(args, &transport).await,
        Err(e) => Err(e),
    };

    let elapsed = start_time.elapsed();
    match result {
        Ok(outcome) => {
            match outcome {
                PatchOutcome::Updated => println!("README updated: {}", readme.display()),
                PatchOutcome::Unchanged => println!("No changes: {}", readme.display()),
            }
            info!(?outcome, millis = elapsed.as_millis() as u64, "Execution complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, millis = elapsed.as_millis() as u64, "Execution failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
