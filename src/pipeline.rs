//! The end-to-end refresh: validate, fetch, render, patch.
//!
//! Each stage runs only after the previous one succeeded, so a failed fetch
//! never touches the document.

use crate::api::{SearchTransport, fetch_news};
use crate::cli::Cli;
use crate::config::Config;
use crate::error::NewsError;
use crate::outputs::{markdown, readme};
use tracing::{info, instrument};

/// Run one refresh against `transport`.
///
/// Credentials are checked before anything else; without them the
/// transport is never called.
#[instrument(level = "info", skip_all)]
pub async fn run<T: SearchTransport>(
    cli: Cli,
    transport: &T,
) -> Result<readme::PatchOutcome, NewsError> {
    let config = Config::from_cli(cli)?;
    info!(
        query = %config.query,
        display = config.display,
        sort = config.sort.as_str(),
        path = %config.readme_path.display(),
        "Configuration resolved"
    );

    let items = fetch_news(transport, &config).await?;
    let fragment = markdown::build_markdown(&items, &config.query);
    readme::update_document(&config.readme_path, &fragment).await
}
