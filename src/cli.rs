//! Command-line interface definitions for News Readme.
//!
//! Every option can be given as a flag or through the environment, which is
//! how a scheduled job (cron, CI workflow) normally configures it. Values
//! from a `.env` file in the working directory are loaded before parsing.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Ordering requested from the search API.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum SortMode {
    /// Relevance order.
    Sim,
    /// Newest first.
    #[default]
    Date,
}

impl SortMode {
    /// Value sent in the `sort` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::Sim => "sim",
            SortMode::Date => "date",
        }
    }
}

/// Command-line arguments for the News Readme job.
///
/// Credentials are optional at parse time so that their absence can be
/// reported as a configuration error by [`crate::config::Config::from_cli`].
///
/// # Examples
///
/// ```sh
/// # Credentials from the environment, everything else defaulted
/// NAVER_CLIENT_ID=... NAVER_CLIENT_SECRET=... news_readme
///
/// # Relevance-sorted results for another query, written to docs/NEWS.md
/// news_readme --query 반도체 --sort sim --display 20 -r docs/NEWS.md
/// ```
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Cli {
    /// Naver Open API client id
    #[arg(long, env = "NAVER_CLIENT_ID")]
    pub client_id: Option<String>,

    /// Naver Open API client secret
    #[arg(long, env = "NAVER_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Search query
    #[arg(short, long, env = "NAVER_QUERY", default_value = "기업")]
    pub query: String,

    /// Number of results to request (clamped to 1..=100)
    #[arg(short, long, env = "NAVER_DISPLAY", default_value_t = 10, allow_negative_numbers = true)]
    pub display: i64,

    /// Result ordering
    #[arg(short, long, env = "NAVER_SORT", value_enum, default_value_t = SortMode::Date)]
    pub sort: SortMode,

    /// Markdown document holding the news markers
    #[arg(short, long, env = "NEWS_README_PATH", default_value = "README.md")]
    pub readme: PathBuf,
}
