//! Resolved, immutable run configuration.
//!
//! [`Config`] is built once from the parsed [`Cli`] and handed to every
//! stage by reference. Nothing past this point reads the environment.

use crate::cli::{Cli, SortMode};
use crate::error::NewsError;
use std::fmt;
use std::path::PathBuf;

/// Smallest `display` value the search API accepts.
pub const MIN_DISPLAY: u8 = 1;
/// Largest `display` value the search API accepts.
pub const MAX_DISPLAY: u8 = 100;

/// API credentials sent as request headers.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub query: String,
    /// Always within `MIN_DISPLAY..=MAX_DISPLAY`.
    pub display: u8,
    pub sort: SortMode,
    pub credentials: Credentials,
    pub readme_path: PathBuf,
}

impl Config {
    /// Validate the parsed arguments.
    ///
    /// # Errors
    ///
    /// [`NewsError::MissingCredentials`] when the client id or secret is
    /// absent or empty.
    pub fn from_cli(cli: Cli) -> Result<Self, NewsError> {
        let client_id = cli.client_id.filter(|v| !v.is_empty());
        let client_secret = cli.client_secret.filter(|v| !v.is_empty());

        let credentials = match (client_id, client_secret) {
            (Some(client_id), Some(client_secret)) => Credentials {
                client_id,
                client_secret,
            },
            (id, secret) => {
                let mut missing = Vec::new();
                if id.is_none() {
                    missing.push("NAVER_CLIENT_ID");
                }
                if secret.is_none() {
                    missing.push("NAVER_CLIENT_SECRET");
                }
                return Err(NewsError::MissingCredentials {
                    missing: missing.join(" / "),
                });
            }
        };

        Ok(Config {
            query: cli.query,
            display: clamp_display(cli.display),
            sort: cli.sort,
            credentials,
            readme_path: cli.readme,
        })
    }
}

/// Clamp a requested result count into the range the API accepts.
pub fn clamp_display(requested: i64) -> u8 {
    requested.clamp(MIN_DISPLAY as i64, MAX_DISPLAY as i64) as u8
}
