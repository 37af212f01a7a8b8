//! Error type shared by every stage of the news refresh.
//!
//! A run is all-or-nothing: any variant here aborts the job before the
//! target document is written. Timestamp parse failures are deliberately
//! absent; they degrade to the raw string inside the formatter instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NewsError {
    /// One or both API credentials were not provided.
    #[error("{missing} must be set (flag or environment variable)")]
    MissingCredentials { missing: String },

    #[error("invalid search endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// Connect, timeout, or body read failure.
    #[error("search request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("search API returned {status}: {message}")]
    HttpStatus {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("could not decode search response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("marker `{marker}` not found in document")]
    MissingMarker { marker: &'static str },

    #[error("no end marker follows the first start marker")]
    MarkersOutOfOrder,
}

impl NewsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        NewsError::Io {
            path: path.into(),
            source,
        }
    }
}
