//! Marker-bounded rewrite of the target document.
//!
//! The region between [`NEWS_START`] and [`NEWS_END`] is owned by this job
//! and replaced wholesale on every run. Everything outside it, including the
//! marker lines themselves, is left byte-for-byte intact.
//!
//! # Matching
//!
//! Only the first start marker counts, and the region ends at the first end
//! marker after it. Later marker pairs are ordinary content.

use crate::error::NewsError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

pub const NEWS_START: &str = "<!-- NEWS:START -->";
pub const NEWS_END: &str = "<!-- NEWS:END -->";

static NEWS_REGION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?s){}.*?{}",
        regex::escape(NEWS_START),
        regex::escape(NEWS_END)
    ))
    .unwrap()
});

/// Result of [`update_document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The document changed and was written.
    Updated,
    /// The document already held this fragment; nothing was written.
    Unchanged,
}

/// Replace the marker region of `text` with `fragment`.
///
/// # Errors
///
/// - [`NewsError::MissingMarker`] if either marker does not occur at all
/// - [`NewsError::MarkersOutOfOrder`] if no end marker follows the first
///   start marker
pub fn patch_document(text: &str, fragment: &str) -> Result<String, NewsError> {
    for marker in [NEWS_START, NEWS_END] {
        if !text.contains(marker) {
            return Err(NewsError::MissingMarker { marker });
        }
    }

    let region = NEWS_REGION
        .find(text)
        .ok_or(NewsError::MarkersOutOfOrder)?;

    let mut patched = String::with_capacity(text.len() + fragment.len());
    patched.push_str(&text[..region.start()]);
    patched.push_str(NEWS_START);
    patched.push('\n');
    patched.push_str(fragment);
    patched.push('\n');
    patched.push_str(NEWS_END);
    patched.push_str(&text[region.end()..]);
    Ok(patched)
}

/// Patch the document at `path` in place, writing only when it changes.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn update_document(path: &Path, fragment: &str) -> Result<PatchOutcome, NewsError> {
    let text = fs::read_to_string(path)
        .await
        .map_err(|e| NewsError::io(path, e))?;

    let patched = patch_document(&text, fragment)?;
    if patched == text {
        info!("Document already up to date");
        return Ok(PatchOutcome::Unchanged);
    }

    fs::write(path, &patched)
        .await
        .map_err(|e| NewsError::io(path, e))?;
    info!(bytes = patched.len(), "Wrote updated document");
    Ok(PatchOutcome::Updated)
}
