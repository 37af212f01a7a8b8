//! Text helpers for turning search results into table cells.
//!
//! - Markup stripping for `title` / `description` (entities, `<b>` highlights)
//! - RFC 2822 → KST timestamp conversion with raw-string fallback
//! - Markdown table escaping
//! - String truncation for log previews

use chrono::{DateTime, FixedOffset, TimeZone};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;

/// Offset of Korea Standard Time from UTC, in seconds.
const KST_OFFSET_SECS: i32 = 9 * 3600;

/// Display format for every timestamp the job writes.
const KST_FORMAT: &str = "%Y-%m-%d %H:%M:%S KST";

static EMPHASIS_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</?b>").unwrap());
static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static WEEKDAY_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[A-Za-z]+\s*,\s*").unwrap());

/// The fixed UTC+9 zone used for all output.
pub fn kst() -> FixedOffset {
    FixedOffset::east_opt(KST_OFFSET_SECS).expect("UTC+9 is a valid offset")
}

/// Format any instant as `YYYY-MM-DD HH:MM:SS KST`.
pub fn format_kst<Tz: TimeZone>(dt: &DateTime<Tz>) -> String {
    dt.with_timezone(&kst()).format(KST_FORMAT).to_string()
}

/// Convert an RFC 2822 publication date to KST.
///
/// Accepts numeric offsets (`+0900`) and the named zones RFC 2822 allows
/// (`GMT`, `UT`, `EST`, ...). Anything unparseable, including the empty
/// string, comes back unchanged. The leading day name is ignored, so a
/// weekday that disagrees with the date does not block conversion.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(to_kst("Tue, 06 May 2025 05:03:00 GMT"), "2025-05-06 14:03:00 KST");
/// assert_eq!(to_kst("yesterday"), "yesterday");
/// ```
pub fn to_kst(pub_date: &str) -> String {
    let without_weekday = WEEKDAY_PREFIX.replace(pub_date, "");
    match DateTime::parse_from_rfc2822(without_weekday.trim()) {
        Ok(dt) => format_kst(&dt),
        Err(e) => {
            tracing::debug!(pub_date, error = %e, "Unparseable pubDate; keeping raw value");
            pub_date.to_string()
        }
    }
}

/// Remove HTML from API text: decode entities, drop `<b>` highlights and
/// any other tags, trim.
///
/// Passes repeat until the text stops changing, so entity-encoded tags
/// (`&lt;b&gt;`) are removed too and the result is stable under a second
/// call.
pub fn strip_markup(s: &str) -> String {
    let mut current = s.to_string();
    loop {
        let next = strip_markup_once(&current);
        // Every change consumes an entity, a tag, or surrounding whitespace.
        if next == current {
            return next;
        }
        current = next;
    }
}

fn strip_markup_once(s: &str) -> String {
    let unescaped = unescape_html(s);
    let without_emphasis = EMPHASIS_TAG.replace_all(&unescaped, "");
    let without_tags = ANY_TAG.replace_all(&without_emphasis, "");
    without_tags.trim().to_string()
}

/// Decode HTML character references using the HTML5 parser's rules.
///
/// `<` is pre-escaped so the parser sees only character data; tags are
/// handled by the regex passes in [`strip_markup`].
fn unescape_html(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    let fragment = Html::parse_fragment(&s.replace('<', "&lt;"));
    fragment.root_element().text().collect()
}

/// Make a value safe to place inside a Markdown table cell.
///
/// Pipes are backslash-escaped and line breaks collapse to single spaces.
pub fn md_escape(s: &str) -> String {
    s.replace('|', "\\|")
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .trim()
        .to_string()
}

/// Truncate a string for logging purposes.
///
/// Cuts at the last character boundary at or before `max` bytes and appends
/// `"…(+N bytes)"`.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}
