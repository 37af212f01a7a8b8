//! Markdown rendering of search results.
//!
//! Produces the fragment that goes between the README markers: a heading
//! with the query, the refresh time, a five-column table, and a source note.
//! Row order is exactly the order the API returned.

use crate::models::{FormattedRow, SearchResultItem};
use crate::utils::{format_kst, md_escape, strip_markup, to_kst};
use chrono::{DateTime, TimeZone, Utc};
use std::fmt::Write;
use tracing::{debug, instrument};

const TABLE_HEADER: &str = "| 제목 | 원문(originallink) | 네이버 링크 | 발행시각 | 요약 |";
const TABLE_RULE: &str = "|---|---|---|---|---|";
const SOURCE_NOTE: &str = "> 데이터 출처: 네이버 검색 뉴스 API";

/// Render `[label](url)`, or nothing when the URL is absent or empty.
fn link_markdown(label: &str, url: Option<&str>) -> String {
    match url {
        Some(url) if !url.is_empty() => md_escape(&format!("[{label}]({url})")),
        _ => String::new(),
    }
}

impl FormattedRow {
    /// Sanitize one API item into table cells.
    pub fn from_item(item: &SearchResultItem) -> Self {
        FormattedRow {
            title: md_escape(&strip_markup(item.title.as_deref().unwrap_or_default())),
            origin_link: link_markdown("원문", item.original_link.as_deref()),
            naver_link: link_markdown("네이버", item.link.as_deref()),
            published: md_escape(&to_kst(item.pub_date.as_deref().unwrap_or_default())),
            description: md_escape(&strip_markup(
                item.description.as_deref().unwrap_or_default(),
            )),
        }
    }

    /// The row as a single Markdown table line.
    pub fn to_markdown(&self) -> String {
        format!(
            "| {} | {} | {} | {} | {} |",
            self.title, self.origin_link, self.naver_link, self.published, self.description
        )
    }
}

/// Build the replacement fragment, stamped with the current time.
pub fn build_markdown(items: &[SearchResultItem], query: &str) -> String {
    build_markdown_at(items, query, &Utc::now())
}

/// Build the replacement fragment, stamped with `now`.
#[instrument(level = "info", skip_all, fields(items = items.len(), %query))]
pub fn build_markdown_at<Tz: TimeZone>(
    items: &[SearchResultItem],
    query: &str,
    now: &DateTime<Tz>,
) -> String {
    let mut md = String::new();

    writeln!(md, "## 최신 네이버 뉴스: `{query}`").unwrap();
    writeln!(md, "_Last update: {}_", format_kst(now)).unwrap();
    writeln!(md).unwrap();
    writeln!(md, "{TABLE_HEADER}").unwrap();
    writeln!(md, "{TABLE_RULE}").unwrap();

    for item in items {
        writeln!(md, "{}", FormattedRow::from_item(item).to_markdown()).unwrap();
    }

    writeln!(md).unwrap();
    md.push_str(SOURCE_NOTE);

    debug!(bytes = md.len(), "Rendered news fragment");
    md
}
