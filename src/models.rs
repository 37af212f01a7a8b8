//! Data models for search results and their rendered table rows.
//!
//! - [`SearchResponse`] / [`SearchResultItem`]: raw JSON from the news search API
//! - [`ApiErrorBody`]: the error envelope the API returns with non-2xx statuses
//! - [`FormattedRow`]: one sanitized Markdown table row
//!
//! The API uses camelCase and all-lowercase keys (`pubDate`, `originallink`),
//! hence the explicit `rename` attributes.

use serde::Deserialize;

/// Top-level body of a news search response.
///
/// Only `items` drives the output; the envelope fields are logged.
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "lastBuildDate", default)]
    pub last_build_date: Option<String>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub start: Option<u64>,
    #[serde(default)]
    pub display: Option<u64>,
    /// Missing or `null` means no results.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub items: Vec<SearchResultItem>,
}

/// A single news hit.
///
/// `title` and `description` carry HTML (`<b>` around matched terms, entities).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchResultItem {
    #[serde(default)]
    pub title: Option<String>,
    /// Link to the publisher's own page.
    #[serde(rename = "originallink", default)]
    pub original_link: Option<String>,
    /// Link to the Naver News copy (or the original when Naver has none).
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// RFC 2822 date, e.g. `Mon, 06 May 2025 14:03:00 +0900`.
    #[serde(rename = "pubDate", default)]
    pub pub_date: Option<String>,
}

/// Error envelope returned with 4xx/5xx responses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(rename = "errorMessage")]
    pub error_message: String,
    #[serde(rename = "errorCode", default)]
    pub error_code: Option<String>,
}

/// One Markdown table row; every cell is already escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedRow {
    pub title: String,
    pub origin_link: String,
    pub naver_link: String,
    pub published: String,
    pub description: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<SearchResultItem>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<SearchResultItem>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_response() {
        let json = r#"{
            "lastBuildDate": "Tue, 06 May 2025 15:00:00 +0900",
            "total": 123456,
            "start": 1,
            "display": 1,
            "items": [{
                "title": "<b>기업</b> 실적 발표",
                "originallink": "https://example.com/a",
                "link": "https://n.news.naver.com/a",
                "description": "요약 &quot;본문&quot;",
                "pubDate": "Tue, 06 May 2025 14:03:00 +0900"
            }]
        }"#;

        let res: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(res.total, Some(123456));
        assert_eq!(res.items.len(), 1);
        let item = &res.items[0];
        assert_eq!(item.original_link.as_deref(), Some("https://example.com/a"));
        assert_eq!(item.pub_date.as_deref(), Some("Tue, 06 May 2025 14:03:00 +0900"));
    }

    #[test]
    fn test_missing_items_is_empty() {
        let res: SearchResponse = serde_json::from_str(r#"{"total": 0}"#).unwrap();
        assert!(res.items.is_empty());

        let res: SearchResponse = serde_json::from_str(r#"{"items": null}"#).unwrap();
        assert!(res.items.is_empty());
    }

    #[test]
    fn test_item_fields_are_optional() {
        let item: SearchResultItem = serde_json::from_str(r#"{"title": "only"}"#).unwrap();
        assert_eq!(item.title.as_deref(), Some("only"));
        assert_eq!(item.link, None);
        assert_eq!(item.pub_date, None);
    }

    #[test]
    fn test_api_error_body() {
        let body: ApiErrorBody = serde_json::from_str(
            r#"{"errorMessage": "Authentication failed", "errorCode": "024"}"#,
        )
        .unwrap();
        assert_eq!(body.error_message, "Authentication failed");
        assert_eq!(body.error_code.as_deref(), Some("024"));
    }
}
