//! Output generation: rendering results and patching them into the README.
//!
//! # Submodules
//!
//! - [`markdown`]: Converts search results into the Markdown news fragment
//! - [`readme`]: Replaces the marker-bounded region of the target document
//!
//! # Document Layout
//!
//! ```text
//! # Anything above is left alone
//! <!-- NEWS:START -->
//! ## 최신 네이버 뉴스: `기업`
//! _Last update: 2025-05-06 14:03:00 KST_
//!
//! | 제목 | 원문(originallink) | 네이버 링크 | 발행시각 | 요약 |
//! |---|---|---|---|---|
//! | ... |
//!
//! > 데이터 출처: 네이버 검색 뉴스 API
//! <!-- NEWS:END -->
//! Anything below is left alone
//! ```

pub mod markdown;
pub mod readme;
