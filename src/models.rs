//! Data models for normalized DVIDS content records.
//!
//! This module defines the shapes shared by the API client and the renderers:
//! - [`Article`]: one normalized article record (listing summaries and the
//!   full detail view use the same shape; detail responses simply populate
//!   more of the optional fields)
//! - [`SearchResult`]: a single page of search results with pagination
//!   metadata
//!
//! The DVIDS API returns snake_case JSON, so the field names map directly.
//! Every field except `id` is optional: a record missing a field renders
//! without the corresponding fragment rather than failing.

use serde::{Deserialize, Serialize};

/// A normalized DVIDS article record.
///
/// Produced by trimming the external API's raw JSON down to the fields the
/// renderers consume. Records are never mutated after construction; each
/// render pass works from an immutable snapshot of one API response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Article {
    /// Opaque DVIDS asset identifier, e.g. `"news:12345"`. Required for
    /// detail lookups and link construction.
    pub id: String,
    /// Article headline.
    #[serde(default)]
    pub title: Option<String>,
    /// Publication date string as returned by the API.
    #[serde(default)]
    pub date: Option<String>,
    /// Service branch classification (Army, Navy, Air Force, ...).
    #[serde(default)]
    pub branch: Option<String>,
    /// Name of the originating unit.
    #[serde(default)]
    pub unit_name: Option<String>,
    /// Byline credit.
    #[serde(default)]
    pub credit: Option<String>,
    /// Free-text description; preferred over `summary` when both exist.
    #[serde(default)]
    pub description: Option<String>,
    /// Shorter summary text, used when `description` is absent.
    #[serde(default)]
    pub summary: Option<String>,
    /// Full-size image URL.
    #[serde(default)]
    pub image: Option<String>,
    /// Thumbnail image URL; preferred for listing cards.
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// Article body as an HTML fragment. Trusted content from the API,
    /// inserted verbatim into the detail view.
    #[serde(default)]
    pub body: Option<String>,
    /// Topic keywords in API order.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Canonical URL of the article on dvidshub.net.
    #[serde(default)]
    pub url: Option<String>,
}

impl Article {
    /// Title for display, falling back to a placeholder when absent.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled")
    }

    /// Summary text for listing cards: `description` if present, else
    /// `summary`, else empty.
    pub fn summary_text(&self) -> &str {
        self.description
            .as_deref()
            .or(self.summary.as_deref())
            .unwrap_or("")
    }

    /// Image URL for listing cards, preferring the thumbnail.
    pub fn card_image(&self) -> Option<&str> {
        self.thumbnail.as_deref().or(self.image.as_deref())
    }
}

/// One page of DVIDS search results.
///
/// The zero value (via [`Default`]) is what the client hands back on any
/// failure: no articles, zero total, page 1 of 1.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    /// Articles in the order the API returned them.
    pub articles: Vec<Article>,
    /// Total number of matching articles across all pages.
    pub total_results: u64,
    /// The page this result represents (1-based).
    pub page: u32,
    /// Total number of pages available.
    pub page_count: u32,
}

impl Default for SearchResult {
    fn default() -> Self {
        SearchResult {
            articles: Vec::new(),
            total_results: 0,
            page: 1,
            page_count: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_minimal_deserialization() {
        let json = r#"{"id": "news:100"}"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.id, "news:100");
        assert!(article.title.is_none());
        assert!(article.keywords.is_empty());
    }

    #[test]
    fn test_article_full_deserialization() {
        let json = r#"{
            "id": "news:101",
            "title": "Exercise Concludes",
            "date": "2025-05-06",
            "branch": "Navy",
            "unit_name": "Seventh Fleet",
            "credit": "PO2 Jane Doe",
            "description": "A long description",
            "image": "https://cdn.example/hero.jpg",
            "thumbnail": "https://cdn.example/thumb.jpg",
            "keywords": ["exercise", "pacific"],
            "url": "https://www.dvidshub.net/news/101"
        }"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.display_title(), "Exercise Concludes");
        assert_eq!(article.branch.as_deref(), Some("Navy"));
        assert_eq!(article.unit_name.as_deref(), Some("Seventh Fleet"));
        assert_eq!(article.keywords.len(), 2);
    }

    #[test]
    fn test_display_title_fallback() {
        let article: Article = serde_json::from_str(r#"{"id": "a"}"#).unwrap();
        assert_eq!(article.display_title(), "Untitled");
    }

    #[test]
    fn test_summary_text_prefers_description() {
        let article: Article =
            serde_json::from_str(r#"{"id": "a", "description": "desc", "summary": "sum"}"#)
                .unwrap();
        assert_eq!(article.summary_text(), "desc");

        let article: Article = serde_json::from_str(r#"{"id": "a", "summary": "sum"}"#).unwrap();
        assert_eq!(article.summary_text(), "sum");

        let article: Article = serde_json::from_str(r#"{"id": "a"}"#).unwrap();
        assert_eq!(article.summary_text(), "");
    }

    #[test]
    fn test_card_image_prefers_thumbnail() {
        let article: Article =
            serde_json::from_str(r#"{"id": "a", "image": "full.jpg", "thumbnail": "thumb.jpg"}"#)
                .unwrap();
        assert_eq!(article.card_image(), Some("thumb.jpg"));

        let article: Article =
            serde_json::from_str(r#"{"id": "a", "image": "full.jpg"}"#).unwrap();
        assert_eq!(article.card_image(), Some("full.jpg"));
    }

    #[test]
    fn test_search_result_zero_value() {
        let empty = SearchResult::default();
        assert!(empty.articles.is_empty());
        assert_eq!(empty.total_results, 0);
        assert_eq!(empty.page, 1);
        assert_eq!(empty.page_count, 1);
    }
}
