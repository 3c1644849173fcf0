//! Detail-page renderer and its state machine.
//!
//! A detail page moves through a fixed set of states:
//!
//! ```text
//! no id        -> Error (terminal, no network call)
//! id present   -> Loading -> fetch -> Loaded  (terminal)
//!                                  -> Error   (terminal, not found)
//! ```
//!
//! Error states render a fixed, non-technical message plus a back-navigation
//! link; they are never fatal to the hosting page. Loading the article has
//! one side effect beyond the fetch: [`DetailPage::document_title`] exposes
//! the page title the host document should adopt.

use crate::api::DvidsClient;
use crate::models::Article;
use crate::render::html::{Element, Node};
use crate::utils::format_date;
use tracing::{info, instrument};

/// Shown when the page context carries no article ID.
pub const NO_ID_MESSAGE: &str =
    "No article ID provided. Please select an article from the news listing.";
/// Shown when the fetch produced no article.
pub const NOT_FOUND_MESSAGE: &str = "Article not found or could not be loaded from DVIDS.";

/// State of a detail page render pass.
#[derive(Debug, Clone)]
pub enum DetailState {
    /// Fetch in flight.
    Loading,
    /// Terminal: fixed message plus back navigation.
    Error(String),
    /// Terminal: full article view.
    Loaded(Article),
}

/// A single detail-page render pass.
///
/// Constructed in a terminal state by [`DetailPage::load`]; the transient
/// loading view is available separately for hosts that paint before the
/// fetch resolves.
#[derive(Debug, Clone)]
pub struct DetailPage {
    state: DetailState,
}

impl DetailPage {
    /// The transient loading view.
    pub fn loading() -> Self {
        DetailPage {
            state: DetailState::Loading,
        }
    }

    fn error(message: &str) -> Self {
        DetailPage {
            state: DetailState::Error(message.to_string()),
        }
    }

    /// Resolve the page for the given article ID.
    ///
    /// No resolvable ID short-circuits to the error state without a network
    /// call. Otherwise the article is fetched; a missing result lands in the
    /// error state, a found one in the loaded state.
    #[instrument(level = "info", skip(client))]
    pub async fn load(client: &DvidsClient, id: Option<&str>) -> Self {
        let Some(id) = id.map(str::trim).filter(|id| !id.is_empty()) else {
            info!("no article id in page context");
            return Self::error(NO_ID_MESSAGE);
        };

        match client.fetch_by_id(id).await {
            Some(article) => DetailPage {
                state: DetailState::Loaded(article),
            },
            None => Self::error(NOT_FOUND_MESSAGE),
        }
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    /// The loaded article, if any.
    pub fn article(&self) -> Option<&Article> {
        match &self.state {
            DetailState::Loaded(article) => Some(article),
            _ => None,
        }
    }

    /// Title the host document should adopt, present only when an article
    /// with a title was loaded.
    pub fn document_title(&self) -> Option<String> {
        self.article()
            .and_then(|article| article.title.as_deref())
            .map(|title| format!("{title} | DVIDS News"))
    }

    /// Render the current state as a node tree.
    pub fn render(&self) -> Node {
        match &self.state {
            DetailState::Loading => render_loading(),
            DetailState::Error(message) => render_error(message),
            DetailState::Loaded(article) => render_article(article),
        }
    }
}

/// Render the full article view.
fn render_article(article: &Article) -> Node {
    let header = article_header(article);

    let hero = article.image.as_deref().map(|src| {
        Element::new("figure")
            .class("dvids-article-image")
            .child(
                Element::new("img")
                    .attr("src", src)
                    .attr("alt", article.title.as_deref().unwrap_or(""))
                    // Hero loads immediately, unlike listing thumbnails
                    .attr("loading", "eager"),
            )
            .maybe_child(
                article
                    .description
                    .as_deref()
                    .map(|caption| Element::new("figcaption").text(caption)),
            )
    });

    let body = article.body.as_deref().map(|html| {
        // The API delivers the body as a trusted HTML fragment
        Element::new("div").class("dvids-article-body").raw(html)
    });

    let tags = if article.keywords.is_empty() {
        None
    } else {
        Some(
            Element::new("div")
                .class("dvids-article-tags")
                .child(Element::new("span").class("dvids-tags-label").text("Tags: "))
                .child(
                    Element::new("span")
                        .class("dvids-tags-list")
                        .text(&article.keywords.join(", ")),
                ),
        )
    };

    Element::new("article")
        .class("dvids-article-content")
        .child(header)
        .maybe_child(hero)
        .maybe_child(body)
        .maybe_child(tags)
        .child(article_footer(article))
        .into()
}

fn article_header(article: &Article) -> Element {
    let date = article.date.as_deref().map(|date| {
        Element::new("span")
            .class("dvids-article-date")
            .text(&format_date(date))
    });
    let branch = article.branch.as_deref().map(|branch| {
        Element::new("span").class("dvids-article-branch").text(branch)
    });
    let unit = article.unit_name.as_deref().map(|unit| {
        Element::new("span").class("dvids-article-unit").text(unit)
    });
    let credit = article.credit.as_deref().map(|credit| {
        Element::new("p")
            .class("dvids-article-credit")
            .text(&format!("By {credit}"))
    });

    Element::new("header")
        .class("dvids-article-header")
        .child(Element::new("h1").text(article.title.as_deref().unwrap_or("Untitled Article")))
        .child(
            Element::new("div")
                .class("dvids-article-meta")
                .maybe_child(date)
                .maybe_child(branch)
                .maybe_child(unit),
        )
        .maybe_child(credit)
}

fn article_footer(article: &Article) -> Element {
    let original_link = article.url.as_deref().map(|url| {
        Element::new("p").class("dvids-original-link").child(
            Element::new("a")
                .attr("href", url)
                .attr("target", "_blank")
                .attr("rel", "noopener")
                .text("View original on DVIDS →"),
        )
    });

    Element::new("footer")
        .class("dvids-article-footer")
        .child(
            Element::new("p")
                .class("dvids-attribution")
                .text("This article is provided by ")
                .child(
                    Element::new("a")
                        .attr("href", "https://www.dvidshub.net")
                        .attr("target", "_blank")
                        .attr("rel", "noopener")
                        .text("DVIDS"),
                )
                .text(" (Defense Visual Information Distribution Service)."),
        )
        .maybe_child(original_link)
}

fn render_error(message: &str) -> Node {
    Element::new("div")
        .class("dvids-article-error")
        .child(Element::new("h2").text("Unable to Load Article"))
        .child(Element::new("p").text(message))
        .child(
            Element::new("p").child(
                Element::new("a")
                    .attr("href", "javascript:history.back()")
                    .text("← Go Back"),
            ),
        )
        .into()
}

fn render_loading() -> Node {
    Element::new("div")
        .class("dvids-article-loading")
        .child(Element::new("div").class("dvids-loading-spinner"))
        .child(Element::new("p").text("Loading article from DVIDS..."))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::DvidsClient;

    fn offline_client() -> DvidsClient {
        // Endpoints that cannot even parse as URLs: any fetch attempt fails
        // before a socket is opened.
        DvidsClient::with_endpoints("k", "::not a url::", "::not a url::")
    }

    fn article(json: &str) -> Article {
        serde_json::from_str(json).unwrap()
    }

    #[tokio::test]
    async fn test_load_without_id_is_immediate_error() {
        let page = DetailPage::load(&offline_client(), None).await;
        // NO_ID, not NOT_FOUND: proves the fetch path was never entered
        match page.state() {
            DetailState::Error(message) => assert_eq!(message, NO_ID_MESSAGE),
            other => panic!("expected error state, got {other:?}"),
        }
        assert!(page.document_title().is_none());
    }

    #[tokio::test]
    async fn test_load_with_blank_id_is_immediate_error() {
        let page = DetailPage::load(&offline_client(), Some("  ")).await;
        match page.state() {
            DetailState::Error(message) => assert_eq!(message, NO_ID_MESSAGE),
            other => panic!("expected error state, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_found_error() {
        let page = DetailPage::load(&offline_client(), Some("A1")).await;
        match page.state() {
            DetailState::Error(message) => assert_eq!(message, NOT_FOUND_MESSAGE),
            other => panic!("expected error state, got {other:?}"),
        }
    }

    #[test]
    fn test_error_view_offers_back_navigation() {
        let html = render_error(NO_ID_MESSAGE).to_html();
        assert!(html.contains("Unable to Load Article"));
        assert!(html.contains(NO_ID_MESSAGE));
        assert!(html.contains("← Go Back"));
    }

    #[test]
    fn test_loading_view() {
        let html = DetailPage::loading().render().to_html();
        assert!(html.contains("dvids-loading-spinner"));
        assert!(html.contains("Loading article from DVIDS..."));
    }

    #[test]
    fn test_loaded_view_full_article() {
        let node = render_article(&article(
            r#"{
                "id": "news:1",
                "title": "Fleet Exercise",
                "date": "2025-05-06",
                "branch": "Navy",
                "unit_name": "Seventh Fleet",
                "credit": "PO2 Jane Doe",
                "description": "Ships at sea.",
                "image": "https://cdn.example/hero.jpg",
                "body": "<p>Full <em>body</em></p>",
                "keywords": ["exercise", "pacific"],
                "url": "https://www.dvidshub.net/news/1"
            }"#,
        ));
        let html = node.to_html();
        assert!(html.contains("<h1>Fleet Exercise</h1>"));
        assert!(html.contains("May 6, 2025"));
        assert!(html.contains("Seventh Fleet"));
        assert!(html.contains("By PO2 Jane Doe"));
        assert!(html.contains(r#"loading="eager""#));
        assert!(html.contains("<figcaption>Ships at sea.</figcaption>"));
        // Body fragment inserted verbatim
        assert!(html.contains("<p>Full <em>body</em></p>"));
        assert!(html.contains("Tags: "));
        assert!(html.contains("exercise, pacific"));
        assert!(html.contains("View original on DVIDS →"));
    }

    #[test]
    fn test_loaded_view_sparse_article() {
        let html = render_article(&article(r#"{"id": "news:2"}"#)).to_html();
        assert!(html.contains("Untitled Article"));
        assert!(!html.contains("<figure"));
        assert!(!html.contains("dvids-article-body"));
        assert!(!html.contains("Tags: "));
        assert!(!html.contains("dvids-original-link"));
        assert!(!html.contains("By "));
        // Attribution footer is always present
        assert!(html.contains("Defense Visual Information Distribution Service"));
    }

    #[test]
    fn test_document_title() {
        let page = DetailPage {
            state: DetailState::Loaded(article(r#"{"id": "a", "title": "Fleet Exercise"}"#)),
        };
        assert_eq!(
            page.document_title().as_deref(),
            Some("Fleet Exercise | DVIDS News")
        );

        let untitled = DetailPage {
            state: DetailState::Loaded(article(r#"{"id": "a"}"#)),
        };
        assert!(untitled.document_title().is_none());
    }
}
