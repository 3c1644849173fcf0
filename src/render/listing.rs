//! Listing renderer: one card per article plus an attribution header.
//!
//! Maps a [`SearchResult`] to a node tree. Cards keep readers on-site: the
//! "Read More" link points at the local detail path, not dvidshub.net.

use crate::models::{Article, SearchResult};
use crate::render::html::{Element, Node};
use crate::utils::{article_path, format_date, join_meta, truncate_summary};

/// Render a full search result as a listing block.
///
/// An empty article list yields a single "no articles" placeholder instead
/// of an empty list. Otherwise the block holds an attribution header
/// followed by one card per article, in API order.
pub fn render_listing(result: &SearchResult) -> Node {
    let block = Element::new("div").class("dvids-news");

    if result.articles.is_empty() {
        return block
            .child(
                Element::new("p")
                    .class("dvids-empty")
                    .text("No DVIDS articles available"),
            )
            .into();
    }

    let cards = result
        .articles
        .iter()
        .fold(Element::new("ul"), |ul, article| {
            ul.child(article_card(article))
        });

    block
        .child(listing_header(result.total_results))
        .child(cards)
        .into()
}

fn listing_header(total_results: u64) -> Element {
    Element::new("div")
        .class("dvids-header")
        .child(
            Element::new("span")
                .class("dvids-source")
                .text("Powered by ")
                .child(
                    Element::new("a")
                        .attr("href", "https://www.dvidshub.net")
                        .attr("target", "_blank")
                        .attr("rel", "noopener")
                        .text("DVIDS"),
                ),
        )
        .child(
            Element::new("span")
                .class("dvids-count")
                .text(&format!("{total_results} articles found")),
        )
}

/// Render one listing card.
///
/// Thumbnails load lazily; titles fall back to "Untitled"; the metadata line
/// joins the formatted date and branch, omitting blank parts; summaries are
/// truncated for the card.
fn article_card(article: &Article) -> Element {
    let image = article.card_image().map(|src| {
        Element::new("picture").child(
            Element::new("img")
                .attr("src", src)
                .attr("alt", article.display_title())
                .attr("loading", "lazy"),
        )
    });

    let meta_line = join_meta(&[
        &format_date(article.date.as_deref().unwrap_or("")),
        article.branch.as_deref().unwrap_or(""),
    ]);

    let body = Element::new("div")
        .class("cards-card-body")
        .child(Element::new("h3").text(article.display_title()))
        .child(Element::new("p").class("dvids-meta").text(&meta_line))
        .child(
            Element::new("p")
                .class("dvids-description")
                .text(&truncate_summary(article.summary_text())),
        )
        .child(
            Element::new("p").class("button-container").child(
                Element::new("a")
                    .class("button")
                    .class("primary")
                    .attr("href", &article_path(&article.id))
                    .text("Read More"),
            ),
        );

    Element::new("li")
        .child(
            Element::new("div")
                .class("cards-card-image")
                .maybe_child(image),
        )
        .child(body)
}
