//! Tag taxonomy tool for content authors.
//!
//! Fetches the site's topic-tag sheet and renders it as a checkbox list; a
//! chosen subset is joined into a comma-separated string authors paste into
//! page metadata. The taxonomy is request-scoped state: it lives in a
//! [`TagTaxonomy`] value passed to the render functions, never in module
//! globals, so renderers stay testable in isolation.

use crate::render::html::{Element, Node};
use serde::Deserialize;
use std::error::Error;
use tracing::{info, instrument};

/// Default tag-sheet location for the hosting site.
pub const DEFAULT_TAGS_URL: &str =
    "https://main--military--jfoxx.aem.live/admin/tags.json?sheet=topics";

#[derive(Debug, Deserialize)]
struct RawTagSheet {
    #[serde(default)]
    data: Vec<RawTagRow>,
}

#[derive(Debug, Deserialize)]
struct RawTagRow {
    #[serde(default)]
    title: Option<String>,
}

/// The ordered tag titles from the site's taxonomy sheet.
#[derive(Debug, Clone)]
pub struct TagTaxonomy {
    titles: Vec<String>,
}

impl TagTaxonomy {
    /// Fetch and parse the taxonomy sheet.
    #[instrument(level = "info", skip(http))]
    pub async fn fetch(http: &reqwest::Client, url: &str) -> Result<Self, Box<dyn Error>> {
        let body = http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let taxonomy = Self::from_json(&body)?;
        info!(count = taxonomy.titles.len(), "Loaded tag taxonomy");
        Ok(taxonomy)
    }

    /// Parse a taxonomy sheet body. Only the `title` column is kept; rows
    /// without one are skipped.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        let raw: RawTagSheet = serde_json::from_str(body)?;
        let titles = raw
            .data
            .into_iter()
            .filter_map(|row| row.title)
            .filter(|title| !title.trim().is_empty())
            .collect();
        Ok(TagTaxonomy { titles })
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Join the picked tags into the comma-separated form pasted into page
    /// metadata. Picks not present in the taxonomy are dropped; taxonomy
    /// order is preserved. Returns `None` when nothing valid was picked.
    pub fn selection_string(&self, picks: &[String]) -> Option<String> {
        let selected: Vec<&str> = self
            .titles
            .iter()
            .filter(|title| picks.iter().any(|pick| pick == *title))
            .map(String::as_str)
            .collect();
        if selected.is_empty() {
            None
        } else {
            Some(selected.join(","))
        }
    }
}

/// Render the taxonomy as a checkbox list.
pub fn render_tag_list(taxonomy: &TagTaxonomy) -> Node {
    taxonomy
        .titles()
        .iter()
        .fold(Element::new("div").attr("id", "tag-list"), |list, title| {
            list.child(
                Element::new("label")
                    .class("tag-item")
                    .child(
                        Element::new("input")
                            .attr("type", "checkbox")
                            .attr("value", title),
                    )
                    .text(&format!(" {title}")),
            )
        })
        .into()
}

/// Placeholder shown when the taxonomy sheet cannot be loaded.
pub fn render_tags_error() -> Node {
    Element::new("div")
        .attr("id", "tag-list")
        .text("Failed to load tags.")
        .into()
}
