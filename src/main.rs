//! # DVIDS News
//!
//! Fetches news articles from the DVIDS (Defense Visual Information
//! Distribution Service) API and renders them as static HTML pages: a
//! listing page of card summaries, a single-article detail page, and a
//! tag-picker list for content authors.
//!
//! ## Usage
//!
//! ```sh
//! dvids_news -o ./out search --branch Navy --limit 6
//! dvids_news -o ./out article --id news:12345
//! dvids_news -o ./out tags --select Army,Navy
//! ```
//!
//! ## Architecture
//!
//! Data flows one direction per invocation:
//! 1. **Fetch**: the API client issues a single GET and normalizes the JSON
//! 2. **Render**: pure functions map the normalized records to a node tree
//! 3. **Write**: the tree is serialized to an HTML page (or the records to
//!    JSON) in the output directory
//!
//! API failures never abort the run: searches collapse to an empty listing,
//! article lookups to an error page with a fixed message.

use clap::Parser;
use std::error::Error;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod api;
mod cli;
mod models;
mod render;
mod tags;
mod utils;

use api::{DvidsClient, SearchOptions};
use cli::{Cli, Command, OutputFormat};
use render::article::DetailPage;
use render::listing::render_listing;
use render::page::html_page;
use tags::{render_tag_list, render_tags_error, TagTaxonomy};
use utils::{ensure_writable_dir, slugify};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("dvids_news starting up");

    let args = Cli::parse();
    debug!(?args.output_dir, ?args.format, "Parsed CLI arguments");

    let api_key = match args.api_key {
        Some(ref key) => key.clone(),
        None => {
            warn!("No API key provided; using the embedded development key (not for production)");
            api::DEV_API_KEY.to_string()
        }
    };
    let client = DvidsClient::new(&api_key);

    // Early check: ensure the output dir is writable
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        tracing::error!(
            path = %args.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    match args.command {
        Command::Search {
            keyword,
            branch,
            unit,
            limit,
            page,
            sort,
            sortdir,
        } => {
            let options = SearchOptions {
                keyword,
                branch,
                unit,
                limit,
                page,
                sort,
                sortdir,
            };
            let result = client.search(&options).await;
            info!(
                count = result.articles.len(),
                total = result.total_results,
                "Search complete"
            );

            let (filename, contents) = match args.format {
                OutputFormat::Html => (
                    "news.html".to_string(),
                    html_page("DVIDS News", render_listing(&result)),
                ),
                OutputFormat::Json => (
                    "news.json".to_string(),
                    serde_json::to_string_pretty(&result)?,
                ),
            };
            write_output(&args.output_dir, &filename, &contents).await?;
        }

        Command::Article { id } => {
            let page = DetailPage::load(&client, id.as_deref()).await;
            let title = page
                .document_title()
                .unwrap_or_else(|| "DVIDS News".to_string());

            let stem = id
                .as_deref()
                .map(slugify)
                .filter(|slug| !slug.is_empty())
                .map(|slug| format!("article-{slug}"))
                .unwrap_or_else(|| "article".to_string());

            let (filename, contents) = match args.format {
                OutputFormat::Html => {
                    (format!("{stem}.html"), html_page(&title, page.render()))
                }
                OutputFormat::Json => (
                    format!("{stem}.json"),
                    serde_json::to_string_pretty(&page.article())?,
                ),
            };
            write_output(&args.output_dir, &filename, &contents).await?;
        }

        Command::Tags { url, select } => {
            let http = reqwest::Client::new();
            let body = match TagTaxonomy::fetch(&http, &url).await {
                Ok(taxonomy) => {
                    if !select.is_empty() {
                        match taxonomy.selection_string(&select) {
                            Some(selection) => {
                                info!(%selection, "Tag selection ready to paste");
                                println!("{selection}");
                            }
                            None => warn!("No tags selected."),
                        }
                    }
                    render_tag_list(&taxonomy)
                }
                Err(e) => {
                    warn!(error = %e, "Error loading tags");
                    render_tags_error()
                }
            };

            let contents = match args.format {
                OutputFormat::Html => html_page("Tag Picker", body),
                OutputFormat::Json => serde_json::to_string_pretty(&body)?,
            };
            let filename = match args.format {
                OutputFormat::Html => "tags.html",
                OutputFormat::Json => "tags.json",
            };
            write_output(&args.output_dir, filename, &contents).await?;
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}

async fn write_output(
    output_dir: &str,
    filename: &str,
    contents: &str,
) -> Result<(), Box<dyn Error>> {
    let path = format!("{}/{}", output_dir.trim_end_matches('/'), filename);
    info!(path = %path, "Writing output");
    tokio::fs::write(&path, contents).await?;
    info!(path = %path, bytes = contents.len(), "Wrote output file");
    Ok(())
}
