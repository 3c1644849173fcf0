//! Utility functions for date formatting, string manipulation, link
//! construction, and file system checks.
//!
//! This module provides the small helpers shared by the renderers:
//! - Locale-style long date formatting for article metadata
//! - Summary truncation for listing cards
//! - On-site detail-path construction
//! - Filename slugification and output directory validation

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::info;

/// Maximum summary length shown on a listing card, in characters.
pub const SUMMARY_MAX_CHARS: usize = 200;

/// Separator used between segments of a metadata line.
pub const META_SEPARATOR: &str = " • ";

/// Format a DVIDS date string as a long display date ("May 6, 2025").
///
/// Accepts RFC 3339 timestamps, `YYYY-MM-DD HH:MM:SS`, or bare `YYYY-MM-DD`
/// dates. Empty input yields an empty string; input that parses as none of
/// the accepted forms passes through verbatim rather than erroring.
pub fn format_date(date_str: &str) -> String {
    let trimmed = date_str.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return dt.format("%B %-d, %Y").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return dt.format("%B %-d, %Y").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.format("%B %-d, %Y").to_string();
    }
    trimmed.to_string()
}

/// Truncate a summary for a listing card.
///
/// Strings longer than [`SUMMARY_MAX_CHARS`] characters are cut at a char
/// boundary and suffixed with `...`; shorter strings pass through unchanged.
pub fn truncate_summary(text: &str) -> String {
    if text.chars().count() <= SUMMARY_MAX_CHARS {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(SUMMARY_MAX_CHARS).collect();
        format!("{truncated}...")
    }
}

/// Join metadata segments with [`META_SEPARATOR`], skipping blank segments
/// so the result never carries a leading or trailing separator.
pub fn join_meta(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|part| !part.trim().is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(META_SEPARATOR)
}

/// Build the on-site detail path for an article.
///
/// Listing links use this so readers stay on the hosting site instead of
/// being sent to dvidshub.net.
pub fn article_path(id: &str) -> String {
    format!("/dvids/article?id={}", urlencoding::encode(id))
}

/// Convert a string to a filesystem/URL-friendly slug.
///
/// Lowercases, strips special characters, and hyphenates spaces. Used for
/// output filenames derived from article IDs.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .replace(|c: char| !c.is_alphanumeric() && c != ' ' && c != '-', "")
        .replace(' ', "-")
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then probes writability by creating and
/// removing a scratch file.
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(path).await {
        return Err(Box::new(e));
    }
    // Small sync write probe; simpler error surface than async
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}
