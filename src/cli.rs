//! Command-line interface definitions.
//!
//! This module defines the CLI arguments and subcommands using the `clap`
//! crate. The API key can come from a flag or the `DVIDS_API_KEY`
//! environment variable; without either, the embedded development key is
//! used.

use crate::api::SortDir;
use crate::tags::DEFAULT_TAGS_URL;
use clap::{Parser, Subcommand, ValueEnum};

/// Output format for rendered results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// A standalone HTML page.
    Html,
    /// The normalized records as JSON.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            OutputFormat::Html => "html",
            OutputFormat::Json => "json",
        })
    }
}

/// Command-line arguments for the DVIDS news renderer.
///
/// # Examples
///
/// ```sh
/// # Six newest Navy articles as a listing page
/// dvids_news -o ./out search --branch Navy --limit 6
///
/// # One article's detail page
/// dvids_news -o ./out article --id news:12345
///
/// # The tag picker, with a selection string printed for pasting
/// dvids_news tags --select Army,Navy
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Output directory for rendered pages
    #[arg(short, long, global = true, default_value = "./out")]
    pub output_dir: String,

    /// DVIDS API key
    #[arg(long, global = true, env = "DVIDS_API_KEY")]
    pub api_key: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Html)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search DVIDS news and render a listing page of cards
    Search {
        /// Full-text search query
        #[arg(short, long)]
        keyword: Option<String>,

        /// Service branch filter (Army, Navy, Air Force, ...)
        #[arg(long)]
        branch: Option<String>,

        /// Unit ID filter
        #[arg(long)]
        unit: Option<String>,

        /// Maximum number of results
        #[arg(short, long, default_value_t = 10)]
        limit: u32,

        /// Page number
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Sort field: date, publishdate, timestamp, or score
        #[arg(long, default_value = "date")]
        sort: String,

        /// Sort direction
        #[arg(long, value_enum, default_value_t = SortDir::Desc)]
        sortdir: SortDir,
    },

    /// Fetch a single article by asset ID and render its detail page
    Article {
        /// DVIDS asset ID; omitting it renders the no-id error page
        #[arg(short, long)]
        id: Option<String>,
    },

    /// Fetch the tag taxonomy and render the tag-picker list
    Tags {
        /// Tag sheet URL
        #[arg(long, default_value = DEFAULT_TAGS_URL)]
        url: String,

        /// Tags to select, comma separated; prints the paste-ready string
        #[arg(long, value_delimiter = ',')]
        select: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_defaults() {
        let cli = Cli::parse_from(["dvids_news", "search"]);
        match cli.command {
            Command::Search {
                keyword,
                limit,
                page,
                sort,
                sortdir,
                ..
            } => {
                assert!(keyword.is_none());
                assert_eq!(limit, 10);
                assert_eq!(page, 1);
                assert_eq!(sort, "date");
                assert_eq!(sortdir, SortDir::Desc);
            }
            other => panic!("expected search command, got {other:?}"),
        }
        assert_eq!(cli.output_dir, "./out");
        assert_eq!(cli.format, OutputFormat::Html);
    }

    #[test]
    fn test_search_with_filters() {
        let cli = Cli::parse_from([
            "dvids_news",
            "search",
            "--keyword",
            "pacific",
            "--branch",
            "Navy",
            "--limit",
            "6",
            "--sortdir",
            "asc",
        ]);
        match cli.command {
            Command::Search {
                keyword,
                branch,
                limit,
                sortdir,
                ..
            } => {
                assert_eq!(keyword.as_deref(), Some("pacific"));
                assert_eq!(branch.as_deref(), Some("Navy"));
                assert_eq!(limit, 6);
                assert_eq!(sortdir, SortDir::Asc);
            }
            other => panic!("expected search command, got {other:?}"),
        }
    }

    #[test]
    fn test_article_command() {
        let cli = Cli::parse_from(["dvids_news", "article", "--id", "news:12345"]);
        match cli.command {
            Command::Article { id } => assert_eq!(id.as_deref(), Some("news:12345")),
            other => panic!("expected article command, got {other:?}"),
        }
    }

    #[test]
    fn test_article_without_id_parses() {
        let cli = Cli::parse_from(["dvids_news", "article"]);
        match cli.command {
            Command::Article { id } => assert!(id.is_none()),
            other => panic!("expected article command, got {other:?}"),
        }
    }

    #[test]
    fn test_global_args_after_subcommand() {
        let cli = Cli::parse_from(["dvids_news", "search", "-o", "/tmp/pages", "--format", "json"]);
        assert_eq!(cli.output_dir, "/tmp/pages");
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_tags_select_is_comma_separated() {
        let cli = Cli::parse_from(["dvids_news", "tags", "--select", "Army,Navy"]);
        match cli.command {
            Command::Tags { url, select } => {
                assert_eq!(url, DEFAULT_TAGS_URL);
                assert_eq!(select, vec!["Army".to_string(), "Navy".to_string()]);
            }
            other => panic!("expected tags command, got {other:?}"),
        }
    }
}
