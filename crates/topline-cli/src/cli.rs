//! CLI argument definitions for `topline`.
//!
//! # Examples
//!
//! ```bash
//! # Latest headline mentioning "election" from the default sources
//! topline election
//!
//! # Custom source priority and JSON output
//! topline manchester --source the-telegraph --source bbc-news --format json --pretty
//! ```
//!
//! The API key is taken from `--api-key`, then `TOPLINE_NEWSAPI_KEY`, then
//! `NEWSAPI_KEY`. Log verbosity follows `RUST_LOG` (default `warn`); logs go
//! to stderr.

use clap::{Parser, ValueEnum};

/// Print the latest news article whose headline mentions a topic.
#[derive(Debug, Parser)]
#[command(
    name = "topline",
    author,
    version,
    about = "Latest news on a topic, with fallback across news sources"
)]
pub struct Cli {
    /// Topic to look for in article titles (case-sensitive substring).
    #[arg(default_value = "")]
    pub topic: String,

    /// News API key. Overrides TOPLINE_NEWSAPI_KEY / NEWSAPI_KEY.
    #[arg(long)]
    pub api_key: Option<String>,

    /// Source to query, in priority order. Repeat to build a fallback list.
    ///
    /// Defaults to bbc-news, then the-telegraph.
    #[arg(long = "source", value_name = "ID")]
    pub sources: Vec<String>,

    /// Articles endpoint to query.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Per-request timeout in milliseconds.
    #[arg(long, default_value_t = 3000)]
    pub timeout_ms: u64,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, default_value_t = false)]
    pub pretty: bool,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable headline block.
    Text,
    /// Single JSON object with the lookup report.
    Json,
}
