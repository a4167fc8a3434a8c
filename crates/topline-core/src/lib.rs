//! # Topline Core
//!
//! Latest-news lookup across an ordered list of upstream news sources.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`domain`] | Article records, payload decoding, the [`NewsItem`] result |
//! | [`error`] | Validation and lookup error types |
//! | [`http_client`] | HTTP transport abstraction and reqwest implementation |
//! | [`lookup`] | The [`NewsLookup`] engine and its builder |
//! | [`source`] | Source identifiers |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use topline_core::NewsLookup;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let lookup = NewsLookup::builder().with_env_credentials().build()?;
//!
//!     match lookup.latest_news_item("election").await? {
//!         Some(item) => println!("{} ({})", item.title, item.date),
//!         None => println!("nothing found"),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / caller   │
//! └────────┬────────┘
//!          │ topic
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │   NewsLookup    │────▶│   HttpClient     │
//! │ (source order)  │     │ (reqwest/double) │
//! └────────┬────────┘     └──────────────────┘
//!          │ body
//!          ▼
//! ┌─────────────────┐
//! │  NewsPayload /  │
//! │   ArticleSet    │
//! └─────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! A lookup that finds nothing is `Ok(None)`. Failures are [`LookupError`]s
//! and stop the lookup at the source that produced them:
//!
//! ```rust
//! use topline_core::LookupError;
//!
//! fn describe(error: &LookupError) -> &'static str {
//!     match error {
//!         LookupError::Transport(_) => "upstream unreachable",
//!         LookupError::Decode { .. } => "upstream sent an unexpected payload",
//!     }
//! }
//! ```
//!
//! The API key is sent as a query parameter and never logged.

pub mod domain;
pub mod error;
pub mod http_client;
pub mod lookup;
pub mod source;

pub use domain::{Article, ArticleSet, NewsItem, NewsPayload};

pub use error::{LookupError, ValidationError};

pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

pub use lookup::{LookupReport, NewsLookup, NewsLookupBuilder, DEFAULT_BASE_URL, SORT_BY};

pub use source::{SourceId, DEFAULT_SOURCES};
