//! # Domain Models
//!
//! Types decoded from the news endpoint and the normalized result handed
//! back to callers.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Article`] | One decoded article record |
//! | [`ArticleSet`] | Ordered articles returned by one source for one query |
//! | [`NewsPayload`] | Top-level response document |
//! | [`NewsItem`] | Caller-facing result of a successful lookup |
//!
//! Timestamps are carried as the provider sent them; nothing here parses or
//! validates `publishedAt`.

mod models;

pub use models::{Article, ArticleSet, NewsItem, NewsPayload};
