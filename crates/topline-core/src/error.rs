use thiserror::Error;

use crate::http_client::HttpError;
use crate::SourceId;

/// Configuration and contract errors exposed by `topline-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("source id cannot be empty")]
    EmptySourceId,
    #[error("source id '{value}' must not contain whitespace")]
    InvalidSourceId { value: String },
    #[error("at least one news source must be configured")]
    EmptySourceList,
    #[error("source '{value}' is configured more than once")]
    DuplicateSource { value: String },
    #[error("news api key is missing; set TOPLINE_NEWSAPI_KEY or NEWSAPI_KEY")]
    MissingApiKey,
}

/// Failure that aborts a lookup. Never produced for "no matching article".
#[derive(Debug, Error)]
pub enum LookupError {
    #[error(transparent)]
    Transport(#[from] HttpError),

    #[error("malformed payload from source '{source_id}': {source}")]
    Decode {
        source_id: SourceId,
        #[source]
        source: serde_json::Error,
    },
}

impl LookupError {
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}
