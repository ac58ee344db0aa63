use std::io;

use thiserror::Error;

use tint_color::ParseColorError;

/// Structurally invalid selection request, reported by
/// [`SelectionRequestBuilder::build`](crate::SelectionRequestBuilder::build).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("swatch #{index} `{value}` is not a color: {source}")]
    InvalidSwatch {
        index: usize,
        value: String,
        #[source]
        source: ParseColorError,
    },

    #[error("swatch set is empty")]
    EmptySwatchSet,

    #[error("theme color `{0}` could not be resolved")]
    UnresolvedColor(String),
}

/// Errors raised by recent-color storage backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("recent colors IO failed: {0}")]
    Io(#[from] io::Error),

    #[error("recent colors JSON failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("recent colors storage unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
