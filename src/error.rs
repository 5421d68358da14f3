//! Unified error types.

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    #[error("Compare error: {0}")]
    Compare(#[from] CompareError),

    #[error("Widget error: {0}")]
    Widget(#[from] WidgetError),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Timeout")]
    Timeout,

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

/// Datafeed errors. These reach the widget through its error callbacks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    #[error("Unknown symbol")]
    UnknownSymbol(String),

    #[error("Datafeed must be created inside a tokio runtime")]
    NoRuntime,
}

/// Errors raised while adding a comparison symbol.
///
/// The `Display` text is what the compare dialog shows inline.
#[derive(Error, Debug)]
pub enum CompareError {
    #[error("Please search and select a token")]
    NoSelection,

    #[error("Comparison is not available")]
    Unavailable,

    #[error("{}", fetch_message(.0))]
    Fetch(String),

    #[error("Failed to add symbol: {0}")]
    Widget(#[from] WidgetError),
}

fn fetch_message(message: &str) -> &str {
    if message.is_empty() {
        "Failed to add symbol"
    } else {
        message
    }
}

/// Errors reported by the charting widget.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WidgetError {
    #[error("Widget construction failed: {0}")]
    Create(String),

    #[error("Study creation failed: {0}")]
    Study(String),

    #[error("Header button creation failed: {0}")]
    Button(String),

    #[error("No widget mounted")]
    NotMounted,
}
