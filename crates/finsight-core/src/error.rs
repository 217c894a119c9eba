//! Error types for Finsight

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Non-finite or otherwise unusable numeric input to the projection
    /// generator. Fails fast; no partial output is produced.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The model responded, but the payload could not be parsed even after
    /// repair. Distinct from `Http` so callers can tell "model unreachable"
    /// from "model returned malformed output".
    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    /// The hosted model API returned a non-success status.
    #[error("Model API error: {0}")]
    ModelApi(String),

    /// The main finance backend returned a non-success status.
    #[error("Upstream backend error: {0}")]
    Upstream(String),
}

pub type Result<T> = std::result::Result<T, Error>;
