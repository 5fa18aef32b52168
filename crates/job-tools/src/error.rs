//! Error types for `adzuna-job-tools`.

use reqwest::StatusCode;
use thiserror::Error;

/// Every way a single operation can fail. Each variant maps to exactly one local status code.
#[derive(Error, Debug)]
pub enum JobToolsError {
    /// `ADZUNA_APP_ID` or `ADZUNA_APP_KEY` is empty. Raised before any network I/O.
    #[error(
        "Adzuna API credentials not configured. Please set ADZUNA_APP_ID and ADZUNA_APP_KEY."
    )]
    CredentialsMissing,

    /// Missing or malformed local parameter. Raised before any network I/O.
    #[error("{0}")]
    Validation(String),

    /// Tool name not in the manifest (MCP surface only).
    #[error("Tool not found: {0}")]
    UnknownTool(String),

    /// Transport failure, timeout, or non-2xx upstream status.
    #[error("Error calling Adzuna API: {0}")]
    Upstream(String),

    /// 2xx upstream response whose body is not the JSON we expect.
    #[error("Error calling Adzuna API: failed to decode JSON response: {0}")]
    Decode(String),

    /// Invalid static configuration (base URL, HTTP client).
    #[error("Configuration error: {0}")]
    Config(String),
}

impl JobToolsError {
    /// Local HTTP status for this failure.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::UnknownTool(_) => StatusCode::NOT_FOUND,
            Self::CredentialsMissing | Self::Upstream(_) | Self::Decode(_) | Self::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// True for failures caused by the caller's input (nothing was sent upstream).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::UnknownTool(_))
    }
}

/// Result type alias for job tool operations.
pub type Result<T> = std::result::Result<T, JobToolsError>;
