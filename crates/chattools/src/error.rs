//! Error types for the chat tools

use thiserror::Error;

/// Errors that can occur while running a tool
#[derive(Debug, Error)]
pub enum ToolError {
    /// URL is missing
    #[error("Missing required parameter: url")]
    MissingUrl,

    /// Input is neither a parseable URL nor a canonical video id
    #[error("Invalid URL: expected an http(s) URL or an 11-character video id")]
    InvalidUrl,

    /// URL has invalid scheme
    #[error("Invalid URL: must start with http:// or https://")]
    InvalidUrlScheme,

    /// No tool registered under the requested name
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Arguments did not match the tool's parameter schema
    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(#[from] serde_json::Error),

    /// Failed to build HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuildError(#[source] reqwest::Error),

    /// Request timed out before the server responded
    #[error("Request timed out: server did not respond in time")]
    Timeout,

    /// Failed to connect to server
    #[error("Failed to connect to server")]
    ConnectError(#[source] reqwest::Error),

    /// Other request error
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Backend answered with a non-success status
    #[error("Upstream returned HTTP {0}")]
    UpstreamStatus(u16),
}

impl ToolError {
    /// Classify a reqwest error
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ToolError::Timeout
        } else if err.is_connect() {
            ToolError::ConnectError(err)
        } else {
            ToolError::RequestError(err.to_string())
        }
    }
}
