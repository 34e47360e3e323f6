//! Error types for the lint MCP server

use thiserror::Error;

/// Result type alias for lint server operations
pub type Result<T> = std::result::Result<T, LintError>;

/// JSON-RPC error codes used on the wire
pub mod codes {
    pub const PARSE_ERROR: i64 = -32700;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;
}

/// Main error type for the lint server
#[derive(Error, Debug)]
pub enum LintError {
    #[error("Invalid arguments: {0}")]
    InvalidParams(String),

    #[error("Tool {0} not found")]
    ToolNotFound(String),

    #[error("Tool {0} is already registered")]
    DuplicateTool(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl LintError {
    /// Whether the error must stop the server instead of becoming a response
    pub fn is_fatal(&self) -> bool {
        matches!(self, LintError::Http(_) | LintError::Io(_))
    }

    /// Get error code for MCP protocol
    pub fn code(&self) -> i64 {
        match self {
            LintError::InvalidParams(_) | LintError::ToolNotFound(_) => codes::INVALID_PARAMS,
            LintError::Serialization(_) => codes::PARSE_ERROR,
            _ => codes::INTERNAL_ERROR,
        }
    }
}
