use thiserror::Error;

use nexus_core::DomainError;

use crate::reports::ReportError;

/// Failure of a single tool call.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("invalid arguments for {tool}: {source}")]
    InvalidArguments {
        tool: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("failed to encode tool result: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ToolError {
    pub fn code(&self) -> &'static str {
        match self {
            ToolError::UnknownTool(_) => "unknown_tool",
            ToolError::InvalidArguments { .. } => "invalid_arguments",
            ToolError::Domain(err) => err.code(),
            ToolError::Report(_) => "report_failed",
            ToolError::Encode(_) => "encode_failed",
        }
    }

    /// HTTP-style status, for callers that forward tool results over HTTP.
    pub fn status_code(&self) -> u16 {
        match self {
            ToolError::UnknownTool(_) => 404,
            ToolError::InvalidArguments { .. } => 400,
            ToolError::Domain(err) => err.status_code(),
            ToolError::Report(_) | ToolError::Encode(_) => 500,
        }
    }
}
