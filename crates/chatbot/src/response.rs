use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ToolError;

/// Uniform answer to every tool call, success or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Row count for list-shaped results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub message: String,
}

impl ToolResponse {
    pub fn ok(data: Value, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            total: None,
            error: None,
            code: None,
            message: message.into(),
        }
    }

    pub fn list(data: Vec<Value>, message: impl Into<String>) -> Self {
        let total = data.len();
        Self {
            total: Some(total),
            ..Self::ok(Value::Array(data), message)
        }
    }

    /// Success without a payload (deletes, sends).
    pub fn done(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            total: None,
            error: None,
            code: None,
            message: message.into(),
        }
    }

    pub fn failure(code: impl Into<String>, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            total: None,
            error: Some(error.into()),
            code: Some(code.into()),
            message: message.into(),
        }
    }

    pub fn from_error(tool: &str, err: &ToolError) -> Self {
        Self::failure(err.code(), err.to_string(), format!("{tool} failed: {err}"))
    }
}
