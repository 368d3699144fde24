//! `nexus-chatbot` — tool layer for a language-model assistant.
//!
//! Declares the callable functions, routes calls onto the domain use-cases
//! with role checks, and serves them as JSON lines.

pub mod declarations;
pub mod dispatcher;
pub mod error;
pub mod reports;
pub mod response;
pub mod server;

pub use declarations::{ToolDeclaration, ToolDefinitions};
pub use dispatcher::{ToolDispatcher, ToolSettings};
pub use error::ToolError;
pub use reports::{
    Attachment, Mailer, RecordingMailer, ReportError, ReportRenderer, SentMail,
    TextReportRenderer,
};
pub use response::ToolResponse;
pub use server::{ToolRequest, serve};
