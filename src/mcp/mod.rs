//! MCP (Model Context Protocol) server implementation
//!
//! JSON-RPC over stdio exposing the lint tools.

pub mod handler;
pub mod protocol;
pub mod registry;
pub mod tools;

pub use handler::LintHandler;
pub use protocol::{
    methods, InitializeResult, McpHandler, McpRequest, McpResponse, McpServer, ToolCallResult,
    ToolContent, ToolDefinition,
};
pub use registry::ToolRegistry;
pub use tools::{ToolCall, ToolKind};
