//! ai-lint - document lint rules for AI assistants
//!
//! An MCP server that hands lint rules and lint plans to an AI assistant
//! host. Rule application itself is left to the assistant.

pub mod config;
pub mod error;
pub mod fetch;
pub mod mcp;

pub use config::ServerConfig;
pub use error::{LintError, Result};
pub use fetch::{HttpRuleFetcher, RuleFetcher, RuleResponse};
