//! Server configuration

/// Only rule URLs starting with this prefix may be fetched
pub const RULE_URL_PREFIX: &str = "https://raw.githubusercontent.com/";

/// MCP protocol revision advertised during `initialize`
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Static configuration, built once at startup and shared by reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Name reported in `serverInfo`
    pub server_name: String,
    /// Version reported in `serverInfo`
    pub server_version: String,
    pub protocol_version: String,
    /// Allow-list prefix for `get-lint-rule`
    pub rule_url_prefix: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_name: "@ai-lint/mcp-server".to_string(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
            protocol_version: PROTOCOL_VERSION.to_string(),
            rule_url_prefix: RULE_URL_PREFIX.to_string(),
        }
    }
}
