//! Request routing and tool dispatch

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::protocol::{
    methods, InitializeResult, McpHandler, McpRequest, McpResponse, ToolCallParams,
    ToolCallResult,
};
use super::registry::ToolRegistry;
use super::tools::{
    load_remote_act_rule_text, plan_lint_text, rule_fetch_failed_text, ToolCall,
    INIT_ACT_RULE_TEXT,
};
use crate::config::ServerConfig;
use crate::error::{codes, LintError, Result};
use crate::fetch::{RuleFetcher, RuleResponse};

/// MCP request handler for the lint tools
pub struct LintHandler {
    config: ServerConfig,
    registry: ToolRegistry,
    fetcher: Arc<dyn RuleFetcher>,
}

impl LintHandler {
    pub fn new(
        config: ServerConfig,
        registry: ToolRegistry,
        fetcher: Arc<dyn RuleFetcher>,
    ) -> Self {
        Self {
            config,
            registry,
            fetcher,
        }
    }

    /// Resolve and validate a tool invocation without running it
    pub fn prepare_call(&self, name: &str, arguments: Value) -> Result<ToolCall> {
        let kind = self
            .registry
            .lookup(name)
            .ok_or_else(|| LintError::ToolNotFound(name.to_string()))?;
        ToolCall::parse(kind, arguments, &self.config.rule_url_prefix)
    }

    /// Run an already validated call
    pub async fn execute(&self, call: ToolCall) -> Result<ToolCallResult> {
        match call {
            ToolCall::GetLintRule {
                rule_url,
                requested,
            } => match self.fetcher.fetch(&rule_url).await? {
                RuleResponse::Found(body) => Ok(ToolCallResult::text(body)),
                RuleResponse::Unavailable(status) => {
                    tracing::info!(url = %rule_url, status, "Rule not retrieved");
                    Ok(ToolCallResult::text(rule_fetch_failed_text(&requested)))
                }
            },
            ToolCall::PlanLint {
                document_path,
                rule_path,
            } => Ok(ToolCallResult::text(plan_lint_text(&document_path, &rule_path))),
            ToolCall::InitActRule => Ok(ToolCallResult::text(INIT_ACT_RULE_TEXT)),
            ToolCall::LoadRemoteActRule { behavior_rule_url } => Ok(ToolCallResult::text(
                load_remote_act_rule_text(&behavior_rule_url),
            )),
        }
    }

    /// Validate then execute. Validation errors never reach `execute`.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> Result<ToolCallResult> {
        let call = self.prepare_call(name, arguments)?;
        tracing::debug!(tool = name, "Dispatching tool call");
        self.execute(call).await
    }

    async fn handle_tools_call(&self, id: Option<Value>, params: Value) -> Result<McpResponse> {
        let params: ToolCallParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => {
                return Ok(McpResponse::error(
                    id,
                    codes::INVALID_PARAMS,
                    format!("Invalid tools/call params: {}", e),
                ))
            }
        };

        match self.call_tool(&params.name, params.arguments).await {
            Ok(result) => Ok(McpResponse::success(id, json!(result))),
            Err(err) if err.is_fatal() => {
                tracing::error!(tool = %params.name, "Tool call failed: {}", err);
                Err(err)
            }
            Err(err) => {
                tracing::warn!(tool = %params.name, "Rejected tool call: {}", err);
                Ok(McpResponse::from_error(id, err))
            }
        }
    }
}

#[async_trait]
impl McpHandler for LintHandler {
    async fn handle_request(&self, request: McpRequest) -> Result<Option<McpResponse>> {
        if request.is_notification() {
            tracing::debug!("Received notification: {}", request.method);
            return Ok(None);
        }

        let response = match request.method.as_str() {
            methods::INITIALIZE => {
                let result = InitializeResult::from_config(&self.config);
                McpResponse::success(request.id, json!(result))
            }
            methods::PING => McpResponse::success(request.id, json!({})),
            methods::LIST_TOOLS => {
                let tools = self.registry.definitions(&self.config.rule_url_prefix);
                McpResponse::success(request.id, json!({ "tools": tools }))
            }
            methods::CALL_TOOL => self.handle_tools_call(request.id, request.params).await?,
            methods::LIST_RESOURCES => {
                McpResponse::success(request.id, json!({ "resources": [] }))
            }
            _ => McpResponse::error(
                request.id,
                codes::METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            ),
        };

        Ok(Some(response))
    }
}
