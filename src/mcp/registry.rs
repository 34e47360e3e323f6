//! Immutable tool registry
//!
//! Built once at startup and handed to the handler by reference. Names are
//! unique; a second registration under the same name is refused.

use super::protocol::ToolDefinition;
use super::tools::ToolKind;
use crate::error::{LintError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolRegistry {
    tools: Vec<ToolKind>,
}

/// Collects tools before freezing them into a [`ToolRegistry`]
#[derive(Debug, Default)]
pub struct ToolRegistryBuilder {
    tools: Vec<ToolKind>,
}

impl ToolRegistryBuilder {
    /// Add a tool, refusing names that are already taken
    pub fn register(mut self, kind: ToolKind) -> Result<Self> {
        if self.tools.iter().any(|t| t.name() == kind.name()) {
            return Err(LintError::DuplicateTool(kind.name().to_string()));
        }
        self.tools.push(kind);
        Ok(self)
    }

    pub fn build(self) -> ToolRegistry {
        ToolRegistry { tools: self.tools }
    }
}

impl ToolRegistry {
    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::default()
    }

    /// Registry with every tool the server ships
    pub fn standard() -> Result<Self> {
        ToolKind::ALL
            .iter()
            .try_fold(Self::builder(), |builder, kind| builder.register(*kind))
            .map(ToolRegistryBuilder::build)
    }

    pub fn lookup(&self, name: &str) -> Option<ToolKind> {
        self.tools.iter().copied().find(|t| t.name() == name)
    }

    /// Definitions in registration order
    pub fn definitions(&self, rule_url_prefix: &str) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .map(|kind| kind.definition(rule_url_prefix))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
