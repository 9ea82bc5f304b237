//! Tool system
//!
//! High-level operations (scrape a profile, generate a message, parse the
//! user's own profile) exposed behind a uniform request/response contract:
//! a tool receives `serde_json::Value` parameters validated against its
//! schema and produces exactly one [`ToolResult`]. This is the surface a
//! host UI or automation layer drives.

pub mod generate;
pub mod parse_profile;
pub mod scrape;
pub mod utils;

pub use generate::{GenerateMessageParams, GenerateMessageTool};
pub use parse_profile::{ParseMyProfileParams, ParseMyProfileTool};
pub use scrape::{ScrapeProfileParams, ScrapeProfileTool};

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::backend::BackendClient;
use crate::browser::BrowserSession;
use crate::error::{ReachError, Result};
use crate::selectors::SelectorConfig;
use crate::storage::SettingsStore;

/// Everything a tool may touch while executing
pub struct ToolContext<'a> {
    /// Browser session used to open and read profile pages
    pub session: &'a BrowserSession,

    /// Loaded selector configuration
    pub config: &'a SelectorConfig,

    /// Client for the AI backend
    pub backend: &'a BackendClient,

    /// Settings storage capability
    pub store: &'a mut dyn SettingsStore,
}

impl<'a> ToolContext<'a> {
    /// Create a tool context
    pub fn new(
        session: &'a BrowserSession,
        config: &'a SelectorConfig,
        backend: &'a BackendClient,
        store: &'a mut dyn SettingsStore,
    ) -> Self {
        Self { session, config, backend, store }
    }
}

/// Outcome of one tool execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Whether the tool completed successfully
    pub success: bool,

    /// Structured result payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    /// Error description when `success` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResult {
    /// A successful result without payload
    pub fn success() -> Self {
        Self { success: true, data: None, error: None }
    }

    /// A successful result carrying a payload
    pub fn success_with(data: serde_json::Value) -> Self {
        Self { success: true, data: Some(data), error: None }
    }

    /// A failed result with an error description
    pub fn failure(message: impl Into<String>) -> Self {
        Self { success: false, data: None, error: Some(message.into()) }
    }
}

/// A tool with typed, schema-described parameters
pub trait Tool {
    /// Parameter type, deserialized from the request payload
    type Params: DeserializeOwned + JsonSchema;

    /// Stable tool name used for dispatch
    fn name(&self) -> &str;

    /// One-line description of what the tool does
    fn description(&self) -> &str;

    /// Execute with already-validated parameters
    fn execute_typed(&self, params: Self::Params, context: &mut ToolContext) -> Result<ToolResult>;

    /// JSON schema of the parameter type
    fn parameters_schema(&self) -> serde_json::Value {
        let schema = schemars::schema_for!(Self::Params);
        serde_json::to_value(schema).unwrap_or(serde_json::Value::Null)
    }
}

/// Object-safe indirection over [`Tool`] so the registry can hold mixed
/// tool types
trait ErasedTool {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn parameters_schema(&self) -> serde_json::Value;
    fn execute(&self, params: serde_json::Value, context: &mut ToolContext) -> Result<ToolResult>;
}

impl<T: Tool> ErasedTool for T {
    fn name(&self) -> &str {
        Tool::name(self)
    }

    fn description(&self) -> &str {
        Tool::description(self)
    }

    fn parameters_schema(&self) -> serde_json::Value {
        Tool::parameters_schema(self)
    }

    fn execute(&self, params: serde_json::Value, context: &mut ToolContext) -> Result<ToolResult> {
        let typed: T::Params = serde_json::from_value(params).map_err(|e| ReachError::InvalidParams {
            tool: Tool::name(self).to_string(),
            reason: e.to_string(),
        })?;
        self.execute_typed(typed, context)
    }
}

/// Registry of available tools, dispatching requests by name.
/// Preserves registration order.
#[derive(Default)]
pub struct ToolRegistry {
    tools: IndexMap<String, Box<dyn ErasedTool>>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self { tools: IndexMap::new() }
    }

    /// Registry with the standard tool set
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(ScrapeProfileTool);
        registry.register(GenerateMessageTool);
        registry.register(ParseMyProfileTool);
        registry
    }

    /// Register a tool under its own name. A later registration under the
    /// same name replaces the earlier one.
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.tools.insert(Tool::name(&tool).to_string(), Box::new(tool));
    }

    /// Execute a tool by name with JSON parameters
    pub fn execute(
        &self,
        name: &str,
        params: serde_json::Value,
        context: &mut ToolContext,
    ) -> Result<ToolResult> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ReachError::UnknownTool(name.to_string()))?;

        log::debug!("Executing tool '{}'", name);
        tool.execute(params, context)
    }

    /// Names of all registered tools, in registration order
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    /// Parameter schema of a registered tool
    pub fn schema_for(&self, name: &str) -> Option<serde_json::Value> {
        self.tools.get(name).map(|t| t.parameters_schema())
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
