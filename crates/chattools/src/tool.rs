//! Typed tool registration and dispatch
//!
//! Each tool is a named callable carrying a JSON-schema parameter record,
//! the shape an LLM orchestrator consumes when deciding what to invoke.

use crate::client::{fetch_page_text, fetch_transcript, ClientOptions};
use crate::environment::{user_environment, EnvironmentOptions};
use crate::error::ToolError;
use crate::ident::extract_video_id;
use crate::types::{EnvironmentRequest, PageTextRequest, TranscriptRequest};
use crate::{
    ENVIRONMENT_TOOL_DESCRIPTION, PAGE_TEXT_TOOL_DESCRIPTION, TRANSCRIPT_TOOL_DESCRIPTION,
};
use async_trait::async_trait;
use schemars::schema_for;
use serde::Serialize;
use serde_json::Value;

/// A named callable the orchestrator can invoke
#[async_trait]
pub trait Tool: Send + Sync {
    /// Registration name, unique within a registry
    fn name(&self) -> &'static str;

    /// Human-facing name
    fn display_name(&self) -> &'static str;

    /// Description shown to the model when choosing tools
    fn description(&self) -> &'static str;

    /// JSON schema of the argument object
    fn parameters(&self) -> Value;

    /// Short progress line shown while the tool runs; empty suppresses it
    fn format_message(&self, _args: &Value) -> String {
        String::new()
    }

    /// Run the tool against JSON arguments
    async fn call(&self, args: Value) -> Result<Value, ToolError>;
}

/// Serializable registration record for one tool
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub parameters: Value,
}

/// Ordered collection of tools with name-based dispatch
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Create a registry with the built-in tools registered
    pub fn with_defaults(client: ClientOptions, environment: EnvironmentOptions) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(EnvironmentTool::new(environment)));
        registry.register(Box::new(TranscriptTool::new(client.clone())));
        registry.register(Box::new(PageTextTool::new(client)));
        registry
    }

    /// Register a tool
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        self.tools.push(tool);
    }

    /// Look up a tool by registration name
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|tool| tool.name() == name)
            .map(|tool| tool.as_ref())
    }

    /// Registration records for every tool, in registration order
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .map(|tool| ToolDefinition {
                name: tool.name().to_string(),
                display_name: tool.display_name().to_string(),
                description: tool.description().to_string(),
                parameters: tool.parameters(),
            })
            .collect()
    }

    /// Dispatch a call to the named tool
    pub async fn call(&self, name: &str, args: Value) -> Result<Value, ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        tracing::debug!(tool = name, "dispatching tool call");
        tool.call(args).await
    }
}

fn schema_value<T: schemars::JsonSchema>() -> Value {
    serde_json::to_value(schema_for!(T)).unwrap_or_default()
}

/// Reports the user's locale, local date and time, and time zone
pub struct EnvironmentTool {
    options: EnvironmentOptions,
}

impl EnvironmentTool {
    pub fn new(options: EnvironmentOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl Tool for EnvironmentTool {
    fn name(&self) -> &'static str {
        "GetUserEnvironment"
    }

    fn display_name(&self) -> &'static str {
        "User Environment"
    }

    fn description(&self) -> &'static str {
        ENVIRONMENT_TOOL_DESCRIPTION
    }

    fn parameters(&self) -> Value {
        schema_value::<EnvironmentRequest>()
    }

    async fn call(&self, args: Value) -> Result<Value, ToolError> {
        let _request: EnvironmentRequest = if args.is_null() {
            EnvironmentRequest::default()
        } else {
            serde_json::from_value(args)?
        };
        Ok(serde_json::to_value(user_environment(&self.options))?)
    }
}

/// Fetches a video transcript plus watch-page metadata
pub struct TranscriptTool {
    options: ClientOptions,
}

impl TranscriptTool {
    pub fn new(options: ClientOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl Tool for TranscriptTool {
    fn name(&self) -> &'static str {
        "GetYouTubeVideoScript"
    }

    fn display_name(&self) -> &'static str {
        "YouTube Video Script"
    }

    fn description(&self) -> &'static str {
        TRANSCRIPT_TOOL_DESCRIPTION
    }

    fn parameters(&self) -> Value {
        schema_value::<TranscriptRequest>()
    }

    fn format_message(&self, args: &Value) -> String {
        match args.get("url").and_then(Value::as_str) {
            Some(url) if !url.is_empty() => {
                format!("Getting video script for {}...", extract_video_id(url))
            }
            _ => String::new(),
        }
    }

    async fn call(&self, args: Value) -> Result<Value, ToolError> {
        let request: TranscriptRequest = serde_json::from_value(args)?;
        let response = fetch_transcript(request, self.options.clone()).await?;
        Ok(serde_json::to_value(response)?)
    }
}

/// Fetches a web page and returns its readable text
pub struct PageTextTool {
    options: ClientOptions,
}

impl PageTextTool {
    pub fn new(options: ClientOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl Tool for PageTextTool {
    fn name(&self) -> &'static str {
        "GetWebPageText"
    }

    fn display_name(&self) -> &'static str {
        "Web Page Text"
    }

    fn description(&self) -> &'static str {
        PAGE_TEXT_TOOL_DESCRIPTION
    }

    fn parameters(&self) -> Value {
        schema_value::<PageTextRequest>()
    }

    fn format_message(&self, args: &Value) -> String {
        match args.get("url").and_then(Value::as_str) {
            Some(url) if !url.is_empty() => format!("Reading {}...", url),
            _ => String::new(),
        }
    }

    async fn call(&self, args: Value) -> Result<Value, ToolError> {
        let request: PageTextRequest = serde_json::from_value(args)?;
        let response = fetch_page_text(request, self.options.clone()).await?;
        Ok(serde_json::to_value(response)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_registry_contents() {
        let registry =
            ToolRegistry::with_defaults(ClientOptions::default(), EnvironmentOptions::default());
        let names: Vec<String> = registry
            .definitions()
            .iter()
            .map(|def| def.name.clone())
            .collect();
        assert_eq!(
            names,
            vec!["GetUserEnvironment", "GetYouTubeVideoScript", "GetWebPageText"]
        );
    }

    #[test]
    fn test_registry_lookup() {
        let registry =
            ToolRegistry::with_defaults(ClientOptions::default(), EnvironmentOptions::default());
        assert!(registry.get("GetWebPageText").is_some());
        assert!(registry.get("NoSuchTool").is_none());
    }

    #[test]
    fn test_parameter_schemas() {
        let registry =
            ToolRegistry::with_defaults(ClientOptions::default(), EnvironmentOptions::default());

        let transcript = registry.get("GetYouTubeVideoScript").unwrap();
        let schema = transcript.parameters();
        assert!(schema["properties"]["url"].is_object());

        let page = registry.get("GetWebPageText").unwrap();
        let schema = page.parameters();
        assert!(schema["properties"]["root"].is_object());
    }

    #[test]
    fn test_format_message() {
        let tool = TranscriptTool::new(ClientOptions::default());
        assert_eq!(
            tool.format_message(&json!({"url": "https://youtu.be/dQw4w9WgXcQ"})),
            "Getting video script for dQw4w9WgXcQ..."
        );
        assert_eq!(tool.format_message(&json!({})), "");
    }

    #[tokio::test]
    async fn test_unknown_tool_errors() {
        let registry = ToolRegistry::new();
        let result = registry.call("Missing", json!({})).await;
        assert!(matches!(result, Err(ToolError::UnknownTool(_))));
    }

    #[tokio::test]
    async fn test_environment_tool_call() {
        let tool = EnvironmentTool::new(EnvironmentOptions {
            locale: Some("en-GB".to_string()),
            time_zone: Some("Europe/London".to_string()),
        });
        let value = tool.call(json!({})).await.unwrap();
        assert_eq!(value["locale"], "en-GB");
        assert_eq!(value["time_zone"], "Europe/London");
        assert!(value["local_date"].is_string());
        assert!(value["local_time"].is_string());
    }

    #[tokio::test]
    async fn test_environment_tool_accepts_null_args() {
        let tool = EnvironmentTool::new(EnvironmentOptions::default());
        assert!(tool.call(Value::Null).await.is_ok());
    }

    #[tokio::test]
    async fn test_transcript_tool_rejects_bad_args() {
        let tool = TranscriptTool::new(ClientOptions::default());
        let result = tool.call(json!({"lang": "en"})).await;
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }
}
