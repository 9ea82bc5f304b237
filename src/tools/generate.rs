use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::backend::GenerateRequest;
use crate::error::{ReachError, Result};
use crate::tools::scrape::scrape_profile_record;
use crate::tools::utils::normalize_profile_url;
use crate::tools::{Tool, ToolContext, ToolResult};

/// Parameters for the generate_message tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GenerateMessageParams {
    /// URL or handle of the target profile
    pub url: String,

    /// Tone of the message (default: "friendly")
    #[serde(default = "default_tone")]
    pub tone: String,

    /// Length of the message (default: "short")
    #[serde(default = "default_length")]
    pub length: String,

    /// Call to action to close the message with
    #[serde(default)]
    pub call_to_action: String,

    /// Free-form extra instruction for the backend
    #[serde(default)]
    pub extra_instruction: String,
}

fn default_tone() -> String {
    "friendly".to_string()
}

fn default_length() -> String {
    "short".to_string()
}

/// Tool for generating a personalized outreach message for a target profile
#[derive(Default)]
pub struct GenerateMessageTool;

impl Tool for GenerateMessageTool {
    type Params = GenerateMessageParams;

    fn name(&self) -> &str {
        "generate_message"
    }

    fn description(&self) -> &str {
        "Scrape a target profile and ask the backend for a personalized outreach message"
    }

    fn execute_typed(
        &self,
        params: GenerateMessageParams,
        context: &mut ToolContext,
    ) -> Result<ToolResult> {
        let api_key = context.store.api_key()?.ok_or(ReachError::MissingApiKey)?;

        let url = normalize_profile_url(&params.url);
        let target_profile = scrape_profile_record(context, &url)?;

        // Sender context is optional: generation still works before the user
        // has parsed their own profile
        let user_data = context.store.load()?.user_profile;
        if user_data.is_none() {
            log::warn!("No user profile stored; generating without sender context");
        }

        let request = GenerateRequest {
            user_data,
            target_profile,
            tone: params.tone,
            length: params.length,
            call_to_action: params.call_to_action,
            extra_instruction: params.extra_instruction,
        };

        let message = context.backend.generate(&api_key, &request)?;
        context.store.set_last_message(&message)?;

        log::info!("Generated outreach message for {}", url);

        Ok(ToolResult::success_with(serde_json::json!({
            "message": message,
            "url": url,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_params_defaults() {
        let json = serde_json::json!({ "url": "jane-doe" });
        let params: GenerateMessageParams = serde_json::from_value(json).unwrap();

        assert_eq!(params.url, "jane-doe");
        assert_eq!(params.tone, "friendly");
        assert_eq!(params.length, "short");
        assert_eq!(params.call_to_action, "");
        assert_eq!(params.extra_instruction, "");
    }

    #[test]
    fn test_generate_params_explicit() {
        let json = serde_json::json!({
            "url": "jane-doe",
            "tone": "formal",
            "length": "long",
            "call_to_action": "coffee chat",
            "extra_instruction": "mention the conference"
        });
        let params: GenerateMessageParams = serde_json::from_value(json).unwrap();

        assert_eq!(params.tone, "formal");
        assert_eq!(params.length, "long");
        assert_eq!(params.call_to_action, "coffee chat");
        assert_eq!(params.extra_instruction, "mention the conference");
    }

    #[test]
    fn test_generate_tool_metadata() {
        let tool = GenerateMessageTool;
        assert_eq!(tool.name(), "generate_message");
        assert!(tool.parameters_schema().is_object());
    }
}
