use chrono::Utc;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{ReachError, Result};
use crate::tools::scrape::scrape_profile_record;
use crate::tools::utils::{OWN_PROFILE_URL, normalize_profile_url};
use crate::tools::{Tool, ToolContext, ToolResult};

/// Parameters for the parse_my_profile tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ParseMyProfileParams {
    /// Profile URL to parse; defaults to the signed-in user's own profile
    #[serde(default)]
    pub url: Option<String>,
}

/// Tool that scrapes the user's own profile, enriches it through the backend
/// and persists the result as sender context for message generation
#[derive(Default)]
pub struct ParseMyProfileTool;

impl Tool for ParseMyProfileTool {
    type Params = ParseMyProfileParams;

    fn name(&self) -> &str {
        "parse_my_profile"
    }

    fn description(&self) -> &str {
        "Scrape and AI-parse the user's own profile, storing it for later message generation"
    }

    fn execute_typed(
        &self,
        params: ParseMyProfileParams,
        context: &mut ToolContext,
    ) -> Result<ToolResult> {
        let api_key = context.store.api_key()?.ok_or(ReachError::MissingApiKey)?;

        let url = params
            .url
            .as_deref()
            .map(normalize_profile_url)
            .unwrap_or_else(|| OWN_PROFILE_URL.to_string());

        let record = scrape_profile_record(context, &url)?;
        let profile = context.backend.parse_profile(&api_key, &record)?;

        let parsed_at = Utc::now().to_rfc3339();
        context.store.set_user_profile(&profile, &parsed_at)?;

        log::info!("Parsed and stored user profile ({})", parsed_at);

        let payload = serde_json::to_value(&profile).map_err(|e| ReachError::ToolExecutionFailed {
            tool: "parse_my_profile".to_string(),
            reason: format!("Failed to serialize profile: {}", e),
        })?;

        Ok(ToolResult::success_with(serde_json::json!({
            "profile": payload,
            "parsed_at": parsed_at,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_params_default_url() {
        let params: ParseMyProfileParams = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(params.url.is_none());
    }

    #[test]
    fn test_parse_params_explicit_url() {
        let params: ParseMyProfileParams =
            serde_json::from_value(serde_json::json!({ "url": "jane-doe" })).unwrap();
        assert_eq!(params.url.as_deref(), Some("jane-doe"));
    }

    #[test]
    fn test_parse_tool_metadata() {
        let tool = ParseMyProfileTool;
        assert_eq!(tool.name(), "parse_my_profile");
        assert!(tool.parameters_schema().is_object());
    }
}
