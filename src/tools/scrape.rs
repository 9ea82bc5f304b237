use chrono::Utc;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{ReachError, Result};
use crate::extract::{ProfileRecord, extract_profile};
use crate::tools::utils::normalize_profile_url;
use crate::tools::{Tool, ToolContext, ToolResult};

/// Parameters for the scrape_profile tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ScrapeProfileParams {
    /// URL or handle of the profile to scrape
    pub url: String,
}

/// Tool for scraping a profile page into a structured record
#[derive(Default)]
pub struct ScrapeProfileTool;

impl Tool for ScrapeProfileTool {
    type Params = ScrapeProfileParams;

    fn name(&self) -> &str {
        "scrape_profile"
    }

    fn description(&self) -> &str {
        "Open a profile page and extract a structured profile record from the rendered DOM"
    }

    fn execute_typed(
        &self,
        params: ScrapeProfileParams,
        context: &mut ToolContext,
    ) -> Result<ToolResult> {
        let url = normalize_profile_url(&params.url);
        let profile = scrape_profile_record(context, &url)?;

        let payload = serde_json::to_value(&profile).map_err(|e| ReachError::ToolExecutionFailed {
            tool: "scrape_profile".to_string(),
            reason: format!("Failed to serialize profile: {}", e),
        })?;

        Ok(ToolResult::success_with(payload))
    }
}

/// Open a profile page, capture its rendered main content and run the
/// extraction pipeline. Shared by every tool that needs a profile record.
pub(crate) fn scrape_profile_record(context: &mut ToolContext, url: &str) -> Result<ProfileRecord> {
    let tab = context.session.open_profile(url)?;

    // Capture before closing; keep the page's final URL, which may differ
    // from the requested one after redirects
    let html = context.session.main_html(&tab);
    let final_url = context.session.tab_url(&tab);
    context.session.close_tab(tab);

    let html = html?;
    Ok(extract_profile(context.config, &html, &final_url, Utc::now()))
}
