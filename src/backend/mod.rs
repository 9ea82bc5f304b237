//! AI backend client
//!
//! Blocking HTTP client for the message-generation backend. Two endpoints:
//! `POST /generate` turns a target profile plus the user's own data into an
//! outreach message, and `POST /parse_profile` enriches a scraped profile
//! into the user-profile shape kept in settings. Both authenticate with a
//! bearer API key.

use serde::{Deserialize, Serialize};

use crate::error::{ReachError, Result};
use crate::extract::ProfileRecord;

/// Backend base URL used when none is configured
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// The user's own profile as the backend enriches it and settings persist it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub headline: String,

    #[serde(default)]
    pub about: String,

    #[serde(default)]
    pub interests: String,

    /// Key strengths, comma-separated
    #[serde(default)]
    pub strengths: String,

    #[serde(default)]
    pub other: String,
}

/// Payload for `POST /generate`
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    /// The sender's own profile, when one has been parsed and stored
    pub user_data: Option<UserProfile>,

    /// The scraped target profile
    pub target_profile: ProfileRecord,

    pub tone: String,
    pub length: String,
    pub call_to_action: String,
    pub extra_instruction: String,
}

/// Response of `POST /generate`. The backend has historically answered with
/// either field name, so both are accepted.
#[derive(Debug, Clone, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    generated_message: Option<String>,

    #[serde(default)]
    message: Option<String>,
}

impl GenerateResponse {
    fn into_message(self) -> Option<String> {
        self.generated_message.or(self.message)
    }
}

/// Response of `POST /parse_profile`
#[derive(Debug, Clone, Deserialize)]
struct ParseProfileResponse {
    #[serde(default)]
    error: Option<String>,

    #[serde(default)]
    name: Option<String>,

    #[serde(default)]
    headline: Option<String>,

    #[serde(default)]
    about: Option<String>,

    #[serde(default)]
    interests: Option<String>,

    #[serde(default)]
    strengths: Option<Strengths>,

    #[serde(default)]
    others: Option<String>,
}

/// Strengths arrive as a list or as one pre-joined string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Strengths {
    Many(Vec<String>),
    One(String),
}

impl Strengths {
    fn joined(self) -> String {
        match self {
            Strengths::Many(list) => list.join(", "),
            Strengths::One(s) => s,
        }
    }
}

impl ParseProfileResponse {
    fn into_user_profile(self) -> UserProfile {
        UserProfile {
            name: self.name.unwrap_or_default(),
            headline: self.headline.unwrap_or_default(),
            about: self.about.unwrap_or_default(),
            interests: self.interests.unwrap_or_default(),
            strengths: self.strengths.map(Strengths::joined).unwrap_or_default(),
            other: self.others.unwrap_or_default(),
        }
    }
}

/// Client for the AI text-generation backend
pub struct BackendClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl BackendClient {
    /// Create a client for the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::blocking::Client::new(),
        }
    }

    /// The configured base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the backend to draft an outreach message for a target profile
    pub fn generate(&self, api_key: &str, request: &GenerateRequest) -> Result<String> {
        let url = format!("{}/generate", self.base_url);
        log::debug!("Requesting message generation from {}", url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .map_err(|e| ReachError::NetworkError(e.to_string()))?;

        let response = Self::error_for_status(response)?;
        let body: GenerateResponse = response
            .json()
            .map_err(|e| ReachError::BackendError {
                status: 200,
                message: format!("malformed generate response: {}", e),
            })?;

        body.into_message().ok_or_else(|| ReachError::BackendError {
            status: 200,
            message: "response contained no generated message".to_string(),
        })
    }

    /// Ask the backend to enrich a scraped profile into the user-profile
    /// shape
    pub fn parse_profile(&self, api_key: &str, profile: &ProfileRecord) -> Result<UserProfile> {
        let url = format!("{}/parse_profile", self.base_url);
        log::debug!("Requesting profile parsing from {}", url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(&serde_json::json!({
                "profile": profile,
                "timestamp": profile.timestamp,
            }))
            .send()
            .map_err(|e| ReachError::NetworkError(e.to_string()))?;

        let response = Self::error_for_status(response)?;
        let body: ParseProfileResponse = response
            .json()
            .map_err(|e| ReachError::BackendError {
                status: 200,
                message: format!("malformed parse_profile response: {}", e),
            })?;

        if let Some(error) = body.error {
            return Err(ReachError::BackendError { status: 200, message: error });
        }

        Ok(body.into_user_profile())
    }

    /// Map HTTP-level failures to the crate error taxonomy. 503 is reported
    /// as the backend's overload condition, distinct from other failures.
    fn error_for_status(response: reqwest::blocking::Response) -> Result<reqwest::blocking::Response> {
        let status = response.status();

        if status.as_u16() == 503 {
            return Err(ReachError::BackendOverloaded);
        }

        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(ReachError::BackendError { status: status.as_u16(), message });
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_response_prefers_generated_message() {
        let body: GenerateResponse =
            serde_json::from_str(r#"{"generated_message": "Hi!", "message": "alt"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Hi!"));

        let body: GenerateResponse = serde_json::from_str(r#"{"message": "alt"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("alt"));

        let body: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(body.into_message(), None);
    }

    #[test]
    fn test_parse_profile_response_joins_strengths_list() {
        let body: ParseProfileResponse = serde_json::from_str(
            r#"{
                "name": "Jane Doe",
                "headline": "Engineer",
                "about": "Builds things.",
                "interests": "distributed systems",
                "strengths": ["Rust", "mentoring"],
                "others": "speaks at conferences"
            }"#,
        )
        .unwrap();

        let profile = body.into_user_profile();
        assert_eq!(profile.name, "Jane Doe");
        assert_eq!(profile.strengths, "Rust, mentoring");
        assert_eq!(profile.other, "speaks at conferences");
    }

    #[test]
    fn test_parse_profile_response_accepts_string_strengths() {
        let body: ParseProfileResponse =
            serde_json::from_str(r#"{"strengths": "Rust, mentoring"}"#).unwrap();
        assert_eq!(body.into_user_profile().strengths, "Rust, mentoring");
    }

    #[test]
    fn test_parse_profile_response_missing_fields_default_empty() {
        let body: ParseProfileResponse = serde_json::from_str("{}").unwrap();
        let profile = body.into_user_profile();
        assert_eq!(profile, UserProfile::default());
    }

    #[test]
    fn test_generate_request_serializes_expected_fields() {
        let request = GenerateRequest {
            user_data: Some(UserProfile { name: "Me".to_string(), ..Default::default() }),
            target_profile: crate::extract::ProfileRecord {
                name: Some("Jane Doe".to_string()),
                headline: None,
                about: None,
                experience: vec![],
                education: vec![],
                url: "https://example.com/in/jane".to_string(),
                timestamp: "2024-01-01T00:00:00+00:00".to_string(),
            },
            tone: "friendly".to_string(),
            length: "short".to_string(),
            call_to_action: "quick chat".to_string(),
            extra_instruction: String::new(),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["tone"], "friendly");
        assert_eq!(value["target_profile"]["name"], "Jane Doe");
        assert_eq!(value["user_data"]["name"], "Me");
    }
}
