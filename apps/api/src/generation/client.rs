//! Client for the text-generation endpoint (`POST {API_BASE_URL}/api/regenerate`).
//!
//! Editors talk to generation through the [`TextGenerator`] trait so the HTTP
//! client can be swapped for a stub in tests. No retries here: a failure is
//! reported once and the edit is abandoned.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const REGENERATE_PATH: &str = "/api/regenerate";

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Could not reach generation endpoint: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP error! status: {status}, details: {message}")]
    Api { status: u16, message: String },

    #[error("No rewritten text received from API")]
    MissingText,
}

/// The kinds of text the endpoint knows how to prompt for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    Objective,
    Experience,
    ProjectDescription,
    ProjectHighlights,
    CoverLetter,
    MockInterview,
}

impl InputType {
    pub fn as_str(self) -> &'static str {
        match self {
            InputType::Objective => "objective",
            InputType::Experience => "experience",
            InputType::ProjectDescription => "project_description",
            InputType::ProjectHighlights => "project_highlights",
            InputType::CoverLetter => "cover_letter",
            InputType::MockInterview => "mock_interview",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "objective" => Some(InputType::Objective),
            "experience" => Some(InputType::Experience),
            "project_description" => Some(InputType::ProjectDescription),
            "project_highlights" => Some(InputType::ProjectHighlights),
            "cover_letter" => Some(InputType::CoverLetter),
            "mock_interview" => Some(InputType::MockInterview),
            _ => None,
        }
    }

    /// Whether the endpoint should return a structured bullet list.
    pub fn wants_bullets(self) -> bool {
        matches!(
            self,
            InputType::Experience | InputType::ProjectHighlights | InputType::MockInterview
        )
    }
}

/// Wire body of a regenerate call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegenerateRequest {
    pub input_type: String,
    pub text: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<String>,
}

impl RegenerateRequest {
    pub fn new(input_type: InputType, text: impl Into<String>) -> Self {
        Self {
            input_type: input_type.as_str().to_string(),
            text: text.into(),
            keywords: Vec::new(),
            experience_level: None,
        }
    }

    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn with_experience_level(mut self, level: impl Into<String>) -> Self {
        self.experience_level = Some(level.into());
        self
    }
}

/// Wire body of a successful regenerate call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RegenerateResponse {
    #[serde(default)]
    pub rewritten_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bullets: Option<Vec<String>>,
}

/// A validated generation result.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Generated {
    pub text: String,
    /// Structured bullets when the endpoint supplied them.
    pub bullets: Vec<String>,
}

impl TryFrom<RegenerateResponse> for Generated {
    type Error = GenerationError;

    fn try_from(response: RegenerateResponse) -> Result<Self, Self::Error> {
        let text = response
            .rewritten_text
            .filter(|t| !t.trim().is_empty())
            .ok_or(GenerationError::MissingText)?;
        Ok(Generated {
            text,
            bullets: response.bullets.unwrap_or_default(),
        })
    }
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &RegenerateRequest) -> Result<Generated, GenerationError>;
}

/// Calls a remote regenerate endpoint over HTTP.
#[derive(Clone)]
pub struct HttpTextGenerator {
    client: Client,
    endpoint: String,
}

impl HttpTextGenerator {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GenerationError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint_url(base_url),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn endpoint_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), REGENERATE_PATH)
}

#[async_trait]
impl TextGenerator for HttpTextGenerator {
    async fn generate(&self, request: &RegenerateRequest) -> Result<Generated, GenerationError> {
        debug!(
            "POST {} (inputType={}, keywords={})",
            self.endpoint,
            request.input_type,
            request.keywords.len()
        );

        let response = self.client.post(&self.endpoint).json(request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: RegenerateResponse = response.json().await?;
        Generated::try_from(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_format() {
        let request = RegenerateRequest::new(InputType::Experience, "Engineer at Acme")
            .with_keywords(vec!["Rust".to_string()])
            .with_experience_level("mid");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["inputType"], "experience");
        assert_eq!(value["text"], "Engineer at Acme");
        assert_eq!(value["keywords"][0], "Rust");
        assert_eq!(value["experienceLevel"], "mid");
    }

    #[test]
    fn test_missing_rewritten_text_is_an_error() {
        let err = Generated::try_from(RegenerateResponse::default()).unwrap_err();
        assert!(matches!(err, GenerationError::MissingText));

        let blank = RegenerateResponse {
            rewritten_text: Some("   ".to_string()),
            bullets: None,
        };
        assert!(Generated::try_from(blank).is_err());
    }

    #[test]
    fn test_response_with_bullets() {
        let body = r#"{"rewrittenText":"• A","bullets":["A"]}"#;
        let response: RegenerateResponse = serde_json::from_str(body).unwrap();
        let generated = Generated::try_from(response).unwrap();
        assert_eq!(generated.bullets, vec!["A".to_string()]);
    }

    #[test]
    fn test_endpoint_url_joins_without_double_slash() {
        assert_eq!(
            endpoint_url("http://127.0.0.1:5000/"),
            "http://127.0.0.1:5000/api/regenerate"
        );
    }

    #[test]
    fn test_input_type_parse_round_trip() {
        for t in [
            InputType::Objective,
            InputType::Experience,
            InputType::ProjectDescription,
            InputType::ProjectHighlights,
            InputType::CoverLetter,
            InputType::MockInterview,
        ] {
            assert_eq!(InputType::parse(t.as_str()), Some(t));
        }
        assert_eq!(InputType::parse("debug"), None);
    }

    #[test]
    fn test_api_error_message_carries_status() {
        let err = GenerationError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP error! status: 500, details: boom");
    }
}
