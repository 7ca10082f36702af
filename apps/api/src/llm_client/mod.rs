/// LLM Client: the single point of entry for all Gemini API calls.
///
/// No other module may call the Gemini API directly. The regenerate endpoint
/// builds a prompt with [`prompts::construct_prompt`] and hands it here.
///
/// Models are tried in order; within a model, 429 and 5xx responses are
/// retried with exponential backoff. Any other failure moves on to the next
/// model.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// Fallback order used when `GEMINI_MODELS` is not set.
pub const DEFAULT_MODELS: [&str; 5] = [
    "gemini-2.0-flash",
    "gemini-1.5-flash",
    "gemini-1.5-flash-latest",
    "gemini-pro",
    "gemini-1.0-pro",
];
const MAX_RETRIES: u32 = 3;
const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("No models configured")]
    NoModels,
}

impl LlmError {
    /// Message safe to show to callers. Upstream bodies and the API key never
    /// leave the server.
    pub fn public_message(&self) -> &'static str {
        let status = match self {
            LlmError::Api { status, .. } => Some(*status),
            LlmError::Http(e) => e.status().map(|s| s.as_u16()),
            LlmError::RateLimited { .. } => Some(429),
            LlmError::EmptyContent => return "Failed to extract text from AI response.",
            LlmError::NoModels => return "An internal server error occurred. Please try again.",
        };
        match status {
            Some(400) => "Invalid request to AI service.",
            Some(401) => "Authentication failed with AI service.",
            Some(403) => "Access denied to AI service.",
            Some(404) => "AI service endpoint not found.",
            Some(s) if s >= 500 => "AI service is temporarily unavailable.",
            _ => "Failed to connect to AI service. Please try again.",
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContent>,
}

impl GeminiResponse {
    /// Text of the first part of the first candidate, trimmed.
    fn text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// Anything that turns a prompt into text.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Gemini `generateContent` client with model fallback and retry.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    models: Vec<String>,
    base_url: String,
    retry_base: Duration,
}

impl LlmClient {
    pub fn new(api_key: String, models: Vec<String>, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            models,
            base_url: GEMINI_API_BASE.to_string(),
            retry_base: Duration::from_millis(1000),
        })
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: &str, retry_base: Duration) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self.retry_base = retry_base;
        self
    }

    /// Calls one model, retrying on 429 (rate limit) and 5xx errors with
    /// exponential backoff.
    async fn call_model(&self, model: &str, body: &GeminiRequest) -> Result<String, LlmError> {
        let url = format!("{}/{model}:generateContent", self.base_url);
        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1x, 2x, 4x the base delay
                let delay = self.retry_base * (1 << (attempt - 1));
                warn!(
                    "Gemini call to {model} attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&url)
                .header(API_KEY_HEADER, self.api_key.as_str())
                .json(body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e.without_url()));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Gemini model {model} returned {status}: {body}");
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let parsed: GeminiResponse = response
                .json()
                .await
                .map_err(|e| LlmError::Http(e.without_url()))?;
            let text = parsed.text().ok_or(LlmError::EmptyContent)?;
            debug!("Gemini call to {model} succeeded ({} chars)", text.len());
            return Ok(text.to_string());
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

#[async_trait]
impl LanguageModel for LlmClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        let mut last_error: Option<LlmError> = None;
        for model in &self.models {
            match self.call_model(model, &body).await {
                Ok(text) => return Ok(text),
                Err(e) => {
                    warn!("Gemini model {model} failed, trying next: {e}");
                    last_error = Some(e);
                }
            }
        }
        Err(last_error.unwrap_or(LlmError::NoModels))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use axum::{extract::Path, http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    use super::*;

    /// Serves a fake `generateContent` on an ephemeral port. `reply` decides the
    /// status for a model given how many calls have been made so far.
    async fn fake_gemini<F>(reply: F) -> (String, Arc<AtomicUsize>)
    where
        F: Fn(&str, usize) -> StatusCode + Clone + Send + Sync + 'static,
    {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let app = Router::new().route(
            "/:model_action",
            post(move |Path(model_action): Path<String>, Json(_body): Json<Value>| {
                let reply = reply.clone();
                let counter = counter.clone();
                async move {
                    let n = counter.fetch_add(1, Ordering::SeqCst);
                    let model = model_action.trim_end_matches(":generateContent").to_string();
                    let status = reply(&model, n);
                    let body = json!({
                        "candidates": [{"content": {"parts": [{"text": format!("  from {model}  ")}]}}]
                    });
                    (status, Json(body))
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}"), calls)
    }

    fn client(base_url: &str, models: &[&str]) -> LlmClient {
        LlmClient::new(
            "test-key".to_string(),
            models.iter().map(|m| m.to_string()).collect(),
            Duration::from_secs(5),
        )
        .unwrap()
        .with_base_url(base_url, Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_connection_errors_do_not_expose_the_key() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{addr}"), &["alpha"])
            .complete("hi")
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Http(_)));
        assert!(!err.to_string().contains("test-key"));
        assert!(!format!("{err:?}").contains("test-key"));
    }

    #[tokio::test]
    async fn test_key_is_sent_as_header() {
        let app = Router::new().route(
            "/:model_action",
            post(|headers: axum::http::HeaderMap, uri: axum::http::Uri| async move {
                let key = headers
                    .get(API_KEY_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                let text = format!("{key}|{}", uri.query().unwrap_or_default());
                Json(json!({"candidates": [{"content": {"parts": [{"text": text}]}}]}))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let text = client(&format!("http://{addr}"), &["alpha"])
            .complete("hi")
            .await
            .unwrap();
        assert_eq!(text, "test-key|");
    }

    #[tokio::test]
    async fn test_first_model_success_is_trimmed() {
        let (url, calls) = fake_gemini(|_, _| StatusCode::OK).await;
        let text = client(&url, &["alpha", "beta"]).complete("hi").await.unwrap();
        assert_eq!(text, "from alpha");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_falls_back_to_next_model() {
        let (url, _) = fake_gemini(|model, _| {
            if model == "alpha" {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::OK
            }
        })
        .await;
        let text = client(&url, &["alpha", "beta"]).complete("hi").await.unwrap();
        assert_eq!(text, "from beta");
    }

    #[tokio::test]
    async fn test_server_error_is_retried_within_model() {
        let (url, calls) = fake_gemini(|_, n| {
            if n == 0 {
                StatusCode::SERVICE_UNAVAILABLE
            } else {
                StatusCode::OK
            }
        })
        .await;
        let text = client(&url, &["alpha"]).complete("hi").await.unwrap();
        assert_eq!(text, "from alpha");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_all_models_failing_reports_last_error() {
        let (url, _) = fake_gemini(|_, _| StatusCode::FORBIDDEN).await;
        let err = client(&url, &["alpha", "beta"]).complete("hi").await.unwrap_err();
        assert!(matches!(err, LlmError::Api { status: 403, .. }));
        assert_eq!(err.public_message(), "Access denied to AI service.");
    }

    #[test]
    fn test_public_messages_by_status() {
        let api = |status| LlmError::Api {
            status,
            message: "secret upstream body".to_string(),
        };
        assert_eq!(api(400).public_message(), "Invalid request to AI service.");
        assert_eq!(api(401).public_message(), "Authentication failed with AI service.");
        assert_eq!(api(404).public_message(), "AI service endpoint not found.");
        assert_eq!(api(503).public_message(), "AI service is temporarily unavailable.");
        assert_eq!(
            api(418).public_message(),
            "Failed to connect to AI service. Please try again."
        );
    }

    #[test]
    fn test_response_text_extraction() {
        let parsed: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": "\n hello \n"}]}}]
        }))
        .unwrap();
        assert_eq!(parsed.text(), Some("hello"));

        let empty: GeminiResponse = serde_json::from_value(json!({"candidates": []})).unwrap();
        assert_eq!(empty.text(), None);
    }
}
