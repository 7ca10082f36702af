//! The regenerate service behind `POST /api/regenerate`.
//!
//! Validates the loosely-typed request, builds the prompt for its input type
//! and returns the model's text. Bullet input types also get the text split
//! into structured `bullets` so callers need not parse prose.

pub mod handlers;

use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::generation::client::InputType;
use crate::generation::segment::{
    segment, MAX_HIGHLIGHT_BULLETS, MAX_INTERVIEW_QUESTIONS, MAX_RESPONSIBILITY_BULLETS,
};
use crate::llm_client::prompts::construct_prompt;
use crate::llm_client::LanguageModel;

const DEBUG_INPUT_TYPE: &str = "debug";

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRequest {
    pub input_type: String,
    pub text: String,
    pub keywords: Vec<String>,
    pub experience_level: Option<String>,
}

impl ParsedRequest {
    /// `inputType` and `text` must be strings; everything else is optional
    /// and ignored when malformed.
    pub fn from_json(body: &Value) -> Option<Self> {
        let input_type = body.get("inputType")?.as_str()?.to_string();
        let text = body.get("text")?.as_str()?.to_string();
        let keywords = body
            .get("keywords")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        let experience_level = body
            .get("experienceLevel")
            .and_then(Value::as_str)
            .map(str::to_string);
        Some(Self {
            input_type,
            text,
            keywords,
            experience_level,
        })
    }
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum RegenerateReply {
    #[serde(rename_all = "camelCase")]
    Debug {
        status: &'static str,
        has_api_key: bool,
        key_prefix: String,
    },
    #[serde(rename_all = "camelCase")]
    Text {
        rewritten_text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        bullets: Option<Vec<String>>,
    },
}

fn bullet_cap(input_type: InputType) -> usize {
    match input_type {
        InputType::ProjectHighlights => MAX_HIGHLIGHT_BULLETS,
        InputType::MockInterview => MAX_INTERVIEW_QUESTIONS,
        _ => MAX_RESPONSIBILITY_BULLETS,
    }
}

fn key_prefix(key: &str) -> String {
    let prefix: String = key.chars().take(10).collect();
    format!("{prefix}...")
}

/// Handles one regenerate request. `model` is `None` when no API key is
/// configured.
pub async fn regenerate(
    api_key: Option<&str>,
    model: Option<&dyn LanguageModel>,
    body: &Value,
) -> Result<RegenerateReply, AppError> {
    let request = ParsedRequest::from_json(body).ok_or_else(|| {
        AppError::Validation("Missing required fields: inputType and text.".to_string())
    })?;

    let (Some(api_key), Some(model)) = (api_key, model) else {
        return Err(AppError::Configuration(
            "Server configuration error: Missing API key.".to_string(),
        ));
    };

    if request.input_type == DEBUG_INPUT_TYPE {
        return Ok(RegenerateReply::Debug {
            status: "API is working",
            has_api_key: true,
            key_prefix: key_prefix(api_key),
        });
    }

    let prompt = construct_prompt(
        &request.input_type,
        &request.text,
        &request.keywords,
        request.experience_level.as_deref(),
    );
    let rewritten_text = model.complete(&prompt).await?;

    let bullets = InputType::parse(&request.input_type)
        .filter(|t| t.wants_bullets())
        .map(|t| segment(&rewritten_text, bullet_cap(t)));

    info!(
        "Regenerated {} ({} chars, {} bullets)",
        request.input_type,
        rewritten_text.len(),
        bullets.as_ref().map_or(0, Vec::len)
    );

    Ok(RegenerateReply::Text {
        rewritten_text,
        bullets,
    })
}


#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::testing::{DownModel, EchoModel};
    use super::*;

    #[tokio::test]
    async fn test_missing_fields_are_rejected() {
        let model = EchoModel::new("x");
        let err = regenerate(Some("key"), Some(&model), &json!({"inputType": "objective"}))
            .await
            .unwrap_err();
        match err {
            AppError::Validation(msg) => {
                assert_eq!(msg, "Missing required fields: inputType and text.")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_key_is_a_configuration_error() {
        let err = regenerate(None, None, &json!({"inputType": "objective", "text": "hi"}))
            .await
            .unwrap_err();
        assert!(
            matches!(err, AppError::Configuration(msg) if msg == "Server configuration error: Missing API key.")
        );
    }

    #[tokio::test]
    async fn test_debug_reports_key_prefix() {
        let model = EchoModel::new("x");
        let reply = regenerate(
            Some("AIzaSyABCDEFGHIJ"),
            Some(&model),
            &json!({"inputType": "debug", "text": ""}),
        )
        .await
        .unwrap();
        let value = serde_json::to_value(&reply).unwrap();
        assert_eq!(
            value,
            json!({"status": "API is working", "hasApiKey": true, "keyPrefix": "AIzaSyABCD..."})
        );
        assert!(model.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bullet_types_carry_bullets() {
        let model = EchoModel::new("• Led A\n• Built B");
        let reply = regenerate(
            Some("key"),
            Some(&model),
            &json!({"inputType": "experience", "text": "Engineer", "keywords": ["Rust"]}),
        )
        .await
        .unwrap();
        assert_eq!(
            reply,
            RegenerateReply::Text {
                rewritten_text: "• Led A\n• Built B".to_string(),
                bullets: Some(vec!["Led A".to_string(), "Built B".to_string()]),
            }
        );
        let prompts = model.prompts.lock().unwrap();
        assert!(prompts[0].contains("Incorporate these keywords seamlessly: Rust."));
    }

    #[tokio::test]
    async fn test_objective_has_no_bullets() {
        let model = EchoModel::new("A concise objective.");
        let reply = regenerate(
            Some("key"),
            Some(&model),
            &json!({"inputType": "objective", "text": "hi", "experienceLevel": "entry"}),
        )
        .await
        .unwrap();
        let value = serde_json::to_value(&reply).unwrap();
        assert_eq!(value, json!({"rewrittenText": "A concise objective."}));
    }

    #[tokio::test]
    async fn test_model_failure_surfaces_as_llm_error() {
        let err = regenerate(
            Some("key"),
            Some(&DownModel),
            &json!({"inputType": "objective", "text": "hi"}),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }
}
