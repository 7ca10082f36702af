use axum::{extract::State, Json};
use bytes::Bytes;
use serde_json::Value;

use crate::errors::AppError;
use crate::regenerate::{regenerate, RegenerateReply};
use crate::state::AppState;

/// POST /api/regenerate
///
/// Takes the raw body so malformed input gets the same error message as a
/// body with missing fields.
pub async fn handle_regenerate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RegenerateReply>, AppError> {
    if body.is_empty() {
        return Err(AppError::Validation("No data received".to_string()));
    }
    let value: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    let reply = regenerate(
        state.config.gemini_api_key.as_deref(),
        state.llm.as_deref(),
        &value,
    )
    .await?;
    Ok(Json(reply))
}
