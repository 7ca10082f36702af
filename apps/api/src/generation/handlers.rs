//! Axum route handlers for AI-assisted editing and keyword suggestions.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::editors::{self, ExperienceLevel, Outcome};
use crate::generation::keywords::{search_keywords, skill_suggestions};
use crate::models::resume::SkillKind;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ObjectiveSuggestionRequest {
    pub experience_level: ExperienceLevel,
}

/// Body returned by every generation route. `result` is absent when the
/// request was superseded by a newer one for the same field.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResponse<T> {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    pub revision: u64,
}

#[derive(Debug, Deserialize)]
pub struct KeywordQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct KeywordResponse {
    pub keywords: Vec<&'static str>,
}

async fn respond<T>(
    state: &AppState,
    outcome: Outcome<T>,
) -> Json<GenerationResponse<T>> {
    let revision = state.wizard.lock().await.revision();
    let (status, result) = match outcome {
        Outcome::Applied(value) => ("applied", Some(value)),
        Outcome::Superseded => ("superseded", None),
    };
    Json(GenerationResponse {
        status,
        result,
        revision,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/resume/objective/suggestions
pub async fn handle_objective_suggestions(
    State(state): State<AppState>,
    Json(req): Json<ObjectiveSuggestionRequest>,
) -> Result<Json<GenerationResponse<Vec<String>>>, AppError> {
    let outcome = editors::objective_suggestions(
        &state.wizard,
        state.generator.as_ref(),
        req.experience_level,
    )
    .await?;
    Ok(respond(&state, outcome).await)
}

/// POST /api/resume/experience/:id/generate
pub async fn handle_generate_responsibilities(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GenerationResponse<Vec<String>>>, AppError> {
    let outcome =
        editors::generate_responsibilities(&state.wizard, state.generator.as_ref(), &id).await?;
    Ok(respond(&state, outcome).await)
}

/// POST /api/resume/experience/:id/responsibilities/:index/enhance
pub async fn handle_enhance_responsibility(
    State(state): State<AppState>,
    Path((id, index)): Path<(String, usize)>,
) -> Result<Json<GenerationResponse<String>>, AppError> {
    let outcome =
        editors::enhance_responsibility(&state.wizard, state.generator.as_ref(), &id, index)
            .await?;
    Ok(respond(&state, outcome).await)
}

/// POST /api/resume/projects/:id/description/generate
pub async fn handle_generate_project_description(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GenerationResponse<String>>, AppError> {
    let outcome =
        editors::generate_project_description(&state.wizard, state.generator.as_ref(), &id)
            .await?;
    Ok(respond(&state, outcome).await)
}

/// POST /api/resume/projects/:id/highlights/generate
pub async fn handle_generate_project_highlights(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GenerationResponse<Vec<String>>>, AppError> {
    let outcome =
        editors::generate_project_highlights(&state.wizard, state.generator.as_ref(), &id)
            .await?;
    Ok(respond(&state, outcome).await)
}

/// POST /api/resume/projects/:id/highlights/:index/enhance
pub async fn handle_enhance_highlight(
    State(state): State<AppState>,
    Path((id, index)): Path<(String, usize)>,
) -> Result<Json<GenerationResponse<String>>, AppError> {
    let outcome =
        editors::enhance_highlight(&state.wizard, state.generator.as_ref(), &id, index).await?;
    Ok(respond(&state, outcome).await)
}

/// GET /api/keywords?q=
pub async fn handle_search_keywords(Query(query): Query<KeywordQuery>) -> Json<KeywordResponse> {
    Json(KeywordResponse {
        keywords: search_keywords(&query.q),
    })
}

/// GET /api/resume/skills/:kind/suggestions
pub async fn handle_skill_suggestions(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<Json<KeywordResponse>, AppError> {
    let kind = SkillKind::parse(&kind)
        .ok_or_else(|| AppError::NotFound(format!("Unknown skill kind '{kind}'")))?;
    let wizard = state.wizard.lock().await;
    Ok(Json(KeywordResponse {
        keywords: skill_suggestions(&wizard.document().skills, kind),
    }))
}
