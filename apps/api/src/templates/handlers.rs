use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;
use crate::templates::theme::TemplateKind;
use crate::templates::{load_selected, resolve, save_selected};

#[derive(Debug, Serialize)]
pub struct TemplateInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub templates: Vec<TemplateInfo>,
    pub selected: TemplateKind,
}

#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    pub template: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SelectTemplateRequest {
    pub template: String,
}

#[derive(Debug, Serialize)]
pub struct SelectTemplateResponse {
    pub selected: TemplateKind,
}

/// GET /api/templates
pub async fn handle_list_templates(State(state): State<AppState>) -> Json<CatalogResponse> {
    let templates = TemplateKind::ALL
        .into_iter()
        .map(|kind| TemplateInfo {
            id: kind.id(),
            name: kind.name(),
            description: kind.description(),
        })
        .collect();
    Json(CatalogResponse {
        templates,
        selected: load_selected(state.store.as_ref()),
    })
}

/// GET /api/preview?template=<id>
pub async fn handle_preview(
    State(state): State<AppState>,
    Query(query): Query<PreviewQuery>,
) -> Result<Html<String>, AppError> {
    let kind = resolve(query.template.as_deref(), state.store.as_ref());
    let document = state.wizard.lock().await.document().clone();
    let html = state.renderer.render(kind, &document)?;
    Ok(Html(html))
}

/// PUT /api/templates/selected
pub async fn handle_select_template(
    State(state): State<AppState>,
    Json(req): Json<SelectTemplateRequest>,
) -> Result<Json<SelectTemplateResponse>, AppError> {
    let kind = TemplateKind::parse(&req.template)
        .ok_or_else(|| AppError::Validation(format!("Unknown template '{}'", req.template)))?;
    save_selected(state.store.as_ref(), kind)?;
    Ok(Json(SelectTemplateResponse { selected: kind }))
}
