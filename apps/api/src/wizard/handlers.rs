use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::keywords::insert_keyword;
use crate::models::resume::{
    Certification, Education, Experience, PersonalInfo, Project, SkillKind, Skills,
};
use crate::state::AppState;
use crate::storage::StorageError;
use crate::wizard::controller::{AdvanceOutcome, WizardController, WizardSnapshot};
use crate::wizard::editors::{
    add_item, add_technology, find_mut, remove_item, remove_row, set_technologies_from_csv,
    ListSection,
};
use crate::wizard::review::{compute_completeness_report, CompletenessReport};
use crate::wizard::step::ResumeStep;

#[derive(Debug, Serialize)]
pub struct AdvanceResponse {
    pub outcome: AdvanceOutcome,
    pub state: WizardSnapshot,
}

#[derive(Debug, Deserialize)]
pub struct ObjectiveBody {
    pub objective: String,
}

#[derive(Debug, Deserialize)]
pub struct KeywordBody {
    pub keyword: String,
}

#[derive(Debug, Deserialize)]
pub struct SkillBody {
    pub skill: String,
}

#[derive(Debug, Deserialize)]
pub struct TechnologyBody {
    pub technology: String,
}

/// Comma-separated technologies replacing the project's list.
#[derive(Debug, Deserialize)]
pub struct TechnologiesBody {
    pub technologies: String,
}

#[derive(Debug, Serialize)]
pub struct AddedItemResponse {
    pub id: String,
    pub state: WizardSnapshot,
}

/// Runs a document edit under the wizard lock. On a revision conflict the
/// controller reloads from storage so the next edit starts from disk.
async fn mutate<T, F>(state: &AppState, edit: F) -> Result<(T, WizardSnapshot), AppError>
where
    F: FnOnce(&mut WizardController) -> Result<T, StorageError>,
{
    let mut wizard = state.wizard.lock().await;
    match edit(&mut wizard) {
        Ok(value) => Ok((value, wizard.snapshot())),
        Err(err @ StorageError::Conflict { .. }) => {
            wizard.reload();
            Err(err.into())
        }
        Err(err) => Err(err.into()),
    }
}

fn parse_skill_kind(raw: &str) -> Result<SkillKind, AppError> {
    SkillKind::parse(raw).ok_or_else(|| AppError::NotFound(format!("Unknown skill kind '{raw}'")))
}

// ── Navigation ──────────────────────────────────────────────────────────────

/// GET /api/wizard
pub async fn handle_get_wizard(State(state): State<AppState>) -> Json<WizardSnapshot> {
    Json(state.wizard.lock().await.snapshot())
}

/// POST /api/wizard/next
pub async fn handle_next(State(state): State<AppState>) -> Json<AdvanceResponse> {
    let mut wizard = state.wizard.lock().await;
    let outcome = wizard.advance();
    Json(AdvanceResponse {
        outcome,
        state: wizard.snapshot(),
    })
}

/// POST /api/wizard/previous
pub async fn handle_previous(State(state): State<AppState>) -> Json<WizardSnapshot> {
    let mut wizard = state.wizard.lock().await;
    wizard.retreat();
    Json(wizard.snapshot())
}

/// POST /api/wizard/jump/:step
pub async fn handle_jump(
    State(state): State<AppState>,
    Path(step): Path<String>,
) -> Result<Json<WizardSnapshot>, AppError> {
    let step = ResumeStep::parse(&step)
        .ok_or_else(|| AppError::NotFound(format!("Unknown step '{step}'")))?;
    let mut wizard = state.wizard.lock().await;
    wizard.jump_to(step);
    Ok(Json(wizard.snapshot()))
}

/// GET /api/review
pub async fn handle_review(State(state): State<AppState>) -> Json<CompletenessReport> {
    let wizard = state.wizard.lock().await;
    Json(compute_completeness_report(wizard.document()))
}

// ── Slice setters ───────────────────────────────────────────────────────────

/// PUT /api/resume/personal
pub async fn handle_set_personal(
    State(state): State<AppState>,
    Json(info): Json<PersonalInfo>,
) -> Result<Json<WizardSnapshot>, AppError> {
    let ((), snapshot) = mutate(&state, |w| w.set_personal_info(info)).await?;
    Ok(Json(snapshot))
}

/// PUT /api/resume/objective
pub async fn handle_set_objective(
    State(state): State<AppState>,
    Json(body): Json<ObjectiveBody>,
) -> Result<Json<WizardSnapshot>, AppError> {
    let ((), snapshot) = mutate(&state, |w| w.set_objective(body.objective)).await?;
    Ok(Json(snapshot))
}

/// PUT /api/resume/experience
pub async fn handle_set_experience(
    State(state): State<AppState>,
    Json(items): Json<Vec<Experience>>,
) -> Result<Json<WizardSnapshot>, AppError> {
    let ((), snapshot) = mutate(&state, |w| w.set_experience(items)).await?;
    Ok(Json(snapshot))
}

/// PUT /api/resume/education
pub async fn handle_set_education(
    State(state): State<AppState>,
    Json(items): Json<Vec<Education>>,
) -> Result<Json<WizardSnapshot>, AppError> {
    let ((), snapshot) = mutate(&state, |w| w.set_education(items)).await?;
    Ok(Json(snapshot))
}

/// PUT /api/resume/skills
pub async fn handle_set_skills(
    State(state): State<AppState>,
    Json(skills): Json<Skills>,
) -> Result<Json<WizardSnapshot>, AppError> {
    let ((), snapshot) = mutate(&state, |w| w.set_skills(skills)).await?;
    Ok(Json(snapshot))
}

/// PUT /api/resume/projects
pub async fn handle_set_projects(
    State(state): State<AppState>,
    Json(items): Json<Vec<Project>>,
) -> Result<Json<WizardSnapshot>, AppError> {
    let ((), snapshot) = mutate(&state, |w| w.set_projects(items)).await?;
    Ok(Json(snapshot))
}

/// PUT /api/resume/certifications
pub async fn handle_set_certifications(
    State(state): State<AppState>,
    Json(items): Json<Vec<Certification>>,
) -> Result<Json<WizardSnapshot>, AppError> {
    let ((), snapshot) = mutate(&state, |w| w.set_certifications(items)).await?;
    Ok(Json(snapshot))
}

/// POST /api/resume/objective/keywords
///
/// Appends a suggested keyword to the objective.
pub async fn handle_insert_objective_keyword(
    State(state): State<AppState>,
    Json(body): Json<KeywordBody>,
) -> Result<Json<WizardSnapshot>, AppError> {
    let keyword = body.keyword.trim();
    if keyword.is_empty() {
        return Err(AppError::Validation("Keyword cannot be empty".to_string()));
    }
    let ((), snapshot) = mutate(&state, |w| {
        w.update(|d| d.objective = insert_keyword(&d.objective, keyword))
    })
    .await?;
    Ok(Json(snapshot))
}

// ── Skills ──────────────────────────────────────────────────────────────────

/// POST /api/resume/skills/:kind
pub async fn handle_add_skill(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Json(body): Json<SkillBody>,
) -> Result<Json<WizardSnapshot>, AppError> {
    let kind = parse_skill_kind(&kind)?;
    if body.skill.trim().is_empty() {
        return Err(AppError::Validation("Skill cannot be empty".to_string()));
    }
    let (_, snapshot) = mutate(&state, |w| w.update(|d| d.skills.add(kind, &body.skill))).await?;
    Ok(Json(snapshot))
}

/// DELETE /api/resume/skills/:kind/:skill
pub async fn handle_remove_skill(
    State(state): State<AppState>,
    Path((kind, skill)): Path<(String, String)>,
) -> Result<Json<WizardSnapshot>, AppError> {
    let kind = parse_skill_kind(&kind)?;
    let (_, snapshot) = mutate(&state, |w| w.update(|d| d.skills.remove(kind, &skill))).await?;
    Ok(Json(snapshot))
}

// ── List items ──────────────────────────────────────────────────────────────

async fn add(state: &AppState, section: ListSection) -> Result<Json<AddedItemResponse>, AppError> {
    let (id, snapshot) = mutate(state, |w| w.update(|d| add_item(d, section))).await?;
    Ok(Json(AddedItemResponse {
        id,
        state: snapshot,
    }))
}

async fn remove(
    state: &AppState,
    section: ListSection,
    id: &str,
) -> Result<Json<WizardSnapshot>, AppError> {
    let (removed, snapshot) = mutate(state, |w| w.update(|d| remove_item(d, section, id))).await?;
    if !removed {
        return Err(AppError::NotFound(format!("Item '{id}' not found")));
    }
    Ok(Json(snapshot))
}

/// POST /api/resume/experience
pub async fn handle_add_experience(
    State(state): State<AppState>,
) -> Result<Json<AddedItemResponse>, AppError> {
    add(&state, ListSection::Experience).await
}

/// DELETE /api/resume/experience/:id
pub async fn handle_remove_experience(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<WizardSnapshot>, AppError> {
    remove(&state, ListSection::Experience, &id).await
}

/// POST /api/resume/education
pub async fn handle_add_education(
    State(state): State<AppState>,
) -> Result<Json<AddedItemResponse>, AppError> {
    add(&state, ListSection::Education).await
}

/// DELETE /api/resume/education/:id
pub async fn handle_remove_education(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<WizardSnapshot>, AppError> {
    remove(&state, ListSection::Education, &id).await
}

/// POST /api/resume/projects
pub async fn handle_add_project(
    State(state): State<AppState>,
) -> Result<Json<AddedItemResponse>, AppError> {
    add(&state, ListSection::Projects).await
}

/// DELETE /api/resume/projects/:id
pub async fn handle_remove_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<WizardSnapshot>, AppError> {
    remove(&state, ListSection::Projects, &id).await
}

/// POST /api/resume/certifications
pub async fn handle_add_certification(
    State(state): State<AppState>,
) -> Result<Json<AddedItemResponse>, AppError> {
    add(&state, ListSection::Certifications).await
}

/// DELETE /api/resume/certifications/:id
pub async fn handle_remove_certification(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<WizardSnapshot>, AppError> {
    remove(&state, ListSection::Certifications, &id).await
}

// ── Rows inside list items ──────────────────────────────────────────────────

fn project_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Project '{id}' not found"))
}

/// DELETE /api/resume/experience/:id/responsibilities/:index
///
/// The last remaining row is kept.
pub async fn handle_remove_responsibility(
    State(state): State<AppState>,
    Path((id, index)): Path<(String, usize)>,
) -> Result<Json<WizardSnapshot>, AppError> {
    let (found, snapshot) = mutate(&state, |w| {
        w.update(|d| {
            find_mut(&mut d.experience, &id).map(|e| remove_row(&mut e.responsibilities, index))
        })
    })
    .await?;
    found.ok_or_else(|| AppError::NotFound(format!("Experience '{id}' not found")))?;
    Ok(Json(snapshot))
}

/// DELETE /api/resume/projects/:id/highlights/:index
pub async fn handle_remove_highlight(
    State(state): State<AppState>,
    Path((id, index)): Path<(String, usize)>,
) -> Result<Json<WizardSnapshot>, AppError> {
    let (found, snapshot) = mutate(&state, |w| {
        w.update(|d| find_mut(&mut d.projects, &id).map(|p| remove_row(&mut p.highlights, index)))
    })
    .await?;
    found.ok_or_else(|| project_not_found(&id))?;
    Ok(Json(snapshot))
}

/// POST /api/resume/projects/:id/technologies
pub async fn handle_add_technology(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<TechnologyBody>,
) -> Result<Json<WizardSnapshot>, AppError> {
    let (found, snapshot) = mutate(&state, |w| {
        w.update(|d| find_mut(&mut d.projects, &id).map(|p| add_technology(p, &body.technology)))
    })
    .await?;
    found.ok_or_else(|| project_not_found(&id))?;
    Ok(Json(snapshot))
}

/// PUT /api/resume/projects/:id/technologies
pub async fn handle_set_technologies(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<TechnologiesBody>,
) -> Result<Json<WizardSnapshot>, AppError> {
    let (found, snapshot) = mutate(&state, |w| {
        w.update(|d| {
            find_mut(&mut d.projects, &id)
                .map(|p| set_technologies_from_csv(p, &body.technologies))
        })
    })
    .await?;
    found.ok_or_else(|| project_not_found(&id))?;
    Ok(Json(snapshot))
}
