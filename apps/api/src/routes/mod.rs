pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::career::handlers as career;
use crate::generation::handlers as generation;
use crate::regenerate::handlers as regenerate;
use crate::state::AppState;
use crate::templates::handlers as templates;
use crate::wizard::handlers as wizard;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Regenerate service
        .route("/api/regenerate", post(regenerate::handle_regenerate))
        // Wizard navigation
        .route("/api/wizard", get(wizard::handle_get_wizard))
        .route("/api/wizard/next", post(wizard::handle_next))
        .route("/api/wizard/previous", post(wizard::handle_previous))
        .route("/api/wizard/jump/:step", post(wizard::handle_jump))
        .route("/api/review", get(wizard::handle_review))
        // Document slices
        .route("/api/resume/personal", put(wizard::handle_set_personal))
        .route(
            "/api/resume/objective",
            put(wizard::handle_set_objective),
        )
        .route(
            "/api/resume/objective/keywords",
            post(wizard::handle_insert_objective_keyword),
        )
        .route(
            "/api/resume/objective/suggestions",
            post(generation::handle_objective_suggestions),
        )
        .route(
            "/api/resume/experience",
            put(wizard::handle_set_experience).post(wizard::handle_add_experience),
        )
        .route(
            "/api/resume/experience/:id",
            delete(wizard::handle_remove_experience),
        )
        .route(
            "/api/resume/experience/:id/generate",
            post(generation::handle_generate_responsibilities),
        )
        .route(
            "/api/resume/experience/:id/responsibilities/:index",
            delete(wizard::handle_remove_responsibility),
        )
        .route(
            "/api/resume/experience/:id/responsibilities/:index/enhance",
            post(generation::handle_enhance_responsibility),
        )
        .route(
            "/api/resume/education",
            put(wizard::handle_set_education).post(wizard::handle_add_education),
        )
        .route(
            "/api/resume/education/:id",
            delete(wizard::handle_remove_education),
        )
        .route("/api/resume/skills", put(wizard::handle_set_skills))
        .route("/api/resume/skills/:kind", post(wizard::handle_add_skill))
        .route(
            "/api/resume/skills/:kind/suggestions",
            get(generation::handle_skill_suggestions),
        )
        .route(
            "/api/resume/skills/:kind/:skill",
            delete(wizard::handle_remove_skill),
        )
        .route(
            "/api/resume/projects",
            put(wizard::handle_set_projects).post(wizard::handle_add_project),
        )
        .route(
            "/api/resume/projects/:id",
            delete(wizard::handle_remove_project),
        )
        .route(
            "/api/resume/projects/:id/description/generate",
            post(generation::handle_generate_project_description),
        )
        .route(
            "/api/resume/projects/:id/highlights/generate",
            post(generation::handle_generate_project_highlights),
        )
        .route(
            "/api/resume/projects/:id/technologies",
            put(wizard::handle_set_technologies).post(wizard::handle_add_technology),
        )
        .route(
            "/api/resume/projects/:id/highlights/:index",
            delete(wizard::handle_remove_highlight),
        )
        .route(
            "/api/resume/projects/:id/highlights/:index/enhance",
            post(generation::handle_enhance_highlight),
        )
        .route(
            "/api/resume/certifications",
            put(wizard::handle_set_certifications).post(wizard::handle_add_certification),
        )
        .route(
            "/api/resume/certifications/:id",
            delete(wizard::handle_remove_certification),
        )
        .route("/api/keywords", get(generation::handle_search_keywords))
        // Templates
        .route("/api/templates", get(templates::handle_list_templates))
        .route(
            "/api/templates/selected",
            put(templates::handle_select_template),
        )
        .route("/api/preview", get(templates::handle_preview))
        // Career tools
        .route("/api/cover-letter", post(career::handle_cover_letter))
        .route("/api/cover-letter/prefill", post(career::handle_prefill))
        .route("/api/mock-interview", post(career::handle_mock_interview))
        .with_state(state)
}
