//! AI-assisted edits for the objective, experience and projects steps.
//!
//! Each operation builds its request under the wizard lock, releases the lock
//! while the generator runs, then re-locks to apply the result. A result is
//! only applied when its ticket is still the newest for the field.

use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::client::{Generated, InputType, RegenerateRequest, TextGenerator};
use crate::generation::inflight::Ticket;
use crate::generation::keywords::{extract_keywords, merge_unique};
use crate::generation::segment::{
    bullets_from, shorten_to_sentences, strip_marker, MAX_HIGHLIGHT_BULLETS,
    MAX_RESPONSIBILITY_BULLETS,
};
use crate::wizard::controller::WizardController;
use crate::wizard::editors::{find, find_mut, merge_generated, non_blank, set_row};

pub const DEFAULT_OBJECTIVE_PROMPT: &str = "Generate a professional objective for me";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Entry,
    #[default]
    Mid,
    Senior,
    Executive,
}

impl ExperienceLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "entry",
            ExperienceLevel::Mid => "mid",
            ExperienceLevel::Senior => "senior",
            ExperienceLevel::Executive => "executive",
        }
    }
}

/// Result of a generation edit.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Applied(T),
    /// A newer request for the same field was issued while this one ran.
    Superseded,
}

fn experience_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Experience '{id}' not found"))
}

fn project_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Project '{id}' not found"))
}

fn empty_row() -> AppError {
    AppError::Validation(
        "Please write something first, then I can help make it more professional.".to_string(),
    )
}

/// Runs the request and applies the result if the ticket is still current.
async fn complete<T, F>(
    wizard: &Mutex<WizardController>,
    generator: &dyn TextGenerator,
    ticket: Ticket,
    request: RegenerateRequest,
    apply: F,
) -> Result<Outcome<T>, AppError>
where
    F: FnOnce(&mut WizardController, Generated) -> Result<T, AppError>,
{
    let result = generator.generate(&request).await;

    let mut wizard = wizard.lock().await;
    if !wizard.finish_generation(&ticket) {
        return Ok(Outcome::Superseded);
    }
    let generated = result.inspect_err(|e| {
        warn!("Generation for '{}' failed: {e}", ticket.field());
    })?;
    apply(&mut wizard, generated).map(Outcome::Applied)
}

/// Asks for an objective suggestion. The document is not changed; the caller
/// picks a suggestion and sets it as the objective.
pub async fn objective_suggestions(
    wizard: &Mutex<WizardController>,
    generator: &dyn TextGenerator,
    level: ExperienceLevel,
) -> Result<Outcome<Vec<String>>, AppError> {
    let (request, ticket) = {
        let mut w = wizard.lock().await;
        let data = w.document();
        let keywords = merge_unique([
            data.skills.technical.clone(),
            extract_keywords(&data.objective),
            data.skills.soft.clone(),
        ]);
        let text = if data.objective.trim().is_empty() {
            DEFAULT_OBJECTIVE_PROMPT.to_string()
        } else {
            data.objective.clone()
        };
        let request = RegenerateRequest::new(InputType::Objective, text)
            .with_keywords(keywords)
            .with_experience_level(level.as_str());
        (request, w.begin_generation("objective"))
    };

    complete(wizard, generator, ticket, request, |_, generated| {
        Ok(vec![generated.text.trim().to_string()])
    })
    .await
}

/// Generates responsibilities for an experience entry and merges them into
/// its rows. Returns the entry's responsibilities after the merge.
pub async fn generate_responsibilities(
    wizard: &Mutex<WizardController>,
    generator: &dyn TextGenerator,
    experience_id: &str,
) -> Result<Outcome<Vec<String>>, AppError> {
    let (request, ticket) = {
        let mut w = wizard.lock().await;
        let data = w.document();
        let exp = find(&data.experience, experience_id)
            .ok_or_else(|| experience_not_found(experience_id))?;
        if exp.job_title.trim().is_empty() {
            return Err(AppError::Validation(
                "Please fill in the job title first to generate AI responsibilities.".to_string(),
            ));
        }

        let company = if exp.company.trim().is_empty() {
            "Technology Company"
        } else {
            exp.company.as_str()
        };
        let mut parts = vec![format!("{} at {company}.", exp.job_title)];
        if !exp.location.trim().is_empty() {
            parts.push(format!("Located in {}.", exp.location));
        }
        parts.push(non_blank(&exp.responsibilities).join(" "));
        let text = parts.join(" ").trim().to_string();

        let request = RegenerateRequest::new(InputType::Experience, text)
            .with_keywords(data.skills.all())
            .with_experience_level(ExperienceLevel::Mid.as_str());
        let field = format!("experience:{experience_id}:responsibilities");
        (request, w.begin_generation(field))
    };

    complete(wizard, generator, ticket, request, |w, generated| {
        let bullets = bullets_from(&generated, MAX_RESPONSIBILITY_BULLETS);
        let rows = w.update(|d| {
            find_mut(&mut d.experience, experience_id).map(|exp| {
                let added = merge_generated(&mut exp.responsibilities, &bullets);
                info!("Added {added} generated responsibilities to '{experience_id}'");
                exp.responsibilities.clone()
            })
        })?;
        rows.ok_or_else(|| experience_not_found(experience_id))
    })
    .await
}

/// Rewrites one responsibility row.
pub async fn enhance_responsibility(
    wizard: &Mutex<WizardController>,
    generator: &dyn TextGenerator,
    experience_id: &str,
    index: usize,
) -> Result<Outcome<String>, AppError> {
    let (request, ticket) = {
        let mut w = wizard.lock().await;
        let data = w.document();
        let exp = find(&data.experience, experience_id)
            .ok_or_else(|| experience_not_found(experience_id))?;
        let original = exp
            .responsibilities
            .get(index)
            .filter(|r| !r.trim().is_empty())
            .ok_or_else(empty_row)?;

        let text = format!("{original} (Job: {} at {})", exp.job_title, exp.company);
        let request = RegenerateRequest::new(InputType::Experience, text)
            .with_keywords(data.skills.all())
            .with_experience_level(ExperienceLevel::Mid.as_str());
        let field = format!("experience:{experience_id}:responsibilities:{index}");
        (request, w.begin_generation(field))
    };

    complete(wizard, generator, ticket, request, |w, generated| {
        let enhanced = shorten_to_sentences(&generated.text);
        let applied = w.update(|d| {
            find_mut(&mut d.experience, experience_id)
                .map(|exp| set_row(&mut exp.responsibilities, index, enhanced.clone()))
        })?;
        applied
            .map(|_| enhanced)
            .ok_or_else(|| experience_not_found(experience_id))
    })
    .await
}

/// Generates and stores a project description.
pub async fn generate_project_description(
    wizard: &Mutex<WizardController>,
    generator: &dyn TextGenerator,
    project_id: &str,
) -> Result<Outcome<String>, AppError> {
    let (request, ticket) = {
        let mut w = wizard.lock().await;
        let data = w.document();
        let project =
            find(&data.projects, project_id).ok_or_else(|| project_not_found(project_id))?;
        if project.name.trim().is_empty() {
            return Err(AppError::Validation(
                "Please fill in the project name first to generate AI description.".to_string(),
            ));
        }

        let description = if project.description.trim().is_empty() {
            "New project"
        } else {
            project.description.as_str()
        };
        let text = format!(
            "{}. Technologies: {}. {description}",
            project.name,
            project.technologies.join(", ")
        );
        let request = RegenerateRequest::new(InputType::ProjectDescription, text)
            .with_keywords(merge_unique([data.skills.all(), project.technologies.clone()]))
            .with_experience_level(ExperienceLevel::Mid.as_str());
        (request, w.begin_generation(format!("projects:{project_id}:description")))
    };

    complete(wizard, generator, ticket, request, |w, generated| {
        let description = generated.text.trim().to_string();
        let applied = w.update(|d| {
            find_mut(&mut d.projects, project_id).map(|p| p.description = description.clone())
        })?;
        applied
            .map(|_| description)
            .ok_or_else(|| project_not_found(project_id))
    })
    .await
}

/// Generates highlights for a project and merges them into its rows.
pub async fn generate_project_highlights(
    wizard: &Mutex<WizardController>,
    generator: &dyn TextGenerator,
    project_id: &str,
) -> Result<Outcome<Vec<String>>, AppError> {
    let (request, ticket) = {
        let mut w = wizard.lock().await;
        let data = w.document();
        let project =
            find(&data.projects, project_id).ok_or_else(|| project_not_found(project_id))?;
        if project.name.trim().is_empty() {
            return Err(AppError::Validation(
                "Please fill in the project name first to generate AI highlights.".to_string(),
            ));
        }

        let or = |value: String, fallback: &str| {
            if value.trim().is_empty() {
                fallback.to_string()
            } else {
                value
            }
        };
        let text = format!(
            "Project: {}. Description: {}. Technologies used: {}. Current highlights: {}",
            project.name,
            or(project.description.clone(), "No description provided"),
            or(project.technologies.join(", "), "No technologies specified"),
            non_blank(&project.highlights).join("; ")
        );
        let request = RegenerateRequest::new(InputType::ProjectHighlights, text)
            .with_keywords(merge_unique([data.skills.all(), project.technologies.clone()]))
            .with_experience_level(ExperienceLevel::Mid.as_str());
        (request, w.begin_generation(format!("projects:{project_id}:highlights")))
    };

    complete(wizard, generator, ticket, request, |w, generated| {
        let bullets = bullets_from(&generated, MAX_HIGHLIGHT_BULLETS);
        let rows = w.update(|d| {
            find_mut(&mut d.projects, project_id).map(|p| {
                merge_generated(&mut p.highlights, &bullets);
                p.highlights.clone()
            })
        })?;
        rows.ok_or_else(|| project_not_found(project_id))
    })
    .await
}

/// Rewrites one highlight row with the first segment of the response.
pub async fn enhance_highlight(
    wizard: &Mutex<WizardController>,
    generator: &dyn TextGenerator,
    project_id: &str,
    index: usize,
) -> Result<Outcome<String>, AppError> {
    let (request, ticket) = {
        let mut w = wizard.lock().await;
        let data = w.document();
        let project =
            find(&data.projects, project_id).ok_or_else(|| project_not_found(project_id))?;
        let original = project
            .highlights
            .get(index)
            .filter(|h| !h.trim().is_empty())
            .ok_or_else(empty_row)?;

        let text = format!(
            "{original} (Project: {}, Technologies: {})",
            project.name,
            project.technologies.join(", ")
        );
        let request = RegenerateRequest::new(InputType::ProjectHighlights, text)
            .with_keywords(merge_unique([
                data.skills.technical.clone(),
                project.technologies.clone(),
            ]))
            .with_experience_level(ExperienceLevel::Mid.as_str());
        let field = format!("projects:{project_id}:highlights:{index}");
        (request, w.begin_generation(field))
    };

    complete(wizard, generator, ticket, request, |w, generated| {
        let enhanced = bullets_from(&generated, 1)
            .into_iter()
            .next()
            .unwrap_or_else(|| strip_marker(&generated.text));
        let applied = w.update(|d| {
            find_mut(&mut d.projects, project_id)
                .map(|p| set_row(&mut p.highlights, index, enhanced.clone()))
        })?;
        applied
            .map(|_| enhanced)
            .ok_or_else(|| project_not_found(project_id))
    })
    .await
}
