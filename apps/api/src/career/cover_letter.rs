use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::client::{InputType, RegenerateRequest, TextGenerator};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Professional,
    Enthusiastic,
    Confident,
    Friendly,
}

impl Tone {
    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Enthusiastic => "enthusiastic",
            Tone::Confident => "confident",
            Tone::Friendly => "friendly",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CoverLetterRequest {
    pub company: String,
    pub position: String,
    pub job_description: String,
    pub hiring_manager: String,
    pub source: String,
    pub tone: Tone,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub current_role: String,
    pub experience: String,
    /// Comma-separated.
    pub skills: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetter {
    pub letter: String,
    pub word_count: usize,
}

fn context(req: &CoverLetterRequest) -> String {
    format!(
        "ROLE:{}; COMPANY:{}; MANAGER:{}; SOURCE:{}; TONE:{}; CANDIDATE:{} {} {}; \
         CURRENT_ROLE:{}; EXPERIENCE:{}; JOB_DESC:{}",
        req.position,
        req.company,
        req.hiring_manager,
        req.source,
        req.tone.as_str(),
        req.name,
        req.email,
        req.phone,
        req.current_role,
        req.experience,
        req.job_description
    )
}

pub fn split_skills(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Writes a cover letter for the given job through the regenerate endpoint.
pub async fn generate_cover_letter(
    generator: &dyn TextGenerator,
    req: &CoverLetterRequest,
) -> Result<CoverLetter, AppError> {
    if req.company.trim().is_empty() || req.position.trim().is_empty() {
        return Err(AppError::Validation(
            "Please fill in at least the company name and position".to_string(),
        ));
    }

    let request = RegenerateRequest::new(InputType::CoverLetter, context(req))
        .with_keywords(split_skills(&req.skills))
        .with_experience_level(req.tone.as_str());
    let generated = generator.generate(&request).await?;

    let letter = generated.text.trim().to_string();
    Ok(CoverLetter {
        word_count: letter.split_whitespace().count(),
        letter,
    })
}
