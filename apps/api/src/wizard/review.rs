use serde::{Deserialize, Serialize};

use crate::models::resume::ResumeData;
use crate::wizard::step::ResumeStep;
use crate::wizard::validators::{objective_complete, skills_complete};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum SectionStatus {
    Complete,
    Incomplete,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionCheck {
    pub label: String,
    /// Step to jump to when the user follows the "Complete" link.
    pub step: ResumeStep,
    pub status: SectionStatus,
    pub recommendation: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletenessReport {
    pub sections: Vec<SectionCheck>,
    pub completed_sections: usize,
    pub total_sections: usize,
    pub completion_percentage: f64,
}

/// Summarizes which core sections of the draft are filled in for the review step.
pub fn compute_completeness_report(data: &ResumeData) -> CompletenessReport {
    let info = &data.personal_info;
    let checks: [(&str, ResumeStep, bool, &str); 5] = [
        (
            "Personal Information",
            ResumeStep::Personal,
            !info.full_name.trim().is_empty()
                && !info.email.trim().is_empty()
                && !info.phone.trim().is_empty(),
            "Add your name, email and phone number",
        ),
        (
            "Professional Objective",
            ResumeStep::Objective,
            objective_complete(&data.objective),
            "Write an objective of at least 50 characters",
        ),
        (
            "Work Experience",
            ResumeStep::Experience,
            data.experience
                .iter()
                .any(|e| !e.job_title.trim().is_empty() && !e.company.trim().is_empty()),
            "Add at least one position with a job title and company",
        ),
        (
            "Education",
            ResumeStep::Education,
            data.education
                .iter()
                .any(|e| !e.degree.trim().is_empty() && !e.institution.trim().is_empty()),
            "Add at least one degree with its institution",
        ),
        (
            "Skills",
            ResumeStep::Skills,
            skills_complete(&data.skills),
            "Add at least one technical or soft skill",
        ),
    ];

    let sections: Vec<SectionCheck> = checks
        .iter()
        .map(|(label, step, complete, recommendation)| SectionCheck {
            label: label.to_string(),
            step: *step,
            status: if *complete {
                SectionStatus::Complete
            } else {
                SectionStatus::Incomplete
            },
            recommendation: (!complete).then(|| recommendation.to_string()),
        })
        .collect();

    let completed_sections = sections
        .iter()
        .filter(|s| s.status == SectionStatus::Complete)
        .count();
    let total_sections = sections.len();

    CompletenessReport {
        completion_percentage: completed_sections as f64 / total_sections as f64 * 100.0,
        sections,
        completed_sections,
        total_sections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Experience, SkillKind};

    #[test]
    fn test_empty_document_is_zero_percent() {
        let report = compute_completeness_report(&ResumeData::default());
        assert_eq!(report.completed_sections, 0);
        assert_eq!(report.total_sections, 5);
        assert_eq!(report.completion_percentage, 0.0);
        assert!(report.sections.iter().all(|s| s.recommendation.is_some()));
    }

    #[test]
    fn test_experience_needs_title_and_company() {
        let mut data = ResumeData::default();
        data.experience.push(Experience {
            job_title: "Engineer".to_string(),
            ..Default::default()
        });
        let report = compute_completeness_report(&data);
        assert_eq!(report.sections[2].status, SectionStatus::Incomplete);

        data.experience[0].company = "Acme".to_string();
        let report = compute_completeness_report(&data);
        assert_eq!(report.sections[2].status, SectionStatus::Complete);
        assert_eq!(report.sections[2].step, ResumeStep::Experience);
    }

    #[test]
    fn test_partial_completion_percentage() {
        let mut data = ResumeData::default();
        data.skills.add(SkillKind::Technical, "Rust");
        data.objective = "o".repeat(60);
        let report = compute_completeness_report(&data);
        assert_eq!(report.completed_sections, 2);
        assert_eq!(report.completion_percentage, 40.0);
    }
}
