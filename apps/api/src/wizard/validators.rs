//! Per-step gates on forward navigation. Pure functions of the document.

use crate::models::resume::{PersonalInfo, ResumeData, Skills};
use crate::wizard::step::ResumeStep;

/// Minimum objective length, counted in characters.
pub const MIN_OBJECTIVE_CHARS: usize = 50;

pub fn can_proceed(step: ResumeStep, data: &ResumeData) -> bool {
    match step {
        ResumeStep::Personal => personal_complete(&data.personal_info),
        ResumeStep::Objective => objective_complete(&data.objective),
        ResumeStep::Skills => skills_complete(&data.skills),
        // List steps have no minimum entry count.
        ResumeStep::Experience
        | ResumeStep::Education
        | ResumeStep::Projects
        | ResumeStep::Certifications
        | ResumeStep::Review => true,
    }
}

pub fn personal_complete(info: &PersonalInfo) -> bool {
    [&info.full_name, &info.email, &info.phone, &info.location]
        .iter()
        .all(|field| !field.trim().is_empty())
}

pub fn objective_complete(objective: &str) -> bool {
    objective.chars().count() >= MIN_OBJECTIVE_CHARS
}

pub fn skills_complete(skills: &Skills) -> bool {
    !skills.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::SkillKind;
    use crate::wizard::step::STEPS;

    fn jane() -> PersonalInfo {
        PersonalInfo {
            full_name: "Jane Doe".to_string(),
            email: "jane@x.com".to_string(),
            phone: "555-0100".to_string(),
            location: "NYC".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_personal_requires_all_contact_fields() {
        assert!(personal_complete(&jane()));
        for blank in 0..4 {
            let mut info = jane();
            match blank {
                0 => info.full_name = "  ".to_string(),
                1 => info.email.clear(),
                2 => info.phone.clear(),
                _ => info.location.clear(),
            }
            assert!(!personal_complete(&info));
        }
    }

    #[test]
    fn test_objective_length_boundary() {
        assert!(!objective_complete(&"a".repeat(49)));
        assert!(objective_complete(&"a".repeat(50)));
        // Content is irrelevant, whitespace counts.
        assert!(objective_complete(&" ".repeat(50)));
    }

    #[test]
    fn test_objective_counts_characters_not_bytes() {
        assert!(!objective_complete(&"é".repeat(49)));
        assert!(objective_complete(&"é".repeat(50)));
    }

    #[test]
    fn test_skills_need_one_entry_in_either_list() {
        let mut skills = Skills::default();
        assert!(!skills_complete(&skills));
        skills.add(SkillKind::Soft, "Mentoring");
        assert!(skills_complete(&skills));
    }

    #[test]
    fn test_list_steps_always_pass_on_empty_document() {
        let data = ResumeData::default();
        let passing: Vec<_> = STEPS.iter().filter(|s| can_proceed(**s, &data)).collect();
        assert_eq!(
            passing,
            vec![
                &ResumeStep::Experience,
                &ResumeStep::Education,
                &ResumeStep::Projects,
                &ResumeStep::Certifications,
                &ResumeStep::Review,
            ]
        );
    }
}
