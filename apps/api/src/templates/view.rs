//! Flattens a [`ResumeData`] into what the template prints: blank entries
//! dropped, dates formatted, and only non-empty sections listed.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::resume::{Certification, Education, Experience, Project, ResumeData};
use crate::templates::theme::{HeadingCase, Section, Theme};

#[derive(Debug, Serialize)]
pub struct SectionView {
    pub key: &'static str,
    pub heading: String,
}

#[derive(Debug, Serialize)]
pub struct ExperienceView {
    pub title: String,
    pub company: String,
    pub location: String,
    pub dates: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct EducationView {
    pub degree: String,
    pub institution: String,
    pub date: String,
    pub gpa: Option<String>,
    pub courses: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ProjectView {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub link: Option<String>,
    pub highlights: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CertificationView {
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub link: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResumeView {
    pub name: String,
    /// Non-blank contact parts in display order.
    pub contact: Vec<String>,
    pub sections: Vec<SectionView>,
    pub objective: String,
    pub experience: Vec<ExperienceView>,
    pub education: Vec<EducationView>,
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub projects: Vec<ProjectView>,
    pub certifications: Vec<CertificationView>,
}

/// "2021-03" → "Mar 2021". Full dates are accepted too; anything else is
/// printed as entered.
pub fn format_month(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d"))
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

pub fn format_range(start: &str, end: &str, current: bool) -> String {
    let start = format_month(start);
    let end = if current {
        "Present".to_string()
    } else {
        format_month(end)
    };
    match (start.is_empty(), end.is_empty()) {
        (false, false) => format!("{start} - {end}"),
        (false, true) => start,
        (true, _) => end,
    }
}

fn trimmed(value: &str) -> String {
    value.trim().to_string()
}

fn rows(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// A URL safe to put in `href`: http(s) links as given, bare hosts such as
/// `github.com/jane` with `https://` prefixed. Any other scheme is dropped.
fn link(value: &Option<String>) -> Option<String> {
    let url = optional(value)?;
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Some(url)
    } else if url.contains(':') {
        None
    } else {
        Some(format!("https://{url}"))
    }
}

fn experience_view(exp: &Experience) -> Option<ExperienceView> {
    let view = ExperienceView {
        title: trimmed(&exp.job_title),
        company: trimmed(&exp.company),
        location: trimmed(&exp.location),
        dates: format_range(&exp.start_date, &exp.end_date, exp.current),
        bullets: rows(&exp.responsibilities),
    };
    let blank = view.title.is_empty() && view.company.is_empty() && view.bullets.is_empty();
    (!blank).then_some(view)
}

fn education_view(edu: &Education) -> Option<EducationView> {
    let view = EducationView {
        degree: trimmed(&edu.degree),
        institution: trimmed(&edu.institution),
        date: format_month(&edu.graduation_date),
        gpa: optional(&edu.gpa),
        courses: edu.relevant_courses.as_deref().map(rows).unwrap_or_default(),
    };
    let blank = view.degree.is_empty() && view.institution.is_empty();
    (!blank).then_some(view)
}

fn project_view(project: &Project) -> Option<ProjectView> {
    let view = ProjectView {
        name: trimmed(&project.name),
        description: trimmed(&project.description),
        technologies: rows(&project.technologies),
        link: link(&project.link),
        highlights: rows(&project.highlights),
    };
    let blank = view.name.is_empty() && view.description.is_empty() && view.highlights.is_empty();
    (!blank).then_some(view)
}

fn certification_view(cert: &Certification) -> Option<CertificationView> {
    let view = CertificationView {
        name: trimmed(&cert.name),
        issuer: trimmed(&cert.issuer),
        date: format_month(&cert.date),
        link: link(&cert.link),
    };
    (!view.name.is_empty()).then_some(view)
}

impl ResumeView {
    pub fn build(data: &ResumeData, theme: &Theme) -> Self {
        let info = &data.personal_info;
        let contact = [
            Some(info.email.clone()),
            Some(info.phone.clone()),
            Some(info.location.clone()),
            info.linked_in.clone(),
            info.github.clone(),
            info.portfolio.clone(),
        ]
        .into_iter()
        .flatten()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();

        let mut view = ResumeView {
            name: trimmed(&info.full_name),
            contact,
            sections: Vec::new(),
            objective: trimmed(&data.objective),
            experience: data.experience.iter().filter_map(experience_view).collect(),
            education: data.education.iter().filter_map(education_view).collect(),
            technical_skills: rows(&data.skills.technical),
            soft_skills: rows(&data.skills.soft),
            projects: data.projects.iter().filter_map(project_view).collect(),
            certifications: data.certifications.iter().filter_map(certification_view).collect(),
        };

        view.sections = theme
            .section_order
            .iter()
            .filter(|s| view.has_content(**s))
            .map(|s| SectionView {
                key: s.key(),
                heading: match theme.heading_case {
                    HeadingCase::Upper => s.heading().to_uppercase(),
                    HeadingCase::Title => s.heading().to_string(),
                },
            })
            .collect();
        view
    }

    fn has_content(&self, section: Section) -> bool {
        match section {
            Section::Objective => !self.objective.is_empty(),
            Section::Experience => !self.experience.is_empty(),
            Section::Education => !self.education.is_empty(),
            Section::Skills => !self.technical_skills.is_empty() || !self.soft_skills.is_empty(),
            Section::Projects => !self.projects.is_empty(),
            Section::Certifications => !self.certifications.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::theme::TemplateKind;

    #[test]
    fn test_links_keep_only_web_urls() {
        let some = |v: &str| Some(v.to_string());
        assert_eq!(link(&some(" https://x.dev/a ")), some("https://x.dev/a"));
        assert_eq!(link(&some("HTTP://x.dev")), some("HTTP://x.dev"));
        assert_eq!(link(&some("github.com/jane")), some("https://github.com/jane"));
        assert_eq!(link(&some("javascript:alert(1)")), None);
        assert_eq!(link(&some(" JavaScript:alert(1)")), None);
        assert_eq!(link(&some("data:text/html,hi")), None);
        assert_eq!(link(&some("  ")), None);
        assert_eq!(link(&None), None);
    }

    #[test]
    fn test_format_month() {
        assert_eq!(format_month("2021-03"), "Mar 2021");
        assert_eq!(format_month("2019-12-01"), "Dec 2019");
        assert_eq!(format_month(""), "");
        assert_eq!(format_month("Spring 2020"), "Spring 2020");
    }

    #[test]
    fn test_format_range() {
        assert_eq!(format_range("2020-01", "2022-06", false), "Jan 2020 - Jun 2022");
        assert_eq!(format_range("2020-01", "2022-06", true), "Jan 2020 - Present");
        assert_eq!(format_range("2020-01", "", false), "Jan 2020");
        assert_eq!(format_range("", "", false), "");
    }

    #[test]
    fn test_blank_entries_and_sections_are_dropped() {
        let mut data = ResumeData::default();
        data.experience.push(Experience::new_blank("1".to_string()));
        data.education.push(Education::new_blank("2".to_string()));
        data.skills.technical.push("Rust".to_string());

        let view = ResumeView::build(&data, &TemplateKind::Minimal.theme());
        assert!(view.experience.is_empty());
        assert!(view.education.is_empty());
        let keys: Vec<_> = view.sections.iter().map(|s| s.key).collect();
        assert_eq!(keys, vec!["skills"]);
    }

    #[test]
    fn test_contact_skips_blank_parts() {
        let mut data = ResumeData::default();
        data.personal_info.email = "jane@x.com".to_string();
        data.personal_info.github = Some("  ".to_string());
        data.personal_info.location = "NYC".to_string();
        let view = ResumeView::build(&data, &TemplateKind::Professional.theme());
        assert_eq!(view.contact, vec!["jane@x.com", "NYC"]);
    }

    #[test]
    fn test_heading_case_follows_theme() {
        let data = ResumeData {
            objective: "Build things".to_string(),
            ..Default::default()
        };
        let upper = ResumeView::build(&data, &TemplateKind::Professional.theme());
        assert_eq!(upper.sections[0].heading, "PROFESSIONAL SUMMARY");
        let title = ResumeView::build(&data, &TemplateKind::Modern.theme());
        assert_eq!(title.sections[0].heading, "Professional Summary");
    }
}
