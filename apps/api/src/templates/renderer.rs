use anyhow::{Context as _, Result};
use tera::{Context, Tera};

use crate::models::resume::ResumeData;
use crate::templates::theme::TemplateKind;
use crate::templates::view::ResumeView;

const TEMPLATE_NAME: &str = "resume.html";
const TEMPLATE_SOURCE: &str = include_str!("resume.html");

/// Renders a draft to a standalone HTML page. The `.html` template name keeps
/// Tera's auto-escaping on for everything the user typed.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, TEMPLATE_SOURCE)
            .context("Failed to parse resume template")?;
        Ok(Self { tera })
    }

    pub fn render(&self, kind: TemplateKind, data: &ResumeData) -> Result<String> {
        let theme = kind.theme();
        let view = ResumeView::build(data, &theme);

        let mut ctx = Context::new();
        ctx.insert("template_id", kind.id());
        ctx.insert("theme", &theme);
        ctx.insert("resume", &view);

        self.tera
            .render(TEMPLATE_NAME, &ctx)
            .with_context(|| format!("Failed to render '{}' template", kind.id()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Education, Experience, Project, SkillKind};

    fn sample() -> ResumeData {
        let mut data = ResumeData::default();
        data.personal_info.full_name = "Jane Doe".to_string();
        data.personal_info.email = "jane@x.com".to_string();
        data.objective = "Backend engineer focused on reliable systems.".to_string();
        let mut exp = Experience::new_blank("1".to_string());
        exp.job_title = "Engineer".to_string();
        exp.company = "Acme".to_string();
        exp.start_date = "2021-03".to_string();
        exp.current = true;
        exp.responsibilities = vec!["Led A".to_string(), " ".to_string()];
        data.experience.push(exp);
        data.skills.add(SkillKind::Technical, "Rust");
        data
    }

    #[test]
    fn test_every_theme_renders_empty_document() {
        let renderer = Renderer::new().unwrap();
        for kind in TemplateKind::ALL {
            let html = renderer.render(kind, &ResumeData::default()).unwrap();
            assert!(html.contains("<!DOCTYPE html>"));
            let lower = html.to_lowercase();
            assert!(!lower.contains("education"), "{kind:?} printed an empty section");
            assert!(!lower.contains("<section"), "{kind:?} printed an empty section");
        }
    }

    #[test]
    fn test_filled_sections_render_with_dates() {
        let renderer = Renderer::new().unwrap();
        let html = renderer.render(TemplateKind::Modern, &sample()).unwrap();
        assert!(html.contains("Jane Doe"));
        assert!(html.contains("Work Experience"));
        assert!(html.contains("Mar 2021 - Present"));
        assert!(html.contains("<li>Led A</li>"));
        assert!(!html.contains("<li></li>"));
        assert!(!html.contains("Education"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let renderer = Renderer::new().unwrap();
        let mut data = sample();
        data.personal_info.full_name = "<script>alert(1)</script>".to_string();
        let html = renderer.render(TemplateKind::Classic, &data).unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_education_heading_appears_with_content() {
        let renderer = Renderer::new().unwrap();
        let mut data = ResumeData::default();
        let mut edu = Education::new_blank("e".to_string());
        edu.degree = "BSc Computer Science".to_string();
        edu.institution = "State University".to_string();
        data.education.push(edu);
        let html = renderer.render(TemplateKind::Executive, &data).unwrap();
        assert!(html.contains("EDUCATION"));
    }

    #[test]
    fn test_script_links_are_not_rendered() {
        let renderer = Renderer::new().unwrap();
        let mut data = ResumeData::default();
        let mut project = Project::new_blank("p".to_string());
        project.name = "Dashboard".to_string();
        project.link = Some("javascript:alert(1)".to_string());
        data.projects.push(project);
        let html = renderer.render(TemplateKind::Minimal, &data).unwrap();
        assert!(html.contains("Dashboard"));
        assert!(!html.contains("javascript:"));
        assert!(!html.contains("<a href"));
    }
}
