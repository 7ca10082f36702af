use chrono::Utc;
use serde::{Deserialize, Serialize};

/// The full resume draft. Field names match the stored JSON document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeData {
    pub personal_info: PersonalInfo,
    pub objective: String,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Skills,
    pub projects: Vec<Project>,
    pub certifications: Vec<Certification>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(rename = "linkedIn", skip_serializing_if = "Option::is_none")]
    pub linked_in: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub id: String,
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub id: String,
    pub degree: String,
    pub institution: String,
    pub graduation_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevant_courses: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    pub technical: Vec<String>,
    pub soft: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Certification {
    pub id: String,
    pub name: String,
    pub issuer: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Which of the two skill lists an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillKind {
    Technical,
    Soft,
}

impl SkillKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "technical" => Some(SkillKind::Technical),
            "soft" => Some(SkillKind::Soft),
            _ => None,
        }
    }
}

impl Skills {
    pub fn list(&self, kind: SkillKind) -> &[String] {
        match kind {
            SkillKind::Technical => &self.technical,
            SkillKind::Soft => &self.soft,
        }
    }

    fn list_mut(&mut self, kind: SkillKind) -> &mut Vec<String> {
        match kind {
            SkillKind::Technical => &mut self.technical,
            SkillKind::Soft => &mut self.soft,
        }
    }

    /// Adds a trimmed skill to the given list.
    /// Returns false (and changes nothing) for blank input or a value already present.
    pub fn add(&mut self, kind: SkillKind, skill: &str) -> bool {
        let skill = skill.trim();
        if skill.is_empty() {
            return false;
        }
        let list = self.list_mut(kind);
        if list.iter().any(|s| s == skill) {
            return false;
        }
        list.push(skill.to_string());
        true
    }

    /// Removes every occurrence of `skill` from the given list.
    pub fn remove(&mut self, kind: SkillKind, skill: &str) -> bool {
        let list = self.list_mut(kind);
        let before = list.len();
        list.retain(|s| s != skill);
        list.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.technical.is_empty() && self.soft.is_empty()
    }

    /// Technical then soft skills, in insertion order.
    pub fn all(&self) -> Vec<String> {
        self.technical.iter().chain(self.soft.iter()).cloned().collect()
    }
}

/// Generates a timestamp-based identifier that is unique among `existing`.
pub fn generate_id<'a, I>(existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let taken: Vec<&str> = existing.into_iter().collect();
    let mut candidate = Utc::now().timestamp_millis();
    loop {
        let id = candidate.to_string();
        if !taken.contains(&id.as_str()) {
            return id;
        }
        candidate += 1;
    }
}

impl Experience {
    pub fn new_blank(id: String) -> Self {
        Self {
            id,
            responsibilities: vec![String::new()],
            ..Default::default()
        }
    }
}

impl Education {
    pub fn new_blank(id: String) -> Self {
        Self {
            id,
            relevant_courses: Some(Vec::new()),
            ..Default::default()
        }
    }
}

impl Project {
    pub fn new_blank(id: String) -> Self {
        Self {
            id,
            link: Some(String::new()),
            highlights: vec![String::new()],
            ..Default::default()
        }
    }
}

impl Certification {
    pub fn new_blank(id: String) -> Self {
        Self {
            id,
            link: Some(String::new()),
            ..Default::default()
        }
    }
}
