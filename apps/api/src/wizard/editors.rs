//! Slice edits performed by the step editors: adding, removing and updating
//! list items and their string sub-lists.

use crate::models::resume::{
    generate_id, Certification, Education, Experience, Project, ResumeData,
};

/// List records addressed by their generated id.
pub trait Identified {
    fn id(&self) -> &str;
}

macro_rules! identified {
    ($($ty:ty),*) => {
        $(impl Identified for $ty {
            fn id(&self) -> &str {
                &self.id
            }
        })*
    };
}

identified!(Experience, Education, Project, Certification);

/// Which list section of the document an add/remove targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListSection {
    Experience,
    Education,
    Projects,
    Certifications,
}

fn new_id<T: Identified>(items: &[T]) -> String {
    generate_id(items.iter().map(|i| i.id()))
}

/// Appends a blank item to the section and returns its id.
pub fn add_item(data: &mut ResumeData, section: ListSection) -> String {
    match section {
        ListSection::Experience => {
            let id = new_id(&data.experience);
            data.experience.push(Experience::new_blank(id.clone()));
            id
        }
        ListSection::Education => {
            let id = new_id(&data.education);
            data.education.push(Education::new_blank(id.clone()));
            id
        }
        ListSection::Projects => {
            let id = new_id(&data.projects);
            data.projects.push(Project::new_blank(id.clone()));
            id
        }
        ListSection::Certifications => {
            let id = new_id(&data.certifications);
            data.certifications
                .push(Certification::new_blank(id.clone()));
            id
        }
    }
}

/// Removes the item with `id`. Returns false when no item matched.
pub fn remove_item(data: &mut ResumeData, section: ListSection, id: &str) -> bool {
    match section {
        ListSection::Experience => remove_by_id(&mut data.experience, id),
        ListSection::Education => remove_by_id(&mut data.education, id),
        ListSection::Projects => remove_by_id(&mut data.projects, id),
        ListSection::Certifications => remove_by_id(&mut data.certifications, id),
    }
}

pub fn remove_by_id<T: Identified>(items: &mut Vec<T>, id: &str) -> bool {
    let before = items.len();
    items.retain(|item| item.id() != id);
    items.len() != before
}

pub fn find_mut<'a, T: Identified>(items: &'a mut [T], id: &str) -> Option<&'a mut T> {
    items.iter_mut().find(|item| item.id() == id)
}

pub fn find<'a, T: Identified>(items: &'a [T], id: &str) -> Option<&'a T> {
    items.iter().find(|item| item.id() == id)
}

/// Removes a row from a bullet list, keeping at least one row.
pub fn remove_row(rows: &mut Vec<String>, index: usize) -> bool {
    if rows.len() <= 1 || index >= rows.len() {
        return false;
    }
    rows.remove(index);
    true
}

/// Replaces the row at `index`, or appends when `index` is past the end.
pub fn set_row(rows: &mut Vec<String>, index: usize, value: String) {
    match rows.get_mut(index) {
        Some(row) => *row = value,
        None => rows.push(value),
    }
}

/// Merges generated bullets into existing rows: blank rows are filled first,
/// remaining bullets are appended. Bullets already present are skipped.
pub fn merge_generated(rows: &mut Vec<String>, generated: &[String]) -> usize {
    let mut added = 0;
    for bullet in generated {
        if rows.iter().any(|r| r == bullet) {
            continue;
        }
        match rows.iter_mut().find(|r| r.trim().is_empty()) {
            Some(blank) => *blank = bullet.clone(),
            None => rows.push(bullet.clone()),
        }
        added += 1;
    }
    added
}

/// Adds a technology to a project unless it is blank or already listed.
pub fn add_technology(project: &mut Project, tech: &str) -> bool {
    let tech = tech.trim();
    if tech.is_empty() || project.technologies.iter().any(|t| t == tech) {
        return false;
    }
    project.technologies.push(tech.to_string());
    true
}

/// Replaces a project's technologies from comma-separated input.
pub fn set_technologies_from_csv(project: &mut Project, csv: &str) {
    project.technologies = csv
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
}

pub fn non_blank(rows: &[String]) -> Vec<&str> {
    rows.iter()
        .map(String::as_str)
        .filter(|r| !r.trim().is_empty())
        .collect()
}
