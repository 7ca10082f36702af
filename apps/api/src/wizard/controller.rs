//! The wizard controller: current step, completed steps and the document.
//!
//! Every document mutation is applied to a copy, persisted, and only then
//! committed, so a failed write (e.g. a revision conflict) leaves the
//! in-memory document untouched.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::generation::inflight::{InFlight, Ticket};
use crate::models::resume::{
    Certification, Education, Experience, PersonalInfo, Project, ResumeData, Skills,
};
use crate::storage::{load_typed, save_typed, DraftStore, StorageError, DATA_KEY, SKILLS_KEY};
use crate::wizard::step::{ResumeStep, STEPS};
use crate::wizard::validators;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvanceOutcome {
    Moved,
    Blocked,
    AtEnd,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardSnapshot {
    pub current_step: ResumeStep,
    pub step_label: &'static str,
    pub step_number: usize,
    pub total_steps: usize,
    pub progress_percent: u8,
    pub completed_steps: Vec<ResumeStep>,
    pub can_proceed: bool,
    pub is_first_step: bool,
    pub is_last_step: bool,
    pub revision: u64,
    pub document: ResumeData,
}

pub struct WizardController {
    store: Arc<dyn DraftStore>,
    current: ResumeStep,
    completed: BTreeSet<ResumeStep>,
    document: ResumeData,
    revision: u64,
    inflight: InFlight,
}

/// The stored document and its revision. A missing or unreadable draft yields
/// the empty document.
fn read_document(store: &dyn DraftStore) -> (ResumeData, u64) {
    match load_typed::<ResumeData>(store, DATA_KEY) {
        Ok(Some((document, revision))) => {
            info!("Restored saved draft (revision {revision})");
            (document, revision)
        }
        Ok(None) => (ResumeData::default(), 0),
        Err(e) => {
            warn!("Failed to load saved data: {e}");
            let revision = store
                .load(DATA_KEY)
                .ok()
                .flatten()
                .map(|env| env.revision)
                .unwrap_or(0);
            (ResumeData::default(), revision)
        }
    }
}

impl WizardController {
    /// Creates a controller, rehydrating the document from the store.
    /// A missing or unreadable draft starts from the empty document.
    pub fn load(store: Arc<dyn DraftStore>) -> Self {
        let (document, revision) = read_document(store.as_ref());
        Self {
            store,
            current: ResumeStep::Personal,
            completed: BTreeSet::new(),
            document,
            revision,
            inflight: InFlight::default(),
        }
    }

    pub fn document(&self) -> &ResumeData {
        &self.document
    }

    pub fn current_step(&self) -> ResumeStep {
        self.current
    }

    pub fn completed_steps(&self) -> &BTreeSet<ResumeStep> {
        &self.completed
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn can_proceed(&self) -> bool {
        validators::can_proceed(self.current, &self.document)
    }

    /// Moves forward one step when the current step validates.
    pub fn advance(&mut self) -> AdvanceOutcome {
        if !self.can_proceed() {
            debug!("Step '{}' incomplete, staying put", self.current);
            return AdvanceOutcome::Blocked;
        }
        match self.current.next() {
            Some(next) => {
                self.completed.insert(self.current);
                self.current = next;
                AdvanceOutcome::Moved
            }
            None => AdvanceOutcome::AtEnd,
        }
    }

    /// Moves back one step. Returns false on the first step.
    pub fn retreat(&mut self) -> bool {
        match self.current.previous() {
            Some(previous) => {
                self.current = previous;
                true
            }
            None => false,
        }
    }

    pub fn jump_to(&mut self, step: ResumeStep) {
        self.current = step;
    }

    pub fn snapshot(&self) -> WizardSnapshot {
        WizardSnapshot {
            current_step: self.current,
            step_label: self.current.label(),
            step_number: self.current.index() + 1,
            total_steps: STEPS.len(),
            progress_percent: self.current.progress_percent(),
            completed_steps: self.completed.iter().copied().collect(),
            can_proceed: self.can_proceed(),
            is_first_step: self.current.is_first(),
            is_last_step: self.current.is_last(),
            revision: self.revision,
            document: self.document.clone(),
        }
    }

    /// Applies `edit` to the document and persists the result.
    pub fn update<T, F>(&mut self, edit: F) -> Result<T, StorageError>
    where
        F: FnOnce(&mut ResumeData) -> T,
    {
        let mut next = self.document.clone();
        let out = edit(&mut next);
        if next == self.document {
            return Ok(out);
        }

        let skills_changed = next.skills != self.document.skills;
        self.revision = save_typed(self.store.as_ref(), DATA_KEY, &next, Some(self.revision))?;
        if skills_changed {
            save_typed(self.store.as_ref(), SKILLS_KEY, &next.skills, None)?;
        }
        self.document = next;
        Ok(out)
    }

    /// Replaces the in-memory document with whatever the store holds now.
    /// Used to recover from a write conflict.
    /// Re-reads the stored draft, with the same fallback as [`Self::load`].
    pub fn reload(&mut self) {
        let (document, revision) = read_document(self.store.as_ref());
        self.document = document;
        self.revision = revision;
    }

    pub fn set_personal_info(
        &mut self,
        info: PersonalInfo,
    ) -> Result<(), StorageError> {
        self.update(|d| d.personal_info = info)
    }

    pub fn set_objective(&mut self, objective: String) -> Result<(), StorageError> {
        self.update(|d| d.objective = objective)
    }

    pub fn set_experience(
        &mut self,
        experience: Vec<Experience>,
    ) -> Result<(), StorageError> {
        self.update(|d| d.experience = experience)
    }

    pub fn set_education(
        &mut self,
        education: Vec<Education>,
    ) -> Result<(), StorageError> {
        self.update(|d| d.education = education)
    }

    pub fn set_skills(&mut self, skills: Skills) -> Result<(), StorageError> {
        self.update(|d| d.skills = skills)
    }

    pub fn set_projects(
        &mut self,
        projects: Vec<Project>,
    ) -> Result<(), StorageError> {
        self.update(|d| d.projects = projects)
    }

    pub fn set_certifications(
        &mut self,
        certifications: Vec<Certification>,
    ) -> Result<(), StorageError> {
        self.update(|d| d.certifications = certifications)
    }

    pub fn begin_generation(&mut self, field: impl Into<String>) -> Ticket {
        self.inflight.begin(field)
    }

    /// Marks a generation request done. Returns true when its result is still
    /// the newest for the field and may be applied.
    pub fn finish_generation(&mut self, ticket: &Ticket) -> bool {
        let latest = self.inflight.finish(ticket);
        debug!(
            "Generation for '{}' finished, {} field(s) still pending",
            ticket.field(),
            self.inflight.pending()
        );
        if !latest {
            info!(
                "Discarding stale generation result for '{}'",
                ticket.field()
            );
        }
        latest
    }
}
