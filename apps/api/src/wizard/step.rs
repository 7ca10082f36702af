use std::fmt;

use serde::{Deserialize, Serialize};

/// One page of the wizard. Declaration order is navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumeStep {
    Personal,
    Objective,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Review,
}

pub const STEPS: [ResumeStep; 8] = [
    ResumeStep::Personal,
    ResumeStep::Objective,
    ResumeStep::Experience,
    ResumeStep::Education,
    ResumeStep::Skills,
    ResumeStep::Projects,
    ResumeStep::Certifications,
    ResumeStep::Review,
];

impl ResumeStep {
    pub fn index(self) -> usize {
        STEPS.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn next(self) -> Option<ResumeStep> {
        STEPS.get(self.index() + 1).copied()
    }

    pub fn previous(self) -> Option<ResumeStep> {
        self.index().checked_sub(1).map(|i| STEPS[i])
    }

    pub fn is_first(self) -> bool {
        self.index() == 0
    }

    pub fn is_last(self) -> bool {
        self.index() == STEPS.len() - 1
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResumeStep::Personal => "personal",
            ResumeStep::Objective => "objective",
            ResumeStep::Experience => "experience",
            ResumeStep::Education => "education",
            ResumeStep::Skills => "skills",
            ResumeStep::Projects => "projects",
            ResumeStep::Certifications => "certifications",
            ResumeStep::Review => "review",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ResumeStep::Personal => "Personal Info",
            ResumeStep::Objective => "Objective",
            ResumeStep::Experience => "Experience",
            ResumeStep::Education => "Education",
            ResumeStep::Skills => "Skills",
            ResumeStep::Projects => "Projects",
            ResumeStep::Certifications => "Certifications",
            ResumeStep::Review => "Review",
        }
    }

    pub fn parse(raw: &str) -> Option<ResumeStep> {
        STEPS.iter().copied().find(|s| s.as_str() == raw)
    }

    /// Percentage of the way through the wizard, 0 on the first step and 100 on the last.
    pub fn progress_percent(self) -> u8 {
        let last = (STEPS.len() - 1) as f64;
        let pct = (self.index() as f64 / last * 100.0).round();
        pct.clamp(0.0, 100.0) as u8
    }
}

impl fmt::Display for ResumeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_order() {
        assert_eq!(ResumeStep::Personal.next(), Some(ResumeStep::Objective));
        assert_eq!(ResumeStep::Certifications.next(), Some(ResumeStep::Review));
        assert_eq!(ResumeStep::Review.next(), None);
        assert_eq!(ResumeStep::Personal.previous(), None);
        assert_eq!(ResumeStep::Objective.previous(), Some(ResumeStep::Personal));
    }

    #[test]
    fn test_parse_round_trips_every_step() {
        for step in STEPS {
            assert_eq!(ResumeStep::parse(step.as_str()), Some(step));
        }
        assert_eq!(ResumeStep::parse("summary"), None);
    }

    #[test]
    fn test_progress_percent_bounds() {
        assert_eq!(ResumeStep::Personal.progress_percent(), 0);
        assert_eq!(ResumeStep::Skills.progress_percent(), 57);
        assert_eq!(ResumeStep::Review.progress_percent(), 100);
    }

    #[test]
    fn test_serde_uses_snake_case_names() {
        let json = serde_json::to_string(&ResumeStep::Certifications).unwrap();
        assert_eq!(json, "\"certifications\"");
    }
}
