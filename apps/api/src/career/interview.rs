use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::career::cover_letter::split_skills;
use crate::generation::client::{InputType, RegenerateRequest, TextGenerator};

pub const MAX_QUESTIONS: usize = 15;
/// Generated lines this short are headings or noise, not questions.
const MIN_QUESTION_CHARS: usize = 10;
const GENERATED_TIPS: [&str; 3] = ["Use the STAR framework", "Be concise", "Mention impact"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Behavioral,
    #[default]
    Technical,
    Situational,
}

impl QuestionType {
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::Behavioral => "behavioral",
            QuestionType::Technical => "technical",
            QuestionType::Situational => "situational",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

const DIFFICULTY_CYCLE: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionSource {
    Generated,
    Builtin,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InterviewRequest {
    pub role: String,
    /// Comma-separated.
    pub skills: String,
    pub company: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
}

impl Default for InterviewRequest {
    fn default() -> Self {
        Self {
            role: "Software Engineer".to_string(),
            skills: "React, TypeScript, System Design".to_string(),
            company: "google".to_string(),
            question_type: QuestionType::Technical,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    pub id: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub company: String,
    pub question: String,
    pub tips: Vec<String>,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterviewSet {
    pub source: QuestionSource,
    pub questions: Vec<Question>,
}

struct BankEntry {
    id: &'static str,
    question_type: QuestionType,
    company: &'static str,
    question: &'static str,
    tips: [&'static str; 3],
    difficulty: Difficulty,
}

static QUESTION_BANK: [BankEntry; 5] = [
    BankEntry {
        id: "1",
        question_type: QuestionType::Behavioral,
        company: "google",
        question: "Tell me about a time when you had to work with a difficult team member. How did you handle the situation?",
        tips: [
            "Use the STAR method (Situation, Task, Action, Result)",
            "Focus on your actions and what you learned",
            "Show emotional intelligence and conflict resolution skills",
        ],
        difficulty: Difficulty::Medium,
    },
    BankEntry {
        id: "2",
        question_type: QuestionType::Technical,
        company: "google",
        question: "How would you design a system to handle 1 million concurrent users?",
        tips: [
            "Start with clarifying questions about requirements",
            "Discuss scalability, load balancing, and caching",
            "Consider database design and microservices architecture",
        ],
        difficulty: Difficulty::Hard,
    },
    BankEntry {
        id: "3",
        question_type: QuestionType::Situational,
        company: "google",
        question: "If you discovered a critical bug in production just before a major product launch, what would you do?",
        tips: [
            "Assess the severity and impact of the bug",
            "Communicate with stakeholders immediately",
            "Propose solutions with risk-benefit analysis",
        ],
        difficulty: Difficulty::Medium,
    },
    BankEntry {
        id: "4",
        question_type: QuestionType::Behavioral,
        company: "meta",
        question: "Describe a time when you had to learn a new technology quickly to complete a project.",
        tips: [
            "Highlight your learning methodology",
            "Show resourcefulness and adaptability",
            "Discuss the impact of your quick learning",
        ],
        difficulty: Difficulty::Easy,
    },
    BankEntry {
        id: "5",
        question_type: QuestionType::Technical,
        company: "amazon",
        question: "Explain the difference between SQL and NoSQL databases and when you would use each.",
        tips: [
            "Compare ACID properties vs. eventual consistency",
            "Discuss use cases for each type",
            "Mention specific examples like MySQL vs. MongoDB",
        ],
        difficulty: Difficulty::Medium,
    },
];

impl BankEntry {
    fn to_question(&self) -> Question {
        Question {
            id: self.id.to_string(),
            question_type: self.question_type,
            company: self.company.to_string(),
            question: self.question.to_string(),
            tips: self.tips.iter().map(|t| t.to_string()).collect(),
            difficulty: self.difficulty,
        }
    }
}

/// Built-in questions for a company and type. Falls back to every company's
/// questions of that type when the company has none.
pub fn builtin_questions(company: &str, question_type: QuestionType) -> Vec<Question> {
    let of_type = || QUESTION_BANK.iter().filter(move |q| q.question_type == question_type);
    let mut picked: Vec<Question> = of_type()
        .filter(|q| q.company.eq_ignore_ascii_case(company))
        .map(BankEntry::to_question)
        .collect();
    if picked.is_empty() {
        picked = of_type().map(BankEntry::to_question).collect();
    }
    picked
}

/// Question lines from a generated reply: split on newlines and bullets,
/// short fragments dropped.
pub fn split_questions(text: &str) -> Vec<String> {
    text.split(['\n', '•'])
        .map(str::trim)
        .filter(|t| t.chars().count() > MIN_QUESTION_CHARS)
        .take(MAX_QUESTIONS)
        .map(str::to_string)
        .collect()
}

fn context(req: &InterviewRequest) -> String {
    format!(
        "ROLE:{}; SKILLS:{}; COMPANY:{}; TYPE:{}",
        req.role,
        req.skills,
        req.company,
        req.question_type.as_str()
    )
}

/// Fetches up to fifteen generated questions, or the built-in set when the
/// generator fails or returns nothing usable.
pub async fn interview_questions(
    generator: &dyn TextGenerator,
    req: &InterviewRequest,
) -> InterviewSet {
    let request = RegenerateRequest::new(InputType::MockInterview, context(req))
        .with_keywords(split_skills(&req.skills))
        .with_experience_level("mid");

    let lines = match generator.generate(&request).await {
        Ok(generated) => split_questions(&generated.text),
        Err(e) => {
            warn!("Mock interview generation failed, using built-in questions: {e}");
            Vec::new()
        }
    };

    if lines.is_empty() {
        return InterviewSet {
            source: QuestionSource::Builtin,
            questions: builtin_questions(&req.company, req.question_type),
        };
    }

    info!("Generated {} mock interview questions", lines.len());
    let questions = lines
        .into_iter()
        .enumerate()
        .map(|(i, question)| Question {
            id: (i + 1).to_string(),
            question_type: req.question_type,
            company: req.company.clone(),
            question,
            tips: GENERATED_TIPS.iter().map(|t| t.to_string()).collect(),
            difficulty: DIFFICULTY_CYCLE[i % DIFFICULTY_CYCLE.len()],
        })
        .collect();
    InterviewSet {
        source: QuestionSource::Generated,
        questions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::testing::{FailingGenerator, StubGenerator};

    #[test]
    fn test_split_questions_filters_short_lines() {
        let text = "Questions:\n• How do you scale a write-heavy service?\n• Why?\n\n2. Describe a hard outage you handled.";
        assert_eq!(
            split_questions(text),
            vec![
                "How do you scale a write-heavy service?",
                "2. Describe a hard outage you handled."
            ]
        );
    }

    #[test]
    fn test_split_questions_caps_at_fifteen() {
        let text = (0..20)
            .map(|i| format!("Question number {i} about systems"))
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(split_questions(&text).len(), MAX_QUESTIONS);
    }

    #[tokio::test]
    async fn test_generated_questions_get_cycling_difficulty() {
        let generator = StubGenerator::new(
            "What is a race condition?\nHow does a B-tree index work?\nExplain consistent hashing.\nWhat is backpressure?",
        );
        let req = InterviewRequest {
            company: "meta".to_string(),
            question_type: QuestionType::Behavioral,
            ..Default::default()
        };
        let set = interview_questions(&generator, &req).await;
        assert_eq!(set.source, QuestionSource::Generated);
        assert_eq!(set.questions.len(), 4);
        assert_eq!(set.questions[0].id, "1");
        assert_eq!(set.questions[3].id, "4");
        let diffs: Vec<_> = set.questions.iter().map(|q| q.difficulty).collect();
        assert_eq!(
            diffs,
            vec![Difficulty::Easy, Difficulty::Medium, Difficulty::Hard, Difficulty::Easy]
        );
        assert!(set.questions.iter().all(|q| q.company == "meta"));
        assert!(set.questions.iter().all(|q| q.question_type == QuestionType::Behavioral));
        assert_eq!(set.questions[0].tips[0], "Use the STAR framework");

        let sent = generator.last_request().unwrap();
        assert_eq!(sent.input_type, "mock_interview");
        assert_eq!(
            sent.text,
            "ROLE:Software Engineer; SKILLS:React, TypeScript, System Design; COMPANY:meta; TYPE:behavioral"
        );
        assert_eq!(sent.keywords, vec!["React", "TypeScript", "System Design"]);
        assert_eq!(sent.experience_level.as_deref(), Some("mid"));
    }

    #[tokio::test]
    async fn test_failure_falls_back_to_builtin() {
        let set = interview_questions(&FailingGenerator, &InterviewRequest::default()).await;
        assert_eq!(set.source, QuestionSource::Builtin);
        assert_eq!(set.questions.len(), 1);
        assert_eq!(set.questions[0].difficulty, Difficulty::Hard);
        assert!(set.questions[0].question.contains("1 million concurrent users"));
    }

    #[tokio::test]
    async fn test_empty_reply_falls_back_to_builtin() {
        let generator = StubGenerator::new("ok\nfine");
        let req = InterviewRequest {
            company: "amazon".to_string(),
            ..Default::default()
        };
        let set = interview_questions(&generator, &req).await;
        assert_eq!(set.source, QuestionSource::Builtin);
        assert_eq!(set.questions[0].company, "amazon");
    }

    #[test]
    fn test_builtin_falls_back_to_other_companies() {
        let questions = builtin_questions("netflix", QuestionType::Behavioral);
        let ids: Vec<_> = questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
    }
}
