//! Keyword library used by the objective editor and the skill suggestions.

use crate::models::resume::{SkillKind, Skills};

pub const KEYWORD_LIBRARY: &[&str] = &[
    "Full-stack development", "Frontend development", "Backend development", "Mobile development",
    "Web development", "Software engineering", "DevOps engineering", "Cloud architecture",
    "JavaScript", "TypeScript", "Python", "Java", "C++", "C#", "Go", "Rust", "PHP", "Ruby",
    "React", "Vue.js", "Angular", "Next.js", "Svelte", "HTML5", "CSS3", "SASS", "Tailwind CSS",
    "Bootstrap", "Material-UI", "Responsive design", "Progressive Web Apps",
    "Single Page Applications",
    "Node.js", "Express.js", "Django", "Flask", "Spring Boot", "ASP.NET", "Laravel",
    "Ruby on Rails", "FastAPI", "GraphQL", "RESTful APIs", "Microservices architecture",
    "Serverless computing",
    "MongoDB", "PostgreSQL", "MySQL", "Redis", "Elasticsearch", "DynamoDB", "Cassandra",
    "Database optimization", "Data modeling", "SQL optimization", "NoSQL databases",
    "AWS", "Azure", "Google Cloud Platform", "Docker", "Kubernetes", "Jenkins", "GitLab CI",
    "Terraform", "Ansible", "CI/CD pipelines", "Infrastructure as Code", "Container orchestration",
    "Cloud migration", "Scalable infrastructure", "Load balancing", "Auto-scaling",
    "Agile methodologies", "Scrum", "Kanban", "Test-driven development",
    "Behavior-driven development", "Code review", "Pair programming", "Clean code",
    "SOLID principles", "Design patterns", "Software architecture", "System design",
    "Performance optimization", "Security best practices",
    "Unit testing", "Integration testing", "End-to-end testing", "Jest", "Cypress", "Selenium",
    "Test automation", "Quality assurance", "Bug tracking", "Performance testing",
    "Machine Learning", "Artificial Intelligence", "Data Science", "Big Data", "Data Analytics",
    "TensorFlow", "PyTorch", "Pandas", "NumPy", "Apache Spark", "Hadoop", "ETL processes",
    "React Native", "Flutter", "iOS development", "Android development", "Swift", "Kotlin",
    "Cross-platform development", "Mobile UI/UX", "App Store optimization",
    "Cross-functional collaboration", "Team leadership", "Project management", "Mentoring",
    "Technical documentation", "Stakeholder communication", "Problem-solving",
    "Critical thinking", "Innovation", "Adaptability", "Time management", "Strategic planning",
    "E-commerce solutions", "Fintech applications", "Healthcare systems", "EdTech platforms",
    "SaaS applications", "Enterprise software", "Startup environment", "Digital transformation",
    "Cybersecurity", "Application security", "OAuth", "JWT", "Encryption", "HTTPS", "OWASP",
    "Penetration testing", "Security auditing", "Compliance standards",
    "Git", "GitHub", "GitLab", "Bitbucket", "Version control", "Code collaboration",
    "Open source contribution", "Technical leadership",
];

pub const POPULAR_TECHNICAL_SKILLS: &[&str] = &[
    "JavaScript", "Python", "React", "Node.js", "TypeScript", "Java", "C++", "SQL",
    "MongoDB", "PostgreSQL", "AWS", "Docker", "Kubernetes", "Git", "REST APIs",
    "GraphQL", "Express.js", "Spring Boot", "Django", "Flask", "Angular", "Vue.js",
    "Redux", "Jest", "Cypress", "Jenkins", "CI/CD", "Linux", "Microservices",
];

pub const POPULAR_SOFT_SKILLS: &[&str] = &[
    "Team Leadership", "Project Management", "Communication", "Problem Solving",
    "Critical Thinking", "Collaboration", "Adaptability", "Time Management",
    "Mentoring", "Agile Methodologies", "Scrum", "Cross-functional Collaboration",
    "Technical Writing", "Code Review", "Debugging", "System Design",
];

/// Library entries containing `term`, case-insensitively. A blank term
/// returns the whole library.
pub fn search_keywords(term: &str) -> Vec<&'static str> {
    let term = term.trim().to_lowercase();
    KEYWORD_LIBRARY
        .iter()
        .copied()
        .filter(|k| term.is_empty() || k.to_lowercase().contains(&term))
        .collect()
}

/// Library keywords mentioned in `text`.
///
/// A match must sit on word boundaries, so "Go" is found in "Go services"
/// but not in "good".
pub fn extract_keywords(text: &str) -> Vec<String> {
    let haystack = text.to_lowercase();
    KEYWORD_LIBRARY
        .iter()
        .filter(|k| contains_word(&haystack, &k.to_lowercase()))
        .map(|k| k.to_string())
        .collect()
}

fn contains_word(haystack: &str, needle: &str) -> bool {
    let is_word = |c: char| c.is_alphanumeric() || c == '+' || c == '#';
    haystack.match_indices(needle).any(|(start, _)| {
        let end = start + needle.len();
        let before = haystack[..start].chars().next_back();
        let after = haystack[end..].chars().next();
        !before.is_some_and(is_word) && !after.is_some_and(is_word)
    })
}

/// Concatenates keyword lists, keeping the first occurrence of each.
pub fn merge_unique<I>(lists: I) -> Vec<String>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut merged: Vec<String> = Vec::new();
    for keyword in lists.into_iter().flatten() {
        if !merged.contains(&keyword) {
            merged.push(keyword);
        }
    }
    merged
}

/// Appends a keyword to the objective text with a single separating space.
pub fn insert_keyword(text: &str, keyword: &str) -> String {
    if text.is_empty() {
        keyword.to_string()
    } else if text.ends_with(' ') {
        format!("{text}{keyword}")
    } else {
        format!("{text} {keyword}")
    }
}

/// Popular skills of `kind` not already in the document.
pub fn skill_suggestions(skills: &Skills, kind: SkillKind) -> Vec<&'static str> {
    let popular = match kind {
        SkillKind::Technical => POPULAR_TECHNICAL_SKILLS,
        SkillKind::Soft => POPULAR_SOFT_SKILLS,
    };
    let present = skills.list(kind);
    popular
        .iter()
        .copied()
        .filter(|s| !present.iter().any(|p| p == s))
        .collect()
}
