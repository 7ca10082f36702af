use serde::Serialize;

/// The seven resume designs. Every design is rendered by the same template;
/// only its [`Theme`] differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    #[default]
    Professional,
    Creative,
    Executive,
    Minimal,
    Tech,
    Classic,
    Modern,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Objective,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
}

impl Section {
    pub fn key(self) -> &'static str {
        match self {
            Section::Objective => "objective",
            Section::Experience => "experience",
            Section::Education => "education",
            Section::Skills => "skills",
            Section::Projects => "projects",
            Section::Certifications => "certifications",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            Section::Objective => "Professional Summary",
            Section::Experience => "Work Experience",
            Section::Education => "Education",
            Section::Skills => "Skills",
            Section::Projects => "Projects",
            Section::Certifications => "Certifications",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderAlign {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingCase {
    Upper,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillsLayout {
    Tags,
    Inline,
}

/// Visual settings for one design.
#[derive(Debug, Clone, Serialize)]
pub struct Theme {
    pub accent: &'static str,
    pub font_stack: &'static str,
    pub header_align: HeaderAlign,
    pub heading_case: HeadingCase,
    pub section_order: [Section; 6],
    pub skills_layout: SkillsLayout,
}

const STANDARD_ORDER: [Section; 6] = [
    Section::Objective,
    Section::Experience,
    Section::Education,
    Section::Skills,
    Section::Projects,
    Section::Certifications,
];

impl TemplateKind {
    pub const ALL: [TemplateKind; 7] = [
        TemplateKind::Professional,
        TemplateKind::Creative,
        TemplateKind::Executive,
        TemplateKind::Minimal,
        TemplateKind::Tech,
        TemplateKind::Classic,
        TemplateKind::Modern,
    ];

    pub fn id(self) -> &'static str {
        match self {
            TemplateKind::Professional => "professional",
            TemplateKind::Creative => "creative",
            TemplateKind::Executive => "executive",
            TemplateKind::Minimal => "minimal",
            TemplateKind::Tech => "tech",
            TemplateKind::Classic => "classic",
            TemplateKind::Modern => "modern",
        }
    }

    /// Accepts theme ids and the numbered ids older drafts stored.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let kind = match raw {
            "template1" => TemplateKind::Professional,
            "template2" => TemplateKind::Creative,
            "template3" => TemplateKind::Executive,
            "template4" => TemplateKind::Minimal,
            "template5" => TemplateKind::Tech,
            "template6" => TemplateKind::Classic,
            "template7" => TemplateKind::Modern,
            _ => return Self::ALL.into_iter().find(|k| k.id() == raw),
        };
        Some(kind)
    }

    pub fn name(self) -> &'static str {
        match self {
            TemplateKind::Professional => "Professional",
            TemplateKind::Creative => "Creative",
            TemplateKind::Executive => "Executive",
            TemplateKind::Minimal => "Minimal",
            TemplateKind::Tech => "Tech",
            TemplateKind::Classic => "Classic",
            TemplateKind::Modern => "Modern",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TemplateKind::Professional => "Clean, modern layout perfect for corporate roles.",
            TemplateKind::Creative => "Stand out with a unique, eye-catching design.",
            TemplateKind::Executive => "Sophisticated design for senior positions.",
            TemplateKind::Minimal => "Clean and simple design that focuses on content.",
            TemplateKind::Tech => "Modern template ideal for tech professionals.",
            TemplateKind::Classic => "Traditional layout trusted by professionals.",
            TemplateKind::Modern => "Contemporary design with clean aesthetics.",
        }
    }

    pub fn theme(self) -> Theme {
        match self {
            TemplateKind::Professional => Theme {
                accent: "#2563eb",
                font_stack: "'Helvetica Neue', Arial, sans-serif",
                header_align: HeaderAlign::Left,
                heading_case: HeadingCase::Upper,
                section_order: STANDARD_ORDER,
                skills_layout: SkillsLayout::Tags,
            },
            TemplateKind::Creative => Theme {
                accent: "#9333ea",
                font_stack: "'Poppins', 'Segoe UI', sans-serif",
                header_align: HeaderAlign::Center,
                heading_case: HeadingCase::Title,
                section_order: [
                    Section::Objective,
                    Section::Skills,
                    Section::Projects,
                    Section::Experience,
                    Section::Education,
                    Section::Certifications,
                ],
                skills_layout: SkillsLayout::Tags,
            },
            TemplateKind::Executive => Theme {
                accent: "#1f2937",
                font_stack: "Georgia, 'Times New Roman', serif",
                header_align: HeaderAlign::Center,
                heading_case: HeadingCase::Upper,
                section_order: [
                    Section::Objective,
                    Section::Experience,
                    Section::Education,
                    Section::Certifications,
                    Section::Skills,
                    Section::Projects,
                ],
                skills_layout: SkillsLayout::Inline,
            },
            TemplateKind::Minimal => Theme {
                accent: "#374151",
                font_stack: "'Inter', Arial, sans-serif",
                header_align: HeaderAlign::Left,
                heading_case: HeadingCase::Title,
                section_order: STANDARD_ORDER,
                skills_layout: SkillsLayout::Inline,
            },
            TemplateKind::Tech => Theme {
                accent: "#059669",
                font_stack: "'JetBrains Mono', 'Fira Code', monospace",
                header_align: HeaderAlign::Left,
                heading_case: HeadingCase::Upper,
                section_order: [
                    Section::Objective,
                    Section::Skills,
                    Section::Experience,
                    Section::Projects,
                    Section::Education,
                    Section::Certifications,
                ],
                skills_layout: SkillsLayout::Tags,
            },
            TemplateKind::Classic => Theme {
                accent: "#111827",
                font_stack: "'Times New Roman', Times, serif",
                header_align: HeaderAlign::Center,
                heading_case: HeadingCase::Upper,
                section_order: STANDARD_ORDER,
                skills_layout: SkillsLayout::Inline,
            },
            TemplateKind::Modern => Theme {
                accent: "#0ea5e9",
                font_stack: "'Segoe UI', Roboto, sans-serif",
                header_align: HeaderAlign::Left,
                heading_case: HeadingCase::Title,
                section_order: [
                    Section::Objective,
                    Section::Experience,
                    Section::Projects,
                    Section::Skills,
                    Section::Education,
                    Section::Certifications,
                ],
                skills_layout: SkillsLayout::Tags,
            },
        }
    }
}
