// Prompt templates for the regenerate endpoint, one per input type.

/// Builds the Gemini prompt for `input_type`. Unknown types send `text` as is.
pub fn construct_prompt(
    input_type: &str,
    text: &str,
    keywords: &[String],
    experience_level: Option<&str>,
) -> String {
    let keyword_text = if keywords.is_empty() {
        String::new()
    } else {
        format!("Incorporate these keywords seamlessly: {}.", keywords.join(", "))
    };
    let experience_text = match experience_level.map(str::trim) {
        Some(level) if !level.is_empty() => {
            format!("The candidate's experience level is {level}.")
        }
        _ => String::new(),
    };

    match input_type {
        "objective" => format!(
            "Act as an expert career coach and resume writer.
Rewrite the following professional objective to be concise, powerful, and ATS-friendly.
The rewritten objective should be a single paragraph, no more than 3-4 sentences.
It must be tailored for a tech industry role.
{experience_text}
{keyword_text}

Original Objective: \"{text}\"

Return only the rewritten objective text, without any introductory phrases."
        ),
        "experience" => format!(
            "Act as an expert technical resume writer.

IMPORTANT FORMATTING REQUIREMENTS:
- Create exactly 3-5 concise bullet points
- Each bullet point must be 1-2 sentences maximum (under 150 characters)
- Start each bullet point with a strong action verb
- Use the STAR method (Situation, Task, Action, Result)
- Include quantified achievements with specific metrics when possible
- Format as bullet points using the • symbol
- Each bullet point should be on a separate line

{experience_text}
{keyword_text}

Original Experience: \"{text}\"

Return ONLY the bullet points in this exact format:
• [First bullet point with action verb and quantified result]
• [Second bullet point with action verb and quantified result]
• [Third bullet point with action verb and quantified result]

Do not include any introductory text or explanations."
        ),
        "project_description" => format!(
            "Act as an expert technical resume writer and project portfolio specialist.

Create a professional, concise project description (2-3 sentences maximum, under 200 characters total).
Focus on the technical implementation, problem solved, and impact.

REQUIREMENTS:
- Start with what the project does/solves
- Mention key technologies used
- Include a quantifiable impact or technical achievement if possible
- Make it ATS-friendly and recruiter-readable

{keyword_text}

Project Context: \"{text}\"

Return only the project description, without any introductory phrases."
        ),
        "project_highlights" => format!(
            "Act as an expert technical resume writer.

Create exactly 3-4 professional project highlight bullet points based on the project context.

FORMATTING REQUIREMENTS:
- Each bullet point must be 1-2 sentences maximum (under 130 characters)
- Start with strong action verbs (Built, Implemented, Developed, Architected, etc.)
- Include specific technical details and quantified results when possible
- Format as bullet points using the • symbol
- Each bullet point should be on a separate line

{keyword_text}

Project Context: \"{text}\"

Return ONLY the bullet points, one per line, starting with •.
Do not include any introductory text or explanations."
        ),
        "cover_letter" => format!(
            "Act as an expert career coach writing a cover letter.

The context below is a list of KEY:value fields separated by semicolons
(ROLE, COMPANY, MANAGER, SOURCE, TONE, CANDIDATE, CURRENT_ROLE, EXPERIENCE, JOB_DESC).
Write a cover letter of 250-350 words in three to four paragraphs, addressed to the
hiring manager when one is given. Match the requested tone.
{experience_text}
{keyword_text}

Context: \"{text}\"

Return only the letter body, without any introductory phrases or placeholders."
        ),
        "mock_interview" => format!(
            "Act as an experienced technical interviewer.

The context below lists ROLE, SKILLS, COMPANY and TYPE separated by semicolons.
Write 10-15 interview questions of the requested type for that role and company.
Mix easy, medium and hard questions.
{keyword_text}

Context: \"{text}\"

Return ONLY the questions, one per line, each starting with •."
        ),
        _ => text.to_string(),
    }
}
