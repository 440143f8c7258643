//! Instruction text for the external writing-assistance step.
//!
//! Nothing here calls a model. The user copies the returned text into an AI
//! assistant of their choice and pastes the answer back into the form.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::dictionaries::{resolve_skill, skill_catalog};
use crate::models::cv::{is_h2a, VisaType};

const NO_SKILLS: &str = "None provided";
const EMPTY_TEXT: &str = "[empty]";
const NO_JOB_TITLE: &str = "[not provided]";

// ────────────────────────────────────────────────────────────────────────────
// Templates
// ────────────────────────────────────────────────────────────────────────────

pub const PROFILE_PROMPT_TEMPLATE: &str = "\
Rewrite the following profile for a {visa} resume (temporary work in the USA).\n\
\n\
PRIMARY SKILLS TO INCORPORATE: {skills}\n\
\n\
CURRENT TEXT (can be English or Portuguese):\n\
{current_text}\n\
\n\
INSTRUCTIONS:\n\
- Return ONLY in English (no explanations).\n\
- Keep it concise and resume-appropriate.\n\
- Highlight reliability, work ethic, safety awareness, teamwork, and attention to detail.\n\
- Use clear, simple wording suitable for H2 workers.\n\
- If the current text is weak or too short, improve it by adding realistic details aligned with the skills.\n\
FORMAT:\n\
- One paragraph (4–6 lines max).";

/// H2-A descriptions come back as 5–7 bullets.
pub const H2A_EXPERIENCE_PROMPT_TEMPLATE: &str = "\
Rewrite the following job description for a H2-A (agricultural) resume.\n\
\n\
JOB TITLE: {job_title}\n\
RELEVANT SKILLS TO USE: {skills}\n\
\n\
CURRENT TEXT (can be English or Portuguese):\n\
{current_text}\n\
\n\
INSTRUCTIONS:\n\
- Return ONLY in English (no explanations).\n\
- Output MUST be 5–7 bullet points.\n\
- Each bullet 1–2 lines, starting with a strong past-tense action verb (e.g., Operated, Maintained, Harvested, Planted, Monitored, Repaired, Installed, Managed, Conducted).\n\
- Base tasks on the selected skills; add typical farm duties when reasonable (safety, efficiency, equipment, cleaning/maintenance).\n\
FORMAT (exactly like this):\n\
• Bullet 1...\n\
• Bullet 2...\n\
• Bullet 3...";

/// H2-B descriptions come back as short paragraphs, never bullets.
pub const H2B_EXPERIENCE_PROMPT_TEMPLATE: &str = "\
Rewrite the following job description for a H2-B (non-agricultural) resume.\n\
\n\
JOB TITLE: {job_title}\n\
RELEVANT SKILLS TO USE: {skills}\n\
\n\
CURRENT TEXT (can be English or Portuguese):\n\
{current_text}\n\
\n\
INSTRUCTIONS:\n\
- Return ONLY in English (no explanations).\n\
- Output as 1 paragraph (or at most 2 short paragraphs).\n\
- Max 4–5 lines.\n\
- Use past-tense action verbs (Performed, Maintained, Assisted, Organized, Handled, Supported, Ensured).\n\
- Base tasks on the selected skills; add realistic duties aligned with the role when reasonable.\n\
- No bullet points.";

// ────────────────────────────────────────────────────────────────────────────
// Inputs
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct ProfilePromptInput<'a> {
    pub visa_type: Option<VisaType>,
    pub skills: &'a [String],
    pub profile_text: &'a str,
}

#[derive(Debug, Clone, Copy)]
pub struct ExperiencePromptInput<'a> {
    pub visa_type: Option<VisaType>,
    pub job_title: &'a str,
    pub skills: &'a [String],
    pub description_text: &'a str,
}

// ────────────────────────────────────────────────────────────────────────────
// Builders
// ────────────────────────────────────────────────────────────────────────────

/// "H2-A" for H2-A, "H2-B" for everything else.
pub fn normalize_visa_type(visa_type: Option<VisaType>) -> &'static str {
    if is_h2a(visa_type) {
        VisaType::H2A.display()
    } else {
        VisaType::H2B.display()
    }
}

/// Comma-separated English skill values. Unknown ids pass through as-is.
pub fn format_skills(skills: &[String], visa_type: Option<VisaType>) -> String {
    if skills.is_empty() {
        return NO_SKILLS.to_string();
    }
    let catalog = skill_catalog(visa_type);
    skills
        .iter()
        .map(|id| resolve_skill(catalog, id))
        .collect::<Vec<_>>()
        .join(", ")
}

fn or_placeholder<'a>(text: &'a str, placeholder: &'a str) -> &'a str {
    if text.is_empty() {
        placeholder
    } else {
        text
    }
}

fn placeholder_pattern() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\{([a-z_]+)\}").expect("static placeholder pattern compiles")
    })
}

/// Fills every `{name}` in `template` in a single pass. Substituted values are
/// never scanned again; names `value_of` does not know stay as written.
fn fill(template: &str, value_of: impl Fn(&str) -> Option<String>) -> String {
    placeholder_pattern()
        .replace_all(template, |caps: &Captures| {
            value_of(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .trim()
        .to_string()
}

pub fn build_profile_prompt(input: &ProfilePromptInput<'_>) -> String {
    fill(PROFILE_PROMPT_TEMPLATE, |name| match name {
        "visa" => Some(normalize_visa_type(input.visa_type).to_string()),
        "skills" => Some(format_skills(input.skills, input.visa_type)),
        "current_text" => Some(or_placeholder(input.profile_text, EMPTY_TEXT).to_string()),
        _ => None,
    })
}

pub fn build_experience_prompt(input: &ExperiencePromptInput<'_>) -> String {
    let (template, skills) = if is_h2a(input.visa_type) {
        (
            H2A_EXPERIENCE_PROMPT_TEMPLATE,
            format_skills(input.skills, input.visa_type),
        )
    } else {
        // The paragraph branch resolves against the default (H2-B) catalogue
        // without looking at the visa type.
        (H2B_EXPERIENCE_PROMPT_TEMPLATE, format_skills(input.skills, None))
    };

    fill(template, |name| match name {
        "skills" => Some(skills.clone()),
        "job_title" => Some(or_placeholder(input.job_title, NO_JOB_TITLE).to_string()),
        "current_text" => Some(or_placeholder(input.description_text, EMPTY_TEXT).to_string()),
        _ => None,
    })
}
