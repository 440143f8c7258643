//! Building blocks shared by the five renderers: placeholders, contact lines,
//! and the skills / languages / profile / experience sections.

use crate::dictionaries::{resolve_skill, skill_catalog, DictEntry};
use crate::models::cv::{is_h2a, CvData, Experience, PersonalInfo, VisaType};
use crate::parsing::{format_date_range, parse_bullet_blocks, parse_bullets, safe_text};

use super::document::{Block, ContactKind, ContactLine, LanguageLine, Palette};

pub const PLACEHOLDER_NAME: &str = "FULL NAME";
pub const PLACEHOLDER_PHONE: &str = "Phone";
pub const PLACEHOLDER_EMAIL: &str = "Email";
pub const PLACEHOLDER_LOCATION: &str = "Location";
pub const PLACEHOLDER_PROFILE: &str = "Add your profile text.";
pub const PLACEHOLDER_EDUCATION: &str = "Add education details.";
pub const PLACEHOLDER_SKILLS: &str = "Select up to 16 skills.";
pub const PLACEHOLDER_SKILLS_SHORT: &str = "Select skills.";
pub const PLACEHOLDER_LANGUAGES: &str = "Add languages.";
pub const PLACEHOLDER_LANGUAGES_FIRST: &str = "Add at least one language.";
pub const PLACEHOLDER_EXPERIENCES: &str = "Add at least one experience.";
pub const PLACEHOLDER_JOB_TITLE: &str = "Job Title";
pub const PLACEHOLDER_BULLETS: &str = "Paste bullet points here (• ...).";
pub const PLACEHOLDER_DESCRIPTION: &str = "Add your job description.";

/// Inputs every renderer reads from.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub visa_type: Option<VisaType>,
    pub data: &'a CvData,
    pub catalog: &'static [DictEntry],
    pub palette: Palette,
}

impl<'a> RenderContext<'a> {
    pub fn new(visa_type: Option<VisaType>, data: &'a CvData, palette: Palette) -> Self {
        Self {
            visa_type,
            data,
            catalog: skill_catalog(visa_type),
            palette,
        }
    }

    pub fn is_h2a(&self) -> bool {
        is_h2a(self.visa_type)
    }

    pub fn info(&self) -> &'a PersonalInfo {
        &self.data.personal_info
    }

    pub fn has_photo(&self) -> bool {
        !self.data.personal_info.photo_data_url.is_empty()
    }
}

/// How an experience description is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionStyle {
    /// H2-A flat bullets, H2-B paragraph.
    ByVisa,
    /// H2-A titled bullet groups, H2-B paragraph.
    ByVisaGrouped,
    /// Bullets for every visa type, no placeholder.
    AlwaysBullets,
}

pub fn or_placeholder(value: &str, placeholder: &str) -> String {
    let v = safe_text(value);
    if v.is_empty() {
        placeholder.to_string()
    } else {
        v.to_string()
    }
}

pub fn display_name(info: &PersonalInfo) -> String {
    or_placeholder(&info.full_name, PLACEHOLDER_NAME)
}

pub fn visa_tag(visa_type: Option<VisaType>) -> String {
    if is_h2a(visa_type) {
        VisaType::H2A.display().to_string()
    } else {
        VisaType::H2B.display().to_string()
    }
}

pub fn contact_lines(info: &PersonalInfo) -> Vec<ContactLine> {
    vec![
        ContactLine {
            kind: ContactKind::Phone,
            text: or_placeholder(&info.phone, PLACEHOLDER_PHONE),
        },
        ContactLine {
            kind: ContactKind::Email,
            text: or_placeholder(&info.email, PLACEHOLDER_EMAIL),
        },
        ContactLine {
            kind: ContactKind::Location,
            text: or_placeholder(&info.location, PLACEHOLDER_LOCATION),
        },
    ]
}

fn muted(text: &str) -> Block {
    Block::Muted {
        text: text.to_string(),
    }
}

/// Filled text as a paragraph, placeholder as muted text.
pub fn text_or_muted(value: &str, placeholder: &str) -> Block {
    let v = safe_text(value);
    if v.is_empty() {
        muted(placeholder)
    } else {
        Block::Paragraph {
            text: v.to_string(),
        }
    }
}

pub fn profile_block(ctx: &RenderContext<'_>) -> Block {
    text_or_muted(&ctx.data.profile_text, PLACEHOLDER_PROFILE)
}

pub fn education_block(ctx: &RenderContext<'_>) -> Block {
    text_or_muted(&ctx.data.education_text, PLACEHOLDER_EDUCATION)
}

/// Selected skills as English values; ids missing from the catalogue print raw.
pub fn skills_block(ctx: &RenderContext<'_>, placeholder: &str) -> Block {
    if ctx.data.skills.is_empty() {
        return muted(placeholder);
    }
    Block::Bullets {
        items: ctx
            .data
            .skills
            .iter()
            .map(|id| resolve_skill(ctx.catalog, id).to_string())
            .collect(),
    }
}

pub fn languages_block(
    ctx: &RenderContext<'_>,
    placeholder: &str,
    separator: &'static str,
    bold_names: bool,
) -> Block {
    if ctx.data.languages.is_empty() {
        return muted(placeholder);
    }
    Block::Languages {
        entries: ctx.data.languages.iter().map(LanguageLine::from).collect(),
        separator,
        bold_names,
    }
}

/// "Title — Company", or just the title when the company is blank.
pub fn role_line(exp: &Experience) -> String {
    let title = or_placeholder(&exp.title, PLACEHOLDER_JOB_TITLE);
    let company = safe_text(&exp.company);
    if company.is_empty() {
        title
    } else {
        format!("{title} — {company}")
    }
}

fn bullets_or_placeholder(items: Vec<String>) -> Block {
    if items.is_empty() {
        Block::Bullets {
            items: vec![PLACEHOLDER_BULLETS.to_string()],
        }
    } else {
        Block::Bullets { items }
    }
}

pub fn description_block(ctx: &RenderContext<'_>, exp: &Experience, style: DescriptionStyle) -> Block {
    match style {
        DescriptionStyle::AlwaysBullets => Block::Bullets {
            items: parse_bullets(&exp.description_text),
        },
        _ if !ctx.is_h2a() => text_or_muted(&exp.description_text, PLACEHOLDER_DESCRIPTION),
        DescriptionStyle::ByVisa => bullets_or_placeholder(parse_bullets(&exp.description_text)),
        DescriptionStyle::ByVisaGrouped => {
            let mut groups = parse_bullet_blocks(&exp.description_text);
            if groups.is_empty() {
                return bullets_or_placeholder(Vec::new());
            }
            for group in &mut groups {
                if group.bullets.is_empty() {
                    group.bullets.push(PLACEHOLDER_BULLETS.to_string());
                }
            }
            Block::BulletGroups { groups }
        }
    }
}

/// One `Entry` per experience, or the placeholder when there are none and
/// `empty_placeholder` is set.
pub fn experience_blocks(
    ctx: &RenderContext<'_>,
    style: DescriptionStyle,
    empty_placeholder: Option<&str>,
) -> Vec<Block> {
    if ctx.data.experiences.is_empty() {
        return empty_placeholder.map(muted).into_iter().collect();
    }
    ctx.data
        .experiences
        .iter()
        .map(|exp| Block::Entry {
            role: role_line(exp),
            dates: format_date_range(&exp.start_date, &exp.end_date, exp.is_current),
            body: vec![description_block(ctx, exp, style)],
        })
        .collect()
}
