//! Template 3: two-tone banner header with a circular photo, grey sidebar
//! holding contacts. Descriptions are always bullets and there is no
//! education section.

use crate::models::cv::{Accent, CvData, VisaType};

use super::common::{
    contact_lines, display_name, experience_blocks, languages_block, profile_block,
    skills_block, DescriptionStyle, RenderContext, PLACEHOLDER_LANGUAGES,
    PLACEHOLDER_SKILLS_SHORT,
};
use super::document::{
    Block, Color, Column, Document, Header, HeaderPlacement, HeaderStyle, Palette,
    PhotoPosition, PhotoShape, PhotoSlot, Section, SectionStyle, PAGE_WIDTH,
};
use super::TemplateRenderer;

const SIDEBAR_WIDTH: f32 = 250.0;

pub struct BrazilUsaHeader;

impl TemplateRenderer for BrazilUsaHeader {
    fn render(&self, visa_type: Option<VisaType>, data: &CvData, accent: Accent) -> Document {
        let palette = Palette::for_accent(accent);
        let ctx = RenderContext::new(visa_type, data, palette);

        let sidebar = Column {
            width: SIDEBAR_WIDTH,
            fill: Some(Color::SIDEBAR_GREY),
            text: Color::INK,
            title: palette.primary,
            sections: vec![
                Section::new(
                    "CONTACT",
                    SectionStyle::Ruled,
                    vec![Block::Contact {
                        lines: contact_lines(ctx.info()),
                    }],
                ),
                Section::new(
                    "LANGUAGES",
                    SectionStyle::Ruled,
                    vec![languages_block(&ctx, PLACEHOLDER_LANGUAGES, " — ", false)],
                ),
                Section::new(
                    "SKILLS",
                    SectionStyle::Ruled,
                    vec![skills_block(&ctx, PLACEHOLDER_SKILLS_SHORT)],
                ),
            ],
        };

        let main = Column {
            width: PAGE_WIDTH - SIDEBAR_WIDTH,
            fill: None,
            text: Color::INK,
            title: palette.primary,
            sections: vec![
                Section::new("PROFILE", SectionStyle::Ruled, vec![profile_block(&ctx)]),
                Section::new(
                    "WORK EXPERIENCE",
                    SectionStyle::Ruled,
                    experience_blocks(&ctx, DescriptionStyle::AlwaysBullets, None),
                ),
            ],
        };

        Document {
            template_id: "template3",
            accent,
            palette,
            header: Header {
                style: HeaderStyle::Banner,
                placement: HeaderPlacement::FullWidth,
                name: display_name(ctx.info()),
                contacts: Vec::new(),
                contacts_inline: false,
                visa_tag: None,
            },
            photo: PhotoSlot {
                shape: PhotoShape::Circle,
                position: PhotoPosition::HeaderLeft,
                size: 140.0,
                filled: ctx.has_photo(),
            },
            sidebar,
            main,
            decorations: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contacts_live_in_sidebar_and_no_education() {
        let mut data = CvData::default();
        data.personal_info.phone = "+55 11 99999-0000".to_string();
        data.education_text = "High school".to_string();
        let doc = BrazilUsaHeader.render(Some(VisaType::H2B), &data, Accent::Blue);

        assert!(doc.header.contacts.is_empty());
        assert_eq!(doc.photo.shape, PhotoShape::Circle);
        let text = doc.plain_text();
        assert!(text.contains("+55 11 99999-0000"));
        assert!(!text.contains("EDUCATION"));
        assert!(!text.contains("High school"));
        assert!(text.contains("Select skills."));
    }

    #[test]
    fn test_empty_experience_list_renders_bare_section() {
        let doc = BrazilUsaHeader.render(None, &CvData::default(), Accent::Red);
        let work = doc
            .main
            .sections
            .iter()
            .find(|s| s.title == "WORK EXPERIENCE")
            .expect("work experience section");
        assert!(work.blocks.is_empty());
    }
}
