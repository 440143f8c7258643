//! Template 4: solid header band with a square photo and inline contacts.
//! H2-A descriptions are grouped under their colon-terminated headings.

use crate::models::cv::{Accent, CvData, VisaType};

use super::common::{
    contact_lines, display_name, education_block, experience_blocks, languages_block,
    profile_block, skills_block, DescriptionStyle, RenderContext, PLACEHOLDER_EXPERIENCES,
    PLACEHOLDER_LANGUAGES, PLACEHOLDER_SKILLS,
};
use super::document::{
    Color, Column, Document, Header, HeaderPlacement, HeaderStyle, Palette, PhotoPosition,
    PhotoShape, PhotoSlot, Section, SectionStyle, PAGE_WIDTH,
};
use super::TemplateRenderer;

const SIDEBAR_WIDTH: f32 = 250.0;

pub struct SolidHeader;

impl TemplateRenderer for SolidHeader {
    fn render(&self, visa_type: Option<VisaType>, data: &CvData, accent: Accent) -> Document {
        let palette = Palette::for_accent(accent);
        let ctx = RenderContext::new(visa_type, data, palette);

        let sidebar = Column {
            width: SIDEBAR_WIDTH,
            fill: Some(palette.soft),
            text: Color::INK,
            title: palette.primary_dark,
            sections: vec![
                Section::new(
                    "LANGUAGES",
                    SectionStyle::Ruled,
                    vec![languages_block(&ctx, PLACEHOLDER_LANGUAGES, " — ", false)],
                ),
                Section::new("EDUCATION", SectionStyle::Ruled, vec![education_block(&ctx)]),
                Section::new(
                    "SKILLS",
                    SectionStyle::Ruled,
                    vec![skills_block(&ctx, PLACEHOLDER_SKILLS)],
                ),
            ],
        };

        let main = Column {
            width: PAGE_WIDTH - SIDEBAR_WIDTH,
            fill: None,
            text: Color::INK,
            title: palette.primary,
            sections: vec![
                Section::new(
                    "PROFESSIONAL PROFILE",
                    SectionStyle::Ruled,
                    vec![profile_block(&ctx)],
                ),
                Section::new(
                    "WORK EXPERIENCE",
                    SectionStyle::Ruled,
                    experience_blocks(
                        &ctx,
                        DescriptionStyle::ByVisaGrouped,
                        Some(PLACEHOLDER_EXPERIENCES),
                    ),
                ),
            ],
        };

        Document {
            template_id: "template4",
            accent,
            palette,
            header: Header {
                style: HeaderStyle::Solid,
                placement: HeaderPlacement::FullWidth,
                name: display_name(ctx.info()),
                contacts: contact_lines(ctx.info()),
                contacts_inline: true,
                visa_tag: None,
            },
            photo: PhotoSlot {
                shape: PhotoShape::Square,
                position: PhotoPosition::HeaderLeft,
                size: 120.0,
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
    use crate::models::cv::Experience;
    use crate::templates::document::Block;

    #[test]
    fn test_h2a_description_is_grouped() {
        let mut data = CvData::default();
        data.experiences.push(Experience {
            id: "exp_1".to_string(),
            description_text: "Field work:\n- Picked apples\nEquipment:\n- Drove tractor".to_string(),
            ..Default::default()
        });
        let doc = SolidHeader.render(Some(VisaType::H2A), &data, Accent::Blue);
        let body = doc.main.sections[1]
            .blocks
            .iter()
            .find_map(|b| match b {
                Block::Entry { body, .. } => body.first(),
                _ => None,
            })
            .expect("entry");
        let Block::BulletGroups { groups } = body else {
            panic!("expected grouped bullets, got {body:?}");
        };
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].title, "Equipment");
        assert_eq!(doc.main.sections[0].title, "PROFESSIONAL PROFILE");
        assert_eq!(doc.header.style, HeaderStyle::Solid);
    }
}
