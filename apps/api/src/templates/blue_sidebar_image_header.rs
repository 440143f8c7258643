//! Template 5: banner header with photo and contacts over a solid sidebar
//! that carries profile, skills and languages. The main column holds only
//! the experience list.

use crate::models::cv::{Accent, CvData, VisaType};

use super::common::{
    contact_lines, display_name, experience_blocks, languages_block, profile_block,
    skills_block, DescriptionStyle, RenderContext, PLACEHOLDER_EXPERIENCES,
    PLACEHOLDER_LANGUAGES, PLACEHOLDER_SKILLS,
};
use super::document::{
    Color, Column, Document, Header, HeaderPlacement, HeaderStyle, Palette, PhotoPosition,
    PhotoShape, PhotoSlot, Section, SectionStyle, PAGE_WIDTH,
};
use super::TemplateRenderer;

const SIDEBAR_WIDTH: f32 = 270.0;

pub struct BlueSidebarImageHeader;

impl TemplateRenderer for BlueSidebarImageHeader {
    fn render(&self, visa_type: Option<VisaType>, data: &CvData, accent: Accent) -> Document {
        let palette = Palette::for_accent(accent);
        let ctx = RenderContext::new(visa_type, data, palette);

        let sidebar = Column {
            width: SIDEBAR_WIDTH,
            fill: Some(palette.primary_dark),
            text: Color::WHITE,
            title: Color::WHITE,
            sections: vec![
                Section::new("PROFILE", SectionStyle::Ruled, vec![profile_block(&ctx)]),
                Section::new(
                    "SKILLS",
                    SectionStyle::Ruled,
                    vec![skills_block(&ctx, PLACEHOLDER_SKILLS)],
                ),
                Section::new(
                    "LANGUAGE",
                    SectionStyle::Ruled,
                    vec![languages_block(&ctx, PLACEHOLDER_LANGUAGES, " — ", false)],
                ),
            ],
        };

        let main = Column {
            width: PAGE_WIDTH - SIDEBAR_WIDTH,
            fill: None,
            text: Color::INK,
            title: palette.primary_dark,
            sections: vec![Section::new(
                "EXPERIENCE",
                SectionStyle::Ruled,
                experience_blocks(&ctx, DescriptionStyle::ByVisa, Some(PLACEHOLDER_EXPERIENCES)),
            )],
        };

        Document {
            template_id: "template5",
            accent,
            palette,
            header: Header {
                style: HeaderStyle::Banner,
                placement: HeaderPlacement::FullWidth,
                name: display_name(ctx.info()),
                contacts: contact_lines(ctx.info()),
                contacts_inline: true,
                visa_tag: None,
            },
            photo: PhotoSlot {
                shape: PhotoShape::Square,
                position: PhotoPosition::HeaderLeft,
                size: 130.0,
                filled: ctx.has_photo(),
            },
            sidebar,
            main,
            decorations: Vec::new(),
        }
    }
}
