//! Template 1: coloured sidebar with a square photo, header in the main column.

use crate::models::cv::{Accent, CvData, VisaType};

use super::common::{
    contact_lines, display_name, education_block, experience_blocks, languages_block,
    profile_block, skills_block, visa_tag, DescriptionStyle, RenderContext,
    PLACEHOLDER_EXPERIENCES, PLACEHOLDER_LANGUAGES_FIRST, PLACEHOLDER_SKILLS,
};
use super::document::{
    Color, Column, Document, Header, HeaderPlacement, HeaderStyle, Palette, PhotoPosition,
    PhotoShape, PhotoSlot, Section, SectionStyle, PAGE_WIDTH,
};
use super::TemplateRenderer;

const SIDEBAR_WIDTH: f32 = 260.0;

pub struct CleanSidebar;

impl TemplateRenderer for CleanSidebar {
    fn render(&self, visa_type: Option<VisaType>, data: &CvData, accent: Accent) -> Document {
        let palette = Palette::for_accent(accent);
        let ctx = RenderContext::new(visa_type, data, palette);

        let sidebar = Column {
            width: SIDEBAR_WIDTH,
            fill: Some(palette.primary),
            text: Color::WHITE,
            title: Color::WHITE,
            sections: vec![
                Section::new(
                    "LANGUAGES",
                    SectionStyle::Bare,
                    vec![languages_block(&ctx, PLACEHOLDER_LANGUAGES_FIRST, " — ", true)],
                ),
                Section::new("EDUCATION", SectionStyle::Bare, vec![education_block(&ctx)]),
                Section::new(
                    "SKILLS",
                    SectionStyle::Bare,
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
                Section::new("PROFILE", SectionStyle::Ruled, vec![profile_block(&ctx)]),
                Section::new(
                    "WORK EXPERIENCE",
                    SectionStyle::Ruled,
                    experience_blocks(&ctx, DescriptionStyle::ByVisa, Some(PLACEHOLDER_EXPERIENCES)),
                ),
            ],
        };

        Document {
            template_id: "template1",
            accent,
            palette,
            header: Header {
                style: HeaderStyle::Plain,
                placement: HeaderPlacement::MainColumn,
                name: display_name(ctx.info()),
                contacts: contact_lines(ctx.info()),
                contacts_inline: true,
                visa_tag: Some(visa_tag(visa_type)),
            },
            photo: PhotoSlot {
                shape: PhotoShape::Square,
                position: PhotoPosition::Sidebar,
                size: 180.0,
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
    fn test_clean_sidebar_layout() {
        let mut data = CvData::default();
        data.personal_info.photo_data_url = "data:image/png;base64,AAAA".to_string();
        let doc = CleanSidebar.render(Some(VisaType::H2A), &data, Accent::Red);

        assert_eq!(doc.header.placement, HeaderPlacement::MainColumn);
        assert_eq!(doc.header.visa_tag.as_deref(), Some("H2-A"));
        assert!(doc.photo.filled);
        assert_eq!(doc.sidebar.fill, Some(Palette::for_accent(Accent::Red).primary));
        let titles: Vec<_> = doc.sidebar.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["LANGUAGES", "EDUCATION", "SKILLS"]);
        assert!(doc.plain_text().contains("Add at least one language."));
    }
}
