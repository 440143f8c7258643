//! Template 2: two flag stripes and a star field down the left edge, photo on
//! the right of a full-width header, tinted cards in the sidebar.

use crate::models::cv::{Accent, CvData, VisaType};

use super::common::{
    contact_lines, display_name, education_block, experience_blocks, languages_block,
    profile_block, skills_block, DescriptionStyle, RenderContext, PLACEHOLDER_EXPERIENCES,
    PLACEHOLDER_LANGUAGES, PLACEHOLDER_SKILLS,
};
use super::document::{
    Color, Column, Decoration, Document, Header, HeaderPlacement, HeaderStyle, Palette,
    PhotoPosition, PhotoShape, PhotoSlot, Section, SectionStyle, PAGE_WIDTH,
};
use super::TemplateRenderer;

const STRIPE_WIDTH: f32 = 14.0;
const SIDEBAR_WIDTH: f32 = 250.0;

pub struct DecorativeSidebar;

/// Outer and inner stripe colours. Red swaps them so the accent sits outside.
fn stripes(accent: Accent, palette: &Palette) -> [Color; 2] {
    match accent {
        Accent::Red => [palette.primary, palette.contrast],
        _ => [palette.contrast, palette.primary],
    }
}

impl TemplateRenderer for DecorativeSidebar {
    fn render(&self, visa_type: Option<VisaType>, data: &CvData, accent: Accent) -> Document {
        let palette = Palette::for_accent(accent);
        let ctx = RenderContext::new(visa_type, data, palette);
        let [outer, inner] = stripes(accent, &palette);

        let decorations = vec![
            Decoration::Stripe {
                x: 0.0,
                width: STRIPE_WIDTH,
                color: outer,
            },
            Decoration::Stripe {
                x: STRIPE_WIDTH,
                width: STRIPE_WIDTH,
                color: inner,
            },
            Decoration::StarField {
                x: 0.0,
                y: 12.0,
                width: 2.0 * STRIPE_WIDTH,
                height: 280.0,
                color: Color::STAR,
            },
        ];

        let sidebar = Column {
            width: SIDEBAR_WIDTH,
            fill: None,
            text: Color::INK,
            title: palette.primary_dark,
            sections: vec![
                Section::new(
                    "LANGUAGE",
                    SectionStyle::Card,
                    vec![languages_block(&ctx, PLACEHOLDER_LANGUAGES, " - ", false)],
                ),
                Section::new("EDUCATION", SectionStyle::Card, vec![education_block(&ctx)]),
                Section::new(
                    "SKILLS",
                    SectionStyle::Card,
                    vec![skills_block(&ctx, PLACEHOLDER_SKILLS)],
                ),
            ],
        };

        let main = Column {
            width: PAGE_WIDTH - SIDEBAR_WIDTH,
            fill: None,
            text: Color::INK,
            title: palette.primary_dark,
            sections: vec![
                Section::new("PROFILE", SectionStyle::Card, vec![profile_block(&ctx)]),
                Section::new(
                    "WORK EXPERIENCE",
                    SectionStyle::Card,
                    experience_blocks(&ctx, DescriptionStyle::ByVisa, Some(PLACEHOLDER_EXPERIENCES)),
                ),
            ],
        };

        Document {
            template_id: "template2",
            accent,
            palette,
            header: Header {
                style: HeaderStyle::Plain,
                placement: HeaderPlacement::FullWidth,
                name: display_name(ctx.info()),
                contacts: contact_lines(ctx.info()),
                contacts_inline: false,
                visa_tag: None,
            },
            photo: PhotoSlot {
                shape: PhotoShape::Square,
                position: PhotoPosition::HeaderRight,
                size: 130.0,
                filled: ctx.has_photo(),
            },
            sidebar,
            main,
            decorations,
        }
    }
}
