//! Template renderers and the registry that picks one by id.
//!
//! Every renderer is a pure function of `(visa type, CV data, accent)` that
//! returns a [`Document`]. Layouts differ; the content rules (placeholders,
//! skill resolution, bullets vs. paragraphs) live in `common`.

pub mod blue_sidebar_image_header;
pub mod brazil_usa_header;
pub mod clean_sidebar;
pub mod common;
pub mod decorative_sidebar;
pub mod document;
pub mod handlers;
pub mod registry;
pub mod solid_header;

use crate::models::cv::{Accent, CvData, VisaType};

pub use document::Document;
use registry::get_template;

/// A visual layout for a CV.
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, visa_type: Option<VisaType>, data: &CvData, accent: Accent) -> Document;
}

/// Renders `data` with the template it names, falling back to the first
/// registered template for unknown ids.
pub fn render_document(visa_type: Option<VisaType>, data: &CvData) -> Document {
    let entry = get_template(&data.template_id);
    entry.renderer.render(visa_type, data, data.accent)
}

#[cfg(test)]
mod tests {
    use super::registry::TEMPLATE_REGISTRY;
    use super::*;
    use crate::models::cv::{Experience, Language, LanguageLevel};
    use crate::templates::document::Block;

    fn sample_data() -> CvData {
        let mut data = CvData::default();
        data.personal_info.full_name = "Maria Silva".to_string();
        data.personal_info.email = "maria@example.com".to_string();
        data.skills = vec!["harvesting".to_string(), "teamwork".to_string()];
        data.languages.push(Language {
            id: "lang_1".to_string(),
            name: "English".to_string(),
            level: LanguageLevel::Intermediate,
        });
        data.experiences.push(Experience {
            id: "exp_1".to_string(),
            title: "Farm Worker".to_string(),
            company: "Sunny Farms".to_string(),
            start_date: "01/2023".to_string(),
            end_date: "10/2024".to_string(),
            description_text: "• Harvested crops\n• Cleaned tools".to_string(),
            ..Default::default()
        });
        data
    }

    #[test]
    fn test_every_template_renders_shared_content() {
        let mut data = sample_data();
        for entry in TEMPLATE_REGISTRY {
            data.template_id = entry.id.to_string();
            let doc = render_document(Some(VisaType::H2A), &data);
            assert_eq!(doc.template_id, entry.id);
            let text = doc.plain_text();
            for needle in ["Maria Silva", "maria@example.com", "Harvesting", "Teamwork", "English", "Harvested crops"] {
                assert!(text.contains(needle), "{} missing {needle:?}", entry.id);
            }
        }
    }

    #[test]
    fn test_unknown_template_falls_back_to_first() {
        let mut data = sample_data();
        data.template_id = "template99".to_string();
        let doc = render_document(None, &data);
        assert_eq!(doc.template_id, TEMPLATE_REGISTRY[0].id);
    }

    #[test]
    fn test_h2b_descriptions_render_as_paragraphs_except_template3() {
        let mut data = sample_data();
        for entry in TEMPLATE_REGISTRY {
            data.template_id = entry.id.to_string();
            let doc = render_document(Some(VisaType::H2B), &data);
            let entry_body = doc
                .main
                .sections
                .iter()
                .flat_map(|s| &s.blocks)
                .find_map(|b| match b {
                    Block::Entry { body, .. } => body.first().cloned(),
                    _ => None,
                })
                .expect("experience entry rendered");
            if entry.id == "template3" {
                assert!(matches!(entry_body, Block::Bullets { .. }));
            } else {
                assert!(matches!(entry_body, Block::Paragraph { .. }), "{}", entry.id);
            }
        }
    }

    #[test]
    fn test_empty_data_uses_placeholders() {
        let data = CvData::default();
        let doc = render_document(None, &data);
        let text = doc.plain_text();
        assert!(text.contains("FULL NAME"));
        assert!(text.contains("Add your profile text."));
        assert!(text.contains("Add at least one experience."));
        assert!(!doc.photo.filled);
    }
}
