//! Lookup table of the five templates and their allowed accents.

use serde::Serialize;

use crate::models::cv::Accent;

use super::blue_sidebar_image_header::BlueSidebarImageHeader;
use super::brazil_usa_header::BrazilUsaHeader;
use super::clean_sidebar::CleanSidebar;
use super::decorative_sidebar::DecorativeSidebar;
use super::solid_header::SolidHeader;
use super::TemplateRenderer;

pub struct TemplateEntry {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Non-empty. The first entry is the fallback when reconciling.
    pub accents: &'static [Accent],
    pub renderer: &'static dyn TemplateRenderer,
}

const BLUE_RED: &[Accent] = &[Accent::Blue, Accent::Red];

pub static TEMPLATE_REGISTRY: &[TemplateEntry] = &[
    TemplateEntry {
        id: "template1",
        title: "Template 1 — Clean Sidebar",
        description: "Template com faixa colorida à esquerda. Funciona para H2-A e H2-B.",
        accents: BLUE_RED,
        renderer: &CleanSidebar,
    },
    TemplateEntry {
        id: "template2",
        title: "Template 2 — Decorative sidebar",
        description: "Template com 2 faixas à esquerda e estrelas.",
        accents: &[Accent::Blue, Accent::Red, Accent::Green],
        renderer: &DecorativeSidebar,
    },
    TemplateEntry {
        id: "template3",
        title: "Template 3 — Brazil/USA Header",
        description:
            "Template com cabeçalho em imagem (Brasil + EUA) e sidebar cinza com foto circular.",
        accents: BLUE_RED,
        renderer: &BrazilUsaHeader,
    },
    TemplateEntry {
        id: "template4",
        title: "Template 4 — Solid Header",
        description:
            "Template com cabeçalho sólido, foto quadrada, contato em linha e layout corporativo.",
        accents: BLUE_RED,
        renderer: &SolidHeader,
    },
    TemplateEntry {
        id: "template5",
        title: "Template 5 — Blue Sidebar + Image Header",
        description: "Sidebar azul sólida com foto, profile/skills/language na esquerda e header com imagem de fundo.",
        accents: BLUE_RED,
        renderer: &BlueSidebarImageHeader,
    },
];

/// Entry for `id`, or the first registered template when `id` is unknown.
pub fn get_template(id: &str) -> &'static TemplateEntry {
    TEMPLATE_REGISTRY
        .iter()
        .find(|t| t.id == id)
        .unwrap_or(&TEMPLATE_REGISTRY[0])
}

/// `accent` if the template allows it, else the template's first accent.
pub fn reconcile_accent(template_id: &str, accent: Accent) -> Accent {
    let allowed = get_template(template_id).accents;
    if allowed.contains(&accent) {
        accent
    } else {
        allowed[0]
    }
}

pub fn preview_src(template_id: &str, accent: Accent) -> String {
    format!("/assets/{template_id}-{}.png", accent.as_str())
}

/// Serialisable view of a registry entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSummary {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub accents: &'static [Accent],
    /// Preview image per allowed accent, in `accents` order.
    pub previews: Vec<String>,
    pub active: bool,
}

pub fn summaries(active_id: &str) -> Vec<TemplateSummary> {
    let active = get_template(active_id).id;
    TEMPLATE_REGISTRY
        .iter()
        .map(|t| TemplateSummary {
            id: t.id,
            title: t.title,
            description: t.description,
            accents: t.accents,
            previews: t.accents.iter().map(|a| preview_src(t.id, *a)).collect(),
            active: t.id == active,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_ids_and_accents() {
        let ids: Vec<_> = TEMPLATE_REGISTRY.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["template1", "template2", "template3", "template4", "template5"]);
        for t in TEMPLATE_REGISTRY {
            assert!(!t.accents.is_empty(), "{} has no accents", t.id);
        }
        assert!(get_template("template2").accents.contains(&Accent::Green));
    }

    #[test]
    fn test_get_template_falls_back_to_first() {
        assert_eq!(get_template("nope").id, "template1");
        assert_eq!(get_template("template4").id, "template4");
    }

    #[test]
    fn test_reconcile_accent() {
        assert_eq!(reconcile_accent("template1", Accent::Green), Accent::Blue);
        assert_eq!(reconcile_accent("template1", Accent::Red), Accent::Red);
        assert_eq!(reconcile_accent("template2", Accent::Green), Accent::Green);
    }

    #[test]
    fn test_preview_src_and_summaries() {
        assert_eq!(preview_src("template3", Accent::Red), "/assets/template3-red.png");
        let list = summaries("unknown");
        assert_eq!(list.len(), 5);
        assert!(list[0].active);
        assert_eq!(list[1].previews.len(), 3);
    }
}
