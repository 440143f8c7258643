//! JSON view of the current wizard screen: what it shows and whether the user
//! can move on.

use serde::Serialize;

use crate::dictionaries::{
    resolve_skill_label, skill_catalog, DictEntry, LANGUAGE_LEVELS, LANGUAGE_OPTIONS,
};
use crate::export::export_filename;
use crate::models::cv::{Accent, CvData, VisaType, WizardState, MAX_EXPERIENCES, MAX_SKILLS};
use crate::templates::registry::{get_template, summaries, TemplateSummary};
use crate::templates::{render_document, Document};
use crate::validators::{personal_info_warnings, FieldWarning};

use super::{can_continue, continue_blockers, export_blockers, WizardStep};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepView {
    pub step: u8,
    pub screen: WizardStep,
    pub title: &'static str,
    pub can_continue: bool,
    pub can_go_back: bool,
    pub blocking_reasons: Vec<&'static str>,
    pub payload: StepPayload,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum StepPayload {
    VisaSelection(VisaSelectionView),
    Form(Box<FormView>),
    TemplateSelection(TemplateSelectionView),
    Preview(Box<PreviewView>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisaChoice {
    pub visa_type: VisaType,
    pub title: &'static str,
    pub description: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisaSelectionView {
    pub choices: Vec<VisaChoice>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillOption {
    pub id: &'static str,
    pub label: &'static str,
    pub value: &'static str,
    pub selected: bool,
    /// Unselected while the limit is reached.
    pub disabled: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    pub visa_type: Option<VisaType>,
    pub data: CvData,
    pub language_options: &'static [DictEntry],
    pub level_options: &'static [DictEntry],
    pub skill_options: Vec<SkillOption>,
    /// Form labels of the picked skills in pick order. Ids from the other
    /// catalogue show as the raw id.
    pub selected_skills: Vec<String>,
    /// "n/16".
    pub skill_counter: String,
    pub skills_limit_reached: bool,
    pub experience_slots_left: usize,
    pub can_add_experience: bool,
    pub warnings: Vec<FieldWarning>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSelectionView {
    pub templates: Vec<TemplateSummary>,
    pub active_template_id: &'static str,
    pub accent: Accent,
    pub allowed_accents: &'static [Accent],
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewView {
    pub visa_label: Option<&'static str>,
    pub document: Document,
    pub export_ready: bool,
    pub export_blockers: Vec<&'static str>,
    pub suggested_filename: String,
}

fn visa_selection(state: &WizardState) -> VisaSelectionView {
    let choice = |visa_type: VisaType, description: &'static str| VisaChoice {
        visa_type,
        title: visa_type.display(),
        description,
        selected: state.visa_type == Some(visa_type),
    };
    VisaSelectionView {
        choices: vec![
            choice(
                VisaType::H2A,
                "Trabalho agrícola. Descrições no formato de bullet points.",
            ),
            choice(
                VisaType::H2B,
                "Trabalho não-agrícola. Descrições em parágrafos curtos.",
            ),
        ],
    }
}

fn form(state: &WizardState) -> FormView {
    let data = &state.data;
    let catalog = skill_catalog(state.visa_type);
    let limit_reached = data.skills.len() >= MAX_SKILLS;
    let skill_options = catalog
        .iter()
        .map(|entry| {
            let selected = data.skills.iter().any(|s| s == entry.id);
            SkillOption {
                id: entry.id,
                label: entry.label,
                value: entry.value,
                selected,
                disabled: !selected && limit_reached,
            }
        })
        .collect();
    let slots_left = MAX_EXPERIENCES.saturating_sub(data.experiences.len());

    FormView {
        visa_type: state.visa_type,
        data: data.clone(),
        language_options: LANGUAGE_OPTIONS,
        level_options: LANGUAGE_LEVELS,
        skill_options,
        selected_skills: data
            .skills
            .iter()
            .map(|id| resolve_skill_label(catalog, id).to_string())
            .collect(),
        skill_counter: format!("{}/{}", data.skills.len(), MAX_SKILLS),
        skills_limit_reached: limit_reached,
        experience_slots_left: slots_left,
        can_add_experience: slots_left > 0,
        warnings: personal_info_warnings(&data.personal_info),
    }
}

fn template_selection(state: &WizardState) -> TemplateSelectionView {
    let active = get_template(&state.data.template_id);
    TemplateSelectionView {
        templates: summaries(active.id),
        active_template_id: active.id,
        accent: state.data.accent,
        allowed_accents: active.accents,
    }
}

fn preview(state: &WizardState) -> PreviewView {
    let blockers = export_blockers(state);
    PreviewView {
        visa_label: state.visa_type.map(VisaType::display),
        document: render_document(state.visa_type, &state.data),
        export_ready: blockers.is_empty() && state.visa_type.is_some(),
        export_blockers: blockers,
        suggested_filename: export_filename(&state.data.personal_info.full_name, state.visa_type),
    }
}

/// Builds the view of the screen `state.step` points at.
pub fn step_view(state: &WizardState) -> StepView {
    let screen = WizardStep::from_number(state.step);
    let payload = match screen {
        WizardStep::VisaSelection => StepPayload::VisaSelection(visa_selection(state)),
        WizardStep::Form => StepPayload::Form(Box::new(form(state))),
        WizardStep::TemplateSelection => StepPayload::TemplateSelection(template_selection(state)),
        WizardStep::Preview => StepPayload::Preview(Box::new(preview(state))),
    };

    StepView {
        step: screen.number(),
        screen,
        title: screen.title(),
        can_continue: can_continue(state),
        can_go_back: screen != WizardStep::VisaSelection,
        blocking_reasons: continue_blockers(state),
        payload,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cv::Experience;
    use serde_json::json;

    #[test]
    fn test_visa_screen_marks_selection() {
        let mut state = WizardState::initial();
        state.visa_type = Some(VisaType::H2A);
        let view = serde_json::to_value(step_view(&state)).unwrap();

        assert_eq!(view["step"], 1);
        assert_eq!(view["screen"], "visaSelection");
        assert_eq!(view["canGoBack"], false);
        assert_eq!(view["payload"]["kind"], "visaSelection");
        assert_eq!(view["payload"]["choices"][0]["selected"], true);
        assert_eq!(view["payload"]["choices"][1]["selected"], false);
    }

    #[test]
    fn test_form_screen_disables_skills_at_limit() {
        let mut state = WizardState::initial();
        state.step = 2;
        state.visa_type = Some(VisaType::H2B);
        state.data.skills = skill_catalog(state.visa_type)
            .iter()
            .take(MAX_SKILLS)
            .map(|e| e.id.to_string())
            .collect();

        let StepPayload::Form(form) = step_view(&state).payload else {
            panic!("expected form payload");
        };
        assert_eq!(form.skill_counter, "16/16");
        assert!(form.skills_limit_reached);
        let selected = form.skill_options.iter().filter(|o| o.selected).count();
        assert_eq!(selected, MAX_SKILLS);
        assert!(form
            .skill_options
            .iter()
            .all(|o| o.selected != o.disabled));
    }

    #[test]
    fn test_form_screen_counts_experience_slots_and_warnings() {
        let mut state = WizardState::initial();
        state.step = 2;
        state.data.personal_info.email = "not-an-email".into();
        for i in 0..3 {
            state.data.experiences.push(Experience::blank(format!("exp_{i}")));
        }

        let view = step_view(&state);
        assert!(view.can_continue);
        let StepPayload::Form(form) = view.payload else {
            panic!("expected form payload");
        };
        assert_eq!(form.experience_slots_left, 1);
        assert!(form.can_add_experience);
        assert_eq!(form.warnings.len(), 1);
        assert_eq!(form.warnings[0].field, "email");
    }

    #[test]
    fn test_form_screen_keeps_skills_from_other_catalogue_visible() {
        let mut state = WizardState::initial();
        state.step = 2;
        state.visa_type = Some(VisaType::H2B);
        state.data.skills = vec!["vacuuming".into(), "harvesting".into()];

        let StepPayload::Form(form) = step_view(&state).payload else {
            panic!("expected form payload");
        };
        assert_eq!(form.selected_skills, vec!["Aspiração", "harvesting"]);
        assert_eq!(form.skill_counter, "2/16");
        assert_eq!(form.skill_options.iter().filter(|o| o.selected).count(), 1);
    }

    #[test]
    fn test_template_screen_lists_allowed_accents() {
        let mut state = WizardState::initial();
        state.step = 3;
        state.data.template_id = "template2".into();
        let view = serde_json::to_value(step_view(&state)).unwrap();

        assert_eq!(view["payload"]["activeTemplateId"], "template2");
        assert_eq!(view["payload"]["allowedAccents"], json!(["blue", "red", "green"]));
        assert_eq!(view["payload"]["templates"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_preview_screen_reports_export_readiness() {
        let mut state = WizardState::initial();
        state.step = 4;
        state.visa_type = Some(VisaType::H2A);
        state.data.personal_info.full_name = "Maria Silva".into();

        let view = step_view(&state);
        assert!(!view.can_continue);
        let StepPayload::Preview(preview) = view.payload else {
            panic!("expected preview payload");
        };
        assert!(!preview.export_ready);
        assert_eq!(preview.export_blockers.len(), 3);
        assert_eq!(preview.suggested_filename, "Maria_Silva_H2A.pdf");
        assert_eq!(preview.visa_label, Some("H2-A"));
    }
}
