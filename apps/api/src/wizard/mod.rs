//! The four wizard screens and the screen-level guards between them.
//!
//! The store's `nextStep` is unguarded; these checks sit in front of it.

pub mod handlers;
pub mod views;

use serde::Serialize;

use crate::models::cv::WizardState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WizardStep {
    VisaSelection,
    Form,
    TemplateSelection,
    Preview,
}

impl WizardStep {
    /// Steps outside 1..=4 never reach here; the reducer clamps them.
    pub fn from_number(step: u8) -> Self {
        match step {
            0 | 1 => WizardStep::VisaSelection,
            2 => WizardStep::Form,
            3 => WizardStep::TemplateSelection,
            _ => WizardStep::Preview,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            WizardStep::VisaSelection => 1,
            WizardStep::Form => 2,
            WizardStep::TemplateSelection => 3,
            WizardStep::Preview => 4,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::VisaSelection => "1) Tipo de visto",
            WizardStep::Form => "2) Dados do currículo",
            WizardStep::TemplateSelection => "3) Template",
            WizardStep::Preview => "4) Preview",
        }
    }
}

pub const REASON_VISA_REQUIRED: &str = "Selecione H2-A ou H2-B para continuar.";
pub const REASON_EXPERIENCE_REQUIRED: &str = "Pelo menos 1 experiência.";
pub const REASON_NAME_REQUIRED: &str = "Preencha o nome.";
pub const REASON_EMAIL_REQUIRED: &str = "Preencha o email.";
pub const REASON_PHOTO_REQUIRED: &str = "Adicione uma foto.";
pub const REASON_EXPORT_EXPERIENCE_REQUIRED: &str = "Adicione ao menos 1 experiência.";

/// Why the current screen cannot move forward. Empty means it can. The last
/// screen has nowhere to go, so it always reports nothing here; its export
/// gate is [`export_blockers`].
pub fn continue_blockers(state: &WizardState) -> Vec<&'static str> {
    match WizardStep::from_number(state.step) {
        WizardStep::VisaSelection if state.visa_type.is_none() => vec![REASON_VISA_REQUIRED],
        WizardStep::Form if state.data.experiences.is_empty() => {
            vec![REASON_EXPERIENCE_REQUIRED]
        }
        _ => Vec::new(),
    }
}

pub fn can_continue(state: &WizardState) -> bool {
    WizardStep::from_number(state.step) != WizardStep::Preview
        && continue_blockers(state).is_empty()
}

/// Missing pieces for a PDF export: name, email, photo and one experience.
pub fn export_blockers(state: &WizardState) -> Vec<&'static str> {
    let info = &state.data.personal_info;
    let mut reasons = Vec::new();
    if info.full_name.trim().is_empty() {
        reasons.push(REASON_NAME_REQUIRED);
    }
    if info.email.trim().is_empty() {
        reasons.push(REASON_EMAIL_REQUIRED);
    }
    if info.photo_data_url.trim().is_empty() {
        reasons.push(REASON_PHOTO_REQUIRED);
    }
    if state.data.experiences.is_empty() {
        reasons.push(REASON_EXPORT_EXPERIENCE_REQUIRED);
    }
    reasons
}
