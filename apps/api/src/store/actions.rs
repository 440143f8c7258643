//! The closed set of write operations on the wizard state and the pure reducer
//! that applies them.
//!
//! `reduce` never mutates its input: it clones, edits the copy and hands the
//! copy back. `None` means the action was declined (a silent guard fired or
//! no record matched the id) and nothing changed.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::models::cv::{
    Accent, Experience, ExperiencePatch, Language, LanguageLevel, LanguagePatch,
    PersonalInfoPatch, VisaType, WizardState, MAX_EXPERIENCES, MAX_SKILLS, MAX_STEP, MIN_STEP,
};
use crate::templates::registry::{get_template, reconcile_accent};
use crate::validators::{clamp_text, MAX_FREE_TEXT_CHARS};

/// One named store action. Wire form: `{"type": "toggleSkill", "id": "teamwork"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Action {
    SetVisaType {
        visa_type: VisaType,
    },
    /// Also moves the accent onto the new template's allowed set.
    SetTemplateId {
        id: String,
    },
    SetAccent {
        accent: Accent,
    },
    /// Accepts any JSON value; see [`coerce_step`].
    GoToStep {
        #[serde(default)]
        step: Value,
    },
    NextStep,
    PrevStep,
    UpdatePersonalInfo {
        patch: PersonalInfoPatch,
    },
    SetPhotoDataUrl {
        url: String,
    },
    UpdateProfileText {
        text: String,
    },
    UpdateEducationText {
        text: String,
    },
    AddLanguage {
        name: String,
    },
    UpdateLanguage {
        id: String,
        patch: LanguagePatch,
    },
    RemoveLanguage {
        id: String,
    },
    ToggleSkill {
        id: String,
    },
    AddExperience,
    UpdateExperience {
        id: String,
        patch: ExperiencePatch,
    },
    RemoveExperience {
        id: String,
    },
    ResetAll,
}

impl Action {
    /// Wire name of the action, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetVisaType { .. } => "setVisaType",
            Action::SetTemplateId { .. } => "setTemplateId",
            Action::SetAccent { .. } => "setAccent",
            Action::GoToStep { .. } => "goToStep",
            Action::NextStep => "nextStep",
            Action::PrevStep => "prevStep",
            Action::UpdatePersonalInfo { .. } => "updatePersonalInfo",
            Action::SetPhotoDataUrl { .. } => "setPhotoDataUrl",
            Action::UpdateProfileText { .. } => "updateProfileText",
            Action::UpdateEducationText { .. } => "updateEducationText",
            Action::AddLanguage { .. } => "addLanguage",
            Action::UpdateLanguage { .. } => "updateLanguage",
            Action::RemoveLanguage { .. } => "removeLanguage",
            Action::ToggleSkill { .. } => "toggleSkill",
            Action::AddExperience => "addExperience",
            Action::UpdateExperience { .. } => "updateExperience",
            Action::RemoveExperience { .. } => "removeExperience",
            Action::ResetAll => "resetAll",
        }
    }
}

/// Fresh, never-reused record id such as `exp_3f2a…`.
pub fn make_id(prefix: &str) -> String {
    format!("{prefix}_{}", Uuid::new_v4().simple())
}

fn clamp_step(step: f64) -> u8 {
    step.clamp(MIN_STEP as f64, MAX_STEP as f64).floor() as u8
}

/// Coerces an arbitrary JSON value to a step in 1..=4.
///
/// Numbers (and numeric strings) are clamped then floored. Zero, NaN,
/// null and anything non-numeric yield step 1.
pub fn coerce_step(raw: &Value) -> u8 {
    let number = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(true) => Some(1.0),
        _ => None,
    };
    match number {
        Some(n) if !n.is_nan() && n != 0.0 => clamp_step(n),
        _ => MIN_STEP,
    }
}

/// Brings a loaded record back inside the invariants: step in range, accent
/// allowed by its template, skills and experiences within their caps, and no
/// end date on a current job.
pub fn normalize(mut state: WizardState) -> WizardState {
    state.step = state.step.clamp(MIN_STEP, MAX_STEP);
    state.data.accent = reconcile_accent(&state.data.template_id, state.data.accent);
    let mut seen = HashSet::new();
    state.data.skills.retain(|id| seen.insert(id.clone()));
    state.data.skills.truncate(MAX_SKILLS);
    state.data.experiences.truncate(MAX_EXPERIENCES);
    for exp in &mut state.data.experiences {
        if exp.is_current {
            exp.end_date.clear();
        }
    }
    state
}

/// Applies `action` to a copy of `state`. Returns `None` when declined.
pub fn reduce(state: &WizardState, action: Action) -> Option<WizardState> {
    let mut next = state.clone();
    let data = &mut next.data;

    match action {
        Action::SetVisaType { visa_type } => {
            next.visa_type = Some(visa_type);
        }
        Action::SetTemplateId { id } => {
            data.accent = reconcile_accent(&id, data.accent);
            data.template_id = id;
        }
        Action::SetAccent { accent } => {
            if !get_template(&data.template_id).accents.contains(&accent) {
                return None;
            }
            data.accent = accent;
        }
        Action::GoToStep { step } => {
            next.step = coerce_step(&step);
        }
        Action::NextStep => {
            if next.step >= MAX_STEP {
                return None;
            }
            next.step += 1;
        }
        Action::PrevStep => {
            if next.step <= MIN_STEP {
                return None;
            }
            next.step -= 1;
        }
        Action::UpdatePersonalInfo { patch } => {
            data.personal_info.apply(patch);
        }
        Action::SetPhotoDataUrl { url } => {
            data.personal_info.photo_data_url = url;
        }
        Action::UpdateProfileText { text } => {
            data.profile_text = clamp_text(&text, MAX_FREE_TEXT_CHARS);
        }
        Action::UpdateEducationText { text } => {
            data.education_text = clamp_text(&text, MAX_FREE_TEXT_CHARS);
        }
        Action::AddLanguage { name } => {
            let wanted = name.to_lowercase();
            if data.languages.iter().any(|l| l.name.to_lowercase() == wanted) {
                return None;
            }
            data.languages.push(Language {
                id: make_id("lang"),
                name,
                level: LanguageLevel::Basic,
            });
        }
        Action::UpdateLanguage { id, patch } => {
            let lang = data.languages.iter_mut().find(|l| l.id == id)?;
            lang.apply(patch);
        }
        Action::RemoveLanguage { id } => {
            let before = data.languages.len();
            data.languages.retain(|l| l.id != id);
            if data.languages.len() == before {
                return None;
            }
        }
        Action::ToggleSkill { id } => {
            if let Some(pos) = data.skills.iter().position(|s| *s == id) {
                data.skills.remove(pos);
            } else if data.skills.len() < MAX_SKILLS {
                data.skills.push(id);
            } else {
                return None;
            }
        }
        Action::AddExperience => {
            if data.experiences.len() >= MAX_EXPERIENCES {
                return None;
            }
            data.experiences.push(Experience::blank(make_id("exp")));
        }
        Action::UpdateExperience { id, mut patch } => {
            let exp = data.experiences.iter_mut().find(|e| e.id == id)?;
            if let Some(text) = patch.description_text.take() {
                patch.description_text = Some(clamp_text(&text, MAX_FREE_TEXT_CHARS));
            }
            exp.apply(patch);
        }
        Action::RemoveExperience { id } => {
            let before = data.experiences.len();
            data.experiences.retain(|e| e.id != id);
            if data.experiences.len() == before {
                return None;
            }
        }
        Action::ResetAll => {
            next = WizardState::initial();
        }
    }

    Some(next)
}
