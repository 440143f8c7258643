use serde::{Deserialize, Serialize};

/// Wizard steps run 1..=4.
pub const MIN_STEP: u8 = 1;
pub const MAX_STEP: u8 = 4;

/// Skill selection cap per CV.
pub const MAX_SKILLS: usize = 16;

/// Work experience cap per CV.
pub const MAX_EXPERIENCES: usize = 4;

pub const DEFAULT_TEMPLATE_ID: &str = "template1";

// ────────────────────────────────────────────────────────────────────────────
// Enums
// ────────────────────────────────────────────────────────────────────────────

/// US temporary-work visa category the CV targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisaType {
    /// Agricultural work. Experience descriptions render as bullets.
    H2A,
    /// Non-agricultural work. Experience descriptions render as paragraphs.
    H2B,
}

impl VisaType {
    /// Display form used on the CV and in prompts ("H2-A" / "H2-B").
    pub fn display(self) -> &'static str {
        match self {
            VisaType::H2A => "H2-A",
            VisaType::H2B => "H2-B",
        }
    }

    /// Compact form used in export filenames ("H2A" / "H2B").
    pub fn code(self) -> &'static str {
        match self {
            VisaType::H2A => "H2A",
            VisaType::H2B => "H2B",
        }
    }
}

/// Anything that is not H2-A is treated as H2-B, including "no visa yet".
pub fn is_h2a(visa_type: Option<VisaType>) -> bool {
    matches!(visa_type, Some(VisaType::H2A))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    Blue,
    Red,
    Green,
}

impl Accent {
    pub fn as_str(self) -> &'static str {
        match self {
            Accent::Blue => "blue",
            Accent::Red => "red",
            Accent::Green => "green",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LanguageLevel {
    Native,
    Advanced,
    Intermediate,
    Basic,
}

impl LanguageLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LanguageLevel::Native => "Native",
            LanguageLevel::Advanced => "Advanced",
            LanguageLevel::Intermediate => "Intermediate",
            LanguageLevel::Basic => "Basic",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// CV data
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub location: String,
    /// Inline `data:` URI of the uploaded photo, or empty.
    pub photo_data_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub id: String,
    pub name: String,
    pub level: LanguageLevel,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub id: String,
    pub title: String,
    pub company: String,
    /// Free-form, "MM/YYYY" by convention.
    pub start_date: String,
    /// Always empty while `is_current` is true.
    pub end_date: String,
    pub is_current: bool,
    pub description_text: String,
}

impl Experience {
    pub fn blank(id: String) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvData {
    #[serde(default)]
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub languages: Vec<Language>,
    #[serde(default)]
    pub education_text: String,
    /// Skill ids from the catalogue of the current visa type, insertion ordered.
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub profile_text: String,
    #[serde(default)]
    pub experiences: Vec<Experience>,
    #[serde(default = "default_template_id")]
    pub template_id: String,
    #[serde(default = "default_accent")]
    pub accent: Accent,
}

fn default_template_id() -> String {
    DEFAULT_TEMPLATE_ID.to_string()
}

fn default_accent() -> Accent {
    Accent::Blue
}

impl Default for CvData {
    fn default() -> Self {
        Self {
            personal_info: PersonalInfo::default(),
            languages: Vec::new(),
            education_text: String::new(),
            skills: Vec::new(),
            profile_text: String::new(),
            experiences: Vec::new(),
            template_id: default_template_id(),
            accent: default_accent(),
        }
    }
}

/// Root of the persisted document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    pub step: u8,
    pub visa_type: Option<VisaType>,
    pub data: CvData,
}

impl WizardState {
    /// The fixed value the wizard starts from and `resetAll` returns to.
    pub fn initial() -> Self {
        Self {
            step: MIN_STEP,
            visa_type: None,
            data: CvData::default(),
        }
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::initial()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Patches
// ────────────────────────────────────────────────────────────────────────────

/// Partial update of personal info; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfoPatch {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
    pub photo_data_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguagePatch {
    pub name: Option<String>,
    pub level: Option<LanguageLevel>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperiencePatch {
    pub title: Option<String>,
    pub company: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub is_current: Option<bool>,
    pub description_text: Option<String>,
}

impl PersonalInfo {
    pub fn apply(&mut self, patch: PersonalInfoPatch) {
        if let Some(v) = patch.full_name {
            self.full_name = v;
        }
        if let Some(v) = patch.phone {
            self.phone = v;
        }
        if let Some(v) = patch.email {
            self.email = v;
        }
        if let Some(v) = patch.location {
            self.location = v;
        }
        if let Some(v) = patch.photo_data_url {
            self.photo_data_url = v;
        }
    }
}

impl Language {
    pub fn apply(&mut self, patch: LanguagePatch) {
        if let Some(v) = patch.name {
            self.name = v;
        }
        if let Some(v) = patch.level {
            self.level = v;
        }
    }
}

impl Experience {
    /// Merges the patch, then enforces "current job has no end date".
    pub fn apply(&mut self, patch: ExperiencePatch) {
        if let Some(v) = patch.title {
            self.title = v;
        }
        if let Some(v) = patch.company {
            self.company = v;
        }
        if let Some(v) = patch.start_date {
            self.start_date = v;
        }
        if let Some(v) = patch.end_date {
            self.end_date = v;
        }
        if let Some(v) = patch.is_current {
            self.is_current = v;
        }
        if let Some(v) = patch.description_text {
            self.description_text = v;
        }
        if self.is_current {
            self.end_date.clear();
        }
    }
}
