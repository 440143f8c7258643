use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::dictionaries::{skill_catalog, DictEntry, LANGUAGE_LEVELS, LANGUAGE_OPTIONS};
use crate::errors::AppError;
use crate::models::cv::VisaType;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryQuery {
    /// Falls back to the visa type of the current state.
    pub visa_type: Option<VisaType>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryResponse {
    pub visa_type: Option<VisaType>,
    pub languages: &'static [DictEntry],
    pub levels: &'static [DictEntry],
    pub skills: &'static [DictEntry],
}

/// GET /api/v1/dictionaries?visaType=H2A
pub async fn handle_dictionaries(
    State(state): State<AppState>,
    Query(params): Query<DictionaryQuery>,
) -> Result<Json<DictionaryResponse>, AppError> {
    let visa_type = match params.visa_type {
        Some(v) => Some(v),
        None => state.lock_store()?.state().visa_type,
    };
    Ok(Json(DictionaryResponse {
        visa_type,
        languages: LANGUAGE_OPTIONS,
        levels: LANGUAGE_LEVELS,
        skills: skill_catalog(visa_type),
    }))
}
