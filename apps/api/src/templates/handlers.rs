use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::cv::Accent;
use crate::state::AppState;

use super::registry::{get_template, summaries, TemplateSummary};
use super::{render_document, Document};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateListResponse {
    pub templates: Vec<TemplateSummary>,
    pub active_template_id: &'static str,
    pub accent: Accent,
}

/// GET /api/v1/templates
pub async fn handle_list_templates(
    State(state): State<AppState>,
) -> Result<Json<TemplateListResponse>, AppError> {
    let store = state.lock_store()?;
    let data = &store.state().data;
    let active = get_template(&data.template_id).id;
    Ok(Json(TemplateListResponse {
        templates: summaries(active),
        active_template_id: active,
        accent: data.accent,
    }))
}

/// GET /api/v1/preview
pub async fn handle_preview(State(state): State<AppState>) -> Result<Json<Document>, AppError> {
    let store = state.lock_store()?;
    let current = store.state();
    Ok(Json(render_document(current.visa_type, &current.data)))
}
