//! Prompt text for the external writing assistant. Copying it anywhere is
//! the client's job.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::prompts::{
    build_experience_prompt, build_profile_prompt, ExperiencePromptInput, ProfilePromptInput,
};
use crate::state::AppState;

#[derive(Serialize)]
pub struct PromptResponse {
    pub prompt: String,
}

/// GET /api/v1/prompts/profile
pub async fn handle_profile_prompt(
    State(state): State<AppState>,
) -> Result<Json<PromptResponse>, AppError> {
    let store = state.lock_store()?;
    let current = store.state();
    let prompt = build_profile_prompt(&ProfilePromptInput {
        visa_type: current.visa_type,
        skills: &current.data.skills,
        profile_text: &current.data.profile_text,
    });
    Ok(Json(PromptResponse { prompt }))
}

/// GET /api/v1/prompts/experiences/:id
pub async fn handle_experience_prompt(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PromptResponse>, AppError> {
    let store = state.lock_store()?;
    let current = store.state();
    let exp = current
        .data
        .experiences
        .iter()
        .find(|e| e.id == id)
        .ok_or_else(|| AppError::NotFound(format!("Experience {id} not found")))?;

    let prompt = build_experience_prompt(&ExperiencePromptInput {
        visa_type: current.visa_type,
        job_title: &exp.title,
        skills: &current.data.skills,
        description_text: &exp.description_text,
    });
    Ok(Json(PromptResponse { prompt }))
}
