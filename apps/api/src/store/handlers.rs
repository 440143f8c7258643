use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::cv::WizardState;
use crate::state::AppState;

use super::Action;

#[derive(Serialize)]
pub struct DispatchResponse {
    /// `false` when a guard declined the action or no record matched its id.
    pub applied: bool,
    pub state: WizardState,
}

/// GET /api/v1/state
pub async fn handle_get_state(State(state): State<AppState>) -> Result<Json<WizardState>, AppError> {
    let store = state.lock_store()?;
    Ok(Json(store.state().clone()))
}

/// POST /api/v1/actions
pub async fn handle_dispatch(
    State(state): State<AppState>,
    Json(action): Json<Action>,
) -> Result<Json<DispatchResponse>, AppError> {
    let mut store = state.lock_store()?;
    let applied = store.dispatch(action);
    Ok(Json(DispatchResponse {
        applied,
        state: store.state().clone(),
    }))
}

/// DELETE /api/v1/state
pub async fn handle_reset(State(state): State<AppState>) -> Result<Json<WizardState>, AppError> {
    let mut store = state.lock_store()?;
    store.dispatch(Action::ResetAll);
    Ok(Json(store.state().clone()))
}
