use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::state::AppState;
use crate::store::Action;

use super::continue_blockers;
use super::views::{step_view, StepView};

/// GET /api/v1/wizard
pub async fn handle_get_wizard(State(state): State<AppState>) -> Result<Json<StepView>, AppError> {
    let store = state.lock_store()?;
    Ok(Json(step_view(store.state())))
}

/// POST /api/v1/wizard/continue
/// Runs the current screen's guard before `nextStep`.
pub async fn handle_continue(State(state): State<AppState>) -> Result<Json<StepView>, AppError> {
    let mut store = state.lock_store()?;
    let blockers = continue_blockers(store.state());
    if !blockers.is_empty() {
        return Err(AppError::StepIncomplete(blockers.join(" ")));
    }
    store.dispatch(Action::NextStep);
    Ok(Json(step_view(store.state())))
}

/// POST /api/v1/wizard/back
pub async fn handle_back(State(state): State<AppState>) -> Result<Json<StepView>, AppError> {
    let mut store = state.lock_store()?;
    store.dispatch(Action::PrevStep);
    Ok(Json(step_view(store.state())))
}
