use axum::{
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::state::AppState;
use crate::store::handlers::DispatchResponse;
use crate::store::Action;
use crate::templates::render_document;
use crate::wizard::export_blockers;

use super::photo::to_data_url;
use super::{export_filename, render_pdf, ExportError, ExportGuard};

/// POST /api/v1/export
/// Renders the current CV to a single-page PDF download.
pub async fn handle_export(State(state): State<AppState>) -> Result<Response, AppError> {
    let snapshot = {
        let store = state.lock_store()?;
        let current = store.state();
        if current.visa_type.is_none() {
            return Err(ExportError::TargetMissing.into());
        }
        let blockers = export_blockers(current);
        if !blockers.is_empty() {
            return Err(ExportError::NotReady(
                blockers.into_iter().map(String::from).collect(),
            )
            .into());
        }
        current.clone()
    };

    let _guard = ExportGuard::acquire(&state.exporting)?;
    let filename = export_filename(&snapshot.data.personal_info.full_name, snapshot.visa_type);
    info!(template = %snapshot.data.template_id, %filename, "export started");

    let file = tokio::task::spawn_blocking(move || {
        let doc = render_document(snapshot.visa_type, &snapshot.data);
        render_pdf(&doc, &snapshot.data, filename)
    })
    .await
    .map_err(|e| ExportError::Worker(e.to_string()))?;

    info!(
        filename = %file.filename,
        bytes = file.bytes.len(),
        width = file.width,
        height = file.height,
        "export finished"
    );

    let disposition = format!("attachment; filename=\"{}\"", file.filename);
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.bytes,
    )
        .into_response())
}

/// POST /api/v1/photo
/// Multipart upload; the `photo` field becomes the stored data URI.
pub async fn handle_photo_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<DispatchResponse>, AppError> {
    let mut data_url = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("photo") {
            continue;
        }
        let mime = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read the photo: {e}")))?;
        let url = to_data_url(&bytes, mime.as_deref())
            .map_err(|e| AppError::Validation(format!("Invalid photo: {e}")))?;
        data_url = Some(url);
        break;
    }

    let url = data_url.ok_or_else(|| AppError::Validation("Missing 'photo' field".to_string()))?;
    let mut store = state.lock_store()?;
    let applied = store.dispatch(Action::SetPhotoDataUrl { url });
    Ok(Json(DispatchResponse {
        applied,
        state: store.state().clone(),
    }))
}
