use axum::extract::Path;
use axum::Json;
use tracing::{error, info};

use crate::dto::{NoteBodyDto, NoteDto, NoteHeaderDto};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::OrganizerService;

/// POST /storage/notes - create a note (header + body)
pub async fn create_note(Json(note): Json<NoteDto>) -> ApiResult<NoteDto> {
    if note.user_uid.trim().is_empty() || note.content.is_none() {
        error!("Received invalid note creation request: missing data");
        return Err(ApiError::bad_request("Empty note or missing data!"));
    }

    let created = OrganizerService::new().create_note(&note).await?;
    info!("Note created successfully for UID: {}", note.user_uid);
    Ok(ApiResponse::created(created))
}

/// GET /storage/notes/headers/:uid - active note headers for a user
pub async fn note_headers(Path(uid): Path<String>) -> ApiResult<Vec<NoteHeaderDto>> {
    if uid.trim().is_empty() {
        return Err(ApiError::bad_request("UID is required to fetch note headers."));
    }

    let headers = OrganizerService::new().note_headers(&uid).await?;
    info!("Note headers for UID '{}' retrieved successfully.", uid);
    Ok(ApiResponse::success(headers))
}

/// POST /storage/notes/body - full content for a header
pub async fn note_body(Json(header): Json<NoteHeaderDto>) -> ApiResult<NoteBodyDto> {
    if header.user_uid.trim().is_empty() {
        return Err(ApiError::bad_request("Note header is required to fetch note body."));
    }

    let body = OrganizerService::new().note_body(&header).await?;
    info!(
        "Note body for header with UID '{}' retrieved successfully.",
        header.user_uid
    );
    Ok(ApiResponse::success(body))
}

/// PUT /storage/notes - overwrite a note located by its creation time
pub async fn update_note(Json(note): Json<NoteDto>) -> ApiResult<NoteDto> {
    if note.user_uid.trim().is_empty() {
        return Err(ApiError::bad_request("Note and its owner must not be empty."));
    }

    OrganizerService::new().update_note(&note).await?;
    info!(
        "Note updated successfully for UID: {} at {}",
        note.user_uid, note.created_at
    );
    Ok(ApiResponse::success(note))
}

/// DELETE /storage/notes - soft-delete a note
pub async fn remove_note(Json(header): Json<NoteHeaderDto>) -> ApiResult<NoteHeaderDto> {
    if header.user_uid.trim().is_empty() {
        return Err(ApiError::bad_request("Note header is required to remove a note."));
    }

    OrganizerService::new().remove_note(&header).await?;
    info!(
        "Note marked as deleted for UID '{}' and creation time '{}'.",
        header.user_uid, header.created_at
    );
    Ok(ApiResponse::success(header))
}
