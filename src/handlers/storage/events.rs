use axum::Json;
use tracing::{error, info};

use crate::dto::{PasswordChangeRequest, SessionEventRequest};
use crate::entities::SessionEvent;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::OrganizerService;

fn validate_session_request(request: &SessionEventRequest) -> Result<(), ApiError> {
    if request.user_uid.trim().is_empty() || request.event.is_none() || request.device_info.is_none() {
        error!("Received invalid session event request: missing data");
        return Err(ApiError::bad_request("Empty request or missing data!"));
    }
    Ok(())
}

/// POST /storage/account-logins
pub async fn record_login(Json(request): Json<SessionEventRequest>) -> ApiResult<SessionEvent> {
    validate_session_request(&request)?;

    let event = OrganizerService::new().record_login(&request).await?;
    info!(
        "Account login recorded successfully for UID: {}",
        request.user_uid
    );
    Ok(ApiResponse::created(event))
}

/// POST /storage/account-logouts
pub async fn record_logout(Json(request): Json<SessionEventRequest>) -> ApiResult<SessionEvent> {
    validate_session_request(&request)?;

    let event = OrganizerService::new().record_logout(&request).await?;
    info!(
        "Account logout recorded successfully for UID: {}",
        request.user_uid
    );
    Ok(ApiResponse::created(event))
}

/// POST /storage/password-changes - the old password is encrypted at rest
pub async fn record_password_change(
    Json(request): Json<PasswordChangeRequest>,
) -> ApiResult<PasswordChangeRequest> {
    if request.uid.trim().is_empty()
        || request.change_password.is_none()
        || request.device_info.is_none()
    {
        error!("Received invalid password change request: missing data");
        return Err(ApiError::bad_request("Empty request or missing data!"));
    }

    OrganizerService::new().record_password_change(&request).await?;
    info!(
        "Password change request created successfully for UID: {}",
        request.uid
    );
    Ok(ApiResponse::created(request))
}
