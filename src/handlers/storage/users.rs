use axum::extract::Path;
use axum::Json;
use tracing::{error, info};

use crate::dto::{MetadataFlagUpdate, UserDto, UserMetadataDto, UserRequest};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::OrganizerService;

/// POST /storage/users - create a user, with optional metadata bookkeeping
pub async fn create_user(Json(request): Json<UserRequest>) -> ApiResult<UserRequest> {
    let Some(user) = request.user.as_ref() else {
        error!("Received invalid user creation request: missing user data");
        return Err(ApiError::bad_request("Empty request or missing user data!"));
    };
    if user.uid.trim().is_empty() {
        return Err(ApiError::bad_request("UID is required to create a user."));
    }

    let uid = user.uid.clone();
    let result = OrganizerService::new().create_user(request).await?;

    info!("User created successfully with UID: {}", uid);
    Ok(ApiResponse::created(result))
}

/// GET /storage/users/:uid - active user snapshot
pub async fn get_user(Path(uid): Path<String>) -> ApiResult<UserDto> {
    if uid.trim().is_empty() {
        return Err(ApiError::bad_request("UID is required to retrieve a user."));
    }

    let user = OrganizerService::new().get_user(&uid).await?;
    info!("User with UID '{}' retrieved successfully.", uid);
    Ok(ApiResponse::success(user))
}

/// PUT /storage/users - overwrite a user document
pub async fn update_user(Json(user): Json<UserDto>) -> ApiResult<UserDto> {
    if user.uid.trim().is_empty() {
        return Err(ApiError::bad_request("UID is required to update a user."));
    }

    OrganizerService::new().update_user(&user).await?;
    info!("User with UID '{}' updated successfully.", user.uid);
    Ok(ApiResponse::success(user))
}

/// DELETE /storage/users - soft-delete a user
pub async fn remove_user(Json(request): Json<UserRequest>) -> ApiResult<UserRequest> {
    let Some(user) = request.user.as_ref() else {
        error!("Received invalid user removal request: missing user data");
        return Err(ApiError::bad_request("Invalid request. User information is missing."));
    };
    if user.uid.trim().is_empty() {
        return Err(ApiError::bad_request("UID is required to remove a user."));
    }
    let uid = user.uid.clone();

    let removed = OrganizerService::new().remove_user(&request).await?;
    if !removed {
        let message = format!(
            "User '{}' has metadata stored, but users_metadata object is missing in request.",
            uid
        );
        error!("{}", message);
        return Err(ApiError::bad_request(message));
    }

    info!("User with UID '{}' was successfully soft-deleted.", uid);
    Ok(ApiResponse::success(request))
}

/// POST /storage/users/metadata-flag - read the is_metadata_stored flag
pub async fn metadata_flag(Json(mut request): Json<MetadataFlagUpdate>) -> ApiResult<MetadataFlagUpdate> {
    if request.uid.trim().is_empty() {
        return Err(ApiError::bad_request("UID is required to retrieve metadata flag."));
    }

    request.is_metadata_stored = OrganizerService::new().metadata_flag(&request.uid).await?;
    info!(
        "Retrieved metadata flag for user UID '{}' = {}",
        request.uid, request.is_metadata_stored
    );
    Ok(ApiResponse::success(request))
}

/// PUT /storage/users/metadata-flag - update the is_metadata_stored flag
pub async fn set_metadata_flag(Json(request): Json<MetadataFlagUpdate>) -> ApiResult<MetadataFlagUpdate> {
    if request.uid.trim().is_empty() {
        return Err(ApiError::bad_request("UID is required to update metadata flag."));
    }

    OrganizerService::new()
        .set_metadata_flag(&request.uid, request.is_metadata_stored)
        .await?;

    info!(
        "User's is_metadata_stored flag updated successfully for UID '{}'.",
        request.uid
    );
    Ok(ApiResponse::success(request))
}

/// POST /storage/users/metadata - snapshot a user's metadata document
pub async fn user_metadata(Json(request): Json<UserMetadataDto>) -> ApiResult<UserMetadataDto> {
    let Some(uid) = request.uid.as_deref().filter(|uid| !uid.trim().is_empty()) else {
        return Err(ApiError::bad_request("UID is required to retrieve metadata."));
    };

    let metadata = OrganizerService::new().user_metadata(uid).await?;
    info!("Metadata for user UID '{}' retrieved successfully.", uid);
    Ok(ApiResponse::success(metadata))
}
