use thiserror::Error;
use tracing::info;

use crate::dto::{
    NoteBodyDto, NoteDto, NoteHeaderDto, PasswordChangeRequest, SessionEventRequest,
    UserMetadataDto, UserRequest,
};
use crate::entities::{PasswordChange, SessionEvent};
use crate::mapping::Mapper;
use crate::repositories::{
    DeviceRepository, NoteRepository, PasswordChangeRepository, SessionEventRepository,
    UserMetadataRepository, UserRepository,
};
use crate::services::crypto::{CryptoBox, CryptoError};
use crate::store::{DocRef, StoreError};

#[derive(Debug, Error)]
pub enum OrganizerError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

fn validation(msg: impl Into<String>) -> OrganizerError {
    OrganizerError::Validation(msg.into())
}

/// Composes the repositories and the mapping layer into the storage use
/// cases. Constructed per request; all the handles it holds are cheap.
pub struct OrganizerService {
    users: UserRepository,
    metadata: UserMetadataRepository,
    devices: DeviceRepository,
    notes: NoteRepository,
    logins: SessionEventRepository,
    logouts: SessionEventRepository,
    password_changes: PasswordChangeRepository,
    mapper: Mapper,
}

impl Default for OrganizerService {
    fn default() -> Self {
        Self::new()
    }
}

impl OrganizerService {
    pub fn new() -> Self {
        Self {
            users: UserRepository::new(),
            metadata: UserMetadataRepository::new(),
            devices: DeviceRepository::new(),
            notes: NoteRepository::new(),
            logins: SessionEventRepository::logins(),
            logouts: SessionEventRepository::logouts(),
            password_changes: PasswordChangeRepository::new(),
            mapper: Mapper::new(),
        }
    }

    /// Create a user; when metadata is supplied, the creation device is
    /// upserted and a metadata document is created and linked first.
    pub async fn create_user(&self, request: UserRequest) -> Result<UserRequest, OrganizerError> {
        let user_dto = request
            .user
            .as_ref()
            .ok_or_else(|| validation("Empty request or missing user data!"))?;

        if self.users.active_exists(&user_dto.uid).await? {
            return Err(validation(format!(
                "User with UID '{}' already exists.",
                user_dto.uid
            )));
        }

        let mut user = self.mapper.dto_to_user(user_dto).await?;

        if let Some(metadata_dto) = &request.users_metadata {
            let device_dto = request.creation_device.as_ref().ok_or_else(|| {
                validation("Metadata is stored, but parameter \"creation_device\" is missing!")
            })?;

            let device = self.mapper.device_from_dto(device_dto);
            let device_ref = self.devices.upsert(&device).await?;

            let mut metadata = self.mapper.dto_to_metadata(metadata_dto).await?;
            metadata.creation_device = Some(device_ref);

            let metadata_ref = self.metadata.create(&metadata).await?;
            user.metadata = Some(metadata_ref);
            info!("Metadata document created successfully for user UID: {}", user.uid);
        }

        self.users.create(&user).await?;
        Ok(request)
    }

    /// Active user snapshot; soft-deleted users are invisible here.
    pub async fn get_user(&self, uid: &str) -> Result<crate::dto::UserDto, OrganizerError> {
        let user = self.users.get_active_by_uid(uid).await?;
        Ok(self.mapper.user_to_dto(&user))
    }

    /// Overwrite a user document regardless of deletion state.
    pub async fn update_user(&self, dto: &crate::dto::UserDto) -> Result<(), OrganizerError> {
        let user = self.mapper.dto_to_user(dto).await?;
        self.users.update(&user).await?;
        Ok(())
    }

    pub async fn metadata_flag(&self, uid: &str) -> Result<bool, OrganizerError> {
        let user = self.users.get_active_by_uid(uid).await?;
        Ok(user.is_metadata_stored)
    }

    pub async fn set_metadata_flag(&self, uid: &str, value: bool) -> Result<(), OrganizerError> {
        let mut user = self.users.get_active_by_uid(uid).await?;
        user.is_metadata_stored = value;
        self.users.update(&user).await?;
        Ok(())
    }

    /// Snapshot a user's metadata document (lazily created on first access).
    pub async fn user_metadata(&self, uid: &str) -> Result<UserMetadataDto, OrganizerError> {
        let metadata_ref = self.metadata.metadata_ref_for_uid(uid).await?;
        let snapshot = self.metadata.snapshot(&metadata_ref).await?;

        let mut dto = self.mapper.metadata_to_dto(&snapshot);
        dto.uid = Some(uid.to_string());
        Ok(dto)
    }

    /// Soft-delete a user. Metadata-stored users must ship their final
    /// metadata and the deleting device; returns false when the metadata
    /// payload is absent so the handler can reject the request.
    pub async fn remove_user(&self, request: &UserRequest) -> Result<bool, OrganizerError> {
        let user_dto = request
            .user
            .as_ref()
            .ok_or_else(|| validation("Invalid request. User information is missing."))?;

        let user = self.mapper.dto_to_user(user_dto).await?;

        if user.is_metadata_stored {
            let Some(metadata_dto) = &request.users_metadata else {
                return Ok(false);
            };

            let device_dto = request.deletion_device.as_ref().ok_or_else(|| {
                validation("Metadata is stored, but parameter \"deletion_device\" is missing!")
            })?;

            let device = self.mapper.device_from_dto(device_dto);
            let device_ref = self.devices.upsert(&device).await?;

            let mut metadata = self.mapper.dto_to_metadata(metadata_dto).await?;
            metadata.deletion_device = Some(device_ref);

            self.metadata.update(&user.uid, &metadata).await?;
            info!("Metadata for user with UID '{}' was updated before soft-delete.", user.uid);
        }

        self.users.soft_delete(&user.uid).await?;
        Ok(true)
    }

    pub async fn record_login(
        &self,
        request: &SessionEventRequest,
    ) -> Result<SessionEvent, OrganizerError> {
        let event = self.build_session_event(request).await?;
        self.logins.create(&event).await?;
        Ok(event)
    }

    pub async fn record_logout(
        &self,
        request: &SessionEventRequest,
    ) -> Result<SessionEvent, OrganizerError> {
        let event = self.build_session_event(request).await?;
        self.logouts.create(&event).await?;
        Ok(event)
    }

    async fn build_session_event(
        &self,
        request: &SessionEventRequest,
    ) -> Result<SessionEvent, OrganizerError> {
        let event_dto = request
            .event
            .as_ref()
            .ok_or_else(|| validation("Empty request or missing data!"))?;
        let device_dto = request
            .device_info
            .as_ref()
            .ok_or_else(|| validation("Empty request or missing data!"))?;

        let (device_ref, metadata_ref) = self
            .device_and_metadata_refs(&request.user_uid, device_dto)
            .await?;

        Ok(SessionEvent {
            metadata: Some(metadata_ref),
            device: Some(device_ref),
            location: event_dto.location,
            date: event_dto.date,
        })
    }

    /// Record a password change; the old password is encrypted before it is
    /// persisted.
    pub async fn record_password_change(
        &self,
        request: &PasswordChangeRequest,
    ) -> Result<(), OrganizerError> {
        let change_dto = request
            .change_password
            .as_ref()
            .ok_or_else(|| validation("Empty request or missing data!"))?;
        let device_dto = request
            .device_info
            .as_ref()
            .ok_or_else(|| validation("Empty request or missing data!"))?;

        let (device_ref, metadata_ref) = self
            .device_and_metadata_refs(&request.uid, device_dto)
            .await?;

        let crypto = CryptoBox::from_config()?;
        let change = PasswordChange {
            metadata: Some(metadata_ref),
            old_password: crypto.encrypt(&change_dto.old_password)?,
            device: Some(device_ref),
            location: change_dto.location,
            date: change_dto.date,
        };

        self.password_changes.create(&change).await?;
        Ok(())
    }

    async fn device_and_metadata_refs(
        &self,
        uid: &str,
        device_dto: &crate::dto::DeviceInfoDto,
    ) -> Result<(DocRef, DocRef), OrganizerError> {
        let device = self.mapper.device_from_dto(device_dto);
        let device_ref = self.devices.upsert(&device).await?;
        let metadata_ref = self.metadata.metadata_ref_for_uid(uid).await?;
        Ok((device_ref, metadata_ref))
    }

    pub async fn create_note(&self, dto: &NoteDto) -> Result<NoteDto, OrganizerError> {
        let note = self.mapper.note_from_dto(dto);
        let body = note
            .body
            .as_ref()
            .ok_or_else(|| validation("Empty note or missing data!"))?;

        let header = self.notes.create(note.header.clone(), body).await?;

        let mut result = dto.clone();
        result.body_id = header.body.as_ref().map(|r| r.id.to_string());
        result.created_at = header.created_at;
        Ok(result)
    }

    pub async fn note_headers(&self, uid: &str) -> Result<Vec<NoteHeaderDto>, OrganizerError> {
        let headers = self.notes.headers_for_uid(uid).await?;
        Ok(headers.iter().map(|h| self.mapper.header_to_dto(h)).collect())
    }

    pub async fn note_body(&self, header_dto: &NoteHeaderDto) -> Result<NoteBodyDto, OrganizerError> {
        let header = self.mapper.header_from_dto(header_dto);
        let body_ref = header
            .body
            .ok_or_else(|| validation("Note header carries no body reference."))?;

        let body = self.notes.body(&body_ref).await?;
        Ok(NoteBodyDto {
            content: body.content,
        })
    }

    pub async fn update_note(&self, dto: &NoteDto) -> Result<(), OrganizerError> {
        let note = self.mapper.note_from_dto(dto);
        if note.body.is_some() && note.header.body.is_none() {
            return Err(validation("Note content was sent without a body reference."));
        }
        self.notes.update(&note).await?;
        Ok(())
    }

    pub async fn remove_note(&self, header_dto: &NoteHeaderDto) -> Result<(), OrganizerError> {
        let header = self.mapper.header_from_dto(header_dto);
        self.notes.soft_delete(&header).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::NoteDto;
    use chrono::Utc;

    // Store-backed paths are covered by the router tests; these exercise the
    // pure validation edges that never reach the pool.

    #[tokio::test]
    async fn create_note_without_content_is_rejected() {
        let service = OrganizerService::new();
        let dto = NoteDto {
            user_uid: "uid-1".into(),
            body_id: None,
            title: "t".into(),
            preview_text: String::new(),
            content: None,
            created_at: Utc::now(),
            is_deleted: false,
            error: None,
        };

        match service.create_note(&dto).await {
            Err(OrganizerError::Validation(_)) => {}
            other => panic!("expected validation error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn update_note_content_requires_body_reference() {
        let service = OrganizerService::new();
        let dto = NoteDto {
            user_uid: "uid-1".into(),
            body_id: None,
            title: "t".into(),
            preview_text: String::new(),
            content: Some("new content".into()),
            created_at: Utc::now(),
            is_deleted: false,
            error: None,
        };

        match service.update_note(&dto).await {
            Err(OrganizerError::Validation(_)) => {}
            other => panic!("expected validation error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn note_body_requires_reference() {
        let service = OrganizerService::new();
        let dto = crate::dto::NoteHeaderDto {
            user_uid: "uid-1".into(),
            body_id: None,
            title: "t".into(),
            preview_text: String::new(),
            created_at: Utc::now(),
            is_deleted: false,
        };

        match service.note_body(&dto).await {
            Err(OrganizerError::Validation(_)) => {}
            other => panic!("expected validation error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn create_user_requires_user_payload() {
        let service = OrganizerService::new();
        let request = UserRequest {
            user: None,
            users_metadata: None,
            creation_device: None,
            deletion_device: None,
            error: None,
        };

        match service.create_user(request).await {
            Err(OrganizerError::Validation(_)) => {}
            other => panic!("expected validation error, got {:?}", other.map(|_| ())),
        }
    }
}
