use uuid::Uuid;

use crate::dto::{DeviceInfoDto, NoteDto, NoteHeaderDto, UserDto, UserMetadataDto};
use crate::entities::{self, DeviceInfo, Note, NoteBody, NoteHeader, User, UserMetadata};
use crate::store::{collections, Collection, DocRef, StoreError};

/// Converts between wire DTOs and persisted entities.
///
/// DTOs carry plain id strings; entities carry `DocRef`s. Ids are resolved
/// against the store before linking, and ids that do not resolve (malformed
/// or dangling) are dropped rather than propagated.
pub struct Mapper {
    users_metadata: Collection<UserMetadata>,
    devices: Collection<DeviceInfo>,
}

impl Default for Mapper {
    fn default() -> Self {
        Self::new()
    }
}

impl Mapper {
    pub fn new() -> Self {
        Self {
            users_metadata: Collection::new(collections::USERS_METADATA),
            devices: Collection::new(collections::DEVICES),
        }
    }

    pub fn user_to_dto(&self, user: &User) -> UserDto {
        UserDto {
            uid: user.uid.clone(),
            users_metadata_id: user.metadata.as_ref().map(|r| r.id.to_string()),
            is_deleted: user.is_deleted,
            is_metadata_stored: user.is_metadata_stored,
        }
    }

    pub async fn dto_to_user(&self, dto: &UserDto) -> Result<User, StoreError> {
        let metadata = self
            .resolve(&self.users_metadata, dto.users_metadata_id.as_deref())
            .await?;

        Ok(User {
            uid: dto.uid.clone(),
            metadata,
            is_deleted: dto.is_deleted,
            is_metadata_stored: dto.is_metadata_stored,
        })
    }

    pub fn metadata_to_dto(&self, metadata: &UserMetadata) -> UserMetadataDto {
        UserMetadataDto {
            uid: None,
            creation_date: metadata.creation_date,
            creation_device_id: metadata.creation_device.as_ref().map(|r| r.id.to_string()),
            creation_location: metadata.creation_location,
            deletion_date: metadata.deletion_date,
            deletion_device_id: metadata.deletion_device.as_ref().map(|r| r.id.to_string()),
            deletion_location: metadata.deletion_location,
            error: None,
        }
    }

    pub async fn dto_to_metadata(&self, dto: &UserMetadataDto) -> Result<UserMetadata, StoreError> {
        let creation_device = self
            .resolve(&self.devices, dto.creation_device_id.as_deref())
            .await?;
        let deletion_device = self
            .resolve(&self.devices, dto.deletion_device_id.as_deref())
            .await?;

        Ok(UserMetadata {
            creation_date: dto.creation_date,
            creation_device,
            creation_location: dto.creation_location,
            deletion_date: dto.deletion_date,
            deletion_device,
            deletion_location: dto.deletion_location,
        })
    }

    pub fn device_from_dto(&self, dto: &DeviceInfoDto) -> DeviceInfo {
        DeviceInfo {
            name: dto.name.clone(),
            model: dto.model.clone(),
            manufacturer: dto.manufacturer.clone(),
            platform: dto.platform.clone(),
            idiom: dto.idiom.clone(),
            device_type: dto.device_type.clone(),
            version: dto.version.clone(),
            device_key: String::new(),
        }
        .with_key()
    }

    pub fn note_from_dto(&self, dto: &NoteDto) -> Note {
        Note {
            header: NoteHeader {
                user_uid: dto.user_uid.clone(),
                body: body_ref(dto.body_id.as_deref()),
                title: dto.title.clone(),
                preview_text: dto.preview_text.clone(),
                created_at: entities::truncate_to_seconds(dto.created_at),
                is_deleted: dto.is_deleted,
            },
            body: dto.content.as_ref().map(|content| NoteBody {
                content: content.clone(),
            }),
        }
    }

    pub fn header_from_dto(&self, dto: &NoteHeaderDto) -> NoteHeader {
        NoteHeader {
            user_uid: dto.user_uid.clone(),
            body: body_ref(dto.body_id.as_deref()),
            title: dto.title.clone(),
            preview_text: dto.preview_text.clone(),
            created_at: entities::truncate_to_seconds(dto.created_at),
            is_deleted: dto.is_deleted,
        }
    }

    pub fn header_to_dto(&self, header: &NoteHeader) -> NoteHeaderDto {
        NoteHeaderDto {
            user_uid: header.user_uid.clone(),
            body_id: header.body.as_ref().map(|r| r.id.to_string()),
            title: header.title.clone(),
            preview_text: header.preview_text.clone(),
            created_at: header.created_at,
            is_deleted: header.is_deleted,
        }
    }

    /// Resolve an id string to a reference into `collection`, checking the
    /// document actually exists. Missing, malformed and dangling ids all
    /// resolve to None.
    async fn resolve<T>(
        &self,
        collection: &Collection<T>,
        id: Option<&str>,
    ) -> Result<Option<DocRef>, StoreError>
    where
        T: serde::Serialize + serde::de::DeserializeOwned,
    {
        let Some(id) = id else { return Ok(None) };
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(None);
        };

        let doc_ref = DocRef::new(collection.name(), id);
        match collection.try_get(&doc_ref).await? {
            Some(_) => Ok(Some(doc_ref)),
            None => Ok(None),
        }
    }
}

fn body_ref(id: Option<&str>) -> Option<DocRef> {
    let id = Uuid::parse_str(id?).ok()?;
    Some(DocRef::new(collections::NOTE_BODIES, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn note_mapping_truncates_creation_time() {
        let mapper = Mapper::new();
        let dto = NoteDto {
            user_uid: "uid-1".into(),
            body_id: None,
            title: "shopping".into(),
            preview_text: "milk, eggs".into(),
            content: Some("milk, eggs, bread".into()),
            created_at: Utc.with_ymd_and_hms(2024, 5, 17, 10, 30, 42).unwrap()
                + chrono::Duration::milliseconds(999),
            is_deleted: false,
            error: None,
        };

        let note = mapper.note_from_dto(&dto);
        assert_eq!(note.header.created_at.timestamp_subsec_nanos(), 0);
        assert_eq!(note.body.unwrap().content, "milk, eggs, bread");
    }

    #[test]
    fn malformed_body_id_is_dropped() {
        let mapper = Mapper::new();
        let dto = NoteHeaderDto {
            user_uid: "uid-1".into(),
            body_id: Some("definitely-not-a-uuid".into()),
            title: "t".into(),
            preview_text: String::new(),
            created_at: Utc::now(),
            is_deleted: false,
        };
        assert!(mapper.header_from_dto(&dto).body.is_none());
    }

    #[test]
    fn header_round_trip_keeps_body_id() {
        let mapper = Mapper::new();
        let id = uuid::Uuid::new_v4();
        let header = NoteHeader {
            user_uid: "uid-1".into(),
            body: Some(DocRef::new(collections::NOTE_BODIES, id)),
            title: "t".into(),
            preview_text: "p".into(),
            created_at: entities::truncate_to_seconds(Utc::now()),
            is_deleted: false,
        };

        let dto = mapper.header_to_dto(&header);
        assert_eq!(dto.body_id.as_deref(), Some(id.to_string().as_str()));

        let back = mapper.header_from_dto(&dto);
        assert_eq!(back.body, header.body);
    }
}
