use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::GeoPoint;

/// Wire shape of a user. Document references travel as plain id strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub uid: String,
    pub users_metadata_id: Option<String>,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub is_metadata_stored: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserMetadataDto {
    pub uid: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
    pub creation_device_id: Option<String>,
    pub creation_location: Option<GeoPoint>,
    pub deletion_date: Option<DateTime<Utc>>,
    pub deletion_device_id: Option<String>,
    pub deletion_location: Option<GeoPoint>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceInfoDto {
    pub name: String,
    pub model: String,
    pub manufacturer: String,
    pub platform: String,
    pub idiom: String,
    pub device_type: String,
    #[serde(default)]
    pub version: String,
}

/// Create/remove user request. Metadata and the device that performed the
/// action are only present for users who opted into metadata bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRequest {
    pub user: Option<UserDto>,
    pub users_metadata: Option<UserMetadataDto>,
    pub creation_device: Option<DeviceInfoDto>,
    pub deletion_device: Option<DeviceInfoDto>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataFlagUpdate {
    pub uid: String,
    #[serde(default)]
    pub is_metadata_stored: bool,
    pub error: Option<String>,
}
