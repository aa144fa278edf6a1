use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dto::users::DeviceInfoDto;
use crate::entities::GeoPoint;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEventDto {
    pub location: GeoPoint,
    pub date: DateTime<Utc>,
}

/// Login/logout event creation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEventRequest {
    pub user_uid: String,
    pub event: Option<SessionEventDto>,
    pub device_info: Option<DeviceInfoDto>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordChangeDto {
    pub old_password: String,
    pub location: GeoPoint,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordChangeRequest {
    pub uid: String,
    pub change_password: Option<PasswordChangeDto>,
    pub device_info: Option<DeviceInfoDto>,
    pub error: Option<String>,
}
