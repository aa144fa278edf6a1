use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::geo::GeoPoint;
use crate::store::DocRef;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub uid: String,
    pub metadata: Option<DocRef>,
    pub is_deleted: bool,
    pub is_metadata_stored: bool,
}

/// Creation/deletion bookkeeping attached to a user. Every field is optional:
/// a blank document is created lazily the first time anything asks for a
/// user's metadata reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserMetadata {
    pub creation_date: Option<DateTime<Utc>>,
    pub creation_device: Option<DocRef>,
    pub creation_location: Option<GeoPoint>,
    pub deletion_date: Option<DateTime<Utc>>,
    pub deletion_device: Option<DocRef>,
    pub deletion_location: Option<GeoPoint>,
}
