use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::geo::GeoPoint;
use crate::store::DocRef;

/// Account login/logout event. The same shape is persisted to both the
/// login and logout collections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEvent {
    pub metadata: Option<DocRef>,
    pub device: Option<DocRef>,
    pub location: GeoPoint,
    pub date: DateTime<Utc>,
}

/// Password-change event. `old_password` holds ciphertext, never plaintext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordChange {
    pub metadata: Option<DocRef>,
    pub old_password: String,
    pub device: Option<DocRef>,
    pub location: GeoPoint,
    pub date: DateTime<Utc>,
}
