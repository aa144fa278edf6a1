use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Flat wire shape of a note: header fields plus the optional full content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteDto {
    pub user_uid: String,
    pub body_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub preview_text: String,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_deleted: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteHeaderDto {
    pub user_uid: String,
    pub body_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub preview_text: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_deleted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteBodyDto {
    pub content: String,
}
