use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::DocRef;

/// Listing-friendly half of a note. The full content lives in a separate
/// body document so listing headers never loads note bodies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteHeader {
    pub user_uid: String,
    pub body: Option<DocRef>,
    pub title: String,
    pub preview_text: String,
    pub created_at: DateTime<Utc>,
    pub is_deleted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteBody {
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub header: NoteHeader,
    pub body: Option<NoteBody>,
}
