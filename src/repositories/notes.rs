use chrono::{DateTime, Utc};
use serde_json::json;

use crate::entities::{self, Note, NoteBody, NoteHeader};
use crate::store::{collections, Collection, DocRef, StoreError};

pub struct NoteRepository {
    headers: Collection<NoteHeader>,
    bodies: Collection<NoteBody>,
}

impl Default for NoteRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteRepository {
    pub fn new() -> Self {
        Self {
            headers: Collection::new(collections::NOTE_HEADERS),
            bodies: Collection::new(collections::NOTE_BODIES),
        }
    }

    /// Persist a note: the body document is created first and the header is
    /// stored with a reference to it.
    pub async fn create(&self, mut header: NoteHeader, body: &NoteBody) -> Result<NoteHeader, StoreError> {
        let body_ref = self.bodies.add(body).await?;
        header.body = Some(body_ref);
        header.created_at = entities::truncate_to_seconds(header.created_at);
        self.headers.add(&header).await?;
        Ok(header)
    }

    /// Active note headers for a user. An empty result is reported as
    /// not-found, matching the API contract for listing.
    pub async fn headers_for_uid(&self, uid: &str) -> Result<Vec<NoteHeader>, StoreError> {
        let docs = self
            .headers
            .find_all(&json!({ "user_uid": uid, "is_deleted": false }))
            .await?;

        if docs.is_empty() {
            return Err(StoreError::NotFound(format!(
                "Not deleted note headers for UID '{}' were not found.",
                uid
            )));
        }
        Ok(docs.into_iter().map(|(_, header)| header).collect())
    }

    pub async fn body(&self, body_ref: &DocRef) -> Result<NoteBody, StoreError> {
        self.bodies.get(body_ref).await
    }

    /// Overwrite a note located by its creation time (whole-second
    /// precision), scoped to the owning uid. Two notes created in the same
    /// second by the same user are indistinguishable here.
    pub async fn update(&self, note: &Note) -> Result<(), StoreError> {
        let header_ref = self
            .header_ref_by_created_at(&note.header.user_uid, note.header.created_at)
            .await?;

        let mut header = note.header.clone();
        header.created_at = entities::truncate_to_seconds(header.created_at);
        self.headers.set(&header_ref, &header).await?;

        if let Some(body) = &note.body {
            let body_ref = header.body.ok_or_else(|| {
                StoreError::QueryError("note header carries no body reference to update".to_string())
            })?;
            self.bodies.set(&body_ref, body).await?;
        }
        Ok(())
    }

    /// Soft delete: flag the header through the same creation-time lookup as
    /// update. The body document stays untouched.
    pub async fn soft_delete(&self, header: &NoteHeader) -> Result<(), StoreError> {
        let mut header = header.clone();
        header.is_deleted = true;
        self.update(&Note {
            header,
            body: None,
        })
        .await
    }

    async fn header_ref_by_created_at(
        &self,
        uid: &str,
        created_at: DateTime<Utc>,
    ) -> Result<DocRef, StoreError> {
        let normalized = entities::truncate_to_seconds(created_at);

        match self
            .headers
            .find_first(&json!({ "user_uid": uid, "created_at": normalized }))
            .await?
        {
            Some((doc_ref, _)) => Ok(doc_ref),
            None => Err(StoreError::NotFound(format!(
                "Note header with creation time '{}' was not found.",
                normalized
            ))),
        }
    }
}
