use serde_json::json;

use crate::entities::{User, UserMetadata};
use crate::store::{collections, Collection, DocRef, StoreError};

pub struct UserMetadataRepository {
    metadata: Collection<UserMetadata>,
    users: Collection<User>,
}

impl Default for UserMetadataRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl UserMetadataRepository {
    pub fn new() -> Self {
        Self {
            metadata: Collection::new(collections::USERS_METADATA),
            users: Collection::new(collections::USERS),
        }
    }

    pub async fn create(&self, metadata: &UserMetadata) -> Result<DocRef, StoreError> {
        self.metadata.add(metadata).await
    }

    pub async fn snapshot(&self, doc_ref: &DocRef) -> Result<UserMetadata, StoreError> {
        self.metadata.get(doc_ref).await
    }

    /// The metadata reference for a user, creating a blank metadata document
    /// on first access if the user has none yet.
    pub async fn metadata_ref_for_uid(&self, uid: &str) -> Result<DocRef, StoreError> {
        let (_, user) = self
            .users
            .find_first(&json!({ "uid": uid }))
            .await?
            .ok_or_else(|| {
                StoreError::NotFound(format!("User Document with UID '{}' was not found.", uid))
            })?;

        match user.metadata {
            Some(doc_ref) => Ok(doc_ref),
            None => self.create(&UserMetadata::default()).await,
        }
    }

    /// Overwrite a user's metadata document, resolving (or lazily creating)
    /// the reference first.
    pub async fn update(&self, uid: &str, metadata: &UserMetadata) -> Result<(), StoreError> {
        let doc_ref = self.metadata_ref_for_uid(uid).await?;
        self.metadata.set(&doc_ref, metadata).await
    }
}
