use serde_json::json;

use crate::entities::User;
use crate::store::{collections, Collection, DocRef, StoreError};

pub struct UserRepository {
    users: Collection<User>,
}

impl Default for UserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl UserRepository {
    pub fn new() -> Self {
        Self {
            users: Collection::new(collections::USERS),
        }
    }

    pub async fn create(&self, user: &User) -> Result<DocRef, StoreError> {
        self.users.add(user).await
    }

    /// Active (non-deleted) user by uid; 404 when missing or soft-deleted.
    pub async fn get_active_by_uid(&self, uid: &str) -> Result<User, StoreError> {
        match self
            .users
            .find_first(&json!({ "uid": uid, "is_deleted": false }))
            .await?
        {
            Some((_, user)) => Ok(user),
            None => Err(StoreError::NotFound(format!(
                "Not deleted User Document with UID '{}' was not found.",
                uid
            ))),
        }
    }

    /// Whether an active user with this uid already exists.
    pub async fn active_exists(&self, uid: &str) -> Result<bool, StoreError> {
        Ok(self
            .users
            .find_first(&json!({ "uid": uid, "is_deleted": false }))
            .await?
            .is_some())
    }

    /// Overwrite the user document, located by uid regardless of deletion
    /// state.
    pub async fn update(&self, user: &User) -> Result<(), StoreError> {
        match self.users.find_first(&json!({ "uid": user.uid })).await? {
            Some((doc_ref, _)) => self.users.set(&doc_ref, user).await,
            None => Err(StoreError::NotFound(format!(
                "User Document with UID '{}' was not found.",
                user.uid
            ))),
        }
    }

    /// Soft delete: flag the active user document, never remove it.
    pub async fn soft_delete(&self, uid: &str) -> Result<(), StoreError> {
        let mut user = self.get_active_by_uid(uid).await?;
        user.is_deleted = true;
        self.update(&user).await
    }
}
