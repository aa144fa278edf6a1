use crate::entities::{PasswordChange, SessionEvent};
use crate::store::{collections, Collection, DocRef, StoreError};

/// Append-only repository for login/logout events; the two differ only in
/// which collection they land in.
pub struct SessionEventRepository {
    events: Collection<SessionEvent>,
}

impl SessionEventRepository {
    pub fn logins() -> Self {
        Self {
            events: Collection::new(collections::ACCOUNT_LOGINS),
        }
    }

    pub fn logouts() -> Self {
        Self {
            events: Collection::new(collections::ACCOUNT_LOGOUTS),
        }
    }

    pub async fn create(&self, event: &SessionEvent) -> Result<DocRef, StoreError> {
        self.events.add(event).await
    }
}

pub struct PasswordChangeRepository {
    changes: Collection<PasswordChange>,
}

impl Default for PasswordChangeRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordChangeRepository {
    pub fn new() -> Self {
        Self {
            changes: Collection::new(collections::CHANGE_PASSWORDS),
        }
    }

    pub async fn create(&self, change: &PasswordChange) -> Result<DocRef, StoreError> {
        self.changes.add(change).await
    }
}
