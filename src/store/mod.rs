pub mod collection;
pub mod document;
pub mod manager;

pub use collection::Collection;
pub use document::DocRef;
pub use manager::{StoreError, StoreManager};

/// Collection names used by the gateway. Kept in one place so repositories
/// and references always agree on spelling.
pub mod collections {
    pub const USERS: &str = "users";
    pub const USERS_METADATA: &str = "users_metadata";
    pub const DEVICES: &str = "devices";
    pub const NOTE_HEADERS: &str = "note_headers";
    pub const NOTE_BODIES: &str = "note_bodies";
    pub const ACCOUNT_LOGINS: &str = "account_logins";
    pub const ACCOUNT_LOGOUTS: &str = "account_logouts";
    pub const CHANGE_PASSWORDS: &str = "change_passwords";
}
