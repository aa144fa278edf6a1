pub mod devices;
pub mod events;
pub mod metadata;
pub mod notes;
pub mod users;

pub use devices::DeviceRepository;
pub use events::{PasswordChangeRepository, SessionEventRepository};
pub use metadata::UserMetadataRepository;
pub use notes::NoteRepository;
pub use users::UserRepository;
