pub mod crypto;
pub mod organizer;

pub use crypto::{CryptoBox, CryptoError};
pub use organizer::{OrganizerError, OrganizerService};
