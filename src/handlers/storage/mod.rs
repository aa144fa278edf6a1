pub mod events;
pub mod notes;
pub mod users;
