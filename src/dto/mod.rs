pub mod billing;
pub mod events;
pub mod notes;
pub mod saas;
pub mod users;

pub use billing::{PlanRequest, ReasonRequest, SubscriptionRequest, TransactionsQuery};
pub use events::{PasswordChangeDto, PasswordChangeRequest, SessionEventDto, SessionEventRequest};
pub use notes::{NoteBodyDto, NoteDto, NoteHeaderDto};
pub use saas::{SummaryRequest, TranscriptionResponse};
pub use users::{DeviceInfoDto, MetadataFlagUpdate, UserDto, UserMetadataDto, UserRequest};
