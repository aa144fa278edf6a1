pub mod device;
pub mod events;
pub mod geo;
pub mod note;
pub mod user;

pub use device::DeviceInfo;
pub use events::{PasswordChange, SessionEvent};
pub use geo::GeoPoint;
pub use note::{Note, NoteBody, NoteHeader};
pub use user::{User, UserMetadata};

use chrono::{DateTime, Utc};

/// Normalize a timestamp for storage and equality predicates: UTC, whole
/// seconds. Applied on write and on lookup so equality on the stored value
/// is stable.
pub fn truncate_to_seconds(ts: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp(ts.timestamp(), 0).unwrap_or(ts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn truncation_drops_subsecond_precision() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 17, 10, 30, 42).unwrap()
            + chrono::Duration::milliseconds(587);
        let truncated = truncate_to_seconds(ts);
        assert_eq!(truncated.timestamp_subsec_nanos(), 0);
        assert_eq!(truncated.timestamp(), ts.timestamp());
    }

    #[test]
    fn truncated_timestamps_serialize_without_fraction() {
        let ts = truncate_to_seconds(Utc.with_ymd_and_hms(2024, 5, 17, 10, 30, 42).unwrap());
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2024-05-17T10:30:42Z\"");
    }
}
