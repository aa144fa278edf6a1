use serde::{Deserialize, Serialize};

/// A device seen by the app. Devices are deduplicated by `device_key`, the
/// composite natural key; the version field is not part of the key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub name: String,
    pub model: String,
    pub manufacturer: String,
    pub platform: String,
    pub idiom: String,
    pub device_type: String,
    pub version: String,
    pub device_key: String,
}

impl DeviceInfo {
    pub fn composite_key(&self) -> String {
        format!(
            "{}_{}_{}_{}_{}_{}",
            self.name, self.model, self.manufacturer, self.platform, self.idiom, self.device_type
        )
    }

    /// Stamp the natural key from the identifying fields. Must be called
    /// before the entity is persisted or used in an upsert lookup.
    pub fn with_key(mut self) -> Self {
        self.device_key = self.composite_key();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DeviceInfo {
        DeviceInfo {
            name: "Pixel 7".into(),
            model: "GVU6C".into(),
            manufacturer: "Google".into(),
            platform: "Android".into(),
            idiom: "Phone".into(),
            device_type: "Physical".into(),
            version: "14".into(),
            device_key: String::new(),
        }
    }

    #[test]
    fn key_concatenates_identifying_fields() {
        let device = sample().with_key();
        assert_eq!(device.device_key, "Pixel 7_GVU6C_Google_Android_Phone_Physical");
    }

    #[test]
    fn key_ignores_version() {
        let a = sample().with_key();
        let mut b = sample();
        b.version = "15".into();
        let b = b.with_key();
        assert_eq!(a.device_key, b.device_key);
    }
}
