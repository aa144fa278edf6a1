use serde_json::json;

use crate::entities::DeviceInfo;
use crate::store::{collections, Collection, DocRef, StoreError};

pub struct DeviceRepository {
    devices: Collection<DeviceInfo>,
}

impl Default for DeviceRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceRepository {
    pub fn new() -> Self {
        Self {
            devices: Collection::new(collections::DEVICES),
        }
    }

    /// Upsert by natural key: look up by `device_key`, insert only on
    /// not-found, return the existing or new reference. The lookup and the
    /// insert are separate statements, so concurrent calls for the same
    /// device can still create duplicates.
    pub async fn upsert(&self, device: &DeviceInfo) -> Result<DocRef, StoreError> {
        match self.find_by_key(&device.device_key).await? {
            Some(doc_ref) => Ok(doc_ref),
            None => self.devices.add(device).await,
        }
    }

    pub async fn find_by_key(&self, device_key: &str) -> Result<Option<DocRef>, StoreError> {
        Ok(self
            .devices
            .find_first(&json!({ "device_key": device_key }))
            .await?
            .map(|(doc_ref, _)| doc_ref))
    }
}
