use async_trait::async_trait;

use crate::model::entity::Device;

#[async_trait]
pub trait DeviceRepo: Send + Sync {
    /// Atomically looks up a device, inserting it on miss.
    ///
    /// The flag is true when the device was created by this call.
    async fn get_or_create(&self, device_id: u64) -> anyhow::Result<(Device, bool)>;

    async fn get_by_id(&self, device_id: u64) -> anyhow::Result<Option<Device>>;
}
