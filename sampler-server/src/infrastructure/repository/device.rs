use domain_sampler::{model::entity::Device, repository::DeviceRepo};

use crate::infrastructure::database::JsonRepository;

#[async_trait::async_trait]
impl DeviceRepo for JsonRepository {
    async fn get_or_create(&self, device_id: u64) -> anyhow::Result<(Device, bool)> {
        let mut state = self.lock().await;
        if let Some(device) = state.devices.iter().find(|d| d.device_id == device_id) {
            return Ok((device.clone(), false));
        }
        let device = Device { device_id };
        self.commit(&mut state, |s| s.devices.push(device.clone())).await?;
        Ok((device, true))
    }

    async fn get_by_id(&self, device_id: u64) -> anyhow::Result<Option<Device>> {
        let state = self.lock().await;
        Ok(state.devices.iter().find(|d| d.device_id == device_id).cloned())
    }
}
