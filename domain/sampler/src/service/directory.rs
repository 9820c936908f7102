use async_trait::async_trait;

use crate::exception::SamplerResult;
use crate::model::entity::{Deployment, Device};

/// # Device and deployment directory
///
/// Identity resolution for devices and their deployments. Lookups create
/// records on first contact.
#[async_trait]
pub trait DirectoryService: Send + Sync {
    async fn get_or_create_device(&self, device_id: u64) -> SamplerResult<(Device, bool)>;

    async fn get_or_create_deployment(
        &self,
        device: &Device,
        token: &str,
    ) -> SamplerResult<(Deployment, bool)>;

    /// Fails with `TargetNotFound` for an unknown token.
    async fn get_deployment(&self, token: &str) -> SamplerResult<Deployment>;

    /// Deployments of the device that are still new.
    async fn pending_deployments(&self, device_id: u64) -> SamplerResult<Vec<Deployment>>;

    /// Sets `has_data` and clears `is_new`.
    async fn mark_has_data(&self, token: &str) -> SamplerResult<Deployment>;

    /// All deployments, without data first, then in creation order.
    async fn list_deployments(&self) -> SamplerResult<Vec<Deployment>>;
}
