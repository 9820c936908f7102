use std::sync::Arc;

use async_trait::async_trait;
use domain_sampler::{
    exception::{SamplerException, SamplerResult},
    model::entity::{Deployment, Device},
    repository::{DeploymentRepo, DeviceRepo},
    service::DirectoryService,
};
use tracing::info;
use typed_builder::TypedBuilder;

#[derive(TypedBuilder)]
pub struct DirectoryServiceImpl {
    device_repo: Arc<dyn DeviceRepo>,
    deployment_repo: Arc<dyn DeploymentRepo>,
}

#[async_trait]
impl DirectoryService for DirectoryServiceImpl {
    async fn get_or_create_device(&self, device_id: u64) -> SamplerResult<(Device, bool)> {
        let (device, created) = self.device_repo.get_or_create(device_id).await?;
        if created {
            info!("Registered device {device_id}.");
        }
        Ok((device, created))
    }

    async fn get_or_create_deployment(
        &self,
        device: &Device,
        token: &str,
    ) -> SamplerResult<(Deployment, bool)> {
        let (deployment, created) = self
            .deployment_repo
            .get_or_create(device.device_id, token, chrono::Utc::now())
            .await?;
        if created {
            info!("Created deployment {token} for device {}.", device.device_id);
        }
        Ok((deployment, created))
    }

    async fn get_deployment(&self, token: &str) -> SamplerResult<Deployment> {
        self.deployment_repo
            .get_by_token(token)
            .await?
            .ok_or_else(|| SamplerException::TargetNotFound {
                target: format!("deployment {token}"),
            })
    }

    async fn pending_deployments(&self, device_id: u64) -> SamplerResult<Vec<Deployment>> {
        let mut deployments = self.deployment_repo.get_all_by_device(device_id).await?;
        deployments.retain(|d| d.is_new);
        Ok(deployments)
    }

    async fn mark_has_data(&self, token: &str) -> SamplerResult<Deployment> {
        let mut deployment = self.get_deployment(token).await?;
        deployment.mark_has_data();
        self.deployment_repo.update(&deployment).await?;
        Ok(deployment)
    }

    async fn list_deployments(&self) -> SamplerResult<Vec<Deployment>> {
        let mut deployments = self.deployment_repo.get_all().await?;
        deployments.sort_by_key(|d| (d.has_data, d.id));
        Ok(deployments)
    }
}
