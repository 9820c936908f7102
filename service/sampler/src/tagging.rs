use std::sync::Arc;

use async_trait::async_trait;
use domain_sampler::{
    command::TagDeploymentCommand,
    exception::SamplerResult,
    model::vo::DeploymentStatus,
    service::{DirectoryService, TaggingService},
};
use tracing::info;
use typed_builder::TypedBuilder;

#[derive(TypedBuilder)]
pub struct TaggingServiceImpl {
    directory_service: Arc<dyn DirectoryService>,
}

#[async_trait]
impl TaggingService for TaggingServiceImpl {
    async fn create_deployment(&self, cmd: TagDeploymentCommand) -> SamplerResult<()> {
        let (device, _) = self.directory_service.get_or_create_device(cmd.device_id).await?;
        let (_, created) =
            self.directory_service.get_or_create_deployment(&device, &cmd.token).await?;
        if !created {
            info!("Tag {} of device {} was scanned again.", cmd.token, cmd.device_id);
        }
        Ok(())
    }

    async fn check_deployment_status(&self, device_id: u64) -> SamplerResult<DeploymentStatus> {
        let (_, created) = self.directory_service.get_or_create_device(device_id).await?;
        if created {
            return Ok(DeploymentStatus::not_pending());
        }
        // A power cycle between two scans can leave several pending
        // deployments; the device resumes the first one it started.
        let oldest = self
            .directory_service
            .pending_deployments(device_id)
            .await?
            .into_iter()
            .min_by_key(|d| (d.deployment_date, d.id));
        Ok(match oldest {
            Some(deployment) => DeploymentStatus::pending(deployment.token),
            None => DeploymentStatus::not_pending(),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use domain_sampler::{
        mock::MockDirectoryService,
        model::{
            entity::{Deployment, Device},
            vo::PendingStatus,
        },
    };

    use super::*;

    fn device(device_id: u64) -> Device {
        Device { device_id }
    }

    #[tokio::test]
    async fn tagging_reports_success_for_existing_records() {
        let mut directory = MockDirectoryService::new();
        directory.expect_get_or_create_device().times(1).returning(|id| Ok((device(id), false)));
        directory
            .expect_get_or_create_deployment()
            .withf(|device, token| device.device_id == 7 && token.to_string() == "A1B2C3D4")
            .times(1)
            .returning(|device, token| {
                Ok((Deployment::new(1, device.device_id, token, Utc::now()), false))
            });
        let service = TaggingServiceImpl::builder().directory_service(Arc::new(directory)).build();

        service
            .create_deployment(TagDeploymentCommand {
                device_id: 7,
                token: "A1B2C3D4".to_string(),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn new_device_has_nothing_pending() {
        let mut directory = MockDirectoryService::new();
        directory.expect_get_or_create_device().returning(|id| Ok((device(id), true)));
        directory.expect_pending_deployments().never();
        let service = TaggingServiceImpl::builder().directory_service(Arc::new(directory)).build();

        let status = service.check_deployment_status(7).await.unwrap();
        assert_eq!(status, DeploymentStatus::not_pending());
    }

    #[tokio::test]
    async fn oldest_pending_deployment_wins() {
        let t1 = Utc::now() - Duration::hours(2);
        let t2 = Utc::now();
        let mut directory = MockDirectoryService::new();
        directory.expect_get_or_create_device().returning(|id| Ok((device(id), false)));
        directory.expect_pending_deployments().returning(move |id| {
            Ok(vec![
                Deployment::new(2, id, "NEWERTAG", t2),
                Deployment::new(1, id, "OLDERTAG", t1),
            ])
        });
        let service = TaggingServiceImpl::builder().directory_service(Arc::new(directory)).build();

        let status = service.check_deployment_status(7).await.unwrap();
        assert_eq!(status.status, PendingStatus::Pending);
        assert_eq!(status.token.as_deref(), Some("OLDERTAG"));
    }

    #[tokio::test]
    async fn no_pending_deployment() {
        let mut directory = MockDirectoryService::new();
        directory.expect_get_or_create_device().returning(|id| Ok((device(id), false)));
        directory.expect_pending_deployments().returning(|_| Ok(vec![]));
        let service = TaggingServiceImpl::builder().directory_service(Arc::new(directory)).build();

        assert_eq!(
            service.check_deployment_status(7).await.unwrap(),
            DeploymentStatus::not_pending()
        );
    }
}
