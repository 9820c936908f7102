use async_trait::async_trait;

use crate::command::TagDeploymentCommand;
use crate::exception::SamplerResult;
use crate::model::vo::DeploymentStatus;

#[async_trait]
pub trait TaggingService: Send + Sync {
    /// Ensures the device and its deployment for the scanned token exist.
    /// Repeated scans of the same tag are harmless.
    async fn create_deployment(&self, cmd: TagDeploymentCommand) -> SamplerResult<()>;

    /// Reports the oldest deployment of the device still waiting to start.
    async fn check_deployment_status(&self, device_id: u64) -> SamplerResult<DeploymentStatus>;
}
