use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::mock;

use crate::{
    command::TagDeploymentCommand,
    exception::SamplerResult,
    model::{
        entity::{Deployment, Device},
        vo::{ArtifactLocation, Chunk, DeploymentStatus},
    },
    repository::{DeploymentRepo, DeviceRepo},
    service::{
        ArtifactService, ChunkStoreService, DirectoryService, ReassemblyService, TaggingService,
    },
};

mock! {
    pub DeviceRepo {}
    #[async_trait]
    impl DeviceRepo for DeviceRepo {
        async fn get_or_create(&self, device_id: u64) -> anyhow::Result<(Device, bool)>;
        async fn get_by_id(&self, device_id: u64) -> anyhow::Result<Option<Device>>;
    }
}

mock! {
    pub DeploymentRepo {}
    #[async_trait]
    impl DeploymentRepo for DeploymentRepo {
        async fn get_or_create(
            &self,
            device_id: u64,
            token: &str,
            now: DateTime<Utc>,
        ) -> anyhow::Result<(Deployment, bool)>;
        async fn get_by_token(&self, token: &str) -> anyhow::Result<Option<Deployment>>;
        async fn get_all_by_device(&self, device_id: u64) -> anyhow::Result<Vec<Deployment>>;
        async fn get_all(&self) -> anyhow::Result<Vec<Deployment>>;
        async fn update(&self, deployment: &Deployment) -> anyhow::Result<()>;
    }
}

mock! {
    pub ChunkStoreService {}
    #[async_trait]
    impl ChunkStoreService for ChunkStoreService {
        async fn put(&self, chunk: Chunk) -> anyhow::Result<()>;
        async fn exists(&self, session_key: &str, nth: u32) -> anyhow::Result<bool>;
        async fn read(&self, session_key: &str, nth: u32) -> SamplerResult<Vec<u8>>;
        async fn remove(&self, session_key: &str, nth: u32) -> anyhow::Result<()>;
        async fn clear(&self, session_key: &str) -> anyhow::Result<()>;
    }
}

mock! {
    pub ReassemblyService {}
    #[async_trait]
    impl ReassemblyService for ReassemblyService {
        async fn reassemble(
            &self,
            session_key: &str,
            chunk_count: u32,
            final_bytes: &[u8],
            destination: &Path,
        ) -> SamplerResult<u64>;
    }
}

mock! {
    pub ArtifactService {}
    #[async_trait]
    impl ArtifactService for ArtifactService {
        fn data_location(&self, token: &str) -> ArtifactLocation;
        async fn log_location(&self, uid: &str, at: DateTime<Utc>) -> anyhow::Result<ArtifactLocation>;
        async fn read_data(&self, token: &str) -> SamplerResult<Vec<u8>>;
        async fn read_log(&self, name: &str) -> SamplerResult<Vec<u8>>;
        async fn list_logs(&self) -> SamplerResult<Vec<String>>;
    }
}

mock! {
    pub DirectoryService {}
    #[async_trait]
    impl DirectoryService for DirectoryService {
        async fn get_or_create_device(&self, device_id: u64) -> SamplerResult<(Device, bool)>;
        async fn get_or_create_deployment(
            &self,
            device: &Device,
            token: &str,
        ) -> SamplerResult<(Deployment, bool)>;
        async fn get_deployment(&self, token: &str) -> SamplerResult<Deployment>;
        async fn pending_deployments(&self, device_id: u64) -> SamplerResult<Vec<Deployment>>;
        async fn mark_has_data(&self, token: &str) -> SamplerResult<Deployment>;
        async fn list_deployments(&self) -> SamplerResult<Vec<Deployment>>;
    }
}

mock! {
    pub TaggingService {}
    #[async_trait]
    impl TaggingService for TaggingService {
        async fn create_deployment(&self, cmd: TagDeploymentCommand) -> SamplerResult<()>;
        async fn check_deployment_status(&self, device_id: u64) -> SamplerResult<DeploymentStatus>;
    }
}
