use std::sync::Arc;

use domain_sampler::{
    repository::{DeploymentRepo, DeviceRepo},
    service::{
        ArtifactService, ChunkStoreService, DirectoryService, ReassemblyService, TaggingService,
        UploadSessionService,
    },
};
use getset::Getters;
use service_sampler::*;

use super::{config::SamplerConfig, database::JsonRepository};

/// Wires every service once at startup and hands out shared handles.
#[derive(Clone, Getters)]
#[getset(get = "pub")]
pub struct ServiceProvider {
    config: SamplerConfig,
    directory_service: Arc<dyn DirectoryService>,
    artifact_service: Arc<dyn ArtifactService>,
    tagging_service: Arc<dyn TaggingService>,
    upload_session_service: Arc<dyn UploadSessionService>,
}

impl ServiceProvider {
    pub async fn build(config: SamplerConfig) -> anyhow::Result<Self> {
        let storage = config.storage();
        let repository = Arc::new(JsonRepository::open(storage.directory_path()).await?);
        let device_repo: Arc<dyn DeviceRepo> = repository.clone();
        let deployment_repo: Arc<dyn DeploymentRepo> = repository;

        let directory_service: Arc<dyn DirectoryService> = Arc::new(
            DirectoryServiceImpl::builder()
                .device_repo(device_repo)
                .deployment_repo(deployment_repo)
                .build(),
        );
        let chunk_store: Arc<dyn ChunkStoreService> = Arc::new(
            LocalChunkStoreServiceImpl::builder().base(storage.chunks_dir()).build(),
        );
        let artifact_service: Arc<dyn ArtifactService> = Arc::new(
            LocalArtifactServiceImpl::builder().base(storage.base_dir().clone()).build(),
        );
        let reassembly_service: Arc<dyn ReassemblyService> =
            Arc::new(ReassemblyServiceImpl::builder().chunk_store(chunk_store.clone()).build());
        let tagging_service: Arc<dyn TaggingService> = Arc::new(
            TaggingServiceImpl::builder().directory_service(directory_service.clone()).build(),
        );
        let upload_session_service: Arc<dyn UploadSessionService> = Arc::new(
            UploadSessionServiceImpl::builder()
                .chunk_store(chunk_store)
                .reassembly_service(reassembly_service)
                .artifact_service(artifact_service.clone())
                .directory_service(directory_service.clone())
                .build(),
        );

        Ok(Self {
            config,
            directory_service,
            artifact_service,
            tagging_service,
            upload_session_service,
        })
    }
}
