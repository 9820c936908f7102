use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;
use domain_sampler::{
    command::ChunkUploadCommand,
    exception::{SamplerException, SamplerResult},
    model::{
        entity::{upload_session::Transition, UploadSession},
        vo::{Chunk, ChunkOutcome, UploadTarget},
    },
    service::{
        ArtifactService, ChunkStoreService, DirectoryService, ReassemblyService,
        UploadSessionService,
    },
};
use tracing::{debug, info, warn};
use typed_builder::TypedBuilder;

use crate::keyed_lock::{KeyedLock, KeyedLockGuard};

#[derive(TypedBuilder)]
pub struct UploadSessionServiceImpl {
    chunk_store: Arc<dyn ChunkStoreService>,
    reassembly_service: Arc<dyn ReassemblyService>,
    artifact_service: Arc<dyn ArtifactService>,
    directory_service: Arc<dyn DirectoryService>,
    #[builder(default)]
    locks: KeyedLock,
}

impl UploadSessionServiceImpl {
    /// Whether the target already holds its one artifact.
    async fn is_finalized(&self, target: &UploadTarget) -> SamplerResult<bool> {
        Ok(match target {
            UploadTarget::Data { token } => self.directory_service.get_deployment(token).await?.has_data,
            UploadTarget::Log { .. } => false,
        })
    }

    /// Runs on its own task so a dropped request can't interrupt it halfway.
    ///
    /// Chunks are cleared only once the upload is committed: a failure
    /// before that leaves them in place for the device's retry.
    async fn finalize(
        &self,
        guard: KeyedLockGuard,
        session: &UploadSession,
        payload: Vec<u8>,
    ) -> SamplerResult<ChunkOutcome> {
        let target = session.target.clone();
        let chunk_count = session.chunk_count;
        let chunk_store = self.chunk_store.clone();
        let reassembly_service = self.reassembly_service.clone();
        let artifact_service = self.artifact_service.clone();
        let directory_service = self.directory_service.clone();
        let handle = tokio::spawn(async move {
            let _guard = guard;
            let location = match &target {
                UploadTarget::Data { token } => artifact_service.data_location(token),
                UploadTarget::Log { uid } => artifact_service.log_location(uid, Utc::now()).await?,
            };
            let session_key = target.session_key();
            let bytes = reassembly_service
                .reassemble(&session_key, chunk_count, &payload, &location.path)
                .await?;
            if let UploadTarget::Data { token } = &target {
                directory_service.mark_has_data(token).await?;
            }
            info!("Finalized {target} into {} ({bytes} bytes).", location.name);
            if let Err(e) = chunk_store.clear(&session_key).await {
                warn!("Chunks of {target} outlived finalization: {e:#}");
            }
            Ok::<_, SamplerException>(ChunkOutcome::Finalized {
                artifact: location.name,
                bytes,
            })
        });
        handle.await.map_err(|e| anyhow!("Finalization task failed: {e}"))?
    }
}

#[async_trait]
impl UploadSessionService for UploadSessionServiceImpl {
    async fn upload_chunk(&self, cmd: ChunkUploadCommand) -> SamplerResult<ChunkOutcome> {
        let payload = cmd.payload()?.to_vec();
        let session_key = cmd.target.session_key();
        let guard = self.locks.lock(&session_key).await;

        let finalized = self.is_finalized(&cmd.target).await?;
        let mut session = UploadSession::new(cmd.target, cmd.chunks, finalized);
        let transition = session.next(cmd.nth).map_err(|e| {
            warn!("Rejected chunk {} of {}: {e}", cmd.nth, session.target);
            e
        })?;

        let outcome = match transition {
            Transition::Acknowledge => {
                debug!("{} already has its artifact, chunk {} ignored.", session.target, cmd.nth);
                ChunkOutcome::AlreadyFinalized
            }
            Transition::StoreChunk(nth) => {
                self.chunk_store
                    .put(Chunk {
                        session_key,
                        content: payload,
                        nth,
                    })
                    .await?;
                debug!("Stored chunk {nth}/{} of {}.", session.chunk_count, session.target);
                ChunkOutcome::Stored { nth }
            }
            Transition::Finalize => match self.finalize(guard, &session, payload).await {
                Ok(outcome) => outcome,
                Err(e @ SamplerException::MissingChunk { .. }) => {
                    warn!("Upload of {} must restart: {e}", session.target);
                    return Err(e);
                }
                Err(e) => return Err(e),
            },
        };
        session.apply(transition);
        debug!("Session of {} is {:?}.", session.target, session.state);
        Ok(outcome)
    }
}
