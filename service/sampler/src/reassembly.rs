use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use domain_sampler::{
    exception::{SamplerException, SamplerResult},
    service::{ChunkStoreService, ReassemblyService},
};
use tokio::io::AsyncWriteExt;
use tracing::debug;
use typed_builder::TypedBuilder;
use uuid::Uuid;

#[derive(TypedBuilder)]
pub struct ReassemblyServiceImpl {
    chunk_store: Arc<dyn ChunkStoreService>,
}

impl ReassemblyServiceImpl {
    async fn concat(
        &self,
        session_key: &str,
        chunk_count: u32,
        final_bytes: &[u8],
        path: &Path,
    ) -> SamplerResult<u64> {
        let mut file = tokio::fs::File::create(path).await?;
        let mut written = 0;
        for nth in 1..chunk_count {
            let content = self.chunk_store.read(session_key, nth).await?;
            file.write_all(&content).await?;
            written += content.len() as u64;
        }
        file.write_all(final_bytes).await?;
        written += final_bytes.len() as u64;
        file.sync_all().await?;
        Ok(written)
    }
}

/// Hidden sibling of `destination`, unique per attempt.
fn temp_path(destination: &Path) -> anyhow::Result<PathBuf> {
    let name = destination
        .file_name()
        .ok_or(anyhow!("path: {destination:?} doesn't has file name."))?;
    Ok(destination.with_file_name(format!(
        ".{}.{}",
        name.to_string_lossy(),
        Uuid::new_v4()
    )))
}

#[async_trait]
impl ReassemblyService for ReassemblyServiceImpl {
    async fn reassemble(
        &self,
        session_key: &str,
        chunk_count: u32,
        final_bytes: &[u8],
        destination: &Path,
    ) -> SamplerResult<u64> {
        for nth in 1..chunk_count {
            if !self.chunk_store.exists(session_key, nth).await? {
                return Err(SamplerException::MissingChunk {
                    session_key: session_key.to_owned(),
                    nth,
                });
            }
        }

        let parent = destination
            .parent()
            .ok_or(anyhow!("path: {destination:?} doesn't has parent."))?;
        tokio::fs::create_dir_all(parent).await?;
        let temp = temp_path(destination)?;
        let written = match self.concat(session_key, chunk_count, final_bytes, &temp).await {
            Ok(written) => written,
            Err(e) => {
                let _ = tokio::fs::remove_file(&temp).await;
                return Err(e);
            }
        };
        if let Err(e) = tokio::fs::rename(&temp, destination).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(e.into());
        }
        debug!("Reassembled {chunk_count} chunks of {session_key} into {destination:?}.");
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use domain_sampler::{mock::MockChunkStoreService, model::vo::Chunk};

    use super::*;
    use crate::LocalChunkStoreServiceImpl;

    const KEY: &str = "data_A1B2C3D4";

    fn load(dir: &tempfile::TempDir) -> (Arc<LocalChunkStoreServiceImpl>, ReassemblyServiceImpl) {
        let store = Arc::new(
            LocalChunkStoreServiceImpl::builder().base(dir.path().join("chunks")).build(),
        );
        let service = ReassemblyServiceImpl::builder().chunk_store(store.clone()).build();
        (store, service)
    }

    async fn put(store: &LocalChunkStoreServiceImpl, nth: u32, content: &str) {
        store
            .put(Chunk {
                session_key: KEY.to_string(),
                content: content.as_bytes().to_vec(),
                nth,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn concatenates_in_index_order() {
        let dir = tempfile::tempdir().unwrap();
        let (store, service) = load(&dir);
        for nth in [3, 1, 4, 2] {
            put(&store, nth, &format!("c{nth},")).await;
        }
        let destination = dir.path().join("data/A1B2C3D4.csv");

        let written = service.reassemble(KEY, 5, b"tail", &destination).await.unwrap();

        let content = std::fs::read(&destination).unwrap();
        assert_eq!(content, b"c1,c2,c3,c4,tail");
        assert_eq!(written, content.len() as u64);
        // Consumed chunks stay until the upload is committed.
        for nth in 1..5 {
            assert!(store.exists(KEY, nth).await.unwrap());
        }
        let leftovers: Vec<_> = std::fs::read_dir(dir.path().join("data")).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[tokio::test]
    async fn single_chunk_upload_has_only_inline_payload() {
        let dir = tempfile::tempdir().unwrap();
        let (_, service) = load(&dir);
        let destination = dir.path().join("data/A1B2C3D4.csv");

        service.reassemble(KEY, 1, b"only", &destination).await.unwrap();
        assert_eq!(std::fs::read(&destination).unwrap(), b"only");
    }

    #[tokio::test]
    async fn gap_aborts_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let (store, service) = load(&dir);
        for nth in [1, 2, 4] {
            put(&store, nth, "x").await;
        }
        let destination = dir.path().join("data/A1B2C3D4.csv");

        let err = service.reassemble(KEY, 5, b"tail", &destination).await.unwrap_err();

        assert!(matches!(err, SamplerException::MissingChunk { nth: 3, .. }));
        assert!(!destination.exists());
        for nth in [1, 2, 4] {
            assert!(store.exists(KEY, nth).await.unwrap());
        }
    }

    #[tokio::test]
    async fn read_failure_leaves_no_artifact_and_keeps_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = MockChunkStoreService::new();
        store.expect_exists().returning(|_, _| Ok(true));
        store.expect_read().returning(|_, nth| {
            if nth == 1 {
                Ok(b"first".to_vec())
            } else {
                Err(anyhow!("disk on fire").into())
            }
        });
        store.expect_remove().never();
        store.expect_clear().never();
        let service = ReassemblyServiceImpl::builder().chunk_store(Arc::new(store)).build();
        let destination = dir.path().join("data/A1B2C3D4.csv");

        let err = service.reassemble(KEY, 3, b"tail", &destination).await.unwrap_err();

        assert!(matches!(err, SamplerException::InternalError { .. }));
        assert!(!destination.exists());
        assert_eq!(std::fs::read_dir(dir.path().join("data")).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn reassembling_again_replaces_the_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let (store, service) = load(&dir);
        put(&store, 1, "head,").await;
        let destination = dir.path().join("data/A1B2C3D4.csv");

        service.reassemble(KEY, 2, b"tail", &destination).await.unwrap();
        service.reassemble(KEY, 2, b"tail", &destination).await.unwrap();

        assert_eq!(std::fs::read(&destination).unwrap(), b"head,tail");
        assert_eq!(std::fs::read_dir(dir.path().join("data")).unwrap().count(), 1);
    }
}
