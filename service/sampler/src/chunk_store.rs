use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use domain_sampler::{
    exception::{SamplerException, SamplerResult},
    model::vo::Chunk,
    service::ChunkStoreService,
};
use typed_builder::TypedBuilder;

/// Keeps each chunk as `<base>/<session_key>/<nth>`.
#[derive(TypedBuilder, Clone)]
pub struct LocalChunkStoreServiceImpl {
    #[builder(default = "base_dir/chunks".into(), setter(into))]
    base: PathBuf,
}

impl LocalChunkStoreServiceImpl {
    fn session_dir(&self, session_key: &str) -> PathBuf {
        self.base.join(session_key)
    }

    fn chunk_path(&self, session_key: &str, nth: u32) -> PathBuf {
        self.session_dir(session_key).join(nth.to_string())
    }
}

async fn create_parent_and_write(path: &Path, content: &[u8]) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(&path.parent().ok_or(anyhow!("path: {path:?} doesn't has parent."))?)
        .await?;
    tokio::fs::write(path, content).await?;
    Ok(())
}

#[async_trait]
impl ChunkStoreService for LocalChunkStoreServiceImpl {
    async fn put(&self, chunk: Chunk) -> anyhow::Result<()> {
        let path = self.chunk_path(&chunk.session_key, chunk.nth);
        create_parent_and_write(&path, &chunk.content)
            .await
            .with_context(|| format!("write chunk {path:?}"))
    }

    async fn exists(&self, session_key: &str, nth: u32) -> anyhow::Result<bool> {
        Ok(tokio::fs::try_exists(self.chunk_path(session_key, nth)).await?)
    }

    async fn read(&self, session_key: &str, nth: u32) -> SamplerResult<Vec<u8>> {
        let path = self.chunk_path(session_key, nth);
        match tokio::fs::read(&path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(SamplerException::MissingChunk {
                session_key: session_key.to_owned(),
                nth,
            }),
            Err(e) => Err(anyhow::Error::new(e).context(format!("read chunk {path:?}")).into()),
        }
    }

    async fn remove(&self, session_key: &str, nth: u32) -> anyhow::Result<()> {
        let path = self.chunk_path(session_key, nth);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(anyhow::Error::new(e).context(format!("remove chunk {path:?}"))),
        }
        // Drops the session directory once its last chunk is gone.
        if let Some(dir) = path.parent() {
            let _ = tokio::fs::remove_dir(dir).await;
        }
        Ok(())
    }

    async fn clear(&self, session_key: &str) -> anyhow::Result<()> {
        let dir = self.session_dir(session_key);
        match tokio::fs::remove_dir_all(&dir).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow::Error::new(e).context(format!("clear chunks {dir:?}"))),
        }
    }
}
