use async_trait::async_trait;

use crate::exception::SamplerResult;
use crate::model::vo::Chunk;

/// # Chunk store
///
/// Keeps intermediate chunks keyed by `(session_key, nth)` until they are
/// reassembled. Each chunk is an independent unit.
#[async_trait]
pub trait ChunkStoreService: Send + Sync {
    /// Persists a chunk, replacing one already stored at the same key.
    async fn put(&self, chunk: Chunk) -> anyhow::Result<()>;

    async fn exists(&self, session_key: &str, nth: u32) -> anyhow::Result<bool>;

    /// Fails with `MissingChunk` when absent.
    async fn read(&self, session_key: &str, nth: u32) -> SamplerResult<Vec<u8>>;

    /// Removing an absent chunk is not an error.
    async fn remove(&self, session_key: &str, nth: u32) -> anyhow::Result<()>;

    /// Drops every chunk of the session, whatever its index, including
    /// leftovers of abandoned attempts. Clearing an unknown session is not
    /// an error.
    async fn clear(&self, session_key: &str) -> anyhow::Result<()>;
}
