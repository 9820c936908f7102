use std::path::Path;

use async_trait::async_trait;

use crate::exception::SamplerResult;

#[async_trait]
pub trait ReassemblyService: Send + Sync {
    /// Concatenates chunks `1..chunk_count` of `session_key` in ascending
    /// order, followed by `final_bytes`, into `destination`. Returns the
    /// number of bytes written.
    ///
    /// Chunks are left in place; the caller clears the session once the
    /// upload is committed. Fails with `MissingChunk` before writing
    /// anything when a chunk is absent. The destination is either complete
    /// or untouched.
    async fn reassemble(
        &self,
        session_key: &str,
        chunk_count: u32,
        final_bytes: &[u8],
        destination: &Path,
    ) -> SamplerResult<u64>;
}
