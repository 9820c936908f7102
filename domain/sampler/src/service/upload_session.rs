use async_trait::async_trait;

use crate::command::ChunkUploadCommand;
use crate::exception::SamplerResult;
use crate::model::vo::ChunkOutcome;

/// # Chunked upload service
///
/// Intermediate chunks are kept in the chunk store; the request whose index
/// equals the declared chunk count reassembles them into one artifact and
/// clears them. Requests for the same target are serialized.
#[async_trait]
pub trait UploadSessionService: Send + Sync {
    async fn upload_chunk(&self, cmd: ChunkUploadCommand) -> SamplerResult<ChunkOutcome>;
}
