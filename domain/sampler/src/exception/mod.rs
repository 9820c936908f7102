pub type SamplerResult<T> = Result<T, SamplerException>;

#[derive(Debug, thiserror::Error)]
pub enum SamplerException {
    #[error("Chunk: {nth} of upload: {session_key} is missing, the whole upload must be sent again.")]
    MissingChunk { session_key: String, nth: u32 },

    #[error("Unexpected chunk index: {nth} for an upload of {chunks} chunks.")]
    UnexpectedChunkIndex { nth: u32, chunks: u32 },

    #[error("Declared {declared} payload bytes but only {actual} bytes were received.")]
    PayloadTooShort { declared: usize, actual: usize },

    #[error("Header: {header} is invalid: {reason}")]
    InvalidHeader { header: String, reason: String },

    #[error("Identifier: \"{value}\" is not a valid slug.")]
    InvalidIdentifier { value: String },

    #[error("Target: {target} can't be found.")]
    TargetNotFound { target: String },

    #[error("Artifact: {name} can't be found.")]
    ArtifactNotFound { name: String },

    #[error("Sampler internal error: {source}")]
    InternalError {
        #[source]
        source: anyhow::Error,
    },
}

impl SamplerException {
    /// Numeric code carried in error responses.
    pub fn status(&self) -> i32 {
        use SamplerException::*;
        match self {
            MissingChunk { .. } => 300,
            UnexpectedChunkIndex { .. } => 301,
            PayloadTooShort { .. } => 302,
            InvalidHeader { .. } => 303,
            InvalidIdentifier { .. } => 304,
            TargetNotFound { .. } => 305,
            ArtifactNotFound { .. } => 306,
            InternalError { .. } => 500,
        }
    }
}

impl From<anyhow::Error> for SamplerException {
    fn from(e: anyhow::Error) -> Self {
        SamplerException::InternalError { source: e }
    }
}

impl From<std::io::Error> for SamplerException {
    fn from(e: std::io::Error) -> Self {
        SamplerException::InternalError { source: e.into() }
    }
}
