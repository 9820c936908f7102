/// Result of accepting one chunk request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkOutcome {
    /// An intermediate chunk was persisted.
    Stored { nth: u32 },
    /// The upload was reassembled into `artifact`.
    Finalized { artifact: String, bytes: u64 },
    /// The target already had its artifact, nothing was touched.
    AlreadyFinalized,
}
