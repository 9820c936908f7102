mod artifact;
mod chunk_store;
mod directory;
mod keyed_lock;
mod reassembly;
mod tagging;
mod upload_session;

#[rustfmt::skip]
pub use {
    artifact::LocalArtifactServiceImpl,
    chunk_store::LocalChunkStoreServiceImpl,
    directory::DirectoryServiceImpl,
    keyed_lock::{KeyedLock, KeyedLockGuard},
    reassembly::ReassemblyServiceImpl,
    tagging::TaggingServiceImpl,
    upload_session::UploadSessionServiceImpl,
};
