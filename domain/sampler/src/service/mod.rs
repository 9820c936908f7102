mod artifact;
mod chunk_store;
mod directory;
mod reassembly;
mod tagging;
mod upload_session;

#[rustfmt::skip]
pub use {
    artifact::ArtifactService,
    chunk_store::ChunkStoreService,
    directory::DirectoryService,
    reassembly::ReassemblyService,
    tagging::TaggingService,
    upload_session::UploadSessionService,
};
