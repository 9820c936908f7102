use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::exception::SamplerResult;
use crate::model::vo::ArtifactLocation;

/// # Artifact service
///
/// Names and serves the files produced by finished uploads.
#[async_trait]
pub trait ArtifactService: Send + Sync {
    /// Data artifact of a deployment, named after its token.
    fn data_location(&self, token: &str) -> ArtifactLocation;

    /// A fresh, not yet existing location for a log finished at `at`.
    async fn log_location(&self, uid: &str, at: DateTime<Utc>) -> anyhow::Result<ArtifactLocation>;

    async fn read_data(&self, token: &str) -> SamplerResult<Vec<u8>>;

    /// Reads a log by name, without extension.
    async fn read_log(&self, name: &str) -> SamplerResult<Vec<u8>>;

    /// Names of all stored logs, without extension, sorted.
    async fn list_logs(&self) -> SamplerResult<Vec<String>>;
}
