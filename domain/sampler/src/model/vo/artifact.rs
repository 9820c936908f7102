use std::path::PathBuf;

/// Where a finished artifact is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLocation {
    /// File name, as served for download.
    pub name: String,
    pub path: PathBuf,
}
