use std::path::{Path, PathBuf};

use anyhow::Context;
use domain_sampler::model::entity::{Deployment, Device};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, MutexGuard};

/// Everything the directory knows, as persisted.
#[derive(Default, Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub devices: Vec<Device>,
    #[serde(default)]
    pub deployments: Vec<Deployment>,
    /// Last assigned deployment id.
    #[serde(default)]
    pub last_id: u64,
}

/// Device and deployment records kept in memory behind one lock and
/// mirrored to a JSON file after every change.
///
/// Holding the lock across lookup and insert is what makes `get_or_create`
/// atomic.
pub struct JsonRepository {
    state: Mutex<Snapshot>,
    path: Option<PathBuf>,
}

impl JsonRepository {
    /// A repository that is never written to disk.
    pub fn in_memory() -> Self {
        Self {
            state: Mutex::new(Snapshot::default()),
            path: None,
        }
    }

    /// Loads `path` if it exists, starting empty otherwise.
    pub async fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let snapshot = match tokio::fs::read(&path).await {
            Ok(content) => serde_json::from_slice(&content)
                .with_context(|| format!("Directory file: {path:?} is corrupted."))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Snapshot::default(),
            Err(e) => {
                return Err(e).with_context(|| format!("Can't read directory file: {path:?}."))
            }
        };
        Ok(Self {
            state: Mutex::new(snapshot),
            path: Some(path),
        })
    }

    pub(crate) async fn lock(&self) -> MutexGuard<'_, Snapshot> {
        self.state.lock().await
    }

    /// Applies `change` to a copy of `state`, persists the copy and only
    /// then makes it current, so a failed write leaves memory untouched.
    pub(crate) async fn commit<R>(
        &self,
        state: &mut Snapshot,
        change: impl FnOnce(&mut Snapshot) -> R,
    ) -> anyhow::Result<R> {
        let mut next = state.clone();
        let result = change(&mut next);
        self.persist(&next).await?;
        *state = next;
        Ok(result)
    }

    async fn persist(&self, snapshot: &Snapshot) -> anyhow::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_vec_pretty(snapshot)?;
        let temp = path.with_extension("json.tmp");
        tokio::fs::write(&temp, content)
            .await
            .with_context(|| format!("Can't write directory file: {temp:?}."))?;
        tokio::fs::rename(&temp, path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use domain_sampler::repository::{DeploymentRepo, DeviceRepo};

    use super::*;

    #[tokio::test]
    async fn records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("directory.json");

        let repo = JsonRepository::open(&path).await.unwrap();
        DeviceRepo::get_or_create(&repo, 7).await.unwrap();
        let (deployment, _) = DeploymentRepo::get_or_create(&repo, 7, "A1B2C3D4", Utc::now())
            .await
            .unwrap();

        let reopened = JsonRepository::open(&path).await.unwrap();
        assert!(reopened.get_by_id(7).await.unwrap().is_some());
        assert_eq!(reopened.get_by_token("A1B2C3D4").await.unwrap(), Some(deployment));
        let (next, created) = DeploymentRepo::get_or_create(&reopened, 7, "ZZZZ0000", Utc::now())
            .await
            .unwrap();
        assert!(created);
        assert_eq!(next.id, 2);
    }

    #[tokio::test]
    async fn corrupted_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("directory.json");
        tokio::fs::write(&path, b"{ not json").await.unwrap();
        assert!(JsonRepository::open(&path).await.is_err());
    }
}
