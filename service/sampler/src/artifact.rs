use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain_sampler::{
    exception::{SamplerException, SamplerResult},
    model::vo::{parse_slug, ArtifactLocation},
    service::ArtifactService,
};
use typed_builder::TypedBuilder;

const DATA_EXTENSION: &str = "csv";
const LOG_EXTENSION: &str = "txt";

/// Data artifacts live in `<base>/data`, logs in `<base>/logs`.
#[derive(TypedBuilder, Clone)]
pub struct LocalArtifactServiceImpl {
    #[builder(default = "base_dir".into(), setter(into))]
    base: PathBuf,
}

impl LocalArtifactServiceImpl {
    fn data_dir(&self) -> PathBuf {
        self.base.join("data")
    }

    fn logs_dir(&self) -> PathBuf {
        self.base.join("logs")
    }
}

async fn read_artifact(path: &Path, name: String) -> SamplerResult<Vec<u8>> {
    match tokio::fs::read(path).await {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(SamplerException::ArtifactNotFound { name }),
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl ArtifactService for LocalArtifactServiceImpl {
    fn data_location(&self, token: &str) -> ArtifactLocation {
        let name = format!("{token}.{DATA_EXTENSION}");
        ArtifactLocation {
            path: self.data_dir().join(&name),
            name,
        }
    }

    async fn log_location(&self, uid: &str, at: DateTime<Utc>) -> anyhow::Result<ArtifactLocation> {
        let stem = format!("log_{}_{uid}", at.format("%Y%m%d%H%M%S"));
        let mut name = format!("{stem}.{LOG_EXTENSION}");
        let mut suffix = 1;
        while tokio::fs::try_exists(self.logs_dir().join(&name)).await? {
            name = format!("{stem}_{suffix}.{LOG_EXTENSION}");
            suffix += 1;
        }
        Ok(ArtifactLocation {
            path: self.logs_dir().join(&name),
            name,
        })
    }

    async fn read_data(&self, token: &str) -> SamplerResult<Vec<u8>> {
        let location = self.data_location(&parse_slug(token)?);
        read_artifact(&location.path, location.name).await
    }

    async fn read_log(&self, name: &str) -> SamplerResult<Vec<u8>> {
        let name = format!("{}.{LOG_EXTENSION}", parse_slug(name)?);
        read_artifact(&self.logs_dir().join(&name), name).await
    }

    async fn list_logs(&self) -> SamplerResult<Vec<String>> {
        let mut entries = match tokio::fs::read_dir(self.logs_dir()).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(e.into()),
        };
        let mut names = vec![];
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let path = entry.path();
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            // Hidden files are reassemblies in progress.
            if stem.starts_with('.') {
                continue;
            }
            names.push(stem.to_owned());
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn load(dir: &tempfile::TempDir) -> LocalArtifactServiceImpl {
        LocalArtifactServiceImpl::builder().base(dir.path()).build()
    }

    #[tokio::test]
    async fn data_artifact_is_named_by_token() {
        let dir = tempfile::tempdir().unwrap();
        let service = load(&dir);
        let location = service.data_location("A1B2C3D4");
        assert_eq!(location.name, "A1B2C3D4.csv");
        assert_eq!(location.path, dir.path().join("data/A1B2C3D4.csv"));

        assert!(matches!(
            service.read_data("A1B2C3D4").await,
            Err(SamplerException::ArtifactNotFound { .. })
        ));
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(&location.path, b"1,2,3").unwrap();
        assert_eq!(service.read_data("A1B2C3D4").await.unwrap(), b"1,2,3");
    }

    #[tokio::test]
    async fn log_names_never_collide() {
        let dir = tempfile::tempdir().unwrap();
        let service = load(&dir);
        let at = Utc.with_ymd_and_hms(2020, 1, 15, 8, 30, 5).unwrap();

        let first = service.log_location("A1B2C3D4", at).await.unwrap();
        assert_eq!(first.name, "log_20200115083005_A1B2C3D4.txt");
        std::fs::create_dir_all(dir.path().join("logs")).unwrap();
        std::fs::write(&first.path, b"boot").unwrap();

        let second = service.log_location("A1B2C3D4", at).await.unwrap();
        assert_eq!(second.name, "log_20200115083005_A1B2C3D4_1.txt");
    }

    #[tokio::test]
    async fn lists_and_reads_logs() {
        let dir = tempfile::tempdir().unwrap();
        let service = load(&dir);
        assert!(service.list_logs().await.unwrap().is_empty());

        let logs = dir.path().join("logs");
        std::fs::create_dir_all(&logs).unwrap();
        std::fs::write(logs.join("log_2_b.txt"), b"b").unwrap();
        std::fs::write(logs.join("log_1_a.txt"), b"a").unwrap();
        std::fs::write(logs.join(".log_3_c.txt.tmp"), b"partial").unwrap();

        assert_eq!(service.list_logs().await.unwrap(), vec!["log_1_a", "log_2_b"]);
        assert_eq!(service.read_log("log_1_a").await.unwrap(), b"a");
        assert!(matches!(
            service.read_log("../secret").await,
            Err(SamplerException::InvalidIdentifier { .. })
        ));
    }
}
