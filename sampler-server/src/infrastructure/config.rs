use std::path::PathBuf;

use getset::Getters;
use serde::*;

use super::telemetry::TelemetryConfig;

#[derive(Default, Deserialize, Clone, Debug, Getters)]
#[getset(get = "pub")]
pub struct SamplerConfig {
    #[serde(default)]
    common: CommonConfig,
    #[serde(default)]
    storage: StorageConfig,
    #[serde(default)]
    upload: UploadConfig,
}

#[derive(Default, Deserialize, Clone, Debug, Getters)]
#[getset(get = "pub")]
pub struct CommonConfig {
    #[serde(default)]
    telemetry: TelemetryConfig,
    #[serde(default)]
    host: HostConfig,
}

#[derive(Deserialize, Clone, Debug, Getters)]
#[getset(get = "pub")]
pub struct HostConfig {
    #[serde(default = "HostConfig::default_address")]
    bind_address: String,
    #[serde(default = "HostConfig::default_port")]
    bind_port: u16,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            bind_address: Self::default_address(),
            bind_port: Self::default_port(),
        }
    }
}

impl HostConfig {
    fn default_address() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        8000
    }
}

/// Where chunks, artifacts and the directory live.
#[derive(Deserialize, Clone, Debug, Getters)]
#[getset(get = "pub")]
pub struct StorageConfig {
    /// Root of `chunks/`, `data/` and `logs/`.
    #[serde(default = "StorageConfig::default_base_dir")]
    base_dir: PathBuf,
    /// JSON file holding devices and deployments. Relative paths are
    /// resolved against `base_dir`.
    #[serde(default = "StorageConfig::default_directory_file")]
    directory_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_dir: Self::default_base_dir(),
            directory_file: Self::default_directory_file(),
        }
    }
}

impl StorageConfig {
    fn default_base_dir() -> PathBuf {
        "eDNA".into()
    }

    fn default_directory_file() -> PathBuf {
        "directory.json".into()
    }

    pub fn chunks_dir(&self) -> PathBuf {
        self.base_dir.join("chunks")
    }

    pub fn directory_path(&self) -> PathBuf {
        self.base_dir.join(&self.directory_file)
    }
}

#[derive(Deserialize, Clone, Debug, Getters)]
#[getset(get = "pub")]
pub struct UploadConfig {
    /// Largest accepted request body.
    #[serde(default = "UploadConfig::default_max_payload_bytes")]
    max_payload_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_payload_bytes: Self::default_max_payload_bytes(),
        }
    }
}

impl UploadConfig {
    fn default_max_payload_bytes() -> usize {
        1024 * 1024
    }
}

/// Layers `config.yaml`, YAML files passed as arguments and `SAMPLER__*`
/// environment variables.
pub fn build_config() -> anyhow::Result<config::Config> {
    let args: Vec<String> = std::env::args().collect();
    let mut config = config::Config::builder().add_source(
        config::File::with_name("config")
            .required(false)
            .format(config::FileFormat::Yaml),
    );
    for arg in args {
        if arg.ends_with("yaml") || arg.ends_with("yml") {
            config = config.add_source(
                config::File::from(std::path::Path::new(arg.as_str()))
                    .format(config::FileFormat::Yaml)
                    .required(false),
            );
        }
    }
    config = config.add_source(
        config::Environment::with_prefix("SAMPLER")
            .separator("__")
            .try_parsing(true),
    );
    Ok(config.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_gives_defaults() {
        let config: SamplerConfig = config::Config::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.common().host().bind_port(), &8000);
        assert_eq!(config.storage().base_dir(), &PathBuf::from("eDNA"));
        assert_eq!(
            config.storage().directory_path(),
            PathBuf::from("eDNA/directory.json")
        );
        assert_eq!(config.upload().max_payload_bytes(), &(1024 * 1024));
        assert!(config.common().telemetry().enable);
    }

    #[test]
    fn yaml_overrides_nested_fields() {
        let yaml = r#"
common:
  host:
    bind_port: 9000
storage:
  base_dir: /var/lib/sampler
upload:
  max_payload_bytes: 4096
"#;
        let config: SamplerConfig = config::Config::builder()
            .add_source(config::File::from_str(yaml, config::FileFormat::Yaml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.common().host().bind_port(), &9000);
        assert_eq!(config.common().host().bind_address(), "0.0.0.0");
        assert_eq!(
            config.storage().chunks_dir(),
            PathBuf::from("/var/lib/sampler/chunks")
        );
        assert_eq!(config.upload().max_payload_bytes(), &4096);
    }
}
