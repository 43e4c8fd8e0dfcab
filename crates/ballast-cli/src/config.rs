use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use ballast_store::Capability;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Storage section of `ballast.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Dataset document location.
    pub path: PathBuf,
    /// Capability signal for this deployment target.
    pub mode: Capability,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/records.json"),
            mode: Capability::ReadWrite,
        }
    }
}

/// Generator section of `ballast.toml`. Unset fields fall through to the
/// engine defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    pub count: Option<u64>,
    pub seed: Option<u64>,
    pub batch_size: Option<usize>,
    pub progress_every: Option<u64>,
}

/// Emitter section of `ballast.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitConfig {
    pub batch_size: Option<usize>,
    pub synthetic_count: Option<u64>,
    pub seed: Option<u64>,
}

/// Contents of `ballast.toml`. Flags override these values; these override
/// the built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BallastConfig {
    pub storage: StorageConfig,
    pub generate: GenerateConfig,
    pub emit: EmitConfig,
}

/// Load the config file if it exists, defaults otherwise.
///
/// Never creates the file: environments without writable storage still have
/// to run.
pub fn load_config(path: &Path) -> Result<BallastConfig, ConfigError> {
    if !path.exists() {
        return Ok(BallastConfig::default());
    }
    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str(&content)?;
    Ok(config)
}

/// Parse the `--storage-mode` flag.
pub fn parse_storage_mode(raw: &str) -> Result<Capability, ConfigError> {
    match raw {
        "read-write" | "read_write" => Ok(Capability::ReadWrite),
        "read-only" | "read_only" => Ok(Capability::ReadOnly),
        "unavailable" => Ok(Capability::Unavailable),
        other => Err(ConfigError::Invalid(format!(
            "unknown storage mode '{other}' (expected read-write, read-only or unavailable)"
        ))),
    }
}
