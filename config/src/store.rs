//! # Configuration Store
//!
//! Reads and writes the configuration record. The record format is YAML.
//!
//! A missing file is not an error: `load` returns `Ok(None)` so callers can
//! start from an empty record.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::Config;

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "STRATUS_CONFIG_PATH";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot determine the user configuration directory")]
    NoConfigDir,

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_yaml::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Persistence for the configuration record.
pub trait ConfigStore {
    /// Location of the record, for display.
    fn path(&self) -> &Path;

    /// Load the record. `Ok(None)` means no record exists yet.
    fn load(&self) -> Result<Option<Config>>;

    fn save(&self, config: &Config) -> Result<()>;
}

/// Resolve the config path: `STRATUS_CONFIG_PATH`, else
/// `<config dir>/stratus/config.yaml`.
pub fn default_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    dirs::config_dir()
        .map(|dir| dir.join("stratus").join("config.yaml"))
        .ok_or(ConfigError::NoConfigDir)
}

/// YAML file on local disk.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf
}

impl FileConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at [`default_config_path`].
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(default_config_path()?))
    }

    fn write_err(&self, source: std::io::Error) -> ConfigError {
        ConfigError::Write {
            path: self.path.clone(),
            source
        }
    }
}

impl ConfigStore for FileConfigStore {
    fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Option<Config>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no config file");
                return Ok(None);
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: self.path.clone(),
                    source
                });
            }
        };

        if contents.trim().is_empty() {
            return Ok(Some(Config::default()));
        }

        let config = serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source
        })?;
        Ok(Some(config))
    }

    /// Write the record atomically: a temp file in the same directory is
    /// renamed over the target, so a crash never leaves a half-written file.
    fn save(&self, config: &Config) -> Result<()> {
        let yaml = serde_yaml::to_string(config)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from(".")
        };
        std::fs::create_dir_all(&dir).map_err(|e| self.write_err(e))?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(|e| self.write_err(e))?;
        tmp.write_all(yaml.as_bytes())
            .map_err(|e| self.write_err(e))?;
        tmp.as_file().sync_all().map_err(|e| self.write_err(e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(tmp.path(), std::fs::Permissions::from_mode(0o600))
                .map_err(|e| self.write_err(e))?;
        }

        tmp.persist(&self.path)
            .map_err(|e| self.write_err(e.error))?;

        info!(path = %self.path.display(), "config saved");
        Ok(())
    }
}
