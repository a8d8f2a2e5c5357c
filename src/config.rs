//! buildpod configuration.
//!
//! The defaults match the fixed constants in [`crate::volume`]. A config file
//! only exists to point a whole deployment at a different mount root or
//! suffix, and is read once at startup.

use crate::error::{Error, Result};
use crate::naming::DNS1123_LABEL_MAX_LENGTH;
use crate::volume::{VolumeNamer, BUILD_VOLUME_MOUNT_PATH, BUILD_VOLUME_SUFFIX};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application name for config file lookup.
const APP_NAME: &str = "buildpod";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "BUILDPOD_CONFIG";

/// Global buildpod configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildpodConfig {
    /// Build volume naming.
    pub volumes: VolumeConfig,
}

/// Build volume naming parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeConfig {
    /// Suffix appended to volume names.
    pub suffix: String,

    /// Directory volumes are mounted under.
    pub mount_root: PathBuf,

    /// Maximum volume name length.
    pub max_len: usize,
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            suffix: BUILD_VOLUME_SUFFIX.to_string(),
            mount_root: PathBuf::from(BUILD_VOLUME_MOUNT_PATH),
            max_len: DNS1123_LABEL_MAX_LENGTH,
        }
    }
}

impl BuildpodConfig {
    /// Default config file location (`<config dir>/buildpod/config.toml`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_NAME).join("config.toml"))
    }

    /// Load configuration from the usual places.
    ///
    /// Uses the file named by `BUILDPOD_CONFIG` if set, else the default
    /// location if it exists. Returns the defaults when there is no file.
    pub fn load() -> Result<Self> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::load_from(Path::new(&path));
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                tracing::debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from `path`.
    ///
    /// `.yaml` and `.yml` files are read as YAML, anything else as TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "loading config");

        let contents = std::fs::read_to_string(path).map_err(|source| Error::ConfigLoad {
            path: path.to_path_buf(),
            source,
        })?;

        let is_yaml = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("yaml") | Some("yml")
        );
        let config: Self = if is_yaml {
            serde_yaml::from_str(&contents).map_err(|e| Error::config_parse(path, e))?
        } else {
            toml::from_str(&contents).map_err(|e| Error::config_parse(path, e))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Check that the values can produce valid volume names and paths.
    pub fn validate(&self) -> Result<()> {
        let volumes = &self.volumes;

        if volumes.max_len == 0 || volumes.max_len > DNS1123_LABEL_MAX_LENGTH {
            return Err(Error::invalid_config(format!(
                "volumes.max_len must be between 1 and {}, got {}",
                DNS1123_LABEL_MAX_LENGTH, volumes.max_len
            )));
        }

        if volumes.suffix.is_empty() {
            return Err(Error::invalid_config("volumes.suffix cannot be empty"));
        }

        if !volumes
            .suffix
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(Error::invalid_config(format!(
                "volumes.suffix '{}' may only contain lowercase letters, digits and hyphens",
                volumes.suffix
            )));
        }

        if !volumes.mount_root.is_absolute() {
            return Err(Error::invalid_config(format!(
                "volumes.mount_root must be absolute: {}",
                volumes.mount_root.display()
            )));
        }

        Ok(())
    }

    /// Volume namer for this configuration.
    pub fn namer(&self) -> VolumeNamer {
        VolumeNamer::new(
            self.volumes.suffix.clone(),
            self.volumes.mount_root.clone(),
            self.volumes.max_len,
        )
    }
}
