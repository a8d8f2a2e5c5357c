//! Build volume names and mount paths.
//!
//! Secrets and config maps mounted into a build get a volume named after the
//! object, suffixed with [`BUILD_VOLUME_SUFFIX`], and are mounted under
//! [`BUILD_VOLUME_MOUNT_PATH`]. Every build step derives the same names from
//! the same object names, so these values must not change.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::naming::{bounded_name, DNS1123_LABEL_MAX_LENGTH};

/// Suffix appended to every build volume name.
pub const BUILD_VOLUME_SUFFIX: &str = "user-build-volume";

/// Directory under which build volumes are mounted.
pub const BUILD_VOLUME_MOUNT_PATH: &str = "/var/run/openshift.io/volumes";

/// Volume name for the object `object_name`.
///
/// The name is lowercased, suffixed and bounded to 63 characters.
pub fn name_for_build_volume(object_name: &str) -> String {
    VolumeNamer::default().name_for(object_name)
}

/// Mount path for the object `object_name`.
pub fn path_for_build_volume(object_name: &str) -> PathBuf {
    VolumeNamer::default().path_for(object_name)
}

/// Parameters for deriving build volume names.
///
/// [`VolumeNamer::default`] uses the fixed constants of this module; other
/// values only come from configuration loaded at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeNamer {
    suffix: String,
    mount_root: PathBuf,
    max_len: usize,
}

impl Default for VolumeNamer {
    fn default() -> Self {
        Self {
            suffix: BUILD_VOLUME_SUFFIX.to_string(),
            mount_root: PathBuf::from(BUILD_VOLUME_MOUNT_PATH),
            max_len: DNS1123_LABEL_MAX_LENGTH,
        }
    }
}

impl VolumeNamer {
    /// Create a namer with custom parameters.
    pub fn new(suffix: impl Into<String>, mount_root: impl Into<PathBuf>, max_len: usize) -> Self {
        Self {
            suffix: suffix.into(),
            mount_root: mount_root.into(),
            max_len,
        }
    }

    /// Mount root directory.
    pub fn mount_root(&self) -> &Path {
        &self.mount_root
    }

    /// Derive the volume name for `object_name`.
    pub fn name_for(&self, object_name: &str) -> String {
        bounded_name(&object_name.to_lowercase(), &self.suffix, self.max_len)
    }

    /// Derive the mount path for `object_name`.
    pub fn path_for(&self, object_name: &str) -> PathBuf {
        self.mount_root.join(self.name_for(object_name))
    }
}

/// Kind of object backing a build volume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name")]
pub enum BuildVolumeSource {
    /// A secret, by name.
    Secret(String),
    /// A config map, by name.
    ConfigMap(String),
}

impl BuildVolumeSource {
    /// Kind of the source object.
    pub fn kind(&self) -> &'static str {
        match self {
            BuildVolumeSource::Secret(_) => "Secret",
            BuildVolumeSource::ConfigMap(_) => "ConfigMap",
        }
    }

    /// Name of the source object.
    pub fn object_name(&self) -> &str {
        match self {
            BuildVolumeSource::Secret(name) | BuildVolumeSource::ConfigMap(name) => name,
        }
    }
}

impl std::fmt::Display for BuildVolumeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.kind(), self.object_name())
    }
}

/// A source object together with its derived volume name and mount path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildVolumeMount {
    /// Object being mounted.
    pub source: BuildVolumeSource,
    /// Volume name.
    pub name: String,
    /// Where the volume is mounted.
    pub mount_path: PathBuf,
}

impl BuildVolumeMount {
    /// Derive the mount for `source`.
    pub fn new(source: BuildVolumeSource, namer: &VolumeNamer) -> Self {
        let name = namer.name_for(source.object_name());
        let mount_path = namer.mount_root().join(&name);
        Self {
            source,
            name,
            mount_path,
        }
    }
}
