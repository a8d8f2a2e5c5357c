//! buildpod - helpers shared by build pod steps.
//!
//! Two independent pieces of logic live here:
//!
//! - [`env`]: merging an override environment into a base environment while
//!   keeping the base ordering stable.
//! - [`volume`]: deriving DNS-label-safe volume names and mount paths for the
//!   secrets and config maps mounted into a build. The length bounding itself
//!   is in [`naming`] so it can be reused for other derived names.
//!
//! Everything in these modules is a pure function. [`config`] and [`error`]
//! support the command line front end.

pub mod config;
pub mod env;
pub mod error;
pub mod naming;
pub mod volume;

pub use env::merge_env;
pub use error::{Error, Result};
pub use naming::{bounded_name, DNS1123_LABEL_MAX_LENGTH};
pub use volume::{
    name_for_build_volume, path_for_build_volume, BuildVolumeMount, BuildVolumeSource,
    VolumeNamer, BUILD_VOLUME_MOUNT_PATH, BUILD_VOLUME_SUFFIX,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
