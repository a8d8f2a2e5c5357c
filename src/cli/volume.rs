//! Build volume naming commands.

use buildpod::naming::is_dns1123_label;
use buildpod::{BuildVolumeMount, BuildVolumeSource, VolumeNamer};
use clap::{Args, Subcommand};

/// Derive build volume names and mount paths
#[derive(Subcommand, Debug)]
pub enum VolumeCmd {
    /// Print the volume name for each object
    Name(ObjectsArgs),

    /// Print the mount path for each object
    Path(ObjectsArgs),

    /// Print the mounts for a set of secrets and config maps
    Mount(MountCmd),
}

impl VolumeCmd {
    /// Execute the volume command.
    pub fn run(&self, namer: &VolumeNamer) -> buildpod::Result<()> {
        match self {
            VolumeCmd::Name(args) => {
                for object in &args.objects {
                    println!("{}", checked_name(namer, object).0);
                }
                Ok(())
            }
            VolumeCmd::Path(args) => {
                for object in &args.objects {
                    let (name, _) = checked_name(namer, object);
                    println!("{}", namer.mount_root().join(name).display());
                }
                Ok(())
            }
            VolumeCmd::Mount(cmd) => cmd.run(namer),
        }
    }
}

/// Object names.
#[derive(Args, Debug)]
pub struct ObjectsArgs {
    /// Secret or config map names.
    #[arg(required = true)]
    pub objects: Vec<String>,
}

/// Derive mounts for secrets and config maps.
#[derive(Args, Debug)]
pub struct MountCmd {
    /// Secret to mount.
    #[arg(long = "secret")]
    pub secrets: Vec<String>,

    /// Config map to mount.
    #[arg(long = "config-map")]
    pub config_maps: Vec<String>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

impl MountCmd {
    /// Execute the mount command.
    pub fn run(&self, namer: &VolumeNamer) -> buildpod::Result<()> {
        let mounts = self.mounts(namer);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&mounts)?);
            return Ok(());
        }

        if mounts.is_empty() {
            println!("No volumes");
            return Ok(());
        }

        println!("{:<30} {:<63} {}", "SOURCE", "VOLUME", "MOUNT PATH");
        for mount in &mounts {
            println!(
                "{:<30} {:<63} {}",
                mount.source.to_string(),
                mount.name,
                mount.mount_path.display()
            );
        }
        Ok(())
    }

    fn mounts(&self, namer: &VolumeNamer) -> Vec<BuildVolumeMount> {
        let secrets = self
            .secrets
            .iter()
            .map(|name| BuildVolumeSource::Secret(name.clone()));
        let config_maps = self
            .config_maps
            .iter()
            .map(|name| BuildVolumeSource::ConfigMap(name.clone()));

        secrets
            .chain(config_maps)
            .map(|source| {
                let mount = BuildVolumeMount::new(source, namer);
                warn_if_not_label(mount.source.object_name(), &mount.name);
                mount
            })
            .collect()
    }
}

/// Volume name for `object`, and whether it is a usable DNS label.
fn checked_name(namer: &VolumeNamer, object: &str) -> (String, bool) {
    let name = namer.name_for(object);
    let valid = warn_if_not_label(object, &name);
    (name, valid)
}

/// Object names with characters outside `[a-z0-9-]` yield unusable volume names.
fn warn_if_not_label(object: &str, volume: &str) -> bool {
    let valid = is_dns1123_label(volume);
    if !valid {
        tracing::warn!(object, volume, "volume name is not a valid DNS label");
    }
    valid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_name_flags_invalid_labels() {
        let namer = VolumeNamer::default();

        let (name, valid) = checked_name(&namer, "Secret-One");
        assert_eq!(name, "secret-one-user-build-volume");
        assert!(valid);

        // name and path subcommands share the same check
        let (name, valid) = checked_name(&namer, "my_secret.v2");
        assert!(!valid);
        assert_eq!(
            namer.mount_root().join(&name),
            namer.path_for("my_secret.v2")
        );
    }

    #[test]
    fn test_mounts_order() {
        let cmd = MountCmd {
            secrets: vec!["Secret-One".to_string(), "secret-two".to_string()],
            config_maps: vec!["settings".to_string()],
            json: false,
        };
        let mounts = cmd.mounts(&VolumeNamer::default());

        let names: Vec<_> = mounts.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "secret-one-user-build-volume",
                "secret-two-user-build-volume",
                "settings-user-build-volume",
            ]
        );
        assert_eq!(mounts[2].source.kind(), "ConfigMap");
    }
}
