//! buildpod CLI entry point.

use buildpod::config::BuildpodConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cli;

/// buildpod - build pod environment and volume helpers
#[derive(Parser, Debug)]
#[command(name = "buildpod")]
#[command(about = "Build pod environment and volume helpers")]
#[command(version)]
struct Cli {
    /// Config file (defaults to $BUILDPOD_CONFIG, then the user config dir).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Merge override environment variables into a base environment.
    MergeEnv(cli::env::MergeEnvCmd),

    /// Derive build volume names and mount paths.
    #[command(subcommand)]
    Volume(cli::volume::VolumeCmd),
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging based on RUST_LOG or default to warn
    init_logging();

    tracing::debug!(version = buildpod::VERSION, "starting buildpod");

    if let Err(e) = run(cli) {
        tracing::error!(error = %e, "command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> buildpod::Result<()> {
    match cli.command {
        Commands::MergeEnv(cmd) => cmd.run(),
        Commands::Volume(cmd) => {
            let config = load_config(cli.config)?;
            cmd.run(&config.namer())
        }
    }
}

/// Load configuration.
///
/// An explicit `--config` must load; the implicit lookup falls back to
/// defaults.
fn load_config(path: Option<PathBuf>) -> buildpod::Result<BuildpodConfig> {
    if let Some(path) = path {
        return BuildpodConfig::load_from(&path);
    }

    match BuildpodConfig::load() {
        Ok(c) => Ok(c),
        Err(e) => {
            tracing::warn!(error = %e, "failed to load config, using defaults");
            Ok(BuildpodConfig::default())
        }
    }
}

/// Initialize the tracing subscriber.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("buildpod=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
