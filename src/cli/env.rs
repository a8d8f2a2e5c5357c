//! merge-env command implementation.

use buildpod::env::{merge_env, parse_env_spec};
use clap::Args;
use std::path::{Path, PathBuf};

/// Merge override environment variables into a base environment.
///
/// Base entries keep their order; overrides replace matching keys in place
/// and new keys are appended.
#[derive(Args, Debug)]
pub struct MergeEnvCmd {
    /// Base environment entry (KEY=VALUE, taken verbatim).
    #[arg(short = 'b', long = "base")]
    pub base: Vec<String>,

    /// File with one base entry per line, read before any --base entries.
    #[arg(long = "base-file")]
    pub base_file: Option<PathBuf>,

    /// Override environment variable (KEY=VALUE, the key may be empty).
    #[arg(short = 'e', long = "env")]
    pub env: Vec<String>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

impl MergeEnvCmd {
    /// Execute the merge-env command.
    pub fn run(&self) -> buildpod::Result<()> {
        let mut base = match &self.base_file {
            Some(path) => read_env_file(path)?,
            None => Vec::new(),
        };
        base.extend(self.base.iter().cloned());

        for spec in &self.env {
            parse_env_spec(spec)?;
        }

        let merged = merge_env(&base, &self.env);
        tracing::debug!(entries = merged.len(), "merged environment");

        if self.json {
            println!("{}", serde_json::to_string_pretty(&merged)?);
        } else {
            for entry in &merged {
                println!("{}", entry);
            }
        }
        Ok(())
    }
}

/// Read environment entries from a file, skipping blank lines and `#` comments.
fn read_env_file(path: &Path) -> buildpod::Result<Vec<String>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(parse_env_lines(&contents))
}

fn parse_env_lines(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty() && !line.trim_start().starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_lines() {
        let contents = "# build env\nPATH=/bin\n\nHOME=/root\r\nBARE\n  # indented comment\n";
        assert_eq!(parse_env_lines(contents), vec!["PATH=/bin", "HOME=/root", "BARE"]);
    }

    #[test]
    fn test_read_env_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("env");
        std::fs::write(&path, "A=1\nB=2\n").unwrap();
        assert_eq!(read_env_file(&path).unwrap(), vec!["A=1", "B=2"]);

        assert!(read_env_file(&dir.path().join("missing")).is_err());
    }

    #[test]
    fn test_run_accepts_empty_key_override() {
        let cmd = MergeEnvCmd {
            base: vec!["one=1".to_string(), "=2".to_string()],
            base_file: None,
            env: vec!["=3".to_string(), "two=2".to_string()],
            json: false,
        };
        assert!(cmd.run().is_ok());
    }

    #[test]
    fn test_run_rejects_malformed_override() {
        let cmd = MergeEnvCmd {
            base: vec!["A=1".to_string()],
            base_file: None,
            env: vec!["NOEQUALS".to_string()],
            json: false,
        };
        assert!(matches!(
            cmd.run(),
            Err(buildpod::Error::InvalidEnv { .. })
        ));
    }
}
