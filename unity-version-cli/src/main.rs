//! Unity Version CLI
//!
//! Bumps `PlayerSettings.bundleVersion` in a Unity ProjectSettings file.
//! Runs as a GitHub Action (inputs from `INPUT_*` variables) or by hand.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use unity_version::{
    ActionOutput, BumpConfig, BumpOutcome, BumpRequest, UnityVersionError, VersionPattern,
    bump_file, error_command, parse_flag,
};

#[derive(Parser, Debug)]
#[command(name = "unity-version")]
#[command(about = "Bump the bundle version of a Unity project")]
#[command(version)]
struct Cli {
    /// ProjectSettings.asset file to read and overwrite
    #[arg(short, long, env = "INPUT_FILE")]
    file: Option<PathBuf>,

    /// Version pattern with named groups major, minor, patch
    /// (optionally prerelease and buildmetadata)
    #[arg(short, long, env = "INPUT_REGEX")]
    regex: Option<String>,

    /// Increment the major component
    #[arg(long, env = "INPUT_MAJOR", action = ArgAction::Set, value_parser = flag_value,
          num_args = 0..=1, default_value = "false", default_missing_value = "true")]
    major: bool,

    /// Increment the minor component
    #[arg(long, env = "INPUT_MINOR", action = ArgAction::Set, value_parser = flag_value,
          num_args = 0..=1, default_value = "false", default_missing_value = "true")]
    minor: bool,

    /// Increment the patch component
    #[arg(long, env = "INPUT_PATCH", action = ArgAction::Set, value_parser = flag_value,
          num_args = 0..=1, default_value = "false", default_missing_value = "true")]
    patch: bool,

    /// Compute the new version without writing the file
    #[arg(long)]
    dry_run: bool,

    /// File receiving step outputs
    #[arg(long, env = "GITHUB_OUTPUT", hide = true)]
    github_output: Option<PathBuf>,
}

fn flag_value(value: &str) -> std::result::Result<bool, String> {
    Ok(parse_flag(value))
}

impl Cli {
    fn bump_config(&self) -> Result<BumpConfig> {
        let file = self
            .file
            .as_ref()
            .filter(|path| !path.as_os_str().is_empty())
            .ok_or_else(|| UnityVersionError::config("input 'file' is required"))?;

        let pattern = match self.regex.as_deref().map(str::trim) {
            Some(regex) if !regex.is_empty() => VersionPattern::new(regex)?,
            _ => VersionPattern::semver()?,
        };
        debug!("Version pattern: {}", pattern.as_str());

        let request = BumpRequest::new(self.major, self.minor, self.patch);
        Ok(BumpConfig::new(file, pattern, request).with_dry_run(self.dry_run))
    }
}

fn run(cli: &Cli) -> Result<BumpOutcome> {
    let config = cli.bump_config()?;
    let outcome = bump_file(config)?;

    ActionOutput::new(cli.github_output.clone())
        .set_output("version", &outcome.version)
        .context("Failed to set output 'version'")?;
    Ok(outcome)
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(outcome) => {
            if !outcome.written {
                info!("Dry run: {} not modified", outcome.file.display());
            }
            println!("{}", outcome.version);
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("{}", error_command(&format!("{:#}", e)));
            ExitCode::FAILURE
        }
    }
}
