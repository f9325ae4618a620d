//! CI action binding
//!
//! Inputs arrive as `INPUT_<NAME>` environment variables, outputs are
//! appended to the file named by `GITHUB_OUTPUT`, and failures are reported
//! with an `::error::` workflow command.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;
use unity_version_core::{Result, UnityVersionError};

/// Interpret a boolean-ish input: `"true"` or a number greater than zero
pub fn parse_flag(value: &str) -> bool {
    let value = value.trim();
    value == "true" || value.parse::<f64>().is_ok_and(|n| n > 0.0)
}

/// Escape data for a workflow command
fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// `::error::` workflow command marking the run failed
pub fn error_command(message: &str) -> String {
    format!("::error::{}", escape_data(message))
}

/// Sink for named step outputs
#[derive(Debug, Clone, Default)]
pub struct ActionOutput {
    path: Option<PathBuf>,
}

impl ActionOutput {
    /// Outputs go to `path`; `None` disables output files
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Append `name=value` to the output file, if there is one
    pub fn set_output(&self, name: &str, value: &str) -> Result<()> {
        if value.contains('\n') || value.contains('\r') {
            return Err(UnityVersionError::config(format!(
                "output '{}' must be a single line",
                name
            )));
        }

        let Some(path) = &self.path else {
            debug!("No output file, skipping output '{}'", name);
            return Ok(());
        };

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}={}", name, value)?;
        debug!("Set output {}={} in {}", name, value, path.display());
        Ok(())
    }
}
