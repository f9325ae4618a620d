//! Bundle version bump pipeline
//!
//! A run goes through `Start → Parsed → Extracted → Bumped → Written →
//! ReadBack → Verified → Done`. Any error moves it to `Failed` and stops it;
//! nothing is retried and a file that was already overwritten is not
//! restored.

use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use unity_version_core::{
    BUNDLE_VERSION_PATH, BumpRequest, Result, UnityValue, UnityVersionError, VersionPattern,
    VersionValue, bump, extract_version,
};
use unity_version_yaml::{DocumentStream, parse_unity_file, write_unity_file};

/// Stage of a bump run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpStage {
    Start,
    Parsed,
    Extracted,
    Bumped,
    Written,
    ReadBack,
    Verified,
    Done,
    Failed,
}

impl fmt::Display for BumpStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BumpStage::Start => "start",
            BumpStage::Parsed => "parsed",
            BumpStage::Extracted => "extracted",
            BumpStage::Bumped => "bumped",
            BumpStage::Written => "written",
            BumpStage::ReadBack => "read back",
            BumpStage::Verified => "verified",
            BumpStage::Done => "done",
            BumpStage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Inputs of a bump run
#[derive(Debug, Clone)]
pub struct BumpConfig {
    /// Settings file to read and overwrite
    pub file: PathBuf,
    pub pattern: VersionPattern,
    pub request: BumpRequest,
    /// Compute the new version without writing the file
    pub dry_run: bool,
}

impl BumpConfig {
    pub fn new<P: AsRef<Path>>(file: P, pattern: VersionPattern, request: BumpRequest) -> Self {
        Self {
            file: file.as_ref().to_path_buf(),
            pattern,
            request,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpOutcome {
    pub file: PathBuf,
    /// Bundle version before the bump
    pub previous: String,
    /// Bundle version after the bump, as read back from disk
    pub version: String,
    /// False for a dry run
    pub written: bool,
}

/// One execution of the bump pipeline
#[derive(Debug)]
pub struct BumpRun {
    config: BumpConfig,
    stage: BumpStage,
    last_completed: BumpStage,
}

impl BumpRun {
    pub fn new(config: BumpConfig) -> Self {
        Self {
            config,
            stage: BumpStage::Start,
            last_completed: BumpStage::Start,
        }
    }

    /// Current stage
    pub fn stage(&self) -> BumpStage {
        self.stage
    }

    /// Last stage reached before a failure (or the current one)
    pub fn last_completed(&self) -> BumpStage {
        self.last_completed
    }

    /// Run the pipeline to completion
    pub fn execute(&mut self) -> Result<BumpOutcome> {
        if self.stage != BumpStage::Start {
            return Err(UnityVersionError::config(format!(
                "bump run already executed (stage: {})",
                self.stage
            )));
        }

        match self.run_stages() {
            Ok(outcome) => {
                self.advance(BumpStage::Done);
                info!("Bundle version is now {}", outcome.version);
                Ok(outcome)
            }
            Err(e) => {
                error!("Bump failed after stage '{}': {}", self.last_completed, e);
                self.stage = BumpStage::Failed;
                Err(e)
            }
        }
    }

    fn advance(&mut self, next: BumpStage) {
        debug!("Stage {} -> {}", self.stage, next);
        self.stage = next;
        self.last_completed = next;
    }

    fn file_label(&self) -> String {
        self.config.file.display().to_string()
    }

    fn run_stages(&mut self) -> Result<BumpOutcome> {
        let file = self.file_label();

        let (mut stream, registry) = parse_unity_file(&self.config.file)?;
        self.advance(BumpStage::Parsed);

        let previous = read_bundle_version(&stream, &file)?;
        let version = parse_version(&previous, &self.config.pattern, &file)?;
        self.advance(BumpStage::Extracted);

        if self.config.request.is_noop() {
            warn!("No component selected, {} keeps version {}", file, previous);
        }
        let bumped = bump(&version, self.config.request)?;
        info!(
            "Bumping {} ({}): {} -> {}",
            file, self.config.request, previous, bumped
        );
        set_bundle_version(&mut stream, &bumped)?;
        self.advance(BumpStage::Bumped);

        if self.config.dry_run {
            info!("Dry run, leaving {} untouched", file);
            return Ok(BumpOutcome {
                file: self.config.file.clone(),
                previous,
                version: bumped,
                written: false,
            });
        }

        write_unity_file(&stream, &self.config.file, &registry)?;
        self.advance(BumpStage::Written);

        let (reread, _) = parse_unity_file(&self.config.file)?;
        let readback = read_bundle_version(&reread, &file)?;
        parse_version(&readback, &self.config.pattern, &file)?;
        self.advance(BumpStage::ReadBack);

        verify_readback(&bumped, &readback)?;
        self.advance(BumpStage::Verified);

        Ok(BumpOutcome {
            file: self.config.file.clone(),
            previous,
            version: readback,
            written: true,
        })
    }
}

/// Run the whole pipeline for `config`
pub fn bump_file(config: BumpConfig) -> Result<BumpOutcome> {
    BumpRun::new(config).execute()
}

/// Bundle version of the first document. Null and empty values count as absent.
pub fn read_bundle_version(stream: &DocumentStream, file: &str) -> Result<String> {
    stream
        .first()
        .and_then(|doc| doc.get_path(&BUNDLE_VERSION_PATH))
        .and_then(UnityValue::as_scalar_text)
        .filter(|version| !version.is_empty())
        .ok_or_else(|| UnityVersionError::version_not_found(file))
}

/// The value read back from disk must equal the value written
pub fn verify_readback(expected: &str, actual: &str) -> Result<()> {
    if expected != actual {
        return Err(UnityVersionError::readback_mismatch(expected, actual));
    }
    debug!("Read back {} as written", actual);
    Ok(())
}

fn parse_version(raw: &str, pattern: &VersionPattern, file: &str) -> Result<VersionValue> {
    extract_version(raw, pattern).ok_or_else(|| UnityVersionError::version_parse(file, raw))
}

fn set_bundle_version(stream: &mut DocumentStream, version: &str) -> Result<()> {
    let file = stream
        .source_path()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    stream
        .first_mut()
        .ok_or_else(|| UnityVersionError::version_not_found(file))?
        .set_path(&BUNDLE_VERSION_PATH, UnityValue::String(version.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use unity_version_yaml::UnityYamlLoader;

    fn stream(yaml: &str) -> DocumentStream {
        UnityYamlLoader::new().load_from_str(yaml).unwrap().0
    }

    #[test]
    fn test_read_bundle_version() {
        let s = stream("--- !u!129 &1\nPlayerSettings:\n  bundleVersion: 2.0.1\n");
        assert_eq!(read_bundle_version(&s, "f").unwrap(), "2.0.1");
    }

    #[test]
    fn test_numeric_bundle_version_is_read_as_text() {
        let s = stream("--- !u!129 &1\nPlayerSettings:\n  bundleVersion: 1.5\n");
        assert_eq!(read_bundle_version(&s, "f").unwrap(), "1.5");
    }

    #[test]
    fn test_missing_or_empty_bundle_version() {
        for yaml in [
            "--- !u!129 &1\nPlayerSettings:\n  productName: Demo\n",
            "--- !u!129 &1\nPlayerSettings:\n  bundleVersion:\n",
            "--- !u!129 &1\nPlayerSettings:\n  bundleVersion: ''\n",
            "--- !u!1 &1\nGameObject:\n  m_Name: x\n",
        ] {
            let err = read_bundle_version(&stream(yaml), "f").unwrap_err();
            assert!(
                matches!(err, UnityVersionError::VersionNotFound { .. }),
                "{}",
                yaml
            );
        }
    }

    #[test]
    fn test_only_first_document_is_inspected() {
        let s = stream(
            "--- !u!1 &1\nGameObject: {}\n--- !u!129 &2\nPlayerSettings:\n  bundleVersion: 1.0.0\n",
        );
        assert!(read_bundle_version(&s, "f").is_err());
    }

    #[test]
    fn test_verify_readback() {
        assert!(verify_readback("1.3.4-beta+001", "1.3.4-beta+001").is_ok());

        let err = verify_readback("1.3.4", "1.3.4.0").unwrap_err();
        match err {
            UnityVersionError::ReadbackMismatch { expected, actual } => {
                assert_eq!(expected, "1.3.4");
                assert_eq!(actual, "1.3.4.0");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_readback_of_numeric_scalar_differs_from_written_text() {
        // `1.50` is typed as a float and reads back as `1.5`
        let s = stream("--- !u!129 &1\nPlayerSettings:\n  bundleVersion: 1.50\n");
        let readback = read_bundle_version(&s, "f").unwrap();
        assert!(matches!(
            verify_readback("1.50", &readback),
            Err(UnityVersionError::ReadbackMismatch { .. })
        ));
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(BumpStage::ReadBack.to_string(), "read back");
        assert_eq!(BumpStage::Failed.to_string(), "failed");
    }
}
