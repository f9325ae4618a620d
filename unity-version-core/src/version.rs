//! Version extraction and bumping
//!
//! The version string is decomposed with a caller-supplied regular expression
//! that defines the named groups `major`, `minor`, `patch` and optionally
//! `prerelease` and `buildmetadata`.

use crate::constants::DEFAULT_VERSION_PATTERN;
use crate::error::{Result, UnityVersionError};
use regex::Regex;
use std::fmt;
use tracing::debug;

const REQUIRED_GROUPS: [&str; 3] = ["major", "minor", "patch"];

/// A compiled version pattern
#[derive(Debug, Clone)]
pub struct VersionPattern {
    regex: Regex,
}

impl VersionPattern {
    /// Compile a pattern, checking that the required named groups exist
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| UnityVersionError::invalid_pattern(e.to_string()))?;

        let names: Vec<&str> = regex.capture_names().flatten().collect();
        let missing: Vec<&str> = REQUIRED_GROUPS
            .iter()
            .copied()
            .filter(|group| !names.contains(group))
            .collect();
        if !missing.is_empty() {
            return Err(UnityVersionError::invalid_pattern(format!(
                "pattern '{}' is missing named group(s): {}",
                pattern,
                missing.join(", ")
            )));
        }

        Ok(Self { regex })
    }

    /// The semver.org pattern
    pub fn semver() -> Result<Self> {
        Self::new(DEFAULT_VERSION_PATTERN)
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// A version decomposed into the text captured by each named group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionValue {
    pub major: String,
    pub minor: String,
    pub patch: String,
    /// `None` when the group did not take part in the match
    pub prerelease: Option<String>,
    pub buildmetadata: Option<String>,
}

/// Which components to increment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BumpRequest {
    pub major: bool,
    pub minor: bool,
    pub patch: bool,
}

impl BumpRequest {
    pub fn new(major: bool, minor: bool, patch: bool) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// True when no component is selected
    pub fn is_noop(&self) -> bool {
        !(self.major || self.minor || self.patch)
    }
}

impl fmt::Display for BumpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "major={} minor={} patch={}",
            self.major, self.minor, self.patch
        )
    }
}

/// Match `raw` against `pattern`. Returns `None` if it is not a version.
pub fn extract_version(raw: &str, pattern: &VersionPattern) -> Option<VersionValue> {
    let caps = pattern.regex.captures(raw)?;
    let group = |name: &str| caps.name(name).map(|m| m.as_str().to_string());

    let version = VersionValue {
        major: group("major")?,
        minor: group("minor")?,
        patch: group("patch")?,
        prerelease: group("prerelease"),
        buildmetadata: group("buildmetadata"),
    };
    debug!(?version, raw, "extracted version components");
    Some(version)
}

fn component(name: &str, text: &str) -> Result<u64> {
    text.parse::<u64>().map_err(|e| {
        UnityVersionError::format(format!(
            "{} component '{}' is not a decimal number: {}",
            name, text, e
        ))
    })
}

fn increment(name: &str, value: u64) -> Result<u64> {
    value
        .checked_add(1)
        .ok_or_else(|| UnityVersionError::format(format!("{} component overflows", name)))
}

/// Increment the selected components and recompose the version string.
///
/// Components are incremented independently; lower components are not reset.
pub fn bump(version: &VersionValue, request: BumpRequest) -> Result<String> {
    let mut major = component("major", &version.major)?;
    let mut minor = component("minor", &version.minor)?;
    let mut patch = component("patch", &version.patch)?;

    if request.major {
        major = increment("major", major)?;
    }
    if request.minor {
        minor = increment("minor", minor)?;
    }
    if request.patch {
        patch = increment("patch", patch)?;
    }

    let mut out = format!("{}.{}.{}", major, minor, patch);
    if let Some(pre) = version.prerelease.as_deref().filter(|s| !s.is_empty()) {
        out.push('-');
        out.push_str(pre);
    }
    if let Some(build) = version.buildmetadata.as_deref().filter(|s| !s.is_empty()) {
        out.push('+');
        out.push_str(build);
    }
    Ok(out)
}
