//! Unity Version
//!
//! Bumps the bundle version stored in a Unity `ProjectSettings.asset` file
//! and verifies the write by reading the file back.
//!
//! # Examples
//!
//! ```rust,no_run
//! use unity_version::{BumpConfig, BumpRequest, VersionPattern, bump_file};
//!
//! let config = BumpConfig::new(
//!     "ProjectSettings/ProjectSettings.asset",
//!     VersionPattern::semver()?,
//!     BumpRequest::new(false, false, true),
//! );
//! let outcome = bump_file(config)?;
//! println!("{} -> {}", outcome.previous, outcome.version);
//!
//! # Ok::<(), unity_version::UnityVersionError>(())
//! ```

pub mod action;
pub mod bump;

// Re-export from core and YAML crates
pub use unity_version_core::{
    BumpRequest, DocumentTag, Result, UnityDocument, UnityValue, UnityVersionError,
    VersionPattern, VersionValue, constants::*,
};
pub use unity_version_yaml::{DocumentStream, TagRegistry, parse_unity_file, write_unity_file};

pub use action::{ActionOutput, error_command, parse_flag};
pub use bump::{BumpConfig, BumpOutcome, BumpRun, BumpStage, bump_file, verify_readback};
