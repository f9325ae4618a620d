//! Error types for Unity version bumping

use std::io;
use thiserror::Error;

/// Result type alias for Unity version operations
pub type Result<T> = std::result::Result<T, UnityVersionError>;

/// Main error type for reading, bumping and writing a Unity bundle version
#[derive(Error, Debug)]
pub enum UnityVersionError {
    /// IO errors when reading/writing files
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// YAML engine errors (malformed input, serialization failure)
    #[error("YAML error: {0}")]
    Yaml(String),

    /// Unity-specific structural errors
    #[error("Unity format error: {message}")]
    Format { message: String },

    /// The version pattern failed to compile or lacks required groups
    #[error("Invalid version pattern: {message}")]
    InvalidPattern { message: String },

    /// The bundle version field is missing from the settings document
    #[error("invalid {file} does not contain version")]
    VersionNotFound { file: String },

    /// The bundle version field does not match the version pattern
    #[error("failed to parse {file} bundleVersion '{value}'")]
    VersionParse { file: String, value: String },

    /// The value read back from disk differs from the value written
    #[error("readback version different from input version: expected '{expected}', found '{actual}'")]
    ReadbackMismatch { expected: String, actual: String },

    /// Invalid action inputs
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl UnityVersionError {
    /// Create a YAML engine error
    pub fn yaml<S: Into<String>>(message: S) -> Self {
        Self::Yaml(message.into())
    }

    /// Create a Unity format error
    pub fn format<S: Into<String>>(message: S) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    /// Create an invalid pattern error
    pub fn invalid_pattern<S: Into<String>>(message: S) -> Self {
        Self::InvalidPattern {
            message: message.into(),
        }
    }

    /// Create a version not found error
    pub fn version_not_found<S: Into<String>>(file: S) -> Self {
        Self::VersionNotFound { file: file.into() }
    }

    /// Create a version parse error
    pub fn version_parse<S: Into<String>>(file: S, value: S) -> Self {
        Self::VersionParse {
            file: file.into(),
            value: value.into(),
        }
    }

    /// Create a read-back mismatch error
    pub fn readback_mismatch<S: Into<String>>(expected: S, actual: S) -> Self {
        Self::ReadbackMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
