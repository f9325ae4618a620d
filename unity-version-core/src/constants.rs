//! Constants and type definitions for Unity project settings files
//!
//! This module contains Unity-specific constants, tags, and the defaults
//! used when locating and parsing the bundle version.

/// Unity YAML tag URI
pub const UNITY_TAG_URI: &str = "tag:unity3d.com,2011:";

/// Unity YAML tag handle declared by the `%TAG` directive
pub const UNITY_TAG_HANDLE: &str = "!u!";

/// Unity YAML version
pub const UNITY_YAML_VERSION: (u32, u32) = (1, 1);

/// Top-level key of the settings object inside ProjectSettings.asset
pub const PLAYER_SETTINGS_KEY: &str = "PlayerSettings";

/// Key of the bundle version inside the PlayerSettings object
pub const BUNDLE_VERSION_KEY: &str = "bundleVersion";

/// Path of the bundle version inside the first document
pub const BUNDLE_VERSION_PATH: [&str; 2] = [PLAYER_SETTINGS_KEY, BUNDLE_VERSION_KEY];

/// Semantic version pattern from semver.org with the five named groups
pub const DEFAULT_VERSION_PATTERN: &str = r"^(?P<major>0|[1-9]\d*)\.(?P<minor>0|[1-9]\d*)\.(?P<patch>0|[1-9]\d*)(?:-(?P<prerelease>(?:0|[1-9]\d*|\d*[a-zA-Z-][0-9a-zA-Z-]*)(?:\.(?:0|[1-9]\d*|\d*[a-zA-Z-][0-9a-zA-Z-]*))*))?(?:\+(?P<buildmetadata>[0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*))?$";

/// Line ending types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Unix, // \n
    Windows, // \r\n
    Mac,     // \r
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Unix => "\n",
            LineEnding::Windows => "\r\n",
            LineEnding::Mac => "\r",
        }
    }

    /// Detect the line ending used by a text; Unix when there is none
    pub fn detect(text: &str) -> Self {
        if text.contains("\r\n") {
            LineEnding::Windows
        } else if text.contains('\r') {
            LineEnding::Mac
        } else {
            LineEnding::Unix
        }
    }

    /// Convert `\n`-terminated text to this line ending
    pub fn apply(&self, text: &str) -> String {
        match self {
            LineEnding::Unix => text.to_string(),
            other => text.replace('\n', other.as_str()),
        }
    }
}

/// Common Unity class IDs
pub mod class_ids {
    pub const PLAYER_SETTINGS: u32 = 129;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_ending() {
        assert_eq!(LineEnding::Unix.as_str(), "\n");
        assert_eq!(LineEnding::Windows.as_str(), "\r\n");
        assert_eq!(LineEnding::Mac.as_str(), "\r");
    }

    #[test]
    fn test_line_ending_detection() {
        assert_eq!(LineEnding::detect("a\r\nb\r\n"), LineEnding::Windows);
        assert_eq!(LineEnding::detect("a\nb\n"), LineEnding::Unix);
        assert_eq!(LineEnding::detect("a\rb"), LineEnding::Mac);
        assert_eq!(LineEnding::detect("single line"), LineEnding::Unix);
    }

    #[test]
    fn test_line_ending_apply() {
        assert_eq!(LineEnding::Windows.apply("a\nb\n"), "a\r\nb\r\n");
        assert_eq!(LineEnding::Unix.apply("a\nb\n"), "a\nb\n");
    }
}
