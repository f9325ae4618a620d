//! Constants for Unity YAML format
//!
//! This module contains Unity-specific constants used in YAML serialization.

// Re-export from unity-version-core
pub use unity_version_core::constants::*;

/// Full tag URI for a Unity class id, e.g. `tag:unity3d.com,2011:129`
pub fn tag_uri(class_id: u32) -> String {
    format!("{}{}", UNITY_TAG_URI, class_id)
}
