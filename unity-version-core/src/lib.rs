//! Unity Version Core
//!
//! Core data structures and types for bumping the bundle version of a Unity
//! project. This crate provides the building blocks shared by the YAML
//! adapter and the bump pipeline: the error type, the value tree, the
//! document model and the version arithmetic.

pub mod constants;
pub mod document;
pub mod error;
pub mod unity_value;
pub mod version;

// Re-export main types
pub use constants::*;
pub use document::{DocumentTag, UnityDocument};
pub use error::{Result, UnityVersionError};
pub use unity_value::UnityValue;
pub use version::{BumpRequest, VersionPattern, VersionValue, bump, extract_version};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_functionality() {
        let doc = UnityDocument::new(Some(DocumentTag::new(
            class_ids::PLAYER_SETTINGS,
            Some("1"),
        )));
        assert_eq!(doc.class_id(), Some(129));
        assert!(doc.root().is_empty());
    }
}
