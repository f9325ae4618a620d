//! Unity Version YAML Adapter
//!
//! Reads and writes Unity YAML files (ProjectSettings.asset and friends) on
//! top of serde_yaml. Unity's `%TAG !u!` directive and `!u!<N> &<anchor>`
//! document headers are rewritten before parsing and restored when writing.
//!
//! # Examples
//!
//! ```rust
//! use unity_version_yaml::UnityYamlLoader;
//!
//! let yaml = "%YAML 1.1\n%TAG !u! tag:unity3d.com,2011:\n--- !u!129 &1\nPlayerSettings:\n  bundleVersion: 1.0.0\n";
//!
//! let (stream, registry) = UnityYamlLoader::new().load_from_str(yaml)?;
//! assert_eq!(stream.len(), 1);
//! assert!(registry.contains(129));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export core types
pub use unity_version_core::{
    DocumentTag, LineEnding, Result, UnityDocument, UnityValue, UnityVersionError,
};

// Core modules
pub mod constants;
pub mod preprocess;
pub mod tag_registry;
pub mod unity_yaml_loader;
pub mod unity_yaml_serializer;
pub mod yaml_document;

// Re-export main types
pub use tag_registry::{NodeKind, TagRegistry, TypeDescriptor};
pub use unity_yaml_loader::UnityYamlLoader;
pub use unity_yaml_serializer::UnityYamlSerializer;
pub use yaml_document::{DocumentStream, parse_unity_file, write_unity_file};
