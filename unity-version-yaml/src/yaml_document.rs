//! Unity YAML document stream
//!
//! This module provides the in-memory form of a Unity YAML file and the two
//! file-level operations: [`parse_unity_file`] and [`write_unity_file`]. The
//! tag registry returned by the first must be passed to the second.

use crate::tag_registry::TagRegistry;
use crate::unity_yaml_loader::UnityYamlLoader;
use crate::unity_yaml_serializer::UnityYamlSerializer;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use unity_version_core::{LineEnding, Result, UnityDocument};

/// The documents of one Unity YAML file, in order
#[derive(Debug, Clone, Default)]
pub struct DocumentStream {
    /// The Unity objects in this file
    documents: Vec<UnityDocument>,
    /// Line ending style used in the original file
    line_ending: LineEnding,
    /// Path the stream was loaded from
    source: Option<PathBuf>,
}

impl DocumentStream {
    /// Create a new empty stream
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    pub fn with_source<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.source = Some(path.as_ref().to_path_buf());
        self
    }

    /// Get the line ending style
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// The first document, which holds the settings object
    pub fn first(&self) -> Option<&UnityDocument> {
        self.documents.first()
    }

    pub fn first_mut(&mut self) -> Option<&mut UnityDocument> {
        self.documents.first_mut()
    }

    pub fn documents(&self) -> &[UnityDocument] {
        &self.documents
    }

    pub fn push(&mut self, document: UnityDocument) {
        self.documents.push(document);
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Distinct class ids used by the document headers
    pub fn class_ids(&self) -> BTreeSet<u32> {
        self.documents
            .iter()
            .filter_map(UnityDocument::class_id)
            .collect()
    }

    /// Serialize the stream to Unity YAML text
    pub fn dump_yaml(&self, registry: &TagRegistry) -> Result<String> {
        UnityYamlSerializer::new()
            .with_line_ending(self.line_ending)
            .serialize_to_string(&self.documents, registry)
    }
}

/// Read and parse a Unity YAML file.
///
/// # Examples
///
/// ```rust,no_run
/// use unity_version_yaml::parse_unity_file;
///
/// let (stream, registry) = parse_unity_file("ProjectSettings/ProjectSettings.asset")?;
/// println!("{} documents, {} tag types", stream.len(), registry.len());
/// # Ok::<(), unity_version_core::UnityVersionError>(())
/// ```
pub fn parse_unity_file<P: AsRef<Path>>(path: P) -> Result<(DocumentStream, TagRegistry)> {
    UnityYamlLoader::new().load_file(path)
}

/// Serialize `stream` with the tag vocabulary of `registry` and overwrite `path`
pub fn write_unity_file<P: AsRef<Path>>(
    stream: &DocumentStream,
    path: P,
    registry: &TagRegistry,
) -> Result<()> {
    let path = path.as_ref();
    let yaml_content = stream.dump_yaml(registry)?;

    fs::write(path, &yaml_content)?;
    info!(
        "Wrote {} document(s), {} bytes to {}",
        stream.len(),
        yaml_content.len(),
        path.display()
    );
    Ok(())
}
