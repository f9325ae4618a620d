//! Unity YAML serializer
//!
//! Document bodies are serialized by serde_yaml. This module adds what the
//! engine cannot produce on its own:
//! - the `%YAML` / `%TAG` stream header
//! - Unity document separators (`--- !u!129 &1`)
//! - removal of `null` tokens Unity never writes
//! - the line ending of the original file

use crate::constants::{UNITY_TAG_HANDLE, UNITY_TAG_URI, UNITY_YAML_VERSION};
use crate::preprocess::strip_null_tokens;
use crate::tag_registry::TagRegistry;
use std::fmt::Write;
use unity_version_core::{LineEnding, Result, UnityDocument, UnityVersionError};

/// Unity YAML serializer
pub struct UnityYamlSerializer {
    /// Line ending style to use
    line_ending: LineEnding,
}

impl UnityYamlSerializer {
    /// Create a new Unity YAML serializer
    pub fn new() -> Self {
        Self {
            line_ending: LineEnding::default(),
        }
    }

    /// Set line ending style
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Serialize documents to a Unity YAML string
    pub fn serialize_to_string(
        &self,
        documents: &[UnityDocument],
        registry: &TagRegistry,
    ) -> Result<String> {
        let mut output = String::new();
        self.serialize_to_writer(&mut output, documents, registry)?;
        Ok(self.line_ending.apply(&output))
    }

    /// Serialize documents to a writer, always with `\n` line endings
    pub fn serialize_to_writer<W: Write>(
        &self,
        writer: &mut W,
        documents: &[UnityDocument],
        registry: &TagRegistry,
    ) -> Result<()> {
        if documents.is_empty() {
            return Err(UnityVersionError::format("cannot write an empty document stream"));
        }
        self.check_registry(documents, registry)?;

        self.write_yaml_header(writer)?;
        for document in documents {
            self.serialize_document(writer, document)?;
        }

        Ok(())
    }

    /// Every document tag must have been registered when the file was parsed
    fn check_registry(&self, documents: &[UnityDocument], registry: &TagRegistry) -> Result<()> {
        for (index, document) in documents.iter().enumerate() {
            if let Some(tag) = &document.tag
                && !registry.contains(tag.class_id)
            {
                return Err(UnityVersionError::format(format!(
                    "document {} uses tag {}{} which is not in the tag registry",
                    index, UNITY_TAG_HANDLE, tag.class_id
                )));
            }
        }
        Ok(())
    }

    /// Write YAML header (version and tags)
    fn write_yaml_header<W: Write>(&self, writer: &mut W) -> Result<()> {
        write!(
            writer,
            "%YAML {}.{}\n%TAG {} {}\n",
            UNITY_YAML_VERSION.0, UNITY_YAML_VERSION.1, UNITY_TAG_HANDLE, UNITY_TAG_URI
        )
        .map_err(|e| UnityVersionError::format(format!("Failed to write YAML header: {}", e)))
    }

    /// Serialize a single document with its separator line
    fn serialize_document<W: Write>(&self, writer: &mut W, document: &UnityDocument) -> Result<()> {
        let separator = match &document.tag {
            Some(tag) => writeln!(writer, "--- {}", tag),
            None => writeln!(writer, "---"),
        };
        separator.map_err(|e| {
            UnityVersionError::format(format!("Failed to write document header: {}", e))
        })?;

        let body = serde_yaml::to_string(document.root())
            .map_err(|e| UnityVersionError::yaml(format!("YAML serialization error: {}", e)))?;

        writer
            .write_str(&strip_null_tokens(&body))
            .map_err(|e| UnityVersionError::format(format!("Failed to write document: {}", e)))
    }
}

impl Default for UnityYamlSerializer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unity_version_core::{DocumentTag, UnityValue};

    fn player_settings(version: &str) -> UnityDocument {
        let mut doc = UnityDocument::new(Some(DocumentTag::new(129, Some("1"))));
        let mut player = indexmap::IndexMap::new();
        player.insert("productName".to_string(), UnityValue::from("Demo"));
        player.insert("bundleVersion".to_string(), UnityValue::from(version));
        player.insert("AndroidKeystoreName".to_string(), UnityValue::Null);
        doc.set("PlayerSettings".to_string(), UnityValue::Object(player));
        doc
    }

    fn registry(ids: &[u32]) -> TagRegistry {
        let mut registry = TagRegistry::new();
        for id in ids {
            registry.register(*id);
        }
        registry
    }

    #[test]
    fn test_header_and_body() {
        let output = UnityYamlSerializer::new()
            .serialize_to_string(&[player_settings("1.2.3")], &registry(&[129]))
            .unwrap();

        assert!(output.starts_with("%YAML 1.1\n%TAG !u! tag:unity3d.com,2011:\n--- !u!129 &1\n"));
        assert!(output.contains("PlayerSettings:\n"));
        assert!(output.contains("  productName: Demo\n"));
        assert!(output.contains("  AndroidKeystoreName:\n"));
        assert!(!output.contains("null"));
    }

    #[test]
    fn test_each_document_gets_its_separator() {
        let mut game_object =
            UnityDocument::new(Some(DocumentTag::new(1, Some("100")).with_extra("stripped")));
        game_object.set(
            "GameObject".to_string(),
            UnityValue::Object(indexmap::IndexMap::new()),
        );

        let output = UnityYamlSerializer::new()
            .serialize_to_string(
                &[player_settings("1.0.0"), game_object],
                &registry(&[1, 129]),
            )
            .unwrap();

        assert!(output.contains("\n--- !u!129 &1\n"));
        assert!(output.contains("\n--- !u!1 &100 stripped\nGameObject: {}\n"));
    }

    #[test]
    fn test_unregistered_tag_is_rejected() {
        let err = UnityYamlSerializer::new()
            .serialize_to_string(&[player_settings("1.0.0")], &registry(&[1]))
            .unwrap_err();
        assert!(err.to_string().contains("!u!129"));
    }

    #[test]
    fn test_empty_stream_is_rejected() {
        assert!(
            UnityYamlSerializer::new()
                .serialize_to_string(&[], &TagRegistry::new())
                .is_err()
        );
    }

    #[test]
    fn test_windows_line_endings() {
        let output = UnityYamlSerializer::new()
            .with_line_ending(LineEnding::Windows)
            .serialize_to_string(&[player_settings("1.0.0")], &registry(&[129]))
            .unwrap();

        assert!(output.starts_with("%YAML 1.1\r\n%TAG !u! tag:unity3d.com,2011:\r\n"));
        assert!(!output.replace("\r\n", "").contains('\n'));
    }
}
