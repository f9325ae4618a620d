//! Unity YAML loader based on serde_yaml
//!
//! The raw text is normalized first (`%TAG` directive removed, `!u!N` markers
//! rewritten as explicit tags) and then handed to serde_yaml as a
//! multi-document stream. Each document is converted into a
//! [`UnityDocument`] carrying the header captured during normalization.

use crate::preprocess::{normalize_tags, strip_tag_directive};
use crate::tag_registry::TagRegistry;
use crate::yaml_document::DocumentStream;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;
use tracing::debug;
use unity_version_core::{
    DocumentTag, LineEnding, Result, UnityDocument, UnityValue, UnityVersionError,
};

/// Unity YAML loader based on serde_yaml
pub struct UnityYamlLoader;

impl UnityYamlLoader {
    /// Create a new Unity loader
    pub fn new() -> Self {
        Self
    }

    /// Load a Unity YAML file
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<(DocumentStream, TagRegistry)> {
        let path = path.as_ref();
        debug!("Loading Unity YAML from {}", path.display());

        let content = fs::read_to_string(path)?;
        let (stream, registry) = self.load_from_str(&content)?;
        Ok((stream.with_source(path), registry))
    }

    /// Load Unity YAML from a string
    pub fn load_from_str(&self, content: &str) -> Result<(DocumentStream, TagRegistry)> {
        let line_ending = LineEnding::detect(content);

        let stripped = strip_tag_directive(content);
        let normalized = normalize_tags(&stripped);
        debug!(
            "Registered {} Unity tag type(s): {:?}",
            normalized.registry.len(),
            normalized.registry.class_ids().collect::<Vec<_>>()
        );

        let documents: Vec<Value> = serde_yaml::Deserializer::from_str(&normalized.text)
            .map(Value::deserialize)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| UnityVersionError::yaml(format!("YAML parsing error: {}", e)))?;
        debug!("Parsed {} YAML documents", documents.len());

        let headers = Self::align_headers(normalized.headers, documents.len())?;

        let mut stream = DocumentStream::new().with_line_ending(line_ending);
        for (doc_index, (document, header)) in documents.into_iter().zip(headers).enumerate() {
            let unity_document =
                Self::convert_document(document, header, &normalized.registry, doc_index)?;
            stream.push(unity_document);
        }

        Ok((stream, normalized.registry))
    }

    /// Pair `---` headers with parsed documents.
    ///
    /// Content before the first separator forms an implicit document with no
    /// header. Any other mismatch would drop tags on write, so it is an error.
    fn align_headers(
        mut headers: Vec<Option<DocumentTag>>,
        document_count: usize,
    ) -> Result<Vec<Option<DocumentTag>>> {
        if document_count == headers.len() + 1 {
            headers.insert(0, None);
        }
        if document_count != headers.len() {
            return Err(UnityVersionError::format(format!(
                "found {} document separator(s) for {} document(s)",
                headers.len(),
                document_count
            )));
        }
        Ok(headers)
    }

    /// Convert a YAML document to a UnityDocument
    fn convert_document(
        document: Value,
        header: Option<DocumentTag>,
        registry: &TagRegistry,
        doc_index: usize,
    ) -> Result<UnityDocument> {
        let mapping = match &header {
            Some(tag) => registry
                .get(tag.class_id)
                .ok_or_else(|| {
                    UnityVersionError::format(format!(
                        "document {} uses unregistered tag {}",
                        doc_index, tag
                    ))
                })?
                .construct(document)?,
            None => Self::untagged_mapping(document, doc_index)?,
        };

        let root = Self::convert_mapping(&mapping)?;
        Ok(UnityDocument::from_root(header, root))
    }

    fn untagged_mapping(document: Value, doc_index: usize) -> Result<Mapping> {
        match document {
            Value::Null => Ok(Mapping::new()),
            Value::Mapping(mapping) => Ok(mapping),
            Value::Tagged(tagged) => Self::untagged_mapping(tagged.value, doc_index),
            _ => Err(UnityVersionError::format(format!(
                "document {} is not a mapping",
                doc_index
            ))),
        }
    }

    fn convert_mapping(mapping: &Mapping) -> Result<IndexMap<String, UnityValue>> {
        let mut object = IndexMap::new();
        for (k, v) in mapping {
            let key = match k {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                other => {
                    return Err(UnityVersionError::format(format!(
                        "unsupported mapping key: {:?}",
                        other
                    )));
                }
            };
            object.insert(key, Self::convert_value_to_unity_value(v)?);
        }
        Ok(object)
    }

    /// Convert serde_yaml Value to UnityValue
    fn convert_value_to_unity_value(value: &Value) -> Result<UnityValue> {
        match value {
            Value::Null => Ok(UnityValue::Null),
            Value::Bool(b) => Ok(UnityValue::Bool(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(UnityValue::Integer(i))
                } else if let Some(u) = n.as_u64() {
                    Ok(UnityValue::UInteger(u))
                } else if let Some(f) = n.as_f64() {
                    Ok(UnityValue::Float(f))
                } else {
                    Ok(UnityValue::String(n.to_string()))
                }
            }
            Value::String(s) => Ok(UnityValue::String(s.clone())),
            Value::Sequence(seq) => {
                let mut array = Vec::new();
                for item in seq {
                    array.push(Self::convert_value_to_unity_value(item)?);
                }
                Ok(UnityValue::Array(array))
            }
            Value::Mapping(mapping) => Ok(UnityValue::Object(Self::convert_mapping(mapping)?)),
            Value::Tagged(tagged) => {
                // Handle tagged values
                Self::convert_value_to_unity_value(&tagged.value)
            }
        }
    }
}

impl Default for UnityYamlLoader {
    fn default() -> Self {
        Self::new()
    }
}
