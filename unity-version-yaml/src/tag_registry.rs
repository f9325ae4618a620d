//! Registry of Unity tag types
//!
//! Every distinct `!u!<N>` marker found in a file gets one synthetic type
//! descriptor. The registry is built while normalizing the text and must be
//! handed back to the writer so both directions use the same tag vocabulary.

use crate::constants::{UNITY_TAG_HANDLE, tag_uri};
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;
use unity_version_core::{Result, UnityVersionError};

/// Node kind a synthetic type applies to. Unity only tags mappings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Mapping,
}

/// Synthetic type descriptor for one Unity class id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub class_id: u32,
    /// Normalized tag URI, e.g. `tag:unity3d.com,2011:129`
    pub tag_uri: String,
    pub kind: NodeKind,
}

impl TypeDescriptor {
    pub fn mapping(class_id: u32) -> Self {
        Self {
            class_id,
            tag_uri: tag_uri(class_id),
            kind: NodeKind::Mapping,
        }
    }

    /// Explicit tag form used in the normalized text: `!<tag:unity3d.com,2011:N>`
    pub fn verbatim_tag(&self) -> String {
        format!("!<{}>", self.tag_uri)
    }

    /// Shorthand form used in Unity files: `!u!N`
    pub fn shorthand_tag(&self) -> String {
        format!("{}{}", UNITY_TAG_HANDLE, self.class_id)
    }

    /// Build the mapping for a node carrying this tag.
    ///
    /// An absent or null node is an empty mapping; a mapping passes through.
    pub fn construct(&self, value: Value) -> Result<Mapping> {
        match value {
            Value::Null => Ok(Mapping::new()),
            // An empty node with a non-local tag comes back as an empty string
            Value::String(s) if s.is_empty() => Ok(Mapping::new()),
            Value::Mapping(mapping) => Ok(mapping),
            Value::Tagged(tagged) => self.construct(tagged.value),
            other => Err(UnityVersionError::format(format!(
                "node tagged {} must be a mapping, found {}",
                self.shorthand_tag(),
                kind_name(&other)
            ))),
        }
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

/// Map from Unity class id to its synthetic type descriptor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagRegistry {
    types: BTreeMap<u32, TypeDescriptor>,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class id. Returns true if it was not known yet.
    pub fn register(&mut self, class_id: u32) -> bool {
        if self.types.contains_key(&class_id) {
            return false;
        }
        self.types.insert(class_id, TypeDescriptor::mapping(class_id));
        true
    }

    pub fn get(&self, class_id: u32) -> Option<&TypeDescriptor> {
        self.types.get(&class_id)
    }

    pub fn contains(&self, class_id: u32) -> bool {
        self.types.contains_key(&class_id)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registered class ids in ascending order
    pub fn class_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.types.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_is_idempotent() {
        let mut registry = TagRegistry::new();
        assert!(registry.register(129));
        assert!(!registry.register(129));
        assert!(registry.register(1));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.class_ids().collect::<Vec<_>>(), vec![1, 129]);
    }

    #[test]
    fn test_descriptor_tags() {
        let descriptor = TypeDescriptor::mapping(129);
        assert_eq!(descriptor.tag_uri, "tag:unity3d.com,2011:129");
        assert_eq!(descriptor.verbatim_tag(), "!<tag:unity3d.com,2011:129>");
        assert_eq!(descriptor.shorthand_tag(), "!u!129");
        assert_eq!(descriptor.kind, NodeKind::Mapping);
    }

    #[test]
    fn test_construct_null_is_empty_mapping() {
        let descriptor = TypeDescriptor::mapping(1);
        assert!(descriptor.construct(Value::Null).unwrap().is_empty());
        assert!(
            descriptor
                .construct(Value::String(String::new()))
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_construct_passes_mapping_through() {
        let descriptor = TypeDescriptor::mapping(129);
        let value: Value = serde_yaml::from_str("PlayerSettings:\n  bundleVersion: 1.0.0\n").unwrap();
        let mapping = descriptor.construct(value.clone()).unwrap();
        assert_eq!(Value::Mapping(mapping), value);
    }

    #[test]
    fn test_construct_rejects_scalars() {
        let descriptor = TypeDescriptor::mapping(4);
        let err = descriptor
            .construct(Value::String("x".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("!u!4"));
    }
}
