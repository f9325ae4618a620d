//! Unity document model
//!
//! A Unity YAML file is a stream of documents, each introduced by a header
//! such as `--- !u!129 &1`. The header carries the class id (the tag number)
//! and the object's anchor; the body is a single top-level mapping whose key
//! is the class name.

use crate::constants::UNITY_TAG_HANDLE;
use crate::error::{Result, UnityVersionError};
use crate::unity_value::UnityValue;
use indexmap::IndexMap;
use std::fmt;

/// The `!u!<N> &<anchor> [extra]` part of a document separator line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentTag {
    /// Class ID (the number after `!u!`)
    pub class_id: u32,
    /// YAML anchor for this object
    pub anchor: Option<String>,
    /// Extra data after the anchor (e.g. `stripped`)
    pub extra: String,
}

impl DocumentTag {
    pub fn new<S: Into<String>>(class_id: u32, anchor: Option<S>) -> Self {
        Self {
            class_id,
            anchor: anchor.map(Into::into),
            extra: String::new(),
        }
    }

    pub fn with_extra<S: Into<String>>(mut self, extra: S) -> Self {
        self.extra = extra.into();
        self
    }

    /// Parse the text that follows `!u!` on a header line, e.g. `129 &1`
    pub fn parse_marker(marker: &str) -> Option<Self> {
        let mut parts = marker.split_whitespace();
        let class_id = parts.next()?.parse::<u32>().ok()?;

        let mut anchor = None;
        let mut extra = Vec::new();
        for part in parts {
            match part.strip_prefix('&') {
                Some(a) if anchor.is_none() && !a.is_empty() => anchor = Some(a.to_string()),
                _ => extra.push(part),
            }
        }

        Some(Self {
            class_id,
            anchor,
            extra: extra.join(" "),
        })
    }
}

impl fmt::Display for DocumentTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", UNITY_TAG_HANDLE, self.class_id)?;
        if let Some(anchor) = &self.anchor {
            write!(f, " &{}", anchor)?;
        }
        if !self.extra.is_empty() {
            write!(f, " {}", self.extra)?;
        }
        Ok(())
    }
}

/// One document of a Unity YAML stream
#[derive(Debug, Clone, PartialEq)]
pub struct UnityDocument {
    /// Header tag, if the document separator carried one
    pub tag: Option<DocumentTag>,
    /// Top-level mapping of the document
    root: IndexMap<String, UnityValue>,
}

impl UnityDocument {
    /// Create an empty document
    pub fn new(tag: Option<DocumentTag>) -> Self {
        Self {
            tag,
            root: IndexMap::new(),
        }
    }

    /// Create a document from an existing top-level mapping
    pub fn from_root(tag: Option<DocumentTag>, root: IndexMap<String, UnityValue>) -> Self {
        Self { tag, root }
    }

    /// Class ID from the header tag
    pub fn class_id(&self) -> Option<u32> {
        self.tag.as_ref().map(|t| t.class_id)
    }

    /// Name of the object, i.e. the first top-level key (`PlayerSettings`)
    pub fn class_name(&self) -> Option<&str> {
        self.root.keys().next().map(String::as_str)
    }

    /// Get a top-level value
    pub fn get(&self, key: &str) -> Option<&UnityValue> {
        self.root.get(key)
    }

    /// Set a top-level value
    pub fn set<V: Into<UnityValue>>(&mut self, key: String, value: V) {
        self.root.insert(key, value.into());
    }

    /// Top-level mapping
    pub fn root(&self) -> &IndexMap<String, UnityValue> {
        &self.root
    }

    /// Look up a value by a path of keys starting at the top-level mapping
    pub fn get_path(&self, path: &[&str]) -> Option<&UnityValue> {
        let (first, rest) = path.split_first()?;
        self.root.get(*first)?.get_path(rest)
    }

    pub fn get_path_mut(&mut self, path: &[&str]) -> Option<&mut UnityValue> {
        let (first, rest) = path.split_first()?;
        self.root.get_mut(*first)?.get_path_mut(rest)
    }

    /// Replace the value at `path`. The parent object must already exist.
    pub fn set_path<V: Into<UnityValue>>(&mut self, path: &[&str], value: V) -> Result<()> {
        let (last, parents) = path
            .split_last()
            .ok_or_else(|| UnityVersionError::format("empty property path"))?;

        let parent = if parents.is_empty() {
            &mut self.root
        } else {
            self.get_path_mut(parents)
                .and_then(UnityValue::as_object_mut)
                .ok_or_else(|| {
                    UnityVersionError::format(format!(
                        "property path '{}' does not lead to a mapping",
                        parents.join(".")
                    ))
                })?
        };

        parent.insert(last.to_string(), value.into());
        Ok(())
    }
}

impl fmt::Display for UnityDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.class_name().unwrap_or("<empty>");
        match &self.tag {
            Some(tag) => write!(f, "{}({})", name, tag.class_id),
            None => write!(f, "{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_settings() -> UnityDocument {
        let mut player = IndexMap::new();
        player.insert("bundleVersion".to_string(), UnityValue::from("0.1.0"));
        let mut doc = UnityDocument::new(Some(DocumentTag::new(129, Some("1"))));
        doc.set("PlayerSettings".to_string(), UnityValue::Object(player));
        doc
    }

    #[test]
    fn test_parse_marker() {
        let tag = DocumentTag::parse_marker("129 &1").unwrap();
        assert_eq!(tag.class_id, 129);
        assert_eq!(tag.anchor.as_deref(), Some("1"));
        assert!(tag.extra.is_empty());

        let tag = DocumentTag::parse_marker("1001 &100100000 stripped").unwrap();
        assert_eq!(tag.class_id, 1001);
        assert_eq!(tag.anchor.as_deref(), Some("100100000"));
        assert_eq!(tag.extra, "stripped");

        let tag = DocumentTag::parse_marker("4").unwrap();
        assert_eq!(tag.anchor, None);

        assert!(DocumentTag::parse_marker("abc &1").is_none());
    }

    #[test]
    fn test_tag_display() {
        let tag = DocumentTag::new(1001, Some("5")).with_extra("stripped");
        assert_eq!(tag.to_string(), "!u!1001 &5 stripped");
        assert_eq!(DocumentTag::new::<String>(4, None).to_string(), "!u!4");
    }

    #[test]
    fn test_document_paths() {
        let mut doc = player_settings();
        assert_eq!(doc.class_name(), Some("PlayerSettings"));
        assert_eq!(doc.class_id(), Some(129));
        assert_eq!(
            doc.get_path(&["PlayerSettings", "bundleVersion"])
                .and_then(|v| v.as_str()),
            Some("0.1.0")
        );

        doc.set_path(&["PlayerSettings", "bundleVersion"], "0.2.0")
            .unwrap();
        assert_eq!(
            doc.get_path(&["PlayerSettings", "bundleVersion"])
                .and_then(|v| v.as_str()),
            Some("0.2.0")
        );
        assert_eq!(doc.to_string(), "PlayerSettings(129)");
    }

    #[test]
    fn test_set_path_requires_parent() {
        let mut doc = player_settings();
        let err = doc
            .set_path(&["EditorSettings", "bundleVersion"], "1.0.0")
            .unwrap_err();
        assert!(matches!(err, UnityVersionError::Format { .. }));
        assert!(doc.set_path(&[], "x").is_err());
    }
}
