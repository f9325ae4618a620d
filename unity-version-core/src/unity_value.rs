//! Unity value types
//!
//! This module defines the UnityValue enum and related functionality
//! for representing Unity asset values in a type-safe manner.

use indexmap::IndexMap;
use serde::Serialize;

/// A Unity value that can be stored in a settings document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum UnityValue {
    Null,
    Bool(bool),
    Integer(i64),
    /// Integers above `i64::MAX`, e.g. 64-bit file ids
    UInteger(u64),
    Float(f64),
    String(String),
    Array(Vec<UnityValue>),
    Object(IndexMap<String, UnityValue>),
}

impl UnityValue {
    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, UnityValue::Null)
    }

    /// Get as string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            UnityValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Textual form of a scalar.
    ///
    /// Plain scalars such as `bundleVersion: 1.0` are typed as numbers by the
    /// YAML engine, so numbers are rendered back to text here. Floats keep a
    /// fractional part (`1.0`, not `1`).
    pub fn as_scalar_text(&self) -> Option<String> {
        match self {
            UnityValue::String(s) => Some(s.clone()),
            UnityValue::Integer(i) => Some(i.to_string()),
            UnityValue::UInteger(u) => Some(u.to_string()),
            UnityValue::Float(f) => Some(format!("{:?}", f)),
            _ => None,
        }
    }

    /// Get as object
    pub fn as_object(&self) -> Option<&IndexMap<String, UnityValue>> {
        match self {
            UnityValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Get mutable reference as object
    pub fn as_object_mut(&mut self) -> Option<&mut IndexMap<String, UnityValue>> {
        match self {
            UnityValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Follow a path of object keys
    pub fn get_path(&self, path: &[&str]) -> Option<&UnityValue> {
        path.iter()
            .try_fold(self, |value, key| value.as_object()?.get(*key))
    }

    /// Follow a path of object keys, mutably
    pub fn get_path_mut(&mut self, path: &[&str]) -> Option<&mut UnityValue> {
        path.iter()
            .try_fold(self, |value, key| value.as_object_mut()?.get_mut(*key))
    }
}

impl From<String> for UnityValue {
    fn from(s: String) -> Self {
        UnityValue::String(s)
    }
}

impl From<&str> for UnityValue {
    fn from(s: &str) -> Self {
        UnityValue::String(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> UnityValue {
        let mut player = IndexMap::new();
        player.insert("productName".to_string(), UnityValue::from("Demo"));
        player.insert("bundleVersion".to_string(), UnityValue::from("1.2.3"));

        let mut root = IndexMap::new();
        root.insert("PlayerSettings".to_string(), UnityValue::Object(player));
        UnityValue::Object(root)
    }

    #[test]
    fn test_unity_value_conversions() {
        let string_val: UnityValue = "test".into();
        assert_eq!(string_val.as_str(), Some("test"));
        assert_eq!(UnityValue::from("x".to_string()).as_str(), Some("x"));

        assert!(UnityValue::Null.is_null());
        assert!(!string_val.is_null());
    }

    #[test]
    fn test_scalar_text() {
        assert_eq!(
            UnityValue::from("1.2.3").as_scalar_text().as_deref(),
            Some("1.2.3")
        );
        assert_eq!(UnityValue::Integer(7).as_scalar_text().as_deref(), Some("7"));
        assert_eq!(
            UnityValue::UInteger(u64::MAX).as_scalar_text().as_deref(),
            Some("18446744073709551615")
        );
        assert_eq!(UnityValue::Float(1.0).as_scalar_text().as_deref(), Some("1.0"));
        assert_eq!(UnityValue::Null.as_scalar_text(), None);
    }

    #[test]
    fn test_path_access() {
        let mut value = settings();
        assert_eq!(
            value
                .get_path(&["PlayerSettings", "bundleVersion"])
                .and_then(|v| v.as_str()),
            Some("1.2.3")
        );
        assert!(value.get_path(&["PlayerSettings", "missing"]).is_none());
        assert!(
            value
                .get_path(&["PlayerSettings", "productName", "deeper"])
                .is_none()
        );

        if let Some(v) = value.get_path_mut(&["PlayerSettings", "bundleVersion"]) {
            *v = UnityValue::from("2.0.0");
        }
        assert_eq!(
            value
                .get_path(&["PlayerSettings", "bundleVersion"])
                .and_then(|v| v.as_str()),
            Some("2.0.0")
        );
    }
}
