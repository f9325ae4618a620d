//! Text transforms around the YAML engine
//!
//! Unity files use a `%TAG !u!` directive and `!u!<N> &<anchor>` document
//! headers that a generic YAML engine does not round-trip. These functions
//! rewrite the raw text before parsing and clean the engine output after
//! serializing. They are pure string transforms.

use crate::tag_registry::{TagRegistry, TypeDescriptor};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;
use unity_version_core::DocumentTag;

static TAG_DIRECTIVE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^%TAG[^\r\n]*(?:\r?\n)?").unwrap());

static TAG_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"!u!([0-9]+)([^\r\n]*)").unwrap());

// A null in value position: `key: null` or `- null` at the end of a line.
static NULL_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)(^[ \t]*-|:) null(\r?)$").unwrap());

/// Result of [`normalize_tags`]
#[derive(Debug, Clone, Default)]
pub struct NormalizedText {
    /// Text with every `!u!N ...` marker replaced by `!<tag:unity3d.com,2011:N>`
    pub text: String,
    /// One entry per distinct class id seen
    pub registry: TagRegistry,
    /// Headers of the `---` lines, in order. `None` for a separator without a marker.
    pub headers: Vec<Option<DocumentTag>>,
}

/// Remove the first `%TAG` directive line, if any
pub fn strip_tag_directive(text: &str) -> Cow<'_, str> {
    TAG_DIRECTIVE.replacen(text, 1, "")
}

/// Replace Unity tag markers with explicit tags and collect the registry
pub fn normalize_tags(text: &str) -> NormalizedText {
    let headers = text
        .lines()
        .filter(|line| line.starts_with("---"))
        .map(|line| {
            TAG_MARKER.captures(line).and_then(|caps| {
                DocumentTag::parse_marker(&format!("{}{}", &caps[1], &caps[2]))
            })
        })
        .collect();

    let mut registry = TagRegistry::new();
    let text = TAG_MARKER
        .replace_all(text, |caps: &Captures| match caps[1].parse::<u32>() {
            Ok(class_id) => {
                registry.register(class_id);
                TypeDescriptor::mapping(class_id).verbatim_tag()
            }
            // Out of range for a class id; leave the marker for the engine to reject
            Err(_) => caps[0].to_string(),
        })
        .into_owned();

    NormalizedText {
        text,
        registry,
        headers,
    }
}

/// Drop the bare `null` token the engine writes for empty values
pub fn strip_null_tokens(text: &str) -> Cow<'_, str> {
    NULL_VALUE.replace_all(text, "${1}${2}")
}
