//! # Domain Model: Documents and Metadata Values
//!
//! A meeting note reaches the engine as a [`Document`]: a stable identity plus the
//! ordered key/value mapping parsed from its front-matter block.
//!
//! ## Value Normalization
//!
//! Front matter is loosely typed. The same field may hold a bare string in one note
//! and a list in the next:
//!
//! ```text
//! people: Alice             --> Scalar("Alice")
//! people: [Alice, Bob]      --> Sequence(["Alice", "Bob"])
//! people:                   --> Absent
//! ```
//!
//! Every value is normalized exactly once, when the mapping is built, into a
//! [`FieldValue`]. Downstream code (indexing, rendering, follow-up tracking) reads
//! values through [`FieldValue::values`] and never inspects raw YAML again.
//!
//! - `null` becomes [`FieldValue::Absent`]
//! - strings, numbers and booleans become [`FieldValue::Scalar`]
//! - sequences become [`FieldValue::Sequence`] of their stringified elements;
//!   `null` elements are dropped
//! - nested mappings are kept as compact JSON text
//!
//! ## Field Order
//!
//! [`Metadata`] preserves the order in which fields appear in the header block, so
//! the summary report lists fields the way the author wrote them.

use serde_yaml::{Mapping, Value};

use crate::error::{MinutesError, Result};

pub const FIELD_NAME: &str = "name";
pub const FIELD_DATE: &str = "date";
pub const FIELD_PEOPLE: &str = "people";
pub const FIELD_TAGS: &str = "tags";
pub const FIELD_FOLLOWUP: &str = "followup";

/// A single metadata value after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldValue {
    #[default]
    Absent,
    Scalar(String),
    Sequence(Vec<String>),
}

impl FieldValue {
    pub fn scalar(value: impl Into<String>) -> Self {
        FieldValue::Scalar(value.into())
    }

    pub fn sequence<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldValue::Sequence(values.into_iter().map(Into::into).collect())
    }

    /// Normalize a raw YAML value.
    pub fn from_yaml(value: &Value) -> Self {
        match value {
            Value::Null => FieldValue::Absent,
            Value::Sequence(items) => {
                FieldValue::Sequence(items.iter().filter_map(stringify).collect())
            }
            Value::Tagged(tagged) => FieldValue::from_yaml(&tagged.value),
            other => match stringify(other) {
                Some(s) => FieldValue::Scalar(s),
                None => FieldValue::Absent,
            },
        }
    }

    /// The value viewed as a sequence. A scalar is a one-element slice.
    pub fn values(&self) -> &[String] {
        match self {
            FieldValue::Absent => &[],
            FieldValue::Scalar(s) => std::slice::from_ref(s),
            FieldValue::Sequence(items) => items,
        }
    }

    /// The single value of a scalar or a one-element sequence.
    pub fn as_single(&self) -> Option<&str> {
        match self.values() {
            [only] => Some(only.as_str()),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }
}

fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Tagged(tagged) => stringify(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => nested_to_string(value),
    }
}

/// Nested values print as JSON. Mappings JSON cannot key (`{[a, b]: c}`) fall back
/// to block YAML.
fn nested_to_string(value: &Value) -> Option<String> {
    if let Ok(json) = serde_json::to_string(value) {
        return Some(json);
    }
    match serde_yaml::to_string(value) {
        Ok(yaml) => Some(yaml.trim_end().to_string()),
        Err(e) => {
            log::warn!("Dropping nested value that cannot be printed: {}", e);
            None
        }
    }
}

/// Ordered field-name to value mapping parsed from a document header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Metadata {
    fields: Vec<(String, FieldValue)>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a YAML mapping, keeping key order.
    pub fn from_yaml_mapping(mapping: &Mapping) -> Self {
        mapping
            .iter()
            .filter_map(|(k, v)| stringify(k).map(|key| (key, FieldValue::from_yaml(v))))
            .collect()
    }

    /// Builder-style insert. Replaces an existing field in place.
    pub fn with(mut self, key: impl Into<String>, value: FieldValue) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) {
        let key = key.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Returns [`FieldValue::Absent`] for unknown fields.
    pub fn get(&self, key: &str) -> &FieldValue {
        const ABSENT: &FieldValue = &FieldValue::Absent;
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
            .unwrap_or(ABSENT)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, FieldValue)> for Metadata {
    fn from_iter<T: IntoIterator<Item = (K, FieldValue)>>(iter: T) -> Self {
        let mut metadata = Metadata::new();
        for (k, v) in iter {
            metadata.insert(k, v);
        }
        metadata
    }
}

/// One parsed meeting note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub identity: String,
    pub metadata: Metadata,
}

impl Document {
    pub fn new(identity: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            identity: identity.into(),
            metadata,
        }
    }

    pub fn field(&self, key: &str) -> &FieldValue {
        self.metadata.get(key)
    }

    /// Read a field that reports cannot do without.
    pub fn require(&self, field: &'static str) -> Result<&str> {
        self.metadata
            .get(field)
            .as_single()
            .ok_or_else(|| MinutesError::missing(&self.identity, field))
    }

    pub fn name(&self) -> Result<&str> {
        self.require(FIELD_NAME)
    }

    pub fn date(&self) -> Result<&str> {
        self.require(FIELD_DATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(src: &str) -> Value {
        serde_yaml::from_str(src).unwrap()
    }

    #[test]
    fn test_scalar_string() {
        assert_eq!(
            FieldValue::from_yaml(&yaml("Alice")),
            FieldValue::scalar("Alice")
        );
    }

    #[test]
    fn test_null_is_absent() {
        assert_eq!(FieldValue::from_yaml(&yaml("~")), FieldValue::Absent);
    }

    #[test]
    fn test_numbers_and_bools_become_scalars() {
        assert_eq!(FieldValue::from_yaml(&yaml("42")), FieldValue::scalar("42"));
        assert_eq!(
            FieldValue::from_yaml(&yaml("true")),
            FieldValue::scalar("true")
        );
    }

    #[test]
    fn test_sequence_elements_stringified_and_nulls_dropped() {
        let value = FieldValue::from_yaml(&yaml("[a, 1, ~, b]"));
        assert_eq!(value, FieldValue::sequence(["a", "1", "b"]));
    }

    #[test]
    fn test_nested_mapping_kept_as_json() {
        let value = FieldValue::from_yaml(&yaml("{room: 4b}"));
        assert_eq!(value, FieldValue::scalar(r#"{"room":"4b"}"#));
    }

    #[test]
    fn test_mapping_with_complex_key_falls_back_to_yaml() {
        let value = FieldValue::from_yaml(&yaml("? [a, b]\n: c\n"));
        let text = value.as_single().unwrap();
        assert!(text.contains('c'));
        assert!(!text.starts_with('{'));
    }

    #[test]
    fn test_values_normalizes_scalar_to_slice() {
        assert_eq!(FieldValue::scalar("x").values(), ["x".to_string()]);
        assert!(FieldValue::Absent.values().is_empty());
        assert!(FieldValue::Sequence(vec![]).is_empty());
    }

    #[test]
    fn test_as_single() {
        assert_eq!(FieldValue::scalar("x").as_single(), Some("x"));
        assert_eq!(FieldValue::sequence(["x"]).as_single(), Some("x"));
        assert_eq!(FieldValue::sequence(["x", "y"]).as_single(), None);
        assert_eq!(FieldValue::Absent.as_single(), None);
    }

    #[test]
    fn test_metadata_preserves_field_order() {
        let mapping: Mapping =
            serde_yaml::from_str("name: Sync\ndate: 2024-01-01\nzeta: 1\nalpha: 2").unwrap();
        let metadata = Metadata::from_yaml_mapping(&mapping);
        let keys: Vec<&str> = metadata.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["name", "date", "zeta", "alpha"]);
    }

    #[test]
    fn test_unquoted_iso_date_is_a_string() {
        let mapping: Mapping = serde_yaml::from_str("date: 2024-01-01").unwrap();
        let metadata = Metadata::from_yaml_mapping(&mapping);
        assert_eq!(metadata.get("date"), &FieldValue::scalar("2024-01-01"));
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let metadata = Metadata::new()
            .with("a", FieldValue::scalar("1"))
            .with("b", FieldValue::scalar("2"))
            .with("a", FieldValue::scalar("3"));
        let pairs: Vec<(&str, &FieldValue)> = metadata.iter().collect();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0], ("a", &FieldValue::scalar("3")));
    }

    #[test]
    fn test_require_names_document_and_field() {
        let doc = Document::new("meetings/a.md", Metadata::new());
        let err = doc.date().unwrap_err();
        match err {
            MinutesError::MissingField { identity, field } => {
                assert_eq!(identity, "meetings/a.md");
                assert_eq!(field, "date");
            }
            other => panic!("Expected MissingField, got {:?}", other),
        }
    }
}
