//! Insertion-ordered tag map.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// A single tag value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetadataValue {
    /// Raw tag value as decoded from the file
    Text(String),
    /// Derived signed decimal degrees
    Degrees(f64),
    /// Derived map link
    Link(String),
}

impl MetadataValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetadataValue::Text(s) | MetadataValue::Link(s) => Some(s),
            MetadataValue::Degrees(_) => None,
        }
    }

    pub fn as_degrees(&self) -> Option<f64> {
        match self {
            MetadataValue::Degrees(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::Text(s) | MetadataValue::Link(s) => f.write_str(s),
            MetadataValue::Degrees(v) => f.write_str(&crate::core::geo::format_degrees(*v)),
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        MetadataValue::Text(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        MetadataValue::Text(value)
    }
}

/// Tag name to value mapping that preserves insertion order.
///
/// Keys are unique: inserting an existing key leaves the first value in place.
/// Tag counts are small, so lookups scan linearly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataMap {
    entries: Vec<(String, MetadataValue)>,
}

impl MetadataMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tag, returning false if the key was already present
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> bool {
        let key = key.into();
        if self.contains_key(&key) {
            return false;
        }
        self.entries.push((key, value.into()));
        true
    }

    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetadataValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for MetadataMap
where
    K: Into<String>,
    V: Into<MetadataValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = MetadataMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl Serialize for MetadataMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let map: MetadataMap = [("b", "2"), ("a", "1"), ("c", "3")].into_iter().collect();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    }

    #[test]
    fn first_value_wins_on_duplicate_key() {
        let mut map = MetadataMap::new();
        assert!(map.insert("Image Make", "Canon"));
        assert!(!map.insert("Image Make", "Nikon"));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("Image Make").and_then(|v| v.as_text()), Some("Canon"));
    }

    #[test]
    fn degrees_display_keeps_decimal() {
        assert_eq!(MetadataValue::Degrees(-10.0).to_string(), "-10.0");
    }

    #[test]
    fn serializes_as_ordered_json_object() {
        let mut map = MetadataMap::new();
        map.insert("Image Model", "EOS R5");
        map.insert("GPS Latitude", MetadataValue::Degrees(1.5));
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"Image Model":"EOS R5","GPS Latitude":1.5}"#);
    }
}
