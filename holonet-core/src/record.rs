//! Catalog records and upstream pages
//!
//! A catalog record is an immutable snapshot of one upstream entity instance.
//! Records are kept as raw JSON objects rather than typed structs so the
//! same filtering and pagination machinery works across every entity type.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One catalog entity instance as returned by the upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogRecord {
    fields: Map<String, Value>,
}

impl CatalogRecord {
    /// Create a record from a JSON object.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Look up a field and render it as text for filter comparison.
    ///
    /// Strings are returned as-is; numbers and booleans are stringified the
    /// way the upstream prints them. Null, missing, and structured fields
    /// yield `None`.
    pub fn field_text(&self, name: &str) -> Option<String> {
        match self.fields.get(name)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Attach the upstream-assigned id to the record.
    ///
    /// The upstream list payloads carry no id field; the lookup path appends
    /// the path id so callers can address the record again.
    pub fn with_id(mut self, id: &str) -> Self {
        self.fields
            .insert("id".to_string(), Value::String(id.to_string()));
        self
    }

    /// Access the raw fields.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl From<Map<String, Value>> for CatalogRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

/// One page of upstream list results.
///
/// `count` is the upstream's total record count for the whole result set;
/// it is authoritative only when read from the first page of an aggregation
/// run. `items` preserve upstream order.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamPage {
    pub items: Vec<CatalogRecord>,
    pub count: u64,
    pub has_next: bool,
}

impl UpstreamPage {
    /// An empty terminal page.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            count: 0,
            has_next: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> CatalogRecord {
        match value {
            Value::Object(map) => CatalogRecord::new(map),
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_field_text_string() {
        let r = record(json!({"name": "Luke Skywalker"}));
        assert_eq!(r.field_text("name").as_deref(), Some("Luke Skywalker"));
    }

    #[test]
    fn test_field_text_number_and_bool() {
        let r = record(json!({"episode_id": 4, "canon": true}));
        assert_eq!(r.field_text("episode_id").as_deref(), Some("4"));
        assert_eq!(r.field_text("canon").as_deref(), Some("true"));
    }

    #[test]
    fn test_field_text_missing_null_and_structured() {
        let r = record(json!({"films": ["a", "b"], "homeworld": null}));
        assert_eq!(r.field_text("films"), None);
        assert_eq!(r.field_text("homeworld"), None);
        assert_eq!(r.field_text("absent"), None);
    }

    #[test]
    fn test_with_id_attaches_id() {
        let r = record(json!({"name": "Leia Organa"})).with_id("5");
        assert_eq!(r.field_text("id").as_deref(), Some("5"));
        assert_eq!(r.field_text("name").as_deref(), Some("Leia Organa"));
    }

    #[test]
    fn test_record_serializes_transparently() {
        let r = record(json!({"name": "Tatooine", "climate": "arid"}));
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json, json!({"name": "Tatooine", "climate": "arid"}));
    }
}
