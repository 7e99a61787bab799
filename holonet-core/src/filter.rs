//! Field-level filters applied client-side after each upstream fetch
//!
//! The upstream only supports free-text search, so named-field filtering
//! happens here: every filter entry must match (logical AND), entries with
//! empty values are vacuously satisfied, and the comparison strategy is
//! fixed per entity type.

use crate::record::CatalogRecord;
use serde::{Deserialize, Serialize};

/// Comparison strategy for a single filter field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Case-insensitive full-string equality.
    Exact,
    /// Case-insensitive substring containment.
    Contains,
}

impl MatchMode {
    /// Compare a record's field text against the requested value.
    pub fn matches(&self, field_text: &str, wanted: &str) -> bool {
        let field_text = field_text.to_lowercase();
        let wanted = wanted.to_lowercase();
        match self {
            MatchMode::Exact => field_text == wanted,
            MatchMode::Contains => field_text.contains(&wanted),
        }
    }
}

/// A single named-field filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldFilter {
    pub field: String,
    pub value: String,
    pub mode: MatchMode,
}

impl FieldFilter {
    pub fn new(field: impl Into<String>, value: impl Into<String>, mode: MatchMode) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            mode,
        }
    }

    /// Whether the record satisfies this filter.
    ///
    /// Empty filter values are vacuously satisfied; a record that lacks the
    /// field (or holds a non-primitive there) fails the filter.
    pub fn matches(&self, record: &CatalogRecord) -> bool {
        if self.value.is_empty() {
            return true;
        }
        match record.field_text(&self.field) {
            Some(text) => self.mode.matches(&text, &self.value),
            None => false,
        }
    }
}

/// A conjunction of field filters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    filters: Vec<FieldFilter>,
}

impl FilterSet {
    pub fn new(filters: Vec<FieldFilter>) -> Self {
        Self { filters }
    }

    /// A filter set that matches every record.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Whether the record satisfies every filter in the set.
    pub fn matches(&self, record: &CatalogRecord) -> bool {
        self.filters.iter().all(|f| f.matches(record))
    }

    /// Retain only the records that satisfy the set, preserving order.
    pub fn apply(&self, records: Vec<CatalogRecord>) -> Vec<CatalogRecord> {
        if self.is_empty() {
            return records;
        }
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::{Map, Value};

    fn arb_record() -> impl Strategy<Value = CatalogRecord> {
        prop::collection::hash_map("[a-z_]{1,10}", "[a-zA-Z0-9 ]{0,20}", 0..6).prop_map(|m| {
            let mut map = Map::new();
            for (k, v) in m {
                map.insert(k, Value::String(v));
            }
            CatalogRecord::new(map)
        })
    }

    proptest! {
        /// An empty filter set keeps every record.
        #[test]
        fn prop_empty_set_is_identity(records in prop::collection::vec(arb_record(), 0..10)) {
            let kept = FilterSet::empty().apply(records.clone());
            prop_assert_eq!(kept, records);
        }

        /// Exact matching implies contains matching for the same value.
        #[test]
        fn prop_exact_implies_contains(
            record in arb_record(),
            field in "[a-z_]{1,10}",
            value in "[a-zA-Z0-9 ]{1,20}",
        ) {
            let exact = FieldFilter::new(field.clone(), value.clone(), MatchMode::Exact);
            let contains = FieldFilter::new(field, value, MatchMode::Contains);
            if exact.matches(&record) {
                prop_assert!(contains.matches(&record));
            }
        }
    }
}
