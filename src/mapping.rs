//! Item mappings: per-field extraction of OPDS data from raw provider records.
//!
//! A data provider's records rarely match the OPDS vocabulary, so each
//! provider supplies an [`ItemMapping`]: a set of extraction functions keyed
//! by canonical field name. Fields may be configured under either the legacy
//! OPDS names or the canonical schema.org names; every configured name is
//! normalized through [`canonicalize`](crate::vocabulary::canonicalize) when
//! the mapping is built, and the mapping is immutable afterwards.
//!
//! Extractors are total functions returning `Option`: a record that lacks a
//! field (or has it in an unusable shape) yields `None` for that field
//! without affecting any other field of the record.
//!
//! # Examples
//!
//! ```
//! use opds2::ItemMapping;
//! use serde_json::json;
//!
//! # fn main() -> opds2::Result<()> {
//! let mapping = ItemMapping::builder()
//!     .field("title", |item| item.get("title").cloned())
//!     .field("cover_url", |item| {
//!         item.get("cover_i")
//!             .and_then(|id| id.as_i64())
//!             .map(|id| json!(format!("https://covers.openlibrary.org/b/id/{id}-L.jpg")))
//!     })
//!     .build()?;
//!
//! let record = json!({"title": "Dune", "cover_i": 44});
//! assert_eq!(mapping.resolve("name", &record), Some(json!("Dune")));
//! # Ok(())
//! # }
//! ```

use std::fmt;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{OpdsError, Result};
use crate::vocabulary::canonicalize;

/// A per-field extraction function applied to a raw provider record.
///
/// Returns `None` when the record does not carry the field in a usable
/// shape.
pub type Extractor = Box<dyn Fn(&Value) -> Option<Value> + Send + Sync>;

/// An immutable set of per-field extractors keyed by canonical field name.
///
/// Built through [`ItemMapping::builder`]. Extractors are stored in
/// registration order.
pub struct ItemMapping {
    extractors: IndexMap<String, Extractor>,
}

impl ItemMapping {
    /// Create a builder for configuring an item mapping.
    #[must_use]
    pub fn builder() -> ItemMappingBuilder {
        ItemMappingBuilder {
            entries: Vec::new(),
        }
    }

    /// Resolve a single field against a raw record.
    ///
    /// `field` may be a legacy or canonical name; it is canonicalized before
    /// lookup. Returns `None` when no extractor is registered for the field
    /// or the extractor yields nothing for this record. A per-field miss is
    /// not an error: one unusable field never aborts the projection of the
    /// rest of the record.
    #[must_use]
    pub fn resolve(&self, field: &str, record: &Value) -> Option<Value> {
        let extractor = self.extractors.get(canonicalize(field))?;
        extractor(record)
    }

    /// Apply every extractor to a raw record.
    ///
    /// Returns the non-`None` results keyed by canonical field name, in
    /// registration order.
    #[must_use]
    pub fn map_record(&self, record: &Value) -> IndexMap<String, Value> {
        let mut mapped = IndexMap::new();
        for (field, extractor) in &self.extractors {
            if let Some(value) = extractor(record) {
                mapped.insert(field.clone(), value);
            }
        }
        mapped
    }

    /// The canonical names of all configured fields, in registration order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.extractors.keys().map(String::as_str)
    }

    /// Check whether a field (legacy or canonical name) is configured.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.extractors.contains_key(canonicalize(field))
    }

    /// Number of configured fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    /// Check whether no fields are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }
}

impl fmt::Debug for ItemMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemMapping")
            .field("fields", &self.extractors.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for configuring an [`ItemMapping`].
///
/// Field names are normalized to canonical spelling at registration time.
/// If two registrations normalize to the same canonical field (e.g. both
/// `title` and `name`), [`ItemMappingBuilder::build`] rejects the mapping
/// with [`OpdsError::MappingConflict`] rather than silently picking one.
pub struct ItemMappingBuilder {
    // (canonical name, name as given, extractor)
    entries: Vec<(String, String, Extractor)>,
}

impl ItemMappingBuilder {
    /// Register an extractor for a field.
    ///
    /// `name` may be a legacy name (`title`, `cover_url`, ...) or a canonical
    /// schema.org name (`name`, `image`, ...).
    #[must_use]
    pub fn field<F>(mut self, name: &str, extractor: F) -> Self
    where
        F: Fn(&Value) -> Option<Value> + Send + Sync + 'static,
    {
        let canonical = canonicalize(name).to_string();
        self.entries
            .push((canonical, name.to_string(), Box::new(extractor)));
        self
    }

    /// Build the mapping.
    ///
    /// # Errors
    ///
    /// Returns [`OpdsError::MappingConflict`] if two registered names
    /// normalize to the same canonical field. Extraction functions are not
    /// comparable, so any duplicate registration is a conflict, including
    /// one that repeats the same spelling.
    pub fn build(self) -> Result<ItemMapping> {
        let mut extractors: IndexMap<String, Extractor> = IndexMap::new();
        let mut first_spelling: IndexMap<String, String> = IndexMap::new();

        for (canonical, given, extractor) in self.entries {
            if let Some(first) = first_spelling.get(&canonical) {
                return Err(OpdsError::MappingConflict(format!(
                    "field '{canonical}' configured twice (as '{first}' and '{given}')"
                )));
            }
            first_spelling.insert(canonical.clone(), given);
            extractors.insert(canonical, extractor);
        }

        Ok(ItemMapping { extractors })
    }
}

impl fmt::Debug for ItemMappingBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemMappingBuilder")
            .field(
                "fields",
                &self.entries.iter().map(|(c, _, _)| c).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn title_mapping() -> ItemMapping {
        ItemMapping::builder()
            .field("title", |item| item.get("title").cloned())
            .field("author", |item| item.get("author_names").cloned())
            .build()
            .expect("Failed to build mapping")
    }

    #[test]
    fn test_legacy_names_normalize_to_canonical() {
        let mapping = title_mapping();
        let fields: Vec<&str> = mapping.fields().collect();
        assert_eq!(fields, ["name", "author"]);
    }

    #[test]
    fn test_resolve_by_either_spelling() {
        let mapping = title_mapping();
        let record = json!({"title": "Dune"});

        assert_eq!(mapping.resolve("name", &record), Some(json!("Dune")));
        assert_eq!(mapping.resolve("title", &record), Some(json!("Dune")));
    }

    #[test]
    fn test_resolve_unregistered_field() {
        let mapping = title_mapping();
        let record = json!({"title": "Dune", "desc": "sand"});
        assert_eq!(mapping.resolve("description", &record), None);
    }

    #[test]
    fn test_resolve_absorbs_extractor_miss() {
        let mapping = ItemMapping::builder()
            .field("title", |item| item.get("nested")?.get("deep")?.get("title").cloned())
            .build()
            .unwrap();

        // Record without the expected shape: the miss yields None, no panic
        assert_eq!(mapping.resolve("name", &json!({"title": "flat"})), None);
    }

    #[test]
    fn test_map_record_skips_missing_fields() {
        let mapping = title_mapping();
        let mapped = mapping.map_record(&json!({"title": "Dune"}));

        assert_eq!(mapped.len(), 1);
        assert_eq!(mapped.get("name"), Some(&json!("Dune")));
        assert!(!mapped.contains_key("author"));
    }

    #[test]
    fn test_map_record_preserves_registration_order() {
        let mapping = ItemMapping::builder()
            .field("subject", |item| item.get("tags").cloned())
            .field("title", |item| item.get("title").cloned())
            .build()
            .unwrap();

        let mapped = mapping.map_record(&json!({"title": "Dune", "tags": ["sf"]}));
        let keys: Vec<&String> = mapped.keys().collect();
        assert_eq!(keys, ["about", "name"]);
    }

    #[test]
    fn test_conflicting_spellings_rejected() {
        let result = ItemMapping::builder()
            .field("title", |item| item.get("title").cloned())
            .field("name", |item| item.get("name").cloned())
            .build();

        match result {
            Err(OpdsError::MappingConflict(msg)) => {
                assert!(msg.contains("name"));
                assert!(msg.contains("title"));
            },
            other => panic!("expected MappingConflict, got {other:?}"),
        }
    }

    #[test]
    fn test_repeated_spelling_rejected() {
        let result = ItemMapping::builder()
            .field("title", |item| item.get("title").cloned())
            .field("title", |item| item.get("full_title").cloned())
            .build();

        assert!(matches!(result, Err(OpdsError::MappingConflict(_))));
    }

    #[test]
    fn test_custom_fields_pass_through() {
        let mapping = ItemMapping::builder()
            .field("page_count", |item| item.get("pages").cloned())
            .build()
            .unwrap();

        assert!(mapping.contains("page_count"));
        assert_eq!(
            mapping.resolve("page_count", &json!({"pages": 412})),
            Some(json!(412))
        );
    }

    #[test]
    fn test_empty_mapping() {
        let mapping = ItemMapping::builder().build().unwrap();
        assert!(mapping.is_empty());
        assert_eq!(mapping.len(), 0);
        assert_eq!(mapping.resolve("name", &json!({})), None);
    }
}
