//! JSON-LD serialization and deserialization of catalogs.
//!
//! OPDS 2.0 documents are JSON-LD objects with a fixed top-level
//! `"@context"`. Serialization always emits the canonical schema.org field
//! spellings, regardless of which spelling a mapping was configured with,
//! and omits every absent optional field. Both directions validate the
//! catalog's structural invariants so a malformed document is neither
//! produced nor accepted.

use serde_json::Value;

use crate::error::Result;
use crate::model::Catalog;

/// Convert a catalog to a JSON-LD value.
///
/// # Examples
///
/// ```
/// use opds2::{catalog::create_catalog, json};
///
/// # fn main() -> opds2::Result<()> {
/// let catalog = create_catalog("My Library", "https://example.com/catalog")?;
/// let value = json::catalog_to_json(&catalog)?;
/// assert_eq!(
///     value["@context"],
///     "https://readium.org/webpub-manifest/context.jsonld"
/// );
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns an error if the catalog violates a structural invariant or
/// cannot be serialized.
pub fn catalog_to_json(catalog: &Catalog) -> Result<Value> {
    catalog.validate()?;
    Ok(serde_json::to_value(catalog)?)
}

/// Convert a catalog to a JSON-LD string.
///
/// # Errors
///
/// Returns an error if the catalog violates a structural invariant or
/// cannot be serialized.
pub fn catalog_to_json_string(catalog: &Catalog) -> Result<String> {
    catalog.validate()?;
    Ok(serde_json::to_string(catalog)?)
}

/// Parse a catalog from a JSON-LD value.
///
/// # Errors
///
/// Returns an error if the JSON does not describe a structurally valid
/// catalog (wrong `@context`, missing metadata, no single `self` link).
pub fn json_to_catalog(json: &Value) -> Result<Catalog> {
    let catalog: Catalog = serde_json::from_value(json.clone())?;
    catalog.validate()?;
    Ok(catalog)
}

/// Parse a catalog from a JSON-LD string.
///
/// # Errors
///
/// Returns an error if the input is not valid JSON or does not describe a
/// structurally valid catalog.
pub fn catalog_from_json_str(json: &str) -> Result<Catalog> {
    let catalog: Catalog = serde_json::from_str(json)?;
    catalog.validate()?;
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::create_catalog;
    use crate::error::OpdsError;
    use serde_json::json;

    #[test]
    fn test_catalog_to_json_carries_context() {
        let catalog = create_catalog("My Library", "https://example.com/catalog").unwrap();
        let value = catalog_to_json(&catalog).unwrap();

        assert_eq!(
            value["@context"],
            "https://readium.org/webpub-manifest/context.jsonld"
        );
        assert_eq!(value["metadata"]["title"], "My Library");
        assert_eq!(value["links"][0]["rel"], "self");
        assert_eq!(value["links"][0]["type"], "application/opds+json");
    }

    #[test]
    fn test_absent_fields_omitted() {
        let catalog = create_catalog("Sparse", "https://example.com/catalog").unwrap();
        let value = catalog_to_json(&catalog).unwrap();
        let metadata = value["metadata"].as_object().unwrap();

        assert_eq!(metadata.len(), 1);
        assert!(!metadata.contains_key("numberOfItems"));
        assert!(value.get("navigation").is_none());
    }

    #[test]
    fn test_round_trip() {
        let catalog = create_catalog("Round Trip", "https://example.com/catalog").unwrap();
        let text = catalog_to_json_string(&catalog).unwrap();
        let parsed = catalog_from_json_str(&text).unwrap();
        assert_eq!(parsed, catalog);
    }

    #[test]
    fn test_invalid_catalog_rejected_on_serialize() {
        let mut catalog = create_catalog("Feed", "https://example.com/catalog").unwrap();
        catalog.links.clear();
        assert!(matches!(
            catalog_to_json(&catalog),
            Err(OpdsError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn test_invalid_catalog_rejected_on_parse() {
        // No self link
        let json = json!({
            "@context": "https://readium.org/webpub-manifest/context.jsonld",
            "metadata": {"title": "Feed"},
            "links": []
        });
        assert!(matches!(
            json_to_catalog(&json),
            Err(OpdsError::InvalidCatalog(_))
        ));

        // Wrong context
        let json = json!({
            "@context": "https://example.com/other.jsonld",
            "metadata": {"title": "Feed"},
            "links": [{"href": "https://example.com/feed", "rel": "self"}]
        });
        assert!(matches!(
            json_to_catalog(&json),
            Err(OpdsError::InvalidCatalog(_))
        ));
    }
}
