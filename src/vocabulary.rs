//! The field vocabulary: legacy OPDS names and their schema.org equivalents.
//!
//! Item mappings may be configured with either naming convention. The short
//! legacy names (`title`, `cover_url`, ...) date from earlier feed tooling;
//! the canonical names are the schema.org spellings that OPDS 2.0 output
//! always uses (`name`, `image`, ...). This module holds the fixed alias
//! table and the [`canonicalize`] lookup through which every configured
//! field name is normalized at mapping construction time.
//!
//! All tables are read-only process-wide state initialized on first use,
//! safe for concurrent reads without synchronization.

use lazy_static::lazy_static;
use std::collections::HashMap;

lazy_static! {
    /// Legacy OPDS item field names accepted when configuring an
    /// [`ItemMapping`](crate::ItemMapping), with a description of each.
    pub static ref RESERVED_FIELDS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("title", "Title of the publication");
        m.insert("identifier", "Unique identifier (URI or URL)");
        m.insert("description", "Description or summary");
        m.insert("language", "Language code(s) as a list");
        m.insert("author", "Author name(s) as a list");
        m.insert("publisher", "Publisher name(s) as a list");
        m.insert("published", "Publication date");
        m.insert("modified", "Last modification date");
        m.insert("cover_url", "URL to cover image");
        m.insert("thumbnail_url", "URL to thumbnail image");
        m.insert("acquisition_link", "URL to acquire/download the resource");
        m.insert("acquisition_type", "MIME type of the acquisition resource");
        m.insert("subject", "Subject tags as a list");
        m
    };

    /// Canonical schema.org field names used in OPDS 2.0 output, with a
    /// description of each.
    pub static ref SCHEMA_ORG_FIELDS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("name", "Title of the publication (schema.org name)");
        m.insert("identifier", "Unique identifier (schema.org identifier)");
        m.insert("description", "Description or summary (schema.org description)");
        m.insert("inLanguage", "Language code(s) as a list (schema.org inLanguage)");
        m.insert("author", "Author name(s) as a list (schema.org author)");
        m.insert("publisher", "Publisher name(s) as a list (schema.org publisher)");
        m.insert("datePublished", "Publication date (schema.org datePublished)");
        m.insert("dateModified", "Last modification date (schema.org dateModified)");
        m.insert("image", "URL to cover image (schema.org image)");
        m.insert("thumbnailUrl", "URL to thumbnail image (schema.org thumbnailUrl)");
        m.insert("url", "URL to acquire/download the resource (schema.org url)");
        m.insert("encoding", "Media object for the resource (schema.org encoding)");
        m.insert(
            "encodingFormat",
            "MIME type of the acquisition resource (schema.org encodingFormat)",
        );
        m.insert("about", "Subject tags as a list (schema.org about)");
        m.insert("keywords", "Keyword tags as a list (schema.org keywords)");
        m.insert("genre", "Genre of the publication (schema.org genre)");
        m
    };

    /// Legacy name -> canonical schema.org name.
    static ref LEGACY_TO_CANONICAL: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("title", "name");
        m.insert("identifier", "identifier");
        m.insert("description", "description");
        m.insert("language", "inLanguage");
        m.insert("author", "author");
        m.insert("publisher", "publisher");
        m.insert("published", "datePublished");
        m.insert("modified", "dateModified");
        m.insert("cover_url", "image");
        m.insert("thumbnail_url", "thumbnailUrl");
        m.insert("acquisition_link", "url");
        m.insert("acquisition_type", "encodingFormat");
        m.insert("subject", "about");
        m
    };

    /// Canonical schema.org name -> legacy name (reverse direction).
    static ref CANONICAL_TO_LEGACY: HashMap<&'static str, &'static str> = {
        LEGACY_TO_CANONICAL.iter().map(|(k, v)| (*v, *k)).collect()
    };
}

/// Return the canonical schema.org name for a field.
///
/// Legacy aliases are translated (`title` -> `name`, `cover_url` -> `image`);
/// names that are already canonical or unknown pass through unchanged, which
/// keeps custom provider fields forward-compatible. This is a pure, total
/// function with no failure mode.
///
/// # Examples
///
/// ```
/// use opds2::vocabulary::canonicalize;
///
/// assert_eq!(canonicalize("title"), "name");
/// assert_eq!(canonicalize("name"), "name");
/// assert_eq!(canonicalize("my_custom_field"), "my_custom_field");
/// ```
#[must_use]
pub fn canonicalize(name: &str) -> &str {
    LEGACY_TO_CANONICAL.get(name).copied().unwrap_or(name)
}

/// Return the legacy alias for a canonical schema.org field name, if one
/// exists.
///
/// This is the reverse direction of [`canonicalize`]. Canonical fields with
/// no legacy spelling (e.g. `keywords`) return `None`.
#[must_use]
pub fn legacy_alias(canonical: &str) -> Option<&'static str> {
    CANONICAL_TO_LEGACY.get(canonical).copied()
}

/// Check whether a name is a known field in either naming convention.
#[must_use]
pub fn is_known_field(name: &str) -> bool {
    RESERVED_FIELDS.contains_key(name) || SCHEMA_ORG_FIELDS.contains_key(name)
}
