//! OPDS 2.0 document model.
//!
//! This module provides the typed entities that make up an OPDS 2.0 feed:
//! - [`Catalog`] — Top-level feed with metadata, links, publications, navigation
//! - [`Publication`] — A digital work with metadata, links, and images
//! - [`Metadata`] — Descriptive information about a catalog or publication
//! - [`Link`] — A typed, rel-qualified reference to a resource
//! - [`Contributor`] — Author, publisher, translator, etc.
//! - [`Navigation`] — Structural browsing entry
//!
//! All entities are immutable value objects: constructed once, validated at
//! construction, then handed to the serializer. Optional fields that are
//! absent never appear in JSON output. No entity holds a back-reference to
//! its container, so the document graph is cycle-free.
//!
//! # Examples
//!
//! Build a publication with the builder API:
//!
//! ```
//! use opds2::{Link, Metadata, Publication};
//!
//! # fn main() -> opds2::Result<()> {
//! let publication = Publication::builder(Metadata::new("The Great Gatsby")?)
//!     .link(
//!         Link::builder("https://example.com/gatsby.epub")
//!             .media_type("application/epub+zip")
//!             .rel("http://opds-spec.org/acquisition")
//!             .build()?,
//!     )
//!     .build();
//! assert_eq!(publication.metadata.title, "The Great Gatsby");
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{OpdsError, Result};

/// The fixed JSON-LD context URI carried by every catalog.
pub const WEBPUB_MANIFEST_CONTEXT: &str = "https://readium.org/webpub-manifest/context.jsonld";

/// Media type for OPDS 2.0 catalog documents.
pub const OPDS_MEDIA_TYPE: &str = "application/opds+json";

/// Media type for EPUB acquisition resources.
pub const EPUB_MEDIA_TYPE: &str = "application/epub+zip";

/// Link relation for acquisition links.
pub const ACQUISITION_REL: &str = "http://opds-spec.org/acquisition";

/// Link relation for cover images.
pub const IMAGE_REL: &str = "http://opds-spec.org/image";

/// Link relation for thumbnail images.
pub const THUMBNAIL_REL: &str = "http://opds-spec.org/image/thumbnail";

/// Link relation value: a single relation or a list of relations.
///
/// OPDS 2.0 allows `rel` to be either a string or an array of strings.
/// Relation values are free-form; the well-known ones (`self`, `search`,
/// `next`, `previous`, `first`, `last`) carry semantic meaning to the
/// pagination engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LinkRel {
    /// A single relation, serialized as a bare string.
    Single(String),
    /// Multiple relations, serialized as an array.
    Multiple(Vec<String>),
}

impl LinkRel {
    /// Check whether this relation value contains the given relation.
    #[must_use]
    pub fn contains(&self, rel: &str) -> bool {
        match self {
            LinkRel::Single(r) => r == rel,
            LinkRel::Multiple(rels) => rels.iter().any(|r| r == rel),
        }
    }

    /// All relation values as a slice.
    #[must_use]
    pub fn values(&self) -> &[String] {
        match self {
            LinkRel::Single(r) => std::slice::from_ref(r),
            LinkRel::Multiple(rels) => rels,
        }
    }
}

impl From<&str> for LinkRel {
    fn from(rel: &str) -> Self {
        LinkRel::Single(rel.to_string())
    }
}

impl From<String> for LinkRel {
    fn from(rel: String) -> Self {
        LinkRel::Single(rel)
    }
}

impl From<Vec<String>> for LinkRel {
    fn from(rels: Vec<String>) -> Self {
        LinkRel::Multiple(rels)
    }
}

/// A link to a resource associated with a publication or catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// URI or URI template of the linked resource
    pub href: String,
    /// MIME type of the linked resource
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    /// Relation between the resource and its parent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rel: Option<LinkRel>,
    /// Title of the link
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Indicates the href is a URI template
    #[serde(skip_serializing_if = "Option::is_none")]
    pub templated: Option<bool>,
    /// Additional properties, preserved in insertion order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, Value>>,
}

impl Link {
    /// Create a link with only an `href`.
    ///
    /// # Errors
    ///
    /// Returns [`OpdsError::InvalidLink`] if the href is empty or contains
    /// whitespace.
    pub fn new(href: impl Into<String>) -> Result<Self> {
        let href = href.into();
        validate_href(&href)?;
        Ok(Link {
            href,
            media_type: None,
            rel: None,
            title: None,
            templated: None,
            properties: None,
        })
    }

    /// Create a builder for fluently constructing links.
    ///
    /// # Examples
    ///
    /// ```
    /// use opds2::Link;
    ///
    /// # fn main() -> opds2::Result<()> {
    /// let link = Link::builder("https://example.com/catalog")
    ///     .rel("self")
    ///     .media_type("application/opds+json")
    ///     .build()?;
    /// assert!(link.has_rel("self"));
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn builder(href: impl Into<String>) -> LinkBuilder {
        LinkBuilder {
            href: href.into(),
            media_type: None,
            rel: None,
            title: None,
            templated: None,
            properties: None,
        }
    }

    /// Check whether this link carries the given relation.
    #[must_use]
    pub fn has_rel(&self, rel: &str) -> bool {
        self.rel.as_ref().is_some_and(|r| r.contains(rel))
    }
}

/// Builder for fluently constructing [`Link`] values.
#[derive(Debug)]
pub struct LinkBuilder {
    href: String,
    media_type: Option<String>,
    rel: Option<LinkRel>,
    title: Option<String>,
    templated: Option<bool>,
    properties: Option<IndexMap<String, Value>>,
}

impl LinkBuilder {
    /// Set the MIME type.
    #[must_use]
    pub fn media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    /// Set the relation(s).
    #[must_use]
    pub fn rel(mut self, rel: impl Into<LinkRel>) -> Self {
        self.rel = Some(rel.into());
        self
    }

    /// Set the link title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Mark the href as a URI template.
    #[must_use]
    pub fn templated(mut self, templated: bool) -> Self {
        self.templated = Some(templated);
        self
    }

    /// Attach an additional property.
    #[must_use]
    pub fn property(mut self, key: impl Into<String>, value: Value) -> Self {
        self.properties
            .get_or_insert_with(IndexMap::new)
            .insert(key.into(), value);
        self
    }

    /// Build the link, validating the href.
    ///
    /// # Errors
    ///
    /// Returns [`OpdsError::InvalidLink`] if the href is empty or contains
    /// whitespace.
    pub fn build(self) -> Result<Link> {
        validate_href(&self.href)?;
        Ok(Link {
            href: self.href,
            media_type: self.media_type,
            rel: self.rel,
            title: self.title,
            templated: self.templated,
            properties: self.properties,
        })
    }
}

// Hrefs may be relative paths or URI templates, so full URL parsing is
// deliberately not applied here.
fn validate_href(href: &str) -> Result<()> {
    if href.is_empty() {
        return Err(OpdsError::InvalidLink("href must not be empty".to_string()));
    }
    if href.chars().any(char::is_whitespace) {
        return Err(OpdsError::InvalidLink(format!(
            "href must not contain whitespace: {href:?}"
        )));
    }
    Ok(())
}

/// A contributor to a publication (author, publisher, translator, etc.).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contributor {
    /// Name of the contributor
    pub name: String,
    /// Unique identifier for the contributor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// String to use when sorting
    #[serde(rename = "sortAs", skip_serializing_if = "Option::is_none")]
    pub sort_as: Option<String>,
    /// Role of the contributor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Links associated with the contributor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<Link>>,
}

impl Contributor {
    /// Create a contributor with only a name.
    ///
    /// # Errors
    ///
    /// Returns [`OpdsError::InvalidMetadata`] if the name is empty.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(OpdsError::InvalidMetadata(
                "contributor name must not be empty".to_string(),
            ));
        }
        Ok(Contributor {
            name,
            identifier: None,
            sort_as: None,
            role: None,
            links: None,
        })
    }

    /// Create a contributor with the given role.
    ///
    /// # Errors
    ///
    /// Returns [`OpdsError::InvalidMetadata`] if the name is empty.
    pub fn with_role(name: impl Into<String>, role: impl Into<String>) -> Result<Self> {
        let mut contributor = Contributor::new(name)?;
        contributor.role = Some(role.into());
        Ok(contributor)
    }

    /// Create a contributor with the "author" role.
    ///
    /// # Errors
    ///
    /// Returns [`OpdsError::InvalidMetadata`] if the name is empty.
    pub fn author(name: impl Into<String>) -> Result<Self> {
        Contributor::with_role(name, "author")
    }
}

/// Metadata for a publication or catalog.
///
/// `title` is the only required field; everything else is optional and
/// omitted from JSON output when absent. For a paginated catalog,
/// `numberOfItems` holds the total match count, not the page size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Title of the resource (required, non-empty)
    pub title: String,
    /// Type of the resource (e.g. `http://schema.org/Book`)
    #[serde(rename = "@type", skip_serializing_if = "Option::is_none")]
    pub type_uri: Option<String>,
    /// Unique identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// Subtitle of the resource
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Last modification date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
    /// Publication date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<DateTime<Utc>>,
    /// Language codes; accepts a single string or a list on input,
    /// always serializes as a list
    #[serde(
        default,
        deserialize_with = "string_or_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub language: Option<Vec<String>>,
    /// Description of the resource
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Authors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Vec<Contributor>>,
    /// Translators
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translator: Option<Vec<Contributor>>,
    /// Editors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editor: Option<Vec<Contributor>>,
    /// Illustrators
    #[serde(skip_serializing_if = "Option::is_none")]
    pub illustrator: Option<Vec<Contributor>>,
    /// Publishers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<Vec<Contributor>>,
    /// Subject tags
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Vec<String>>,
    /// Total number of items in the collection this resource describes
    #[serde(rename = "numberOfItems", skip_serializing_if = "Option::is_none")]
    pub number_of_items: Option<usize>,
    /// Page size of a paginated collection
    #[serde(rename = "itemsPerPage", skip_serializing_if = "Option::is_none")]
    pub items_per_page: Option<usize>,
    /// Current page (1-based) of a paginated collection
    #[serde(rename = "currentPage", skip_serializing_if = "Option::is_none")]
    pub current_page: Option<usize>,
}

// Accepts `"en"` or `["en", "fr"]`.
fn string_or_list<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(Option::<OneOrMany>::deserialize(deserializer)?.map(|v| match v {
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(list) => list,
    }))
}

impl Metadata {
    /// Create metadata with only a title.
    ///
    /// # Errors
    ///
    /// Returns [`OpdsError::InvalidMetadata`] if the title is empty or
    /// whitespace-only.
    pub fn new(title: impl Into<String>) -> Result<Self> {
        let title = title.into();
        validate_title(&title)?;
        Ok(Metadata::bare(title))
    }

    fn bare(title: String) -> Metadata {
        Metadata {
            title,
            type_uri: None,
            identifier: None,
            subtitle: None,
            modified: None,
            published: None,
            language: None,
            description: None,
            author: None,
            translator: None,
            editor: None,
            illustrator: None,
            publisher: None,
            subject: None,
            number_of_items: None,
            items_per_page: None,
            current_page: None,
        }
    }

    /// Create a builder for fluently constructing metadata.
    ///
    /// # Examples
    ///
    /// ```
    /// use opds2::{Contributor, Metadata};
    ///
    /// # fn main() -> opds2::Result<()> {
    /// let metadata = Metadata::builder("Dune")
    ///     .author(vec![Contributor::author("Frank Herbert")?])
    ///     .language(vec!["en".to_string()])
    ///     .build()?;
    /// assert_eq!(metadata.title, "Dune");
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn builder(title: impl Into<String>) -> MetadataBuilder {
        MetadataBuilder {
            metadata: Metadata::bare(title.into()),
        }
    }
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(OpdsError::InvalidMetadata(
            "title must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Builder for fluently constructing [`Metadata`] values.
#[derive(Debug)]
pub struct MetadataBuilder {
    metadata: Metadata,
}

impl MetadataBuilder {
    /// Set the resource type URI.
    #[must_use]
    pub fn type_uri(mut self, type_uri: impl Into<String>) -> Self {
        self.metadata.type_uri = Some(type_uri.into());
        self
    }

    /// Set the identifier.
    #[must_use]
    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.metadata.identifier = Some(identifier.into());
        self
    }

    /// Set the subtitle.
    #[must_use]
    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.metadata.subtitle = Some(subtitle.into());
        self
    }

    /// Set the last modification date.
    #[must_use]
    pub fn modified(mut self, modified: DateTime<Utc>) -> Self {
        self.metadata.modified = Some(modified);
        self
    }

    /// Set the publication date.
    #[must_use]
    pub fn published(mut self, published: DateTime<Utc>) -> Self {
        self.metadata.published = Some(published);
        self
    }

    /// Set the language codes.
    #[must_use]
    pub fn language(mut self, language: Vec<String>) -> Self {
        self.metadata.language = Some(language);
        self
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.metadata.description = Some(description.into());
        self
    }

    /// Set the author list.
    #[must_use]
    pub fn author(mut self, author: Vec<Contributor>) -> Self {
        self.metadata.author = Some(author);
        self
    }

    /// Set the translator list.
    #[must_use]
    pub fn translator(mut self, translator: Vec<Contributor>) -> Self {
        self.metadata.translator = Some(translator);
        self
    }

    /// Set the editor list.
    #[must_use]
    pub fn editor(mut self, editor: Vec<Contributor>) -> Self {
        self.metadata.editor = Some(editor);
        self
    }

    /// Set the illustrator list.
    #[must_use]
    pub fn illustrator(mut self, illustrator: Vec<Contributor>) -> Self {
        self.metadata.illustrator = Some(illustrator);
        self
    }

    /// Set the publisher list.
    #[must_use]
    pub fn publisher(mut self, publisher: Vec<Contributor>) -> Self {
        self.metadata.publisher = Some(publisher);
        self
    }

    /// Set the subject tags.
    #[must_use]
    pub fn subject(mut self, subject: Vec<String>) -> Self {
        self.metadata.subject = Some(subject);
        self
    }

    /// Set the total item count.
    #[must_use]
    pub fn number_of_items(mut self, number_of_items: usize) -> Self {
        self.metadata.number_of_items = Some(number_of_items);
        self
    }

    /// Set the page size.
    #[must_use]
    pub fn items_per_page(mut self, items_per_page: usize) -> Self {
        self.metadata.items_per_page = Some(items_per_page);
        self
    }

    /// Set the current page (1-based).
    #[must_use]
    pub fn current_page(mut self, current_page: usize) -> Self {
        self.metadata.current_page = Some(current_page);
        self
    }

    /// Build the metadata, validating the title.
    ///
    /// # Errors
    ///
    /// Returns [`OpdsError::InvalidMetadata`] if the title is empty or
    /// whitespace-only.
    pub fn build(self) -> Result<Metadata> {
        validate_title(&self.metadata.title)?;
        Ok(self.metadata)
    }
}

/// A publication: a digital work with metadata, links, and optional images.
///
/// A usable publication is expected to carry at least one link (acquisition
/// or self), though this is not hard-enforced. Image links use the
/// `http://opds-spec.org/image` relation by convention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    /// Metadata about the publication
    pub metadata: Metadata,
    /// Links to resources (acquisition, alternate renditions, ...)
    #[serde(default)]
    pub links: Vec<Link>,
    /// Cover images and thumbnails
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<Link>>,
}

impl Publication {
    /// Create a publication with the given metadata and no links.
    #[must_use]
    pub fn new(metadata: Metadata) -> Self {
        Publication {
            metadata,
            links: Vec::new(),
            images: None,
        }
    }

    /// Create a builder for fluently constructing publications.
    #[must_use]
    pub fn builder(metadata: Metadata) -> PublicationBuilder {
        PublicationBuilder {
            publication: Publication::new(metadata),
        }
    }
}

/// Builder for fluently constructing [`Publication`] values.
#[derive(Debug)]
pub struct PublicationBuilder {
    publication: Publication,
}

impl PublicationBuilder {
    /// Add a link.
    #[must_use]
    pub fn link(mut self, link: Link) -> Self {
        self.publication.links.push(link);
        self
    }

    /// Add an image link.
    #[must_use]
    pub fn image(mut self, image: Link) -> Self {
        self.publication
            .images
            .get_or_insert_with(Vec::new)
            .push(image);
        self
    }

    /// Build the publication.
    #[must_use]
    pub fn build(self) -> Publication {
        self.publication
    }
}

/// A structural navigation entry for browsing a catalog hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Navigation {
    /// Title of the navigation item
    pub title: String,
    /// URI of the navigation target
    pub href: String,
    /// MIME type of the target
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    /// Relation type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rel: Option<String>,
}

impl Navigation {
    /// Create a navigation entry.
    ///
    /// # Errors
    ///
    /// Returns [`OpdsError::InvalidNavigation`] if the title is empty, or
    /// [`OpdsError::InvalidLink`] if the href is invalid.
    pub fn new(title: impl Into<String>, href: impl Into<String>) -> Result<Self> {
        let title = title.into();
        let href = href.into();
        if title.trim().is_empty() {
            return Err(OpdsError::InvalidNavigation(
                "navigation title must not be empty".to_string(),
            ));
        }
        validate_href(&href)?;
        Ok(Navigation {
            title,
            href,
            media_type: None,
            rel: None,
        })
    }

    /// Set the relation type.
    #[must_use]
    pub fn with_rel(mut self, rel: impl Into<String>) -> Self {
        self.rel = Some(rel.into());
        self
    }

    /// Set the MIME type.
    #[must_use]
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }
}

fn default_context() -> String {
    WEBPUB_MANIFEST_CONTEXT.to_string()
}

/// An OPDS 2.0 catalog: a collection of publications with navigation.
///
/// The `@context` is always the fixed webpub-manifest context URI, and a
/// valid catalog carries exactly one `self` link among its links
/// ([`Catalog::validate`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// JSON-LD context, always [`WEBPUB_MANIFEST_CONTEXT`]
    #[serde(rename = "@context", default = "default_context")]
    pub context: String,
    /// Metadata about the catalog
    pub metadata: Metadata,
    /// Links (self, search, pagination, ...)
    #[serde(default)]
    pub links: Vec<Link>,
    /// Publications in this catalog
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publications: Option<Vec<Publication>>,
    /// Navigation entries for browsing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation: Option<Vec<Navigation>>,
    /// Grouped sub-collections
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<Catalog>>,
    /// Facets for filtering the catalog
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facets: Option<Vec<Value>>,
}

impl Catalog {
    /// Create a catalog with the given metadata, no links, and an empty
    /// publication list.
    ///
    /// The result does not yet satisfy the one-`self`-link invariant; use
    /// the [`catalog`](crate::catalog) assembler functions to build a valid
    /// feed, or add a `self` link before calling [`Catalog::validate`].
    #[must_use]
    pub fn new(metadata: Metadata) -> Self {
        Catalog {
            context: default_context(),
            metadata,
            links: Vec::new(),
            publications: Some(Vec::new()),
            navigation: None,
            groups: None,
            facets: None,
        }
    }

    /// The catalog's `self` link, if present.
    #[must_use]
    pub fn self_link(&self) -> Option<&Link> {
        self.links.iter().find(|link| link.has_rel("self"))
    }

    /// Validate the catalog's structural invariants.
    ///
    /// # Errors
    ///
    /// Returns [`OpdsError::InvalidCatalog`] if the `@context` is not the
    /// webpub-manifest context URI or the catalog does not carry exactly
    /// one `self` link.
    pub fn validate(&self) -> Result<()> {
        if self.context != WEBPUB_MANIFEST_CONTEXT {
            return Err(OpdsError::InvalidCatalog(format!(
                "unexpected @context: {}",
                self.context
            )));
        }
        let self_links = self.links.iter().filter(|link| link.has_rel("self")).count();
        if self_links != 1 {
            return Err(OpdsError::InvalidCatalog(format!(
                "catalog must carry exactly one self link, found {self_links}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_requires_href() {
        assert!(Link::new("").is_err());
        assert!(Link::new("https://example.com/catalog").is_ok());
    }

    #[test]
    fn test_link_rejects_whitespace_href() {
        assert!(Link::new("https://example.com/a b").is_err());
    }

    #[test]
    fn test_link_builder() {
        let link = Link::builder("https://example.com/book.epub")
            .rel(ACQUISITION_REL)
            .media_type(EPUB_MEDIA_TYPE)
            .title("Download")
            .build()
            .expect("Failed to build link");

        assert!(link.has_rel(ACQUISITION_REL));
        assert_eq!(link.media_type.as_deref(), Some(EPUB_MEDIA_TYPE));
        assert_eq!(link.title.as_deref(), Some("Download"));
    }

    #[test]
    fn test_link_rel_single_and_multiple() {
        let single = LinkRel::from("self");
        assert!(single.contains("self"));
        assert!(!single.contains("search"));
        assert_eq!(single.values(), ["self".to_string()]);

        let multiple = LinkRel::from(vec!["self".to_string(), "first".to_string()]);
        assert!(multiple.contains("self"));
        assert!(multiple.contains("first"));
        assert!(!multiple.contains("last"));
    }

    #[test]
    fn test_link_rel_serialization() {
        let single = Link::builder("https://example.com/")
            .rel("self")
            .build()
            .unwrap();
        let json = serde_json::to_value(&single).unwrap();
        assert_eq!(json["rel"], "self");

        let multiple = Link::builder("https://example.com/")
            .rel(vec!["self".to_string(), "first".to_string()])
            .build()
            .unwrap();
        let json = serde_json::to_value(&multiple).unwrap();
        assert_eq!(json["rel"][0], "self");
        assert_eq!(json["rel"][1], "first");
    }

    #[test]
    fn test_link_omits_absent_fields() {
        let link = Link::new("https://example.com/").unwrap();
        let json = serde_json::to_value(&link).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert!(obj.contains_key("href"));
    }

    #[test]
    fn test_contributor_requires_name() {
        assert!(Contributor::new("").is_err());
        assert!(Contributor::new("   ").is_err());
    }

    #[test]
    fn test_contributor_author_role() {
        let author = Contributor::author("Frank Herbert").unwrap();
        assert_eq!(author.name, "Frank Herbert");
        assert_eq!(author.role.as_deref(), Some("author"));
    }

    #[test]
    fn test_contributor_sort_as_rename() {
        let mut contributor = Contributor::new("Herbert, Frank").unwrap();
        contributor.sort_as = Some("Herbert".to_string());
        let json = serde_json::to_value(&contributor).unwrap();
        assert_eq!(json["sortAs"], "Herbert");
    }

    #[test]
    fn test_metadata_requires_title() {
        assert!(Metadata::new("").is_err());
        assert!(Metadata::new("  \t ").is_err());
        assert!(Metadata::builder("").build().is_err());
    }

    #[test]
    fn test_metadata_builder() {
        let metadata = Metadata::builder("Dune")
            .identifier("urn:isbn:9780441013593")
            .language(vec!["en".to_string()])
            .number_of_items(42)
            .build()
            .expect("Failed to build metadata");

        assert_eq!(metadata.title, "Dune");
        assert_eq!(metadata.identifier.as_deref(), Some("urn:isbn:9780441013593"));
        assert_eq!(metadata.number_of_items, Some(42));
    }

    #[test]
    fn test_metadata_serializes_renamed_fields() {
        let metadata = Metadata::builder("Feed")
            .number_of_items(10)
            .items_per_page(5)
            .current_page(2)
            .build()
            .unwrap();
        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json["numberOfItems"], 10);
        assert_eq!(json["itemsPerPage"], 5);
        assert_eq!(json["currentPage"], 2);
    }

    #[test]
    fn test_metadata_language_accepts_string_or_list() {
        let from_string: Metadata =
            serde_json::from_value(serde_json::json!({"title": "T", "language": "en"})).unwrap();
        assert_eq!(from_string.language, Some(vec!["en".to_string()]));

        let from_list: Metadata =
            serde_json::from_value(serde_json::json!({"title": "T", "language": ["en", "fr"]}))
                .unwrap();
        assert_eq!(
            from_list.language,
            Some(vec!["en".to_string(), "fr".to_string()])
        );
    }

    #[test]
    fn test_metadata_omits_absent_fields() {
        let metadata = Metadata::new("Bare").unwrap();
        let json = serde_json::to_value(&metadata).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(obj["title"], "Bare");
    }

    #[test]
    fn test_publication_builder() {
        let publication = Publication::builder(Metadata::new("Book").unwrap())
            .link(
                Link::builder("https://example.com/book.epub")
                    .rel(ACQUISITION_REL)
                    .build()
                    .unwrap(),
            )
            .image(
                Link::builder("https://example.com/cover.jpg")
                    .rel(IMAGE_REL)
                    .build()
                    .unwrap(),
            )
            .build();

        assert_eq!(publication.links.len(), 1);
        assert_eq!(publication.images.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_navigation_validation() {
        assert!(Navigation::new("", "/new").is_err());
        assert!(Navigation::new("New Titles", "").is_err());

        let nav = Navigation::new("New Titles", "/new")
            .unwrap()
            .with_rel("current")
            .with_media_type(OPDS_MEDIA_TYPE);
        assert_eq!(nav.rel.as_deref(), Some("current"));
    }

    #[test]
    fn test_catalog_context_constant() {
        let catalog = Catalog::new(Metadata::new("My Library").unwrap());
        assert_eq!(catalog.context, WEBPUB_MANIFEST_CONTEXT);

        let json = serde_json::to_value(&catalog).unwrap();
        assert_eq!(
            json["@context"],
            "https://readium.org/webpub-manifest/context.jsonld"
        );
    }

    #[test]
    fn test_catalog_validate_requires_one_self_link() {
        let mut catalog = Catalog::new(Metadata::new("My Library").unwrap());
        assert!(catalog.validate().is_err());

        catalog.links.push(
            Link::builder("https://example.com/catalog")
                .rel("self")
                .media_type(OPDS_MEDIA_TYPE)
                .build()
                .unwrap(),
        );
        assert!(catalog.validate().is_ok());

        catalog.links.push(
            Link::builder("https://example.com/other")
                .rel("self")
                .build()
                .unwrap(),
        );
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_catalog_round_trip() {
        let mut catalog = Catalog::new(Metadata::new("Round Trip").unwrap());
        catalog.links.push(
            Link::builder("https://example.com/catalog")
                .rel("self")
                .media_type(OPDS_MEDIA_TYPE)
                .build()
                .unwrap(),
        );

        let json = serde_json::to_string(&catalog).unwrap();
        let parsed: Catalog = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, catalog);
    }
}
