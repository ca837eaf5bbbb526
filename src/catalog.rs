//! Catalog assembly: building complete OPDS 2.0 feeds.
//!
//! This module orchestrates the rest of the crate. [`create_catalog`] and
//! [`CatalogBuilder`] build navigation/root feeds with a mandatory `self`
//! link; [`create_search_catalog`] runs a [`DataProvider`] search, projects
//! the raw records into publications, and attaches pagination links;
//! [`add_pagination`] retrofits pagination onto an existing catalog as a
//! pure transformation.
//!
//! # Examples
//!
//! ```
//! use opds2::catalog::CatalogBuilder;
//!
//! # fn main() -> opds2::Result<()> {
//! let catalog = CatalogBuilder::new("My Library", "https://example.com/opds/catalog")
//!     .search_link("https://example.com/opds/search?q={searchTerms}")
//!     .identifier("urn:uuid:library-root")
//!     .build()?;
//!
//! assert!(catalog.self_link().is_some());
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde_json::Value;

use crate::error::Result;
use crate::model::{
    Catalog, Link, Metadata, Navigation, Publication, OPDS_MEDIA_TYPE, WEBPUB_MANIFEST_CONTEXT,
};
use crate::pagination::{Paginator, PAGINATION_RELS};
use crate::projector;
use crate::provider::DataProvider;

/// Builder for assembling a catalog with a mandatory `self` link.
#[derive(Debug)]
pub struct CatalogBuilder {
    title: String,
    self_link: String,
    search_link: Option<String>,
    identifier: Option<String>,
    modified: Option<DateTime<Utc>>,
    publications: Option<Vec<Publication>>,
    navigation: Option<Vec<Navigation>>,
    groups: Option<Vec<Catalog>>,
    facets: Option<Vec<Value>>,
}

impl CatalogBuilder {
    /// Start a catalog with its title and `self` link href.
    #[must_use]
    pub fn new(title: impl Into<String>, self_link: impl Into<String>) -> Self {
        CatalogBuilder {
            title: title.into(),
            self_link: self_link.into(),
            search_link: None,
            identifier: None,
            modified: None,
            publications: None,
            navigation: None,
            groups: None,
            facets: None,
        }
    }

    /// Add a search link. `templated` is set automatically when the href
    /// contains a template expression such as `{searchTerms}`.
    #[must_use]
    pub fn search_link(mut self, href: impl Into<String>) -> Self {
        self.search_link = Some(href.into());
        self
    }

    /// Set the catalog identifier.
    #[must_use]
    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Set the last modification date.
    #[must_use]
    pub fn modified(mut self, modified: DateTime<Utc>) -> Self {
        self.modified = Some(modified);
        self
    }

    /// Set the publication list.
    #[must_use]
    pub fn publications(mut self, publications: Vec<Publication>) -> Self {
        self.publications = Some(publications);
        self
    }

    /// Set the navigation entries.
    #[must_use]
    pub fn navigation(mut self, navigation: Vec<Navigation>) -> Self {
        self.navigation = Some(navigation);
        self
    }

    /// Set grouped sub-collections.
    #[must_use]
    pub fn groups(mut self, groups: Vec<Catalog>) -> Self {
        self.groups = Some(groups);
        self
    }

    /// Set facets.
    #[must_use]
    pub fn facets(mut self, facets: Vec<Value>) -> Self {
        self.facets = Some(facets);
        self
    }

    /// Build and validate the catalog.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the title is empty, a link href is
    /// invalid, or the assembled catalog violates a structural invariant.
    pub fn build(self) -> Result<Catalog> {
        let mut metadata = Metadata::builder(self.title);
        if let Some(identifier) = self.identifier {
            metadata = metadata.identifier(identifier);
        }
        if let Some(modified) = self.modified {
            metadata = metadata.modified(modified);
        }

        let mut links = vec![Link::builder(self.self_link)
            .rel("self")
            .media_type(OPDS_MEDIA_TYPE)
            .build()?];
        if let Some(href) = self.search_link {
            let templated = href.contains('{');
            let mut search = Link::builder(href).rel("search").media_type(OPDS_MEDIA_TYPE);
            if templated {
                search = search.templated(true);
            }
            links.push(search.build()?);
        }

        let catalog = Catalog {
            context: WEBPUB_MANIFEST_CONTEXT.to_string(),
            metadata: metadata.build()?,
            links,
            publications: Some(self.publications.unwrap_or_default()),
            navigation: self.navigation,
            groups: self.groups,
            facets: self.facets,
        };
        catalog.validate()?;
        Ok(catalog)
    }
}

/// Create a minimal valid catalog with a title and a `self` link.
///
/// # Errors
///
/// Returns a validation error if the title is empty or the href is invalid.
pub fn create_catalog(title: &str, self_link: &str) -> Result<Catalog> {
    CatalogBuilder::new(title, self_link).build()
}

/// Run a provider search and assemble the results into a paginated catalog.
///
/// The provider's raw records are projected through its item mapping;
/// records without a usable title are skipped. The catalog is titled
/// `Search results for "query"` (or `No results found for "query"` when
/// nothing matched), carries `numberOfItems` equal to the total match
/// count, and gets the full set of pagination links computed against
/// `self_link` (any query string on it is replaced by the synthesized
/// parameters, with `query` preserved).
///
/// # Errors
///
/// Returns [`OpdsError::InvalidPagination`](crate::OpdsError::InvalidPagination)
/// if `limit` is zero, or any error from the provider's
/// [`search`](DataProvider::search), propagated unchanged.
pub fn create_search_catalog(
    provider: &dyn DataProvider,
    query: &str,
    limit: usize,
    offset: usize,
    self_link: &str,
) -> Result<Catalog> {
    // Reject a degenerate page size before the provider round-trip
    Paginator::new(limit, offset, 0)?;

    let result = provider.search(query, limit, offset)?;
    let mapping = provider.get_item_mapping();
    let projection = projector::project_all(&result.items, &mapping);
    let paginator = Paginator::new(limit, offset, result.num_found)?;

    let title = if result.num_found == 0 {
        format!("No results found for \"{query}\"")
    } else {
        format!("Search results for \"{query}\"")
    };

    let metadata = Metadata::builder(title)
        .number_of_items(paginator.number_of_items())
        .items_per_page(limit)
        .current_page(paginator.page())
        .modified(Utc::now())
        .build()?;

    let base_url = self_link.split('?').next().unwrap_or(self_link);
    let mut params = IndexMap::new();
    if !query.is_empty() {
        params.insert("query".to_string(), query.to_string());
    }

    let catalog = Catalog {
        context: WEBPUB_MANIFEST_CONTEXT.to_string(),
        metadata,
        links: paginator.links(base_url, &params)?,
        publications: Some(projection.publications),
        navigation: None,
        groups: None,
        facets: None,
    };
    catalog.validate()?;
    Ok(catalog)
}

/// Return a new catalog with freshly synthesized pagination links.
///
/// A pure transformation: the input catalog is untouched. Any link carrying
/// one of the pagination relations (`self`, `first`, `last`, `next`,
/// `previous`) is replaced by the newly computed set, so applying this
/// twice yields the same links as a single call with the latest arguments.
/// `Metadata.numberOfItems` is updated to `total`.
///
/// # Errors
///
/// Returns [`OpdsError::InvalidPagination`](crate::OpdsError::InvalidPagination)
/// if `limit` is zero, or
/// [`OpdsError::InvalidLink`](crate::OpdsError::InvalidLink) if `base_url`
/// cannot form a valid href.
pub fn add_pagination(
    catalog: &Catalog,
    total: usize,
    limit: usize,
    offset: usize,
    base_url: &str,
    params: &IndexMap<String, String>,
) -> Result<Catalog> {
    let paginator = Paginator::new(limit, offset, total)?;

    let mut updated = catalog.clone();
    updated
        .links
        .retain(|link| !PAGINATION_RELS.iter().any(|rel| link.has_rel(rel)));
    updated.links.extend(paginator.links(base_url, params)?);
    updated.metadata.number_of_items = Some(total);
    Ok(updated)
}
