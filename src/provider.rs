//! Data provider interface.
//!
//! A data provider owns the search backend: it executes queries and returns
//! raw records plus a total match count as a [`SearchResult`], and supplies
//! the [`ItemMapping`] that translates its records into OPDS fields. The
//! core never performs I/O itself; provider failures propagate unchanged
//! through [`OpdsError::Provider`](crate::OpdsError::Provider).
//!
//! Providers whose records are strongly typed (rather than raw JSON) can
//! implement [`ProviderRecord`] instead and convert each record directly
//! with [`ProviderRecord::to_publication`].

use serde_json::Value;

use crate::error::{OpdsError, Result};
use crate::mapping::ItemMapping;
use crate::model::{Link, Metadata, Publication};

/// A page of raw search results returned by a [`DataProvider`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Raw item records from the data source
    pub items: Vec<Value>,
    /// Current page number (1-based)
    pub page: usize,
    /// Page size the search was executed with
    pub rows: usize,
    /// Total number of items matching the search
    pub num_found: usize,
}

impl SearchResult {
    /// Create a search result page.
    ///
    /// # Errors
    ///
    /// Returns [`OpdsError::InvalidSearchResult`] if `rows` is zero, `page`
    /// is zero (pages are 1-based), or more items are carried than the page
    /// size allows.
    pub fn new(items: Vec<Value>, page: usize, rows: usize, num_found: usize) -> Result<Self> {
        if rows == 0 {
            return Err(OpdsError::InvalidSearchResult(
                "rows must be greater than zero".to_string(),
            ));
        }
        if page == 0 {
            return Err(OpdsError::InvalidSearchResult(
                "page numbers are 1-based".to_string(),
            ));
        }
        if items.len() > rows {
            return Err(OpdsError::InvalidSearchResult(format!(
                "{} items exceed the page size of {rows}",
                items.len()
            )));
        }
        Ok(SearchResult {
            items,
            page,
            rows,
            num_found,
        })
    }

    /// An empty first page with the given page size.
    ///
    /// # Errors
    ///
    /// Returns [`OpdsError::InvalidSearchResult`] if `rows` is zero.
    pub fn empty(rows: usize) -> Result<Self> {
        SearchResult::new(Vec::new(), 1, rows, 0)
    }
}

/// A searchable source of catalog records.
///
/// Implementations own the actual backend (a search index, a database, a
/// remote API) together with the knowledge of how its records map onto OPDS
/// fields. The mapping engine treats both as opaque.
pub trait DataProvider {
    /// Execute a search, returning one page of raw records and the total
    /// match count.
    ///
    /// # Errors
    ///
    /// Backend failures should be surfaced as
    /// [`OpdsError::Provider`](crate::OpdsError::Provider); they propagate
    /// unchanged to the caller of
    /// [`create_search_catalog`](crate::catalog::create_search_catalog).
    fn search(&self, query: &str, limit: usize, offset: usize) -> Result<SearchResult>;

    /// The mapping from this provider's raw records to OPDS fields.
    fn get_item_mapping(&self) -> ItemMapping;
}

/// A strongly typed provider record that can convert itself into a
/// publication.
pub trait ProviderRecord {
    /// The record's descriptive metadata.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the record cannot produce valid
    /// metadata (e.g. it has no title).
    fn metadata(&self) -> Result<Metadata>;

    /// Links associated with the record (acquisition, alternates, ...).
    fn links(&self) -> Vec<Link>;

    /// Cover images and thumbnails, if any.
    fn images(&self) -> Option<Vec<Link>>;

    /// Convert the record into a publication.
    ///
    /// # Errors
    ///
    /// Propagates the error from [`ProviderRecord::metadata`].
    fn to_publication(&self) -> Result<Publication> {
        Ok(Publication {
            metadata: self.metadata()?,
            links: self.links(),
            images: self.images(),
        })
    }
}
