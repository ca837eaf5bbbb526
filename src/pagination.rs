//! Pagination link synthesis for paginated catalogs.
//!
//! Given a total match count, a page size, and an offset, the [`Paginator`]
//! computes the set of navigational links (`self`, `first`, `previous`,
//! `next`, `last`) for a feed page. Link hrefs are synthesized from a base
//! URL and the caller's query parameters: every parameter unrelated to
//! pagination (e.g. `query`) is preserved verbatim and in order, and only
//! `offset`/`limit` are overridden.
//!
//! Boundary rules:
//! - `self` and, when any results exist, `first` and `last` are always
//!   present; an empty result set gets only `self`.
//! - `previous` exists iff `offset > 0`, stepping back one page and
//!   saturating at 0.
//! - `next` exists iff `offset + limit < total`.
//! - `last` points at the start of the final full or partial page,
//!   `((total - 1) / limit) * limit`.
//!
//! # Examples
//!
//! ```
//! use indexmap::IndexMap;
//! use opds2::Paginator;
//!
//! # fn main() -> opds2::Result<()> {
//! let paginator = Paginator::new(10, 10, 25)?;
//! let mut params = IndexMap::new();
//! params.insert("query".to_string(), "dune".to_string());
//!
//! let links = paginator.links("https://example.com/opds/search", &params)?;
//! let next = links.iter().find(|link| link.has_rel("next")).unwrap();
//! assert_eq!(
//!     next.href,
//!     "https://example.com/opds/search?query=dune&offset=20&limit=10"
//! );
//! # Ok(())
//! # }
//! ```

use indexmap::IndexMap;

use crate::error::{OpdsError, Result};
use crate::model::{Link, OPDS_MEDIA_TYPE};

/// The link relations owned by the pagination engine.
pub const PAGINATION_RELS: [&str; 5] = ["self", "first", "last", "next", "previous"];

/// The (limit, offset, total) triple driving pagination-link computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    limit: usize,
    offset: usize,
    numfound: usize,
}

impl Paginator {
    /// Create a paginator.
    ///
    /// # Errors
    ///
    /// Returns [`OpdsError::InvalidPagination`] if `limit` is zero — a zero
    /// page size would make every page offset degenerate.
    pub fn new(limit: usize, offset: usize, numfound: usize) -> Result<Self> {
        if limit == 0 {
            return Err(OpdsError::InvalidPagination(
                "limit must be greater than zero".to_string(),
            ));
        }
        Ok(Paginator {
            limit,
            offset,
            numfound,
        })
    }

    /// The page size.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// The 0-based offset of the current page.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The total number of matches, for `Metadata.numberOfItems`.
    #[must_use]
    pub fn number_of_items(&self) -> usize {
        self.numfound
    }

    /// The current page number (1-based).
    #[must_use]
    pub fn page(&self) -> usize {
        self.offset / self.limit + 1
    }

    /// The last page number (1-based); an empty result set has one page.
    #[must_use]
    pub fn last_page(&self) -> usize {
        if self.numfound == 0 {
            1
        } else {
            (self.numfound + self.limit - 1) / self.limit
        }
    }

    /// Whether results exist beyond the current page.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.offset + self.limit < self.numfound
    }

    /// Offset of the previous page, present iff the current offset is
    /// nonzero. Steps back one page, saturating at 0.
    #[must_use]
    pub fn previous_offset(&self) -> Option<usize> {
        (self.offset > 0).then(|| self.offset.saturating_sub(self.limit))
    }

    /// Offset of the next page, present iff more results exist.
    #[must_use]
    pub fn next_offset(&self) -> Option<usize> {
        self.has_more().then(|| self.offset + self.limit)
    }

    /// Offset of the final full or partial page, present iff any results
    /// exist. Always a page-aligned multiple of `limit`.
    #[must_use]
    pub fn last_offset(&self) -> Option<usize> {
        (self.numfound > 0).then(|| (self.numfound - 1) / self.limit * self.limit)
    }

    /// Synthesize the navigational links for the current page.
    ///
    /// `params` entries unrelated to pagination are preserved verbatim and
    /// in order in every generated href; `offset` and `limit` are overridden
    /// in place (or appended when absent).
    ///
    /// # Errors
    ///
    /// Returns [`OpdsError::InvalidLink`] if `base_url` cannot form a valid
    /// href (e.g. it contains whitespace).
    pub fn links(&self, base_url: &str, params: &IndexMap<String, String>) -> Result<Vec<Link>> {
        let mut links = Vec::with_capacity(5);

        links.push(self.page_link("self", base_url, params, self.offset)?);
        if self.numfound > 0 {
            links.push(self.page_link("first", base_url, params, 0)?);
        }
        if let Some(offset) = self.previous_offset() {
            links.push(self.page_link("previous", base_url, params, offset)?);
        }
        if let Some(offset) = self.next_offset() {
            links.push(self.page_link("next", base_url, params, offset)?);
        }
        if let Some(offset) = self.last_offset() {
            links.push(self.page_link("last", base_url, params, offset)?);
        }

        Ok(links)
    }

    fn page_link(
        &self,
        rel: &str,
        base_url: &str,
        params: &IndexMap<String, String>,
        offset: usize,
    ) -> Result<Link> {
        Link::builder(self.page_url(base_url, params, offset))
            .rel(rel)
            .media_type(OPDS_MEDIA_TYPE)
            .build()
    }

    fn page_url(&self, base_url: &str, params: &IndexMap<String, String>, offset: usize) -> String {
        let mut query: IndexMap<&str, String> = params
            .iter()
            .map(|(k, v)| (k.as_str(), v.clone()))
            .collect();
        // IndexMap keeps the original position when overriding an existing key
        query.insert("offset", offset.to_string());
        query.insert("limit", self.limit.to_string());

        let query_string = query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let separator = if base_url.contains('?') { '&' } else { '?' };
        format!("{base_url}{separator}{query_string}")
    }
}

/// Synthesize pagination links in one call.
///
/// Convenience function combining [`Paginator::new`] and
/// [`Paginator::links`].
///
/// # Errors
///
/// Returns [`OpdsError::InvalidPagination`] if `limit` is zero, or
/// [`OpdsError::InvalidLink`] if `base_url` cannot form a valid href.
pub fn paginate(
    total: usize,
    limit: usize,
    offset: usize,
    base_url: &str,
    params: &IndexMap<String, String>,
) -> Result<Vec<Link>> {
    Paginator::new(limit, offset, total)?.links(base_url, params)
}
