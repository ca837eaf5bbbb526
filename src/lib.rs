#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # opds2: OPDS 2.0 feed generation
//!
//! A Rust library for converting provider-specific catalog records into
//! standards-compliant OPDS 2.0 JSON-LD feeds: a validated document graph
//! of catalogs, publications, metadata, links, and navigation entries, with
//! correct pagination semantics.
//!
//! ## Quick Start
//!
//! ### Building a catalog
//!
//! ```ignore
//! use opds2::catalog::CatalogBuilder;
//!
//! let catalog = CatalogBuilder::new("My Library", "https://example.com/opds")
//!     .search_link("https://example.com/opds/search?query={searchTerms}")
//!     .build()?;
//!
//! println!("{}", opds2::json::catalog_to_json_string(&catalog)?);
//! ```
//!
//! ### Mapping provider records
//!
//! ```ignore
//! use opds2::{projector, ItemMapping};
//! use serde_json::json;
//!
//! let mapping = ItemMapping::builder()
//!     .field("title", |item| item.get("title").cloned())
//!     .field("author", |item| item.get("author_names").cloned())
//!     .build()?;
//!
//! let record = json!({"title": "Dune", "author_names": ["Frank Herbert"]});
//! let publication = projector::project(&record, &mapping)?;
//! assert_eq!(publication.metadata.title, "Dune");
//! ```
//!
//! ## Modules
//!
//! - [`model`] — Core OPDS 2.0 document structures (`Catalog`, `Publication`, `Link`, ...)
//! - [`vocabulary`] — Legacy ↔ schema.org field name aliasing
//! - [`mapping`] — Per-field extraction of OPDS data from raw records
//! - [`projector`] — Projection of raw records into publications
//! - [`pagination`] — Pagination-link synthesis
//! - [`catalog`] — Catalog assembly
//! - [`provider`] — External data provider interface
//! - [`json`] — JSON-LD serialization/deserialization
//! - [`error`] — Error types and result type
//!
//! ## Format Support
//!
//! - **OPDS 2.0 (JSON-LD)** — The JSON-based catalog format built on the
//!   Readium Web Publication Manifest; the fixed `@context` is
//!   [`model::WEBPUB_MANIFEST_CONTEXT`]
//! - **OpenSearch templating** — `search` links may carry a
//!   `{searchTerms}` URI template; substitution belongs to the caller
//!
//! OPDS 1.x (Atom/XML) is out of scope.

pub mod catalog;
pub mod error;
pub mod json;
pub mod mapping;
pub mod model;
pub mod pagination;
pub mod projector;
pub mod provider;
pub mod vocabulary;

pub use catalog::{add_pagination, create_catalog, create_search_catalog, CatalogBuilder};
pub use error::{OpdsError, Result};
pub use mapping::{Extractor, ItemMapping, ItemMappingBuilder};
pub use model::{
    Catalog, Contributor, Link, LinkBuilder, LinkRel, Metadata, MetadataBuilder, Navigation,
    Publication, PublicationBuilder,
};
pub use pagination::{paginate, Paginator};
pub use projector::{project, project_all, Projection};
pub use provider::{DataProvider, ProviderRecord, SearchResult};
