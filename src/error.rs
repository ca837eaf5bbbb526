//! Error types for OPDS feed generation.
//!
//! This module provides the [`OpdsError`] type for all OPDS library operations
//! and the [`Result`] convenience type.

use thiserror::Error;

/// Error type for all OPDS library operations.
///
/// Represents the error conditions that can occur while constructing,
/// paginating, or serializing an OPDS 2.0 document. Validation failures are
/// raised at construction time so that a malformed document is never
/// returned to the caller.
#[derive(Error, Debug)]
pub enum OpdsError {
    /// Error indicating an invalid link (e.g. an empty `href`).
    #[error("Invalid link: {0}")]
    InvalidLink(String),

    /// Error indicating invalid metadata (e.g. an empty title).
    #[error("Invalid metadata: {0}")]
    InvalidMetadata(String),

    /// Error indicating an invalid navigation entry.
    #[error("Invalid navigation: {0}")]
    InvalidNavigation(String),

    /// Error indicating a catalog that violates a structural invariant.
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Error indicating invalid pagination arguments (e.g. a zero limit).
    #[error("Invalid pagination: {0}")]
    InvalidPagination(String),

    /// Error indicating an inconsistent search result.
    #[error("Invalid search result: {0}")]
    InvalidSearchResult(String),

    /// Error indicating two item mapping entries resolved to the same
    /// canonical field.
    #[error("Mapping conflict: {0}")]
    MappingConflict(String),

    /// Error indicating a record projected without a usable title.
    #[error("Missing title: {0}")]
    MissingTitle(String),

    /// Failure reported by an external data provider, propagated unchanged.
    #[error("Provider error: {0}")]
    Provider(#[from] anyhow::Error),

    /// JSON (de)serialization error from the underlying serializer.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for [`std::result::Result`] with [`OpdsError`].
pub type Result<T> = std::result::Result<T, OpdsError>;
