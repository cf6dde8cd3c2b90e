//! Error types for the storage and catalog collaborators.
//!
//! These errors surface at the trait seams only. [`CartStore`] absorbs both
//! kinds: storage failures fall back to in-memory operation, and catalog
//! failures zero out the affected line's contribution to the live total.
//!
//! [`CartStore`]: crate::store::CartStore

use thiserror::Error;

use zoorkhan_core::ProductId;

/// Durable storage failure.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The store is inaccessible (e.g., disabled or denied by the host).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Underlying I/O failure.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Product lookup failure.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No product exists with this ID.
    #[error("product {0} not found")]
    NotFound(ProductId),

    /// The catalog backend could not be reached.
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}
