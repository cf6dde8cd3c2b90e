//! Product catalog lookup.
//!
//! The catalog is an external collaborator: the storefront API that resolves
//! a product ID to its current name, price, and image. Callers use it to
//! build the [`ProductInfo`] passed to `add_item`; the cart itself consults
//! it only when recomputing a live total.

use std::future::Future;
use std::time::Duration;

use moka::future::Cache;
use serde::{Deserialize, Serialize};
use tracing::debug;

use zoorkhan_core::{Price, ProductId};

use crate::error::CatalogError;

/// Product data returned by a catalog lookup.
///
/// Also the metadata argument of `add_item`: the price here becomes the
/// line's snapshot price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInfo {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image_url: Option<String>,
}

/// A product lookup capability (product ID -> name, price, image).
pub trait ProductCatalog {
    /// Resolve a product by ID.
    fn product(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<ProductInfo, CatalogError>> + Send;
}

/// Caching wrapper around a catalog.
///
/// Successful lookups are cached for 5 minutes; failures are not cached, so
/// a transiently unavailable backend is retried on the next lookup.
pub struct CachedCatalog<C> {
    inner: C,
    cache: Cache<ProductId, ProductInfo>,
}

impl<C> CachedCatalog<C> {
    /// Wrap `inner` with a lookup cache.
    #[must_use]
    pub fn new(inner: C) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self { inner, cache }
    }
}

impl<C: ProductCatalog + Send + Sync> ProductCatalog for CachedCatalog<C> {
    async fn product(&self, id: ProductId) -> Result<ProductInfo, CatalogError> {
        if let Some(product) = self.cache.get(&id).await {
            debug!(%id, "catalog cache hit");
            return Ok(product);
        }

        let product = self.inner.product(id).await?;
        self.cache.insert(id, product.clone()).await;
        Ok(product)
    }
}
