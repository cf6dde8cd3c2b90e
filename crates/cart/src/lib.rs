//! Zoorkhan cart state management.
//!
//! Single source of truth for the client-side shopping cart: an ordered,
//! product-keyed line item collection synchronized to durable storage and
//! exposed to the rest of the UI through change notifications.
//!
//! # Architecture
//!
//! - [`store::CartStore`] - mutations, persistence, observer notification
//! - [`cart::Cart`] - the ordered line item collection and derived values
//! - [`storage`] - the durable key-value store seam
//! - [`catalog`] - the product lookup seam, used for live totals
//! - [`checkout`] - the order payload handed to the order API
//!
//! Failures from the storage and catalog collaborators never escape the
//! store: the cart keeps operating in memory when storage is unavailable,
//! and a failed price lookup degrades the live total instead of aborting it.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod line_item;
pub mod storage;
pub mod store;

pub use cart::Cart;
pub use catalog::{CachedCatalog, ProductCatalog, ProductInfo};
pub use checkout::{CheckoutPayload, OrderLine};
pub use error::{CatalogError, StorageError};
pub use line_item::LineItem;
pub use storage::{CartStorage, FileStore, MemoryStore};
pub use store::{CART_STORAGE_KEY, CartStore, SubscriptionId};
