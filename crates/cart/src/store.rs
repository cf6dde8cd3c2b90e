//! The cart store: single source of truth for the shopping cart.
//!
//! Every mutation runs the same sequence: update the in-memory collection,
//! persist the serialized items, then notify observers. Storage failures are
//! absorbed (the cart keeps working in memory), so no mutation ever fails.
//!
//! The store is constructed once at application start and passed by handle
//! to the components that need it; components interested in changes register
//! an observer instead of listening on a shared event bus.

use rust_decimal::Decimal;
use tracing::warn;

use zoorkhan_core::{CartStatus, Price, ProductId};

use crate::cart::Cart;
use crate::catalog::{ProductCatalog, ProductInfo};
use crate::checkout::CheckoutPayload;
use crate::line_item::LineItem;
use crate::storage::CartStorage;

/// Storage key the serialized cart is persisted under.
pub const CART_STORAGE_KEY: &str = "cart";

/// Handle returned by [`CartStore::subscribe`]; pass it to
/// [`CartStore::unsubscribe`] to stop deliveries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn Fn(&Cart) + Send + Sync>;

/// Single source of truth for the shopping cart.
pub struct CartStore<S> {
    cart: Cart,
    storage: S,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl<S: CartStorage> CartStore<S> {
    /// Open the store, hydrating from durable storage.
    ///
    /// A missing record, an unparseable record, and a storage read failure
    /// all yield an empty cart; hydration never fails.
    pub async fn open(storage: S) -> Self {
        let cart = match storage.get(CART_STORAGE_KEY).await {
            Ok(Some(json)) => Cart::from_json(&json).unwrap_or_else(|err| {
                warn!(error = %err, "corrupt cart record, starting empty");
                Cart::new()
            }),
            Ok(None) => Cart::new(),
            Err(err) => {
                warn!(error = %err, "cart storage unavailable, starting empty");
                Cart::new()
            }
        };

        Self {
            cart,
            storage,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The current cart state.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// Snapshot total: sum of quantity x unit price captured at add time.
    #[must_use]
    pub fn total(&self) -> Price {
        self.cart.total()
    }

    /// Whether the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Cart lifecycle status: empty (checkout disabled) or active.
    #[must_use]
    pub fn status(&self) -> CartStatus {
        self.cart.status()
    }

    /// Order-creation payload for the current cart.
    ///
    /// The caller submits this to the order API and calls [`clear`] once the
    /// order is accepted.
    ///
    /// [`clear`]: CartStore::clear
    #[must_use]
    pub fn checkout_payload(&self) -> CheckoutPayload {
        CheckoutPayload::from(&self.cart)
    }

    /// Live total: re-price every line against the catalog.
    ///
    /// A line whose lookup fails contributes zero; the failure is logged and
    /// the computation continues, so this never errors. The currency comes
    /// from the first successful lookup.
    pub async fn total_live<C: ProductCatalog>(&self, catalog: &C) -> Price {
        let mut amount = Decimal::ZERO;
        let mut currency_code = None;

        for item in self.cart.items() {
            match catalog.product(item.product_id).await {
                Ok(product) => {
                    amount += product.price.times(item.quantity).amount;
                    currency_code.get_or_insert(product.price.currency_code);
                }
                Err(err) => {
                    warn!(
                        product_id = %item.product_id,
                        error = %err,
                        "price lookup failed, treating line as zero"
                    );
                }
            }
        }

        Price::new(amount, currency_code.unwrap_or_default())
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add `quantity` units of `product`.
    ///
    /// Merges into an existing line for the same product (the original price
    /// snapshot is kept); otherwise appends a new line. A quantity <= 0 is
    /// coerced to 1: an add never removes.
    pub async fn add_item(&mut self, product: ProductInfo, quantity: i64) {
        let quantity = if quantity <= 0 {
            1
        } else {
            u32::try_from(quantity).unwrap_or(u32::MAX)
        };
        self.cart.add(product, quantity);
        self.commit().await;
    }

    /// Remove the line for `product_id`.
    ///
    /// Removing an absent product leaves the collection unchanged but still
    /// persists and notifies.
    pub async fn remove_item(&mut self, product_id: ProductId) {
        self.cart.remove(product_id);
        self.commit().await;
    }

    /// Set the quantity of the line for `product_id` (absolute, not an
    /// increment). A quantity <= 0 removes the line. An unknown product is a
    /// strict no-op: nothing is persisted and no notification fires.
    pub async fn update_quantity(&mut self, product_id: ProductId, quantity: i64) {
        let changed = if quantity <= 0 {
            self.cart.remove(product_id)
        } else {
            let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
            self.cart.set_quantity(product_id, quantity)
        };
        if changed {
            self.commit().await;
        }
    }

    /// Empty the cart unconditionally.
    pub async fn clear(&mut self) {
        self.cart.clear();
        self.commit().await;
    }

    // =========================================================================
    // Observers
    // =========================================================================

    /// Register an observer invoked after every committed mutation with a
    /// borrow of the post-mutation cart state.
    pub fn subscribe(
        &mut self,
        observer: impl Fn(&Cart) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove a previously registered observer. Returns whether it was
    /// registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub_id, _)| *sub_id != id);
        self.observers.len() != before
    }

    /// Persist the current state, then notify observers.
    ///
    /// Persistence failures are absorbed: the cart stays usable in memory
    /// and observers are still told about the state change. Notification is
    /// emitted strictly after the persistence attempt completes.
    async fn commit(&self) {
        self.persist().await;
        self.notify();
    }

    async fn persist(&self) {
        let json = match self.cart.to_json() {
            Ok(json) => json,
            Err(err) => {
                warn!(error = %err, "failed to serialize cart, skipping persist");
                return;
            }
        };

        if let Err(err) = self.storage.set(CART_STORAGE_KEY, &json).await {
            warn!(error = %err, "failed to persist cart, continuing in memory");
        }
    }

    fn notify(&self) {
        for (_, observer) in &self.observers {
            observer(&self.cart);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use zoorkhan_core::CurrencyCode;

    use crate::error::CatalogError;
    use crate::storage::MemoryStore;

    use super::*;

    fn product(id: i64, cents: i64) -> ProductInfo {
        ProductInfo {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Price::from_minor_units(cents, CurrencyCode::USD),
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_add_quantity_at_most_zero_coerced_to_one() {
        let mut store = CartStore::open(MemoryStore::new()).await;

        store.add_item(product(1, 100), 0).await;
        assert_eq!(store.item_count(), 1);

        store.add_item(product(2, 100), -5).await;
        assert_eq!(store.items().len(), 2);
        assert_eq!(store.cart().get(ProductId::new(2)).unwrap().quantity, 1);
    }

    #[tokio::test]
    async fn test_update_quantity_zero_or_negative_removes() {
        let mut store = CartStore::open(MemoryStore::new()).await;
        store.add_item(product(1, 100), 1).await;
        store.add_item(product(2, 100), 1).await;

        store.update_quantity(ProductId::new(1), 0).await;
        store.update_quantity(ProductId::new(2), -5).await;
        assert!(store.is_empty());
        assert!(!store.status().checkout_allowed());
    }

    #[tokio::test]
    async fn test_update_quantity_sets_absolute_value() {
        let mut store = CartStore::open(MemoryStore::new()).await;
        store.add_item(product(1, 100), 2).await;

        store.update_quantity(ProductId::new(1), 7).await;
        assert_eq!(store.item_count(), 7);
    }

    #[tokio::test]
    async fn test_update_quantity_unknown_product_is_silent_noop() {
        let mut store = CartStore::open(MemoryStore::new()).await;
        store.add_item(product(1, 100), 1).await;

        let notifications = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&notifications);
        store.subscribe(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        store.update_quantity(ProductId::new(99), 3).await;
        store.update_quantity(ProductId::new(99), 0).await;

        assert_eq!(store.item_count(), 1);
        assert_eq!(notifications.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_observers_see_post_mutation_state() {
        let mut store = CartStore::open(MemoryStore::new()).await;

        let observed_counts = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&observed_counts);
        store.subscribe(move |cart| {
            sink.lock().unwrap().push(cart.item_count());
        });

        store.add_item(product(1, 100), 2).await;
        store.add_item(product(1, 100), 3).await;
        store.clear().await;

        assert_eq!(*observed_counts.lock().unwrap(), vec![2, 5, 0]);
    }

    #[tokio::test]
    async fn test_unsubscribe_stops_delivery() {
        let mut store = CartStore::open(MemoryStore::new()).await;

        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let sink = Arc::clone(&first);
        let id = store.subscribe(move |_| {
            sink.fetch_add(1, Ordering::SeqCst);
        });
        let sink = Arc::clone(&second);
        store.subscribe(move |_| {
            sink.fetch_add(1, Ordering::SeqCst);
        });

        store.add_item(product(1, 100), 1).await;
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.add_item(product(2, 100), 1).await;

        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_hydrates_previous_session_state() {
        let storage = Arc::new(MemoryStore::new());

        let mut store = CartStore::open(Arc::clone(&storage)).await;
        store.add_item(product(1, 1000), 2).await;
        store.add_item(product(2, 500), 1).await;
        drop(store);

        let reopened = CartStore::open(storage).await;
        assert_eq!(reopened.item_count(), 3);
        assert_eq!(
            reopened.total(),
            Price::from_minor_units(2500, CurrencyCode::USD)
        );
    }

    #[tokio::test]
    async fn test_hydrate_corrupt_record_yields_empty_cart() {
        let storage = MemoryStore::new();
        storage.set(CART_STORAGE_KEY, "{{{ not json").await.unwrap();

        let store = CartStore::open(storage).await;
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_total_live_reprices_from_catalog() {
        struct FixedCatalog;

        impl ProductCatalog for FixedCatalog {
            async fn product(&self, id: ProductId) -> Result<ProductInfo, CatalogError> {
                Ok(product(id.as_i64(), 200))
            }
        }

        let mut store = CartStore::open(MemoryStore::new()).await;
        // Snapshot price $1.00, live price $2.00.
        store.add_item(product(1, 100), 3).await;

        assert_eq!(
            store.total(),
            Price::from_minor_units(300, CurrencyCode::USD)
        );
        assert_eq!(
            store.total_live(&FixedCatalog).await,
            Price::from_minor_units(600, CurrencyCode::USD)
        );
    }
}
