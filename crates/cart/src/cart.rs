//! The ordered cart collection.
//!
//! [`Cart`] owns the line items and the merge-by-product invariant. Mutators
//! are crate-private: external code mutates only through
//! [`CartStore`](crate::store::CartStore), which persists and notifies after
//! every change.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use zoorkhan_core::{CartStatus, CurrencyCode, Price, ProductId};

use crate::catalog::ProductInfo;
use crate::line_item::LineItem;

/// The full ordered collection of line items at a point in time.
///
/// Invariants:
/// - at most one line item per product ID
/// - every quantity is >= 1
/// - insertion order is preserved for display
///
/// Serializes transparently as the JSON array of line items, which is the
/// shape persisted to durable storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// The line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Look up a line item by product ID.
    #[must_use]
    pub fn get(&self, product_id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }

    /// Whether the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of quantity x unit price snapshot across all lines.
    ///
    /// The currency is taken from the first line item; an empty cart totals
    /// zero in the default currency.
    #[must_use]
    pub fn total(&self) -> Price {
        let currency_code = self
            .items
            .first()
            .map_or_else(CurrencyCode::default, |item| item.unit_price.currency_code);
        let amount: Decimal = self.items.iter().map(|item| item.line_total().amount).sum();
        Price::new(amount, currency_code)
    }

    /// Cart lifecycle status: empty or active.
    #[must_use]
    pub fn status(&self) -> CartStatus {
        if self.items.is_empty() {
            CartStatus::Empty
        } else {
            CartStatus::Active
        }
    }

    /// Serialize the line items to the durable JSON form.
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.items)
    }

    /// Reconstruct a cart from its durable JSON form.
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if the record does not parse as a line
    /// item array.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self {
            items: serde_json::from_str(json)?,
        })
    }

    /// Merge `quantity` units of `product` into the cart.
    ///
    /// An existing line keeps its price snapshot and gains quantity; a new
    /// line is appended at the end of the display order.
    pub(crate) fn add(&mut self, product: ProductInfo, quantity: u32) {
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.product_id == product.id)
        {
            item.quantity = item.quantity.saturating_add(quantity);
        } else {
            self.items.push(LineItem::new(product, quantity));
        }
    }

    /// Remove the line for `product_id`. Returns whether a line was removed.
    pub(crate) fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.product_id != product_id);
        self.items.len() != before
    }

    /// Set the quantity of an existing line (absolute, not an increment).
    /// Returns whether the line exists.
    pub(crate) fn set_quantity(&mut self, product_id: ProductId, quantity: u32) -> bool {
        match self
            .items
            .iter_mut()
            .find(|item| item.product_id == product_id)
        {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Drop every line item.
    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }
}
