//! Checkout payload construction.
//!
//! Checkout itself belongs to the order API collaborator: the caller submits
//! this payload and clears the cart once the order is accepted.

use serde::{Deserialize, Serialize};

use zoorkhan_core::{Price, ProductId};

use crate::cart::Cart;

/// One line of an order-creation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Order-creation request body derived from the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutPayload {
    pub items: Vec<OrderLine>,
    /// Snapshot total at submission time; the order API re-prices
    /// authoritatively on its side.
    pub total: Price,
}

impl From<&Cart> for CheckoutPayload {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart
                .items()
                .iter()
                .map(|item| OrderLine {
                    product_id: item.product_id,
                    quantity: item.quantity,
                })
                .collect(),
            total: cart.total(),
        }
    }
}
