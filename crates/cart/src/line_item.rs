//! Cart line items.

use serde::{Deserialize, Serialize};

use zoorkhan_core::{Price, ProductId};

use crate::catalog::ProductInfo;

/// One product-plus-quantity entry in the cart.
///
/// The unit price is a snapshot captured when the item was first added;
/// quantity changes never re-price the line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Price,
    pub image_url: Option<String>,
    /// Always >= 1; a line that would drop to zero is removed instead.
    pub quantity: u32,
}

impl LineItem {
    /// Create a line item from catalog data.
    #[must_use]
    pub fn new(product: ProductInfo, quantity: u32) -> Self {
        Self {
            product_id: product.id,
            name: product.name,
            unit_price: product.price,
            image_url: product.image_url,
            quantity,
        }
    }

    /// The total for this line: quantity x unit price snapshot.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use zoorkhan_core::CurrencyCode;

    use super::*;

    fn sample_product() -> ProductInfo {
        ProductInfo {
            id: ProductId::new(1),
            name: "Leather kettlebell".to_string(),
            price: Price::from_minor_units(4500, CurrencyCode::USD),
            image_url: Some("/images/kettlebell.jpg".to_string()),
        }
    }

    #[test]
    fn test_line_total() {
        let item = LineItem::new(sample_product(), 3);
        assert_eq!(item.line_total(), Price::from_minor_units(13500, CurrencyCode::USD));
        assert_eq!(item.line_total().to_string(), "$135.00");
    }

    #[test]
    fn test_serde_roundtrip() {
        let item = LineItem::new(sample_product(), 2);
        let json = serde_json::to_string(&item).unwrap();
        let back: LineItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }
}
