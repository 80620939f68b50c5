//! Catalog product read model.

use serde::{Deserialize, Serialize};

use snackkart_core::ProductId;

/// A catalog product as served by the gateway.
///
/// Read-only per fetch: the core never mutates a product. Prices are in the
/// smallest currency unit (paise). Fields the backend may omit default to
/// neutral values so a partial payload degrades to "worth 0 / unrated"
/// rather than a deserialization failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Unit price in paise.
    #[serde(default)]
    pub price: u64,
    /// Pre-discount display price; when present it must be `>= price`.
    #[serde(default)]
    pub original_price: Option<u64>,
    /// Display string, e.g. "100g".
    #[serde(default)]
    pub weight: String,
    /// Display string, e.g. "Peri Peri".
    #[serde(default)]
    pub flavor: String,
    /// Category tag used by the discovery pipeline.
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub in_stock: bool,
    #[serde(default)]
    pub stock_qty: u32,
    /// Average rating in `[0, 5]`.
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
}

impl Product {
    /// Whether the product can currently be added to a cart.
    pub fn is_purchasable(&self) -> bool {
        self.in_stock && self.stock_qty > 0
    }

    /// Absolute saving against the pre-discount price, if any.
    pub fn saving(&self) -> Option<u64> {
        self.original_price
            .and_then(|orig| orig.checked_sub(self.price))
            .filter(|s| *s > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: u64, original: Option<u64>) -> Product {
        Product {
            id: ProductId::new(),
            name: "Premium Roasted Makhana".to_string(),
            description: String::new(),
            price,
            original_price: original,
            weight: "100g".to_string(),
            flavor: "Himalayan Salt".to_string(),
            category: "makhana".to_string(),
            in_stock: true,
            stock_qty: 10,
            rating: 4.5,
            review_count: 32,
        }
    }

    #[test]
    fn saving_is_difference_against_original_price() {
        assert_eq!(product(19_900, Some(24_900)).saving(), Some(5_000));
        assert_eq!(product(19_900, None).saving(), None);
        // An original price equal to the live price is not a saving.
        assert_eq!(product(19_900, Some(19_900)).saving(), None);
    }

    #[test]
    fn out_of_stock_product_is_not_purchasable() {
        let mut p = product(19_900, None);
        p.in_stock = false;
        assert!(!p.is_purchasable());
        p.in_stock = true;
        p.stock_qty = 0;
        assert!(!p.is_purchasable());
    }
}
