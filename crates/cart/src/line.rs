//! Cart lines and the pure subtotal computation.

use serde::{Deserialize, Serialize};

use snackkart_core::ProductId;

/// Maximum quantity a single cart line may hold.
pub const MAX_LINE_QUANTITY: u32 = 20;

/// One product + quantity entry in a user's active cart.
///
/// `unit_price` is in paise, captured from the product when the line was
/// added. The gateway may serve partial data; missing price or quantity
/// deserializes to 0 so a damaged line is worth nothing instead of
/// breaking the whole cart payload. A line with quantity 0 is pruned by
/// the service on reload — it is never retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    #[serde(default)]
    pub quantity: u32,
    /// Unit price in paise.
    #[serde(default)]
    pub unit_price: u64,
}

impl CartLine {
    pub fn line_total(&self) -> u64 {
        self.unit_price.saturating_mul(self.quantity as u64)
    }
}

/// Sum of `unit_price * quantity` over all lines, in paise.
///
/// Pure and order-invariant. Saturating arithmetic: a corrupt line can at
/// worst pin the subtotal at `u64::MAX`, never panic.
pub fn compute_subtotal(lines: &[CartLine]) -> u64 {
    lines
        .iter()
        .fold(0u64, |acc, line| acc.saturating_add(line.line_total()))
}

/// The documented combination rule for adding to an existing line:
/// increment by the requested amount, capped at [`MAX_LINE_QUANTITY`].
pub fn combined_quantity(existing: u32, added: u32) -> u32 {
    existing.saturating_add(added).min(MAX_LINE_QUANTITY)
}
