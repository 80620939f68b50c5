//! Integer money helpers.
//!
//! All monetary amounts in the workspace are `u64` counts of the smallest
//! currency unit (paise): ₹199.00 is `19_900`. Integer math keeps every
//! total exact and order-independent; percentage computations widen to
//! `u128` and truncate.

/// Smallest-unit factor for display currency.
pub const PAISE_PER_RUPEE: u64 = 100;

/// Convert whole rupees to paise. Test/fixture convenience.
pub fn rupees(amount: u64) -> u64 {
    amount * PAISE_PER_RUPEE
}

/// `percent` of `amount`, truncating toward zero.
///
/// Widened intermediate so `amount * percent` cannot overflow.
pub fn percent_of(amount: u64, percent: u32) -> u64 {
    ((amount as u128 * percent as u128) / 100) as u64
}

/// Clamp a raw discount to `[0, min(subtotal, cap)]`.
///
/// `cap` is the coupon's maximum absolute discount; `None` means uncapped.
pub fn clamp_discount(raw: u64, subtotal: u64, cap: Option<u64>) -> u64 {
    let ceiling = match cap {
        Some(cap) => subtotal.min(cap),
        None => subtotal,
    };
    raw.min(ceiling)
}
