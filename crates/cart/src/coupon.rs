//! Coupons and discount math.
//!
//! Coupons are fetched read-only from the gateway; "applying" one is a
//! transient selection on the cart, never a mutation of the coupon itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use snackkart_core::money::{clamp_discount, percent_of};
use snackkart_core::{CommerceError, CommerceResult, InvalidCouponReason};

/// How a coupon reduces the subtotal. Amounts in paise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum DiscountRule {
    /// Fixed amount off.
    Flat { amount: u64 },
    /// Percentage of the subtotal, with a maximum absolute cap.
    Percent { percent: u32, max_cap: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
    /// Unique code; matched case-insensitively.
    pub code: String,
    #[serde(default)]
    pub description: String,
    /// Eligibility predicate: first-time customers only.
    #[serde(default)]
    pub first_time_only: bool,
    pub rule: DiscountRule,
    pub active: bool,
    #[serde(default)]
    pub valid_from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub valid_until: Option<DateTime<Utc>>,
}

impl Coupon {
    /// Whether the coupon may be applied at `now`.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        if !self.active {
            return false;
        }
        if self.valid_from.is_some_and(|from| now < from) {
            return false;
        }
        if self.valid_until.is_some_and(|until| now > until) {
            return false;
        }
        true
    }

    /// Maximum absolute discount this coupon may grant, if bounded.
    pub fn max_cap(&self) -> Option<u64> {
        match self.rule {
            DiscountRule::Flat { amount } => Some(amount),
            DiscountRule::Percent { max_cap, .. } => Some(max_cap),
        }
    }

    /// Discount for `subtotal`, clamped to `[0, min(subtotal, cap)]`.
    pub fn discount_for(&self, subtotal: u64) -> u64 {
        let raw = match self.rule {
            DiscountRule::Flat { amount } => amount,
            DiscountRule::Percent { percent, .. } => percent_of(subtotal, percent),
        };
        clamp_discount(raw, subtotal, self.max_cap())
    }
}

/// A coupon the user has currently selected, with the discount it granted
/// at application time. The discount is re-clamped against the live
/// subtotal whenever totals are computed, so a later cart change can only
/// shrink it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedCoupon {
    pub coupon: Coupon,
    pub discount: u64,
}

/// Validate `code` against the active coupon list and compute its discount.
///
/// Pure: the caller supplies the coupon list, the current subtotal, the
/// customer's first-time status and the clock.
pub fn apply_coupon(
    coupons: &[Coupon],
    code: &str,
    subtotal: u64,
    is_first_time_customer: bool,
    now: DateTime<Utc>,
) -> CommerceResult<AppliedCoupon> {
    let coupon = coupons
        .iter()
        .find(|c| c.code.eq_ignore_ascii_case(code.trim()))
        .ok_or(CommerceError::InvalidCoupon(InvalidCouponReason::Unknown))?;

    if !coupon.is_active(now) {
        return Err(CommerceError::InvalidCoupon(InvalidCouponReason::Expired));
    }

    if coupon.first_time_only && !is_first_time_customer {
        return Err(CommerceError::InvalidCoupon(
            InvalidCouponReason::Ineligible,
        ));
    }

    Ok(AppliedCoupon {
        discount: coupon.discount_for(subtotal),
        coupon: coupon.clone(),
    })
}
