//! Order draft: the assembled, not-yet-submitted order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use snackkart_cart::{AppliedCoupon, CartLine, compute_subtotal};
use snackkart_core::{CommerceError, CommerceResult, OrderId};

/// Payment method selection. Processing itself is out of scope; the
/// selection is carried to the gateway verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CashOnDelivery,
    Card,
    Upi,
}

/// Shipping form fields. `address_line2` is the only optional field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address_line1: String,
    #[serde(default)]
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

impl ShippingDetails {
    /// Names of required fields that are empty or whitespace-only.
    fn missing_fields(&self) -> Vec<String> {
        let required: [(&str, &str); 7] = [
            ("full_name", &self.full_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("address_line1", &self.address_line1),
            ("city", &self.city),
            ("state", &self.state),
            ("postal_code", &self.postal_code),
        ];
        required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name.to_string())
            .collect()
    }
}

/// Snapshot of everything needed to place an order. Amounts in paise.
///
/// Invariants (held by construction, re-checked in [`Self::validate`]):
/// `total = subtotal - discount` and `discount <= subtotal`; the discount
/// already respects the coupon's cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub lines: Vec<CartLine>,
    pub shipping: ShippingDetails,
    pub payment: PaymentMethod,
    pub coupon_code: Option<String>,
    pub subtotal: u64,
    pub discount: u64,
    pub total: u64,
}

impl OrderDraft {
    /// Assemble a draft from the current cart and form state.
    ///
    /// The discount is re-derived from the coupon against this draft's own
    /// subtotal rather than trusting a figure computed earlier.
    pub fn assemble(
        lines: Vec<CartLine>,
        shipping: ShippingDetails,
        payment: PaymentMethod,
        applied: Option<&AppliedCoupon>,
    ) -> Self {
        let subtotal = compute_subtotal(&lines);
        let discount = applied.map(|a| a.coupon.discount_for(subtotal)).unwrap_or(0);
        Self {
            lines,
            shipping,
            payment,
            coupon_code: applied.map(|a| a.coupon.code.clone()),
            subtotal,
            discount,
            total: subtotal - discount,
        }
    }

    /// Pre-submission checks. The UI must not submit a draft that fails.
    pub fn validate(&self) -> CommerceResult<()> {
        let missing = self.shipping.missing_fields();
        if !missing.is_empty() {
            return Err(CommerceError::MissingFields(missing));
        }
        if self.lines.is_empty() {
            return Err(CommerceError::validation("cart is empty"));
        }
        if self.discount > self.subtotal || self.total != self.subtotal - self.discount {
            return Err(CommerceError::validation("order totals are inconsistent"));
        }
        Ok(())
    }
}

/// The gateway's acknowledgement of a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    /// Total charged, in paise.
    pub total: u64,
    pub placed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use snackkart_cart::{Coupon, DiscountRule};
    use snackkart_core::ProductId;
    use snackkart_core::money::rupees;
    use uuid::Uuid;

    fn shipping() -> ShippingDetails {
        ShippingDetails {
            full_name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            phone: "9876543210".to_string(),
            address_line1: "12 MG Road".to_string(),
            address_line2: None,
            city: "Bengaluru".to_string(),
            state: "Karnataka".to_string(),
            postal_code: "560001".to_string(),
        }
    }

    fn line(qty: u32, price: u64) -> CartLine {
        CartLine {
            product_id: ProductId::from_uuid(Uuid::from_u128(1)),
            quantity: qty,
            unit_price: price,
        }
    }

    fn applied_percent(percent: u32, cap: u64, subtotal: u64) -> AppliedCoupon {
        let coupon = Coupon {
            code: "SNACK10".to_string(),
            description: String::new(),
            first_time_only: false,
            rule: DiscountRule::Percent {
                percent,
                max_cap: cap,
            },
            active: true,
            valid_from: None,
            valid_until: None,
        };
        AppliedCoupon {
            discount: coupon.discount_for(subtotal),
            coupon,
        }
    }

    #[test]
    fn assemble_computes_totals_from_its_own_subtotal() {
        let lines = vec![line(2, rupees(199))];
        let applied = applied_percent(10, rupees(50), rupees(398));
        let draft = OrderDraft::assemble(
            lines,
            shipping(),
            PaymentMethod::Upi,
            Some(&applied),
        );

        assert_eq!(draft.subtotal, 39_800);
        assert_eq!(draft.discount, 3_980);
        assert_eq!(draft.total, 35_820);
        assert_eq!(draft.coupon_code.as_deref(), Some("SNACK10"));
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn validate_enumerates_every_missing_field() {
        let mut details = shipping();
        details.full_name.clear();
        details.city = "   ".to_string();
        let draft = OrderDraft::assemble(
            vec![line(1, rupees(199))],
            details,
            PaymentMethod::Card,
            None,
        );

        match draft.validate().unwrap_err() {
            CommerceError::MissingFields(fields) => {
                assert_eq!(fields, vec!["full_name".to_string(), "city".to_string()]);
            }
            other => panic!("expected MissingFields, got {other:?}"),
        }
    }

    #[test]
    fn empty_cart_cannot_be_submitted() {
        let draft =
            OrderDraft::assemble(vec![], shipping(), PaymentMethod::CashOnDelivery, None);
        assert!(matches!(
            draft.validate().unwrap_err(),
            CommerceError::Validation(_)
        ));
    }

    #[test]
    fn tampered_totals_are_rejected() {
        let mut draft = OrderDraft::assemble(
            vec![line(1, rupees(199))],
            shipping(),
            PaymentMethod::Card,
            None,
        );
        draft.discount = draft.subtotal + 1;
        assert!(draft.validate().is_err());

        let mut draft = OrderDraft::assemble(
            vec![line(1, rupees(199))],
            shipping(),
            PaymentMethod::Card,
            None,
        );
        draft.total += 1;
        assert!(draft.validate().is_err());
    }
}
