//! `snackkart-checkout` — order draft assembly and placement.
//!
//! Combines cart lines, the selected coupon and the shipping/payment form
//! into an [`OrderDraft`], validates it locally, and submits it through the
//! gateway. Coupon usage accounting is a best-effort side call that never
//! blocks a placed order.

pub mod draft;
pub mod service;

pub use draft::{OrderConfirmation, OrderDraft, PaymentMethod, ShippingDetails};
pub use service::{CheckoutError, CheckoutService, OrderGateway};
