//! `snackkart-cart` — cart lines, coupons and the cart state container.
//!
//! The cart is the one piece of client state that must survive a session,
//! so the gateway stays authoritative: every mutation round-trips to the
//! backend and then reloads the server's view of the cart. Local state is
//! never updated optimistically.

pub mod coupon;
pub mod favorites;
pub mod line;
pub mod service;

pub use coupon::{AppliedCoupon, Coupon, DiscountRule, apply_coupon};
pub use favorites::FavoritesStore;
pub use line::{CartLine, MAX_LINE_QUANTITY, combined_quantity, compute_subtotal};
pub use service::{CartError, CartGateway, CartService, CartSnapshot, CartTotals};
