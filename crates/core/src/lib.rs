//! `snackkart-core` — shared foundation for the storefront core.
//!
//! This crate contains the error taxonomy, strongly-typed identifiers and
//! integer money helpers used by every other crate in the workspace. It has
//! no I/O and no knowledge of the gateway's HTTP shape.

pub mod error;
pub mod id;
pub mod money;

pub use error::{CommerceError, CommerceResult, GatewayError, InvalidCouponReason};
pub use id::{OrderId, ProductId, UserId};
