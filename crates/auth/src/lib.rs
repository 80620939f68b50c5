//! `snackkart-auth` — session state and client-side token claims.
//!
//! The storefront caches who is signed in so cart and checkout can gate
//! their operations. The role carried here is a **UI-gating hint only**:
//! it comes from a client-decoded token and must never stand in for the
//! backend's authorization checks.

pub mod claims;
pub mod session;

pub use claims::{TokenClaims, TokenValidationError, validate_claims};
pub use session::{Role, Session, SessionStore};
