//! `snackkart-gateway` — HTTP client for the remote commerce backend.
//!
//! Implements the gateway traits declared by the cart and checkout crates,
//! plus the catalog and auth endpoints, over a JSON/HTTP API. Owns the
//! request timeout policy; everything above it is transport-agnostic.

pub mod dto;
pub mod http;

pub use dto::{Credentials, LoginResponse, RegisterRequest};
pub use http::{HttpGateway, DEFAULT_TIMEOUT};
