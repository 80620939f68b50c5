//! Error model for the storefront core.

use thiserror::Error;

/// Result type used across the domain layer.
pub type CommerceResult<T> = Result<T, CommerceError>;

/// Reason a coupon was rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InvalidCouponReason {
    /// The code matches no coupon in the active list.
    #[error("unknown coupon code")]
    Unknown,

    /// The coupon exists but is inactive or outside its validity window.
    #[error("coupon has expired or is not active")]
    Expired,

    /// The coupon's eligibility predicate rejected this customer.
    #[error("customer is not eligible for this coupon")]
    Ineligible,
}

/// Domain-level error.
///
/// Keep this focused on deterministic failures resolved before any network
/// call (validation, missing session, coupon rejection). Transport concerns
/// live in [`GatewayError`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// A value failed validation (e.g. out-of-range quantity).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Required fields are missing; carries the field names so the caller
    /// can report all of them at once.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// The action requires a signed-in user.
    #[error("no authenticated session")]
    Unauthenticated,

    /// A coupon code could not be applied.
    #[error("invalid coupon: {0}")]
    InvalidCoupon(InvalidCouponReason),
}

impl CommerceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn missing_fields(fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::MissingFields(fields.into_iter().map(Into::into).collect())
    }

    pub fn invalid_coupon(reason: InvalidCouponReason) -> Self {
        Self::InvalidCoupon(reason)
    }
}

/// Failure talking to the remote commerce gateway.
///
/// Declared here (rather than next to the HTTP client) so the service
/// crates can name it in their gateway traits without depending on the
/// transport implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The request did not complete (DNS, connect, TLS, ...).
    #[error("network error: {0}")]
    Network(String),

    /// The request exceeded the configured deadline. Retryable by the user.
    #[error("request timed out")]
    Timeout,

    /// The gateway answered with a non-success status.
    #[error("gateway error ({0}): {1}")]
    Api(u16, String),

    /// The response body could not be decoded.
    #[error("response parse error: {0}")]
    Parse(String),
}
