//! Order placement flow.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use snackkart_core::{CommerceError, GatewayError};

use crate::draft::{OrderConfirmation, OrderDraft};

/// Failure of a checkout operation.
///
/// A validation failure means nothing was sent; a gateway failure means the
/// order was not placed and the form should stay intact for a retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// The slice of the remote gateway checkout consumes.
pub trait OrderGateway: Send + Sync {
    fn place_order(
        &self,
        draft: &OrderDraft,
    ) -> impl Future<Output = Result<OrderConfirmation, GatewayError>> + Send;

    fn increment_coupon_usage(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<(), GatewayError>> + Send;
}

/// Checkout/order-draft assembly module.
#[derive(Debug)]
pub struct CheckoutService<G> {
    gateway: Arc<G>,
}

impl<G: OrderGateway> CheckoutService<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Validate and submit a draft.
    ///
    /// On success, if a coupon was applied, its usage counter is bumped as
    /// a separate best-effort call: a failure there is logged and swallowed
    /// — the placed order stands regardless.
    pub async fn place_order(
        &self,
        draft: &OrderDraft,
    ) -> Result<OrderConfirmation, CheckoutError> {
        draft.validate()?;

        let confirmation = self
            .gateway
            .place_order(draft)
            .await
            .inspect_err(|e| warn!(error = %e, "order placement failed"))?;

        info!(order = %confirmation.order_id, total = confirmation.total, "order placed");

        if let Some(code) = &draft.coupon_code {
            if let Err(e) = self.gateway.increment_coupon_usage(code).await {
                // Non-critical side effect: the order already succeeded.
                warn!(code = %code, error = %e, "coupon usage increment failed");
            }
        }

        Ok(confirmation)
    }
}
