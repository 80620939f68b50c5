//! The cart state container.
//!
//! All cart mutations from every UI surface (product card, cart page,
//! wishlist, reorder) funnel through [`CartService`]. The service holds its
//! state behind a `tokio::sync::Mutex` and keeps the lock across the whole
//! gateway round-trip, so a second mutation queues behind the first and
//! out-of-order responses cannot produce lost updates.
//!
//! Mutations are never applied optimistically: the gateway call must
//! succeed, after which the authoritative cart is re-fetched and replaces
//! local state. On failure local state is left untouched and the error is
//! surfaced to the caller; retries are always a fresh user action.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use snackkart_auth::SessionStore;
use snackkart_catalog::Product;
use snackkart_core::{CommerceError, GatewayError, ProductId, UserId};

use crate::coupon::{AppliedCoupon, Coupon, apply_coupon};
use crate::line::{CartLine, MAX_LINE_QUANTITY, combined_quantity, compute_subtotal};

/// Failure of a cart operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// The slice of the remote gateway the cart module consumes.
///
/// Declared here so the service can be driven by an in-memory fake under
/// test; the HTTP implementation lives in `snackkart-gateway`.
pub trait CartGateway: Send + Sync {
    fn fetch_cart(
        &self,
        user: UserId,
    ) -> impl Future<Output = Result<Vec<CartLine>, GatewayError>> + Send;

    fn add_to_cart(
        &self,
        user: UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> impl Future<Output = Result<(), GatewayError>> + Send;

    fn update_cart_item(
        &self,
        user: UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> impl Future<Output = Result<(), GatewayError>> + Send;

    fn remove_from_cart(
        &self,
        user: UserId,
        product_id: ProductId,
    ) -> impl Future<Output = Result<(), GatewayError>> + Send;

    fn clear_cart(&self, user: UserId) -> impl Future<Output = Result<(), GatewayError>> + Send;

    fn active_coupons(&self) -> impl Future<Output = Result<Vec<Coupon>, GatewayError>> + Send;
}

#[derive(Debug, Default)]
struct CartState {
    lines: Vec<CartLine>,
    applied: Option<AppliedCoupon>,
}

/// Read-only view of the cart for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    pub applied_coupon: Option<AppliedCoupon>,
}

/// Monetary totals derived from the current cart, in paise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    pub subtotal: u64,
    pub discount: u64,
    pub total: u64,
}

/// Cart/coupon state module. Generic over the gateway for testability.
#[derive(Debug)]
pub struct CartService<G> {
    gateway: Arc<G>,
    session: SessionStore,
    state: Mutex<CartState>,
}

impl<G: CartGateway> CartService<G> {
    pub fn new(gateway: Arc<G>, session: SessionStore) -> Self {
        Self {
            gateway,
            session,
            state: Mutex::new(CartState::default()),
        }
    }

    fn require_user(&self) -> Result<UserId, CartError> {
        self.session
            .current_user()
            .ok_or(CartError::Commerce(CommerceError::Unauthenticated))
    }

    /// Reload the authoritative cart from the gateway.
    pub async fn refresh(&self) -> Result<(), CartError> {
        let user = self.require_user()?;
        let mut state = self.state.lock().await;
        state.lines = self.reload(user).await?;
        Ok(())
    }

    /// Add `quantity` of `product` to the cart.
    ///
    /// If a line for the product already exists, the quantities combine by
    /// the documented rule: increment, capped at [`MAX_LINE_QUANTITY`].
    pub async fn add_item(&self, product: &Product, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 || quantity > MAX_LINE_QUANTITY {
            return Err(CommerceError::validation(format!(
                "quantity must be between 1 and {MAX_LINE_QUANTITY}"
            ))
            .into());
        }
        if !product.is_purchasable() {
            return Err(CommerceError::validation("product is out of stock").into());
        }
        let user = self.require_user()?;

        let mut state = self.state.lock().await;
        let existing = state
            .lines
            .iter()
            .find(|l| l.product_id == product.id)
            .map(|l| l.quantity);

        match existing {
            Some(current) => {
                let target = combined_quantity(current, quantity);
                self.gateway
                    .update_cart_item(user, product.id, target)
                    .await
                    .inspect_err(|e| warn!(product = %product.id, error = %e, "add to cart failed"))?;
            }
            None => {
                self.gateway
                    .add_to_cart(user, product.id, quantity)
                    .await
                    .inspect_err(|e| warn!(product = %product.id, error = %e, "add to cart failed"))?;
            }
        }

        state.lines = self.reload(user).await?;
        debug!(product = %product.id, quantity, "cart line added");
        Ok(())
    }

    /// Remove a line. Idempotent: removing an absent line is a no-op.
    ///
    /// Always round-trips — the local line set may be stale (e.g. before a
    /// first `refresh`), so presence is never decided client-side. The
    /// gateway DELETE is idempotent, and the reload brings back whatever
    /// the server actually holds.
    pub async fn remove_item(&self, product_id: ProductId) -> Result<(), CartError> {
        let user = self.require_user()?;

        let mut state = self.state.lock().await;
        self.gateway
            .remove_from_cart(user, product_id)
            .await
            .inspect_err(|e| warn!(product = %product_id, error = %e, "remove from cart failed"))?;

        state.lines = self.reload(user).await?;
        debug!(product = %product_id, "cart line removed");
        Ok(())
    }

    /// Set a line's quantity. Zero behaves exactly like [`Self::remove_item`].
    pub async fn update_quantity(
        &self,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<(), CartError> {
        if quantity == 0 {
            return self.remove_item(product_id).await;
        }
        if quantity > MAX_LINE_QUANTITY {
            return Err(CommerceError::validation(format!(
                "quantity must be between 1 and {MAX_LINE_QUANTITY}"
            ))
            .into());
        }
        let user = self.require_user()?;

        let mut state = self.state.lock().await;
        self.gateway
            .update_cart_item(user, product_id, quantity)
            .await
            .inspect_err(|e| warn!(product = %product_id, error = %e, "quantity update failed"))?;

        state.lines = self.reload(user).await?;
        debug!(product = %product_id, quantity, "cart line updated");
        Ok(())
    }

    /// Empty the cart. Irreversible.
    pub async fn clear(&self) -> Result<(), CartError> {
        let user = self.require_user()?;

        let mut state = self.state.lock().await;
        self.gateway
            .clear_cart(user)
            .await
            .inspect_err(|e| warn!(error = %e, "clear cart failed"))?;

        state.lines = self.reload(user).await?;
        debug!("cart cleared");
        Ok(())
    }

    /// Validate and select a coupon against the current cart.
    ///
    /// Any failure — unknown/expired/ineligible code or a gateway error
    /// while fetching the active list — clears a previously applied
    /// discount, so the UI never shows a stale figure next to an error.
    pub async fn apply_coupon(
        &self,
        code: &str,
        is_first_time_customer: bool,
    ) -> Result<AppliedCoupon, CartError> {
        self.require_user()?;

        let mut state = self.state.lock().await;
        let subtotal = compute_subtotal(&state.lines);

        let coupons = match self.gateway.active_coupons().await {
            Ok(coupons) => coupons,
            Err(e) => {
                warn!(error = %e, "failed to fetch active coupons");
                state.applied = None;
                return Err(e.into());
            }
        };

        match apply_coupon(&coupons, code, subtotal, is_first_time_customer, Utc::now()) {
            Ok(applied) => {
                debug!(code = %applied.coupon.code, discount = applied.discount, "coupon applied");
                state.applied = Some(applied.clone());
                Ok(applied)
            }
            Err(e) => {
                state.applied = None;
                Err(e.into())
            }
        }
    }

    /// Clear the transient coupon selection. Usage counters are untouched.
    pub async fn remove_coupon(&self) {
        self.state.lock().await.applied = None;
    }

    /// Read-only view of lines and the applied coupon.
    pub async fn snapshot(&self) -> CartSnapshot {
        let state = self.state.lock().await;
        CartSnapshot {
            lines: state.lines.clone(),
            applied_coupon: state.applied.clone(),
        }
    }

    /// Derived totals. The discount is re-clamped against the live subtotal
    /// on every call, so a cart change after coupon application can only
    /// shrink it — a stale discount can never exceed the new subtotal.
    pub async fn totals(&self) -> CartTotals {
        let state = self.state.lock().await;
        let subtotal = compute_subtotal(&state.lines);
        let discount = state
            .applied
            .as_ref()
            .map(|a| a.coupon.discount_for(subtotal))
            .unwrap_or(0);
        CartTotals {
            subtotal,
            discount,
            total: subtotal - discount,
        }
    }

    /// Fetch the authoritative cart, pruning any zero-quantity lines the
    /// backend might serve (a line at quantity 0 is never retained).
    async fn reload(&self, user: UserId) -> Result<Vec<CartLine>, GatewayError> {
        let mut lines = self.gateway.fetch_cart(user).await?;
        lines.retain(|l| l.quantity > 0);
        Ok(lines)
    }
}
