//! The reqwest-backed gateway client.

use std::sync::RwLock;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use snackkart_auth::Session;
use snackkart_catalog::Product;
use snackkart_cart::{CartGateway, CartLine, Coupon};
use snackkart_checkout::{OrderConfirmation, OrderDraft, OrderGateway};
use snackkart_core::{GatewayError, ProductId, UserId};

use crate::dto::{Credentials, LoginResponse, RegisterRequest};

/// Deadline for every request. A timeout surfaces as
/// [`GatewayError::Timeout`] — a retryable, user-reported failure, never a
/// silent hang.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the commerce backend.
///
/// Holds one connection-pooling `reqwest::Client` and an optional bearer
/// token that [`Self::login`] fills in.
#[derive(Debug)]
pub struct HttpGateway {
    base_url: String,
    http: reqwest::Client,
    token: RwLock<Option<String>>,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            token: RwLock::new(None),
        })
    }

    pub fn set_token(&self, token: Option<String>) {
        *self.token.write().expect("token lock poisoned") = token;
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.token.read().expect("token lock poisoned").as_deref() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, GatewayError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GatewayError::Api(status.as_u16(), body));
        }
        resp.json::<T>()
            .await
            .map_err(|e| GatewayError::Parse(e.to_string()))
    }

    async fn expect_success(resp: reqwest::Response) -> Result<(), GatewayError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GatewayError::Api(status.as_u16(), body));
        }
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let resp = self
            .authorize(self.http.get(self.url(path)))
            .send()
            .await
            .map_err(map_reqwest)?;
        Self::decode(resp).await
    }

    async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), GatewayError> {
        let resp = self
            .authorize(self.http.post(self.url(path)))
            .json(body)
            .send()
            .await
            .map_err(map_reqwest)?;
        Self::expect_success(resp).await
    }

    /// Full catalog snapshot. `GET /products`.
    pub async fn get_products(&self) -> Result<Vec<Product>, GatewayError> {
        self.get_json("/products").await
    }

    /// Authenticate and return a ready session; the bearer token is kept
    /// for subsequent calls. `POST /auth/login`.
    pub async fn login(&self, credentials: &Credentials) -> Result<Session, GatewayError> {
        let resp = self
            .http
            .post(self.url("/auth/login"))
            .json(credentials)
            .send()
            .await
            .map_err(map_reqwest)?;
        let login: LoginResponse = Self::decode(resp).await?;

        self.set_token(Some(login.token.clone()));
        debug!(user = %login.user_id, "login succeeded");
        Ok(Session {
            user_id: login.user_id,
            name: login.name,
            role: login.role,
            token: login.token,
        })
    }

    /// `POST /auth/register`.
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), GatewayError> {
        self.post_json("/auth/register", request).await
    }
}

impl CartGateway for HttpGateway {
    /// `GET /cart`. The token identifies the user; the id is for tracing.
    async fn fetch_cart(&self, user: UserId) -> Result<Vec<CartLine>, GatewayError> {
        debug!(user = %user, "fetching cart");
        self.get_json("/cart").await
    }

    async fn add_to_cart(
        &self,
        user: UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<(), GatewayError> {
        debug!(user = %user, product = %product_id, quantity, "add to cart");
        self.post_json(
            "/cart/items",
            &json!({ "product_id": product_id, "quantity": quantity }),
        )
        .await
    }

    async fn update_cart_item(
        &self,
        user: UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<(), GatewayError> {
        debug!(user = %user, product = %product_id, quantity, "update cart item");
        let resp = self
            .authorize(self.http.put(self.url(&format!("/cart/items/{product_id}"))))
            .json(&json!({ "quantity": quantity }))
            .send()
            .await
            .map_err(map_reqwest)?;
        Self::expect_success(resp).await
    }

    async fn remove_from_cart(
        &self,
        user: UserId,
        product_id: ProductId,
    ) -> Result<(), GatewayError> {
        debug!(user = %user, product = %product_id, "remove from cart");
        let resp = self
            .authorize(
                self.http
                    .delete(self.url(&format!("/cart/items/{product_id}"))),
            )
            .send()
            .await
            .map_err(map_reqwest)?;
        Self::expect_success(resp).await
    }

    async fn clear_cart(&self, user: UserId) -> Result<(), GatewayError> {
        debug!(user = %user, "clearing cart");
        let resp = self
            .authorize(self.http.delete(self.url("/cart")))
            .send()
            .await
            .map_err(map_reqwest)?;
        Self::expect_success(resp).await
    }

    /// `GET /coupons/active`.
    async fn active_coupons(&self) -> Result<Vec<Coupon>, GatewayError> {
        self.get_json("/coupons/active").await
    }
}

impl OrderGateway for HttpGateway {
    /// `POST /orders`.
    async fn place_order(&self, draft: &OrderDraft) -> Result<OrderConfirmation, GatewayError> {
        let resp = self
            .authorize(self.http.post(self.url("/orders")))
            .json(draft)
            .send()
            .await
            .map_err(map_reqwest)?;
        Self::decode(resp).await
    }

    /// `POST /coupons/{code}/usage`. Best-effort from the caller's side.
    async fn increment_coupon_usage(&self, code: &str) -> Result<(), GatewayError> {
        self.post_json(&format!("/coupons/{code}/usage"), &json!({}))
            .await
    }
}

fn map_reqwest(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::Network(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joining_normalizes_slashes() {
        let gw = HttpGateway::new("http://localhost:8080/").unwrap();
        assert_eq!(gw.url("/products"), "http://localhost:8080/products");
        assert_eq!(gw.url("cart"), "http://localhost:8080/cart");
    }
}
