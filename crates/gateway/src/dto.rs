//! Request/response payloads for the auth endpoints.

use serde::{Deserialize, Serialize};

use snackkart_auth::Role;
use snackkart_core::UserId;

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: UserId,
    pub name: String,
    #[serde(default)]
    pub role: Role,
}
