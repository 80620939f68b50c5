//! The single owned session container.
//!
//! Many UI surfaces read the session; only sign-in/sign-out write it. All
//! writes funnel through [`SessionStore`] so no reader can mutate session
//! state directly.

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use tracing::info;

use snackkart_core::UserId;

/// Role hint for UI gating. Never an authorization decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Customer,
    Admin,
}

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
    pub name: String,
    pub role: Role,
    pub token: String,
}

/// Shared, thread-safe holder for the current session.
///
/// Cheap to clone; clones share the same underlying state.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sign_in(&self, session: Session) {
        info!(user = %session.user_id, "session established");
        *self.inner.write().expect("session lock poisoned") = Some(session);
    }

    pub fn sign_out(&self) {
        let mut guard = self.inner.write().expect("session lock poisoned");
        if let Some(session) = guard.take() {
            info!(user = %session.user_id, "session ended");
        }
    }

    /// Snapshot of the current session, if any.
    pub fn current(&self) -> Option<Session> {
        self.inner.read().expect("session lock poisoned").clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.read().expect("session lock poisoned").is_some()
    }

    pub fn current_user(&self) -> Option<UserId> {
        self.inner
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .map(|s| s.user_id)
    }

    /// Whether the admin console should be rendered. UI hint only.
    pub fn is_admin_hint(&self) -> bool {
        self.inner
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .is_some_and(|s| s.role == Role::Admin)
    }
}
