//! Identity/session provider
//!
//! The upload flow only needs to know who the current user is; everything
//! else about authentication is the provider's business.

use crate::error::AppResult;
use async_trait::async_trait;

/// The authenticated user behind the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSession {
    /// Stable user identifier, also used as the rate-limit fingerprint.
    pub user_id: String,
}

/// Resolves the current session, if any.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Returns the current user, or `None` when unauthenticated.
    async fn current_user(&self) -> AppResult<Option<UserSession>>;
}

/// Session provider with a fixed user. Useful for tests and local tools.
#[derive(Debug, Clone, Default)]
pub struct StaticSessionProvider {
    user: Option<UserSession>,
}

impl StaticSessionProvider {
    pub fn authenticated(user_id: impl Into<String>) -> Self {
        Self {
            user: Some(UserSession {
                user_id: user_id.into(),
            }),
        }
    }

    pub fn anonymous() -> Self {
        Self { user: None }
    }
}

#[async_trait]
impl SessionProvider for StaticSessionProvider {
    async fn current_user(&self) -> AppResult<Option<UserSession>> {
        Ok(self.user.clone())
    }
}
