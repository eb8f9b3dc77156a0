use async_trait::async_trait;
use contractor_model::UserId;

use crate::error::Result;

/// Currently authenticated account, if any.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn current_user(&self) -> Result<Option<UserId>>;
}

/// Parameters the editor was opened with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationParams {
    /// Explicit target account; takes precedence over the session.
    pub user_id: Option<String>,
}

impl NavigationParams {
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }
}
