use async_trait::async_trait;
use contractor_model::{UserBadge, UserId};

use crate::error::Result;

// Read-only review statistics displayed beside the form
#[async_trait]
pub trait ReputationProvider: Send + Sync {
    async fn fetch_badge(&self, user_id: &UserId) -> Result<Option<UserBadge>>;
    async fn review_count(&self, user_id: &UserId) -> Result<u32>;
}
