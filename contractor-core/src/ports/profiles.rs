use async_trait::async_trait;
use contractor_model::{ContractorProfile, UserId};

use crate::error::Result;

// Profile persistence keyed by the owning user
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn fetch(&self, user_id: &UserId)
    -> Result<Option<ContractorProfile>>;

    /// Insert or replace the profile stored for `user_id`.
    async fn upsert(
        &self,
        user_id: &UserId,
        profile: &ContractorProfile,
    ) -> Result<()>;
}
