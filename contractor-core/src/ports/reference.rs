use async_trait::async_trait;
use contractor_model::{Service, StateEntry};

use crate::error::Result;

/// Static lists used to populate selection inputs.
///
/// Each call is all-or-nothing: a failure never yields a partial list.
#[async_trait]
pub trait ReferenceDataProvider: Send + Sync {
    async fn list_services(&self) -> Result<Vec<Service>>;
    async fn list_states(&self) -> Result<Vec<StateEntry>>;
}
