//! Core data model definitions shared across the contractor profile crates.
#![allow(missing_docs)]

pub mod badge;
pub mod error;
pub mod ids;
pub mod profile;
pub mod reference;

// Intentionally curated re-exports for downstream consumers.
pub use badge::UserBadge;
pub use error::{ModelError, Result as ModelResult};
pub use ids::UserId;
pub use profile::{ContractorProfile, ProfileField};
pub use reference::{Service, StateEntry, us_states};
