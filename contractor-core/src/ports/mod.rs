//! Collaborator boundaries consumed by the profile editor.
//!
//! Each port is an object-safe async trait so the editor can hold
//! `Arc<dyn Port>` handles and tests can substitute in-memory fakes.

pub mod images;
pub mod presentation;
pub mod profiles;
pub mod reference;
pub mod reputation;
pub mod session;

pub use images::{ImageStore, UploadOptions};
pub use presentation::{
    ConfirmPrompt, Confirmer, Navigator, Notice, Notifier, Route, Severity,
};
pub use profiles::ProfileStore;
pub use reference::ReferenceDataProvider;
pub use reputation::ReputationProvider;
pub use session::{NavigationParams, SessionProvider};
