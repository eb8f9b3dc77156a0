//! Configuration for the contractor profile editor.
//!
//! Settings come from a TOML/JSON file or inline JSON named by environment
//! variables, fall back to well-known file locations and finally to
//! defaults. [`ConfigLoader`] runs the lookup and the guard rails in one go.

#![allow(missing_docs)]

pub mod error;
pub mod loader;
pub mod models;
pub mod validation;

pub use error::ConfigLoadError;
pub use loader::{ConfigLoad, ConfigLoader};
pub use models::{ConfigSource, EditorConfig, NoticeConfig, StorageConfig};
pub use validation::{ConfigGuardRailError, ConfigWarning, ConfigWarnings};
