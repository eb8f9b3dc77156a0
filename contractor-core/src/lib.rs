//! # Contractor Core
//!
//! The contractor profile editing workflow: loading a profile together with
//! its reference lists and reputation figures, normalizing and validating
//! user input, and persisting the result, including the profile image
//! upload side flow.
//!
//! ## Architecture
//!
//! - [`domain::profile`]: normalizer, validator and the [`ProfileEditor`]
//!   that sequences loads, edits, saves and uploads
//! - [`ports`]: collaborator traits (stores, session, notifications,
//!   navigation) the editor is wired with
//! - [`infrastructure`]: filesystem-backed port implementations
//! - [`error`]: collaborator error type
//!
//! ## Example
//!
//! ```no_run
//! use contractor_core::domain::profile::{ProfileEditor, SaveOutcome};
//! use contractor_core::ports::NavigationParams;
//! use contractor_model::ProfileField;
//!
//! async fn edit(editor: &ProfileEditor) {
//!     editor.activate(&NavigationParams::for_user("u1")).await;
//!     editor.set_field(ProfileField::City, "Austin");
//!     let shown = editor.input_phone("5125551234");
//!     assert_eq!(shown, "(512) 555-1234");
//!
//!     if let SaveOutcome::Invalid(err) = editor.save().await {
//!         eprintln!("{err}");
//!     }
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ports;

pub use domain::profile::ProfileEditor;
pub use error::{ProfileError, Result};
