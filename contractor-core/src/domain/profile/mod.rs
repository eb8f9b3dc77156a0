//! Contractor profile editing
//!
//! - [`phone`]: canonical/display phone normalization
//! - [`validation`]: pre-save checks
//! - [`image`]: image storage paths and cache-busting URLs
//! - [`editor`]: load sequencing, edits, save and upload orchestration

pub mod editor;
pub mod image;
pub mod phone;
pub mod state;
pub mod validation;

pub use editor::{
    ActivationReport, DeleteRequestOutcome, EditorPorts, EditorSettings,
    ProfileEditor, ProfileLoad, ReferenceNoticePolicy, SaveOutcome,
    UploadOutcome,
};
pub use image::SelectedImage;
pub use state::{BusyReason, EditorState};
pub use validation::{ValidationError, validate_profile};
