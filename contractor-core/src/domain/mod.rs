//! Domain logic, grouped by the entity it edits.

pub mod profile;
