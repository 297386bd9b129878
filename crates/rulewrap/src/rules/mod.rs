//! Typed operations on [`crate::RuleManager`], one module per domain.
//!
//! Each method checks its inputs, describes the call as a [`crate::RuleCall`]
//! and hands it to the shared pipeline.

mod collections;
mod drop_zones;
mod groups;
mod projects;
mod resources;
mod users;

pub use drop_zones::NewDropZone;
pub use projects::NewProject;
