//! Value objects returned by remote rules, the composers that build them from
//! decoded rule output, and the identifier formats checked before dispatch.

mod collections;
pub mod compose;
mod drop_zones;
mod error;
pub mod ids;
mod projects;
mod resources;
mod users;

pub use collections::*;
pub use compose::{FromRuleResult, compose};
pub use drop_zones::*;
pub use error::{ShapeError, ValidationError};
pub use projects::*;
pub use resources::*;
pub use users::*;

#[cfg(test)]
mod tests;
