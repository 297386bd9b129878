//! Client for invoking rules on a remote rule-execution server.
//!
//! Every manager method follows the same pipeline: describe the call as a
//! [`RuleCall`], serialize it into a rule body and parameter table, execute it
//! over a [`RuleSession`], decode the `*result` output as JSON and compose it
//! into a typed value from [`rulewrap_types`].

pub mod cache;
pub mod config;
pub mod error;
mod manager;
pub mod pipeline;
mod rules;
pub mod session;

pub use cache::{IdentityCache, TtlCache};
pub use config::ClientConfig;
pub use error::{ConfigError, RuleError, RuleResult, SessionError};
pub use manager::RuleManager;
pub use pipeline::{ParameterTable, PreparedRule, RuleArg, RuleCall};
pub use rules::{NewDropZone, NewProject};
pub use session::{ExecutedRule, HttpRuleSession, RuleReply, RuleSession, ScriptedSession};

pub use rulewrap_types as types;
