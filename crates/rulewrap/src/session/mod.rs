//! Sessions execute one prepared rule at a time against the server.

mod http;
mod scripted;

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::pipeline::PreparedRule;

pub use http::HttpRuleSession;
pub use scripted::{ExecutedRule, ScriptedSession};

/// Output envelope of one rule execution: named slots holding raw text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleReply {
    #[serde(default)]
    pub outputs: IndexMap<String, String>,
}

impl RuleReply {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_output(mut self, slot: impl Into<String>, payload: impl Into<String>) -> Self {
        self.outputs.insert(slot.into(), payload.into());
        self
    }

    pub fn get(&self, slot: &str) -> Option<&str> {
        self.outputs.get(slot).map(String::as_str)
    }

    pub fn take(&mut self, slot: &str) -> Option<String> {
        self.outputs.shift_remove(slot)
    }
}

/// A stateful, authenticated connection to the rule server.
///
/// One session serves every call issued through its manager. Calls are
/// awaited one at a time; implementations need no internal ordering.
#[async_trait]
pub trait RuleSession: Send + Sync {
    async fn execute(&self, rule: &PreparedRule) -> Result<RuleReply, SessionError>;

    /// Release the connection. Later calls fail with [`SessionError::Closed`].
    async fn close(&self) -> Result<(), SessionError> {
        Ok(())
    }
}

#[async_trait]
impl<S: RuleSession + ?Sized> RuleSession for std::sync::Arc<S> {
    async fn execute(&self, rule: &PreparedRule) -> Result<RuleReply, SessionError> {
        (**self).execute(rule).await
    }

    async fn close(&self) -> Result<(), SessionError> {
        (**self).close().await
    }
}
