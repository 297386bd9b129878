use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::{RuleReply, RuleSession};
use crate::error::SessionError;
use crate::pipeline::{ParameterTable, PreparedRule, RESULT_SLOT};

/// What a [`ScriptedSession`] saw for one execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutedRule {
    pub rule_name: String,
    pub body: String,
    pub params: ParameterTable,
}

#[derive(Default)]
struct Script {
    replies: VecDeque<Result<RuleReply, SessionError>>,
    executed: Vec<ExecutedRule>,
    closed: bool,
}

/// In-memory session that answers from a queue of canned replies and records
/// every rule it is asked to run. Clones share the same script.
#[derive(Clone, Default)]
pub struct ScriptedSession {
    inner: Arc<Mutex<Script>>,
}

impl ScriptedSession {
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn push_reply(&self, reply: RuleReply) -> &Self {
        self.script().replies.push_back(Ok(reply));
        self
    }

    /// Queue a reply whose `*result` slot holds `payload`.
    pub fn push_result(&self, payload: impl Into<String>) -> &Self {
        self.push_reply(RuleReply::empty().with_output(RESULT_SLOT, payload))
    }

    pub fn push_error(&self, err: SessionError) -> &Self {
        self.script().replies.push_back(Err(err));
        self
    }

    pub fn executed(&self) -> Vec<ExecutedRule> {
        self.script().executed.clone()
    }

    pub fn last_executed(&self) -> Option<ExecutedRule> {
        self.script().executed.last().cloned()
    }

    pub fn pending_replies(&self) -> usize {
        self.script().replies.len()
    }

    pub fn is_closed(&self) -> bool {
        self.script().closed
    }
}

#[async_trait]
impl RuleSession for ScriptedSession {
    async fn execute(&self, rule: &PreparedRule) -> Result<RuleReply, SessionError> {
        let mut script = self.script();
        if script.closed {
            return Err(SessionError::Closed);
        }
        script.executed.push(ExecutedRule {
            rule_name: rule.rule_name.clone(),
            body: rule.body.clone(),
            params: rule.params.clone(),
        });
        script.replies.pop_front().unwrap_or_else(|| {
            Err(SessionError::Transport(format!(
                "no scripted reply for rule '{}'",
                rule.rule_name
            )))
        })
    }

    async fn close(&self) -> Result<(), SessionError> {
        self.script().closed = true;
        Ok(())
    }
}
