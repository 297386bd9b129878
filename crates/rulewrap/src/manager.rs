use std::sync::Arc;
use std::time::Duration;

use rulewrap_types::{FromRuleResult, compose};
use serde_json::Value;

use crate::cache::{IdentityCache, TtlCache};
use crate::config::ClientConfig;
use crate::error::{RuleError, RuleResult};
use crate::pipeline::{RuleCall, decode, invoke, prepare};
use crate::session::{HttpRuleSession, RuleSession};

/// Entry point for every rule call: owns one session and the identity cache.
///
/// The per-domain operations (`get_projects`, `create_drop_zone`, ...) are
/// defined in the `rules` modules as further `impl` blocks on this type.
pub struct RuleManager<S: RuleSession> {
    session: S,
    identities: Arc<dyn IdentityCache>,
}

impl<S: RuleSession> RuleManager<S> {
    pub fn new(session: S, identities: Arc<dyn IdentityCache>) -> Self {
        Self {
            session,
            identities,
        }
    }

    pub fn with_ttl(session: S, ttl: Duration) -> Self {
        Self::new(session, Arc::new(TtlCache::new(ttl)))
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn identity_cache(&self) -> &Arc<dyn IdentityCache> {
        &self.identities
    }

    pub async fn close(&self) -> RuleResult<()> {
        self.session.close().await?;
        Ok(())
    }

    /// Run `call` through serialize, invoke and decode. Returns the decoded
    /// `*result` value, or `None` when the call asks for no result.
    pub async fn call(&self, call: RuleCall) -> RuleResult<Option<Value>> {
        let prepared = prepare(&call);
        let Some(payload) = invoke(&self.session, &prepared).await? else {
            return Ok(None);
        };
        let value = decode(&payload).map_err(RuleError::Decode)?;
        Ok(Some(value))
    }

    /// Like [`RuleManager::call`], composing the result into `T`.
    pub async fn call_typed<T: FromRuleResult>(&self, call: RuleCall) -> RuleResult<T> {
        let value = self.call(call.with_result()).await?.unwrap_or(Value::Null);
        Ok(compose(value)?)
    }

    /// Run a rule for its side effect only.
    pub async fn call_unit(&self, call: RuleCall) -> RuleResult<()> {
        self.call(call.without_result()).await?;
        Ok(())
    }
}

impl RuleManager<HttpRuleSession> {
    /// Open an HTTP session for `config` with a [`TtlCache`] of `config.cache_ttl`.
    pub fn connect(config: &ClientConfig) -> RuleResult<Self> {
        let session = HttpRuleSession::new(config)?;
        Ok(Self::with_ttl(session, config.cache_ttl))
    }
}
