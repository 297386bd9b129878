use tracing::{debug, warn};

use super::PreparedRule;
use crate::error::SessionError;
use crate::session::RuleSession;

/// Execute `rule` once and return the payload of its output slot, if one was
/// requested. Session failures pass through untouched.
pub async fn invoke<S>(session: &S, rule: &PreparedRule) -> Result<Option<String>, SessionError>
where
    S: RuleSession + ?Sized,
{
    debug!(
        rule = %rule.rule_name,
        params = rule.params.len(),
        wants_result = rule.output.is_some(),
        "executing rule"
    );
    let mut reply = match session.execute(rule).await {
        Ok(reply) => reply,
        Err(err) => {
            warn!(rule = %rule.rule_name, error = %err, "rule execution failed");
            return Err(err);
        }
    };

    let Some(slot) = rule.output.as_deref() else {
        return Ok(None);
    };
    reply
        .take(slot)
        .map(Some)
        .ok_or_else(|| SessionError::MissingOutput {
            slot: slot.to_string(),
        })
}
