use rulewrap_types::Resources;

use crate::error::RuleResult;
use crate::manager::RuleManager;
use crate::pipeline::RuleCall;
use crate::session::RuleSession;

impl<S: RuleSession> RuleManager<S> {
    /// Storage resources a project can be created on, with their availability.
    pub async fn get_destination_resources_status(&self) -> RuleResult<Resources> {
        self.call_typed(RuleCall::new("get_destination_resources_status"))
            .await
    }

    /// Lifetime in seconds of temporary passwords issued by the server.
    pub async fn get_temporary_password_lifetime(&self) -> RuleResult<i64> {
        self.call_typed(RuleCall::new("get_temporary_password_lifetime"))
            .await
    }
}
