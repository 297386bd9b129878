use rulewrap_types::ids::AccountId;
use rulewrap_types::{Groups, Users};

use crate::error::RuleResult;
use crate::manager::RuleManager;
use crate::pipeline::RuleCall;
use crate::session::RuleSession;

impl<S: RuleSession> RuleManager<S> {
    pub async fn get_groups(&self, show_service_accounts: bool) -> RuleResult<Groups> {
        self.call_typed(RuleCall::new("get_groups").arg(show_service_accounts))
            .await
    }

    pub async fn get_users_in_group(&self, group_id: &str) -> RuleResult<Users> {
        let group_id = AccountId::new(group_id)?;
        self.call_typed(RuleCall::new("get_users_in_group").arg(group_id))
            .await
    }
}
