use rulewrap_types::ids::{AccountId, require_text};
use rulewrap_types::{AttributeValue, Groups, UserOrGroup, Users};
use tracing::debug;

use crate::error::RuleResult;
use crate::manager::RuleManager;
use crate::pipeline::RuleCall;
use crate::session::RuleSession;

impl<S: RuleSession> RuleManager<S> {
    /// Resolve a numeric account id to the user or group behind it.
    ///
    /// Fresh answers come from the identity cache; only successful lookups are
    /// stored.
    pub async fn get_user_or_group(&self, uid: &str) -> RuleResult<UserOrGroup> {
        let uid = AccountId::new(uid)?;
        if let Some(hit) = self.identity_cache().get(uid.as_str()) {
            return Ok(hit);
        }
        debug!(uid = %uid, "resolving account");
        let account: UserOrGroup = self
            .call_typed(RuleCall::new("get_user_or_group_by_id").arg(&uid))
            .await?;
        self.identity_cache().set(uid.as_str(), account.clone());
        Ok(account)
    }

    pub async fn get_users(&self) -> RuleResult<Users> {
        self.call_typed(RuleCall::new("get_all_users")).await
    }

    /// Read one metadata attribute of `username`. With `fatal` set the rule
    /// fails remotely when the attribute is absent.
    pub async fn get_user_attribute_value(
        &self,
        username: &str,
        attribute: &str,
        fatal: bool,
    ) -> RuleResult<AttributeValue> {
        require_text("username", username)?;
        require_text("attribute", attribute)?;
        self.call_typed(
            RuleCall::new("get_user_attribute_value")
                .arg(username)
                .arg(attribute)
                .arg(fatal),
        )
        .await
    }

    pub async fn get_username_from_user_id(&self, user_id: &str) -> RuleResult<String> {
        let user_id = AccountId::new(user_id)?;
        self.call_typed(RuleCall::new("get_username_from_user_id").arg(user_id))
            .await
    }

    pub async fn get_user_group_memberships(
        &self,
        show_special_groups: bool,
        user_id: &str,
    ) -> RuleResult<Groups> {
        let user_id = AccountId::new(user_id)?;
        self.call_typed(
            RuleCall::new("get_user_group_memberships")
                .arg(show_special_groups)
                .arg(user_id),
        )
        .await
    }

    /// Users eligible to act as data steward on a project.
    pub async fn get_data_stewards(&self) -> RuleResult<Users> {
        self.call_typed(RuleCall::new("get_data_stewards")).await
    }
}
