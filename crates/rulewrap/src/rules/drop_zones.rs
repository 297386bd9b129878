use rulewrap_types::ids::{DropZoneToken, DropZoneType, ProjectId, require_text};
use rulewrap_types::{DropZone, DropZones, ValidationError};

use crate::error::RuleResult;
use crate::manager::RuleManager;
use crate::pipeline::RuleCall;
use crate::session::RuleSession;

/// Request for `create_drop_zone`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewDropZone {
    /// `mounted` or `direct`.
    pub drop_zone_type: String,
    pub user: String,
    pub project_id: String,
    pub title: String,
    pub schema_name: String,
    pub schema_version: String,
}

impl NewDropZone {
    fn to_call(&self) -> Result<RuleCall, ValidationError> {
        let drop_zone_type: DropZoneType = self.drop_zone_type.parse()?;
        require_text("user", &self.user)?;
        let project_id = ProjectId::new(self.project_id.as_str())?;
        require_text("title", &self.title)?;
        require_text("schema name", &self.schema_name)?;
        require_text("schema version", &self.schema_version)?;

        Ok(RuleCall::new("create_drop_zone")
            .arg(drop_zone_type)
            .arg(&self.user)
            .arg(project_id)
            .arg(&self.title)
            .arg(&self.schema_name)
            .arg(&self.schema_version))
    }
}

impl<S: RuleSession> RuleManager<S> {
    /// Create a drop zone and return its token.
    pub async fn create_drop_zone(&self, drop_zone: &NewDropZone) -> RuleResult<String> {
        let call = drop_zone.to_call()?;
        self.call_typed(call).await
    }

    pub async fn get_active_drop_zones(&self, report: bool) -> RuleResult<DropZones> {
        self.call_typed(RuleCall::new("get_active_drop_zones").arg(report))
            .await
    }

    /// Look up one drop zone. With `check_format` set, the token must have
    /// the `<word>-<word>` shape; otherwise any non-empty token is sent.
    pub async fn get_active_drop_zone(
        &self,
        token: &str,
        check_format: bool,
    ) -> RuleResult<DropZone> {
        if check_format {
            DropZoneToken::new(token)?;
        } else {
            require_text("token", token)?;
        }
        self.call_typed(
            RuleCall::new("get_active_drop_zone")
                .arg(token)
                .arg(check_format),
        )
        .await
    }

    pub async fn start_ingest(&self, user: &str, token: &str) -> RuleResult<()> {
        require_text("user", user)?;
        let token = DropZoneToken::new(token)?;
        self.call_unit(RuleCall::new("start_ingest").arg(user).arg(token))
            .await
    }
}
