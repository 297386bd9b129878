use rulewrap_types::ids::{
    AccessLevel, AclMode, CollectionId, IsoDate, ObjectPath, ProjectId, ProjectPath, require_text,
};
use rulewrap_types::{
    ContributingProjects, CreatedProject, ManagingProjects, MigrationCards, Project, ProjectCosts,
    Projects, ValidationError,
};

use crate::error::RuleResult;
use crate::manager::RuleManager;
use crate::pipeline::{ParameterTable, RuleCall, execute_block};
use crate::session::RuleSession;

/// Request for `create_new_project`.
///
/// Dates are `YYYY-MM-DD` and the quota must be positive; both are checked
/// before the rule is sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewProject {
    pub authorization_period_end_date: String,
    pub data_retention_period_end_date: String,
    pub ingest_resource: String,
    pub resource: String,
    pub storage_quota_gb: u64,
    pub title: String,
    pub principal_investigator: String,
    pub data_steward: String,
    pub responsible_cost_center: String,
    pub collection_metadata_schemas: String,
    pub open_access: bool,
    pub tape_archive: bool,
    pub tape_unarchive: bool,
    pub enable_dropzone_sharing: bool,
}

impl NewProject {
    pub fn validate(&self) -> Result<(), ValidationError> {
        IsoDate::new(self.authorization_period_end_date.as_str())?;
        IsoDate::new(self.data_retention_period_end_date.as_str())?;
        if self.storage_quota_gb == 0 {
            return Err(ValidationError::argument(
                "storage quota",
                "must be greater than zero",
            ));
        }
        require_text("title", &self.title)?;
        require_text("ingest resource", &self.ingest_resource)?;
        require_text("resource", &self.resource)?;
        require_text("principal investigator", &self.principal_investigator)?;
        require_text("data steward", &self.data_steward)?;
        require_text("responsible cost center", &self.responsible_cost_center)?;
        Ok(())
    }

    fn to_call(&self) -> RuleCall {
        RuleCall::new("create_new_project")
            .arg(&self.authorization_period_end_date)
            .arg(&self.data_retention_period_end_date)
            .arg(&self.ingest_resource)
            .arg(&self.resource)
            .arg(self.storage_quota_gb)
            .arg(&self.title)
            .arg(&self.principal_investigator)
            .arg(&self.data_steward)
            .arg(&self.responsible_cost_center)
            .arg(&self.collection_metadata_schemas)
            .arg(self.open_access)
            .arg(self.tape_archive)
            .arg(self.tape_unarchive)
            .arg(self.enable_dropzone_sharing)
    }
}

impl<S: RuleSession> RuleManager<S> {
    pub async fn create_new_project(&self, project: &NewProject) -> RuleResult<CreatedProject> {
        project.validate()?;
        self.call_typed(project.to_call()).await
    }

    pub async fn get_project_details(
        &self,
        project_path: &str,
        show_service_accounts: bool,
    ) -> RuleResult<Project> {
        let project_path = ProjectPath::new(project_path)?;
        self.call_typed(
            RuleCall::new("get_project_details")
                .arg(project_path)
                .arg(show_service_accounts),
        )
        .await
    }

    pub async fn get_projects(&self, show_service_accounts: bool) -> RuleResult<Projects> {
        self.call_typed(RuleCall::new("get_projects").arg(show_service_accounts))
            .await
    }

    /// Roles of the project the current user manages, or `None` when the
    /// server reports nothing.
    pub async fn get_managing_project(
        &self,
        project_id: &str,
    ) -> RuleResult<Option<ManagingProjects>> {
        let project_id = ProjectId::new(project_id)?;
        self.call_typed(RuleCall::new("get_managing_project").arg(project_id))
            .await
    }

    pub async fn get_contributing_projects(
        &self,
        show_service_accounts: bool,
    ) -> RuleResult<Option<ContributingProjects>> {
        self.call_typed(RuleCall::new("get_contributing_projects").arg(show_service_accounts))
            .await
    }

    pub async fn get_project_acl_for_manager(
        &self,
        project_id: &str,
        show_service_accounts: bool,
    ) -> RuleResult<Project> {
        let project_id = ProjectId::new(project_id)?;
        self.call_typed(
            RuleCall::new("get_project_acl_for_manager")
                .arg(project_id)
                .arg(show_service_accounts),
        )
        .await
    }

    /// Grant `access_level` on `path` to `user`. `mode` is `default` or
    /// `recursive`; `access_level` one of `null`, `read`, `write`, `own`.
    pub async fn set_acl(
        &self,
        mode: &str,
        access_level: &str,
        user: &str,
        path: &str,
    ) -> RuleResult<()> {
        let mode: AclMode = mode.parse()?;
        let access_level: AccessLevel = access_level.parse()?;
        require_text("user", user)?;
        let path = ObjectPath::new(path)?;
        self.call_unit(
            RuleCall::new("set_acl")
                .arg(mode)
                .arg(access_level)
                .arg(user)
                .arg(path),
        )
        .await
    }

    pub async fn get_project_migration_status(
        &self,
        project_path: &str,
    ) -> RuleResult<MigrationCards> {
        let project_path = ProjectPath::new(project_path)?;
        self.call_typed(RuleCall::new("get_project_migration_status").arg(project_path))
            .await
    }

    pub async fn get_projects_finance(&self) -> RuleResult<ProjectCosts> {
        self.call_typed(RuleCall::new("get_projects_finance")).await
    }

    /// Grant `user` temporary `rights` on a project collection so it can be
    /// modified, through the legacy `openProjectCollection` rule.
    pub async fn open_project_collection(
        &self,
        project_id: &str,
        collection_id: &str,
        user: &str,
        rights: &str,
    ) -> RuleResult<()> {
        let project_id = ProjectId::new(project_id)?;
        let collection_id = CollectionId::new(collection_id)?;
        require_text("user", user)?;
        let rights: AccessLevel = rights.parse()?;

        let params = ParameterTable::new()
            .quoted("*project", project_id)
            .quoted("*projectCollection", collection_id)
            .quoted("*user", user)
            .quoted("*rights", rights.as_str());
        self.call_unit(
            RuleCall::new("openProjectCollection")
                .literal_body(execute_block(
                    "openProjectCollection(*project,*projectCollection,*user,*rights);",
                ))
                .literal_params(params),
        )
        .await
    }

    /// Revoke the temporary rights granted by
    /// [`RuleManager::open_project_collection`].
    pub async fn close_project_collection(
        &self,
        project_id: &str,
        collection_id: &str,
    ) -> RuleResult<()> {
        let project_id = ProjectId::new(project_id)?;
        let collection_id = CollectionId::new(collection_id)?;

        let params = ParameterTable::new()
            .quoted("*project", project_id)
            .quoted("*projectCollection", collection_id);
        self.call_unit(
            RuleCall::new("closeProjectCollection")
                .literal_body(execute_block(
                    "closeProjectCollection(*project,*projectCollection);",
                ))
                .literal_params(params),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> NewProject {
        NewProject {
            authorization_period_end_date: "2030-01-01".into(),
            data_retention_period_end_date: "2040-01-01".into(),
            ingest_resource: "ires-hnas-umResource".into(),
            resource: "replRescUM01".into(),
            storage_quota_gb: 10,
            title: "Intestinal organoids".into(),
            principal_investigator: "p.vanschayck@maastrichtuniversity.nl".into(),
            data_steward: "opalmen".into(),
            responsible_cost_center: "UM-30001234X".into(),
            collection_metadata_schemas: "DataHub_general_schema".into(),
            ..NewProject::default()
        }
    }

    #[test]
    fn complete_request_validates() {
        assert_eq!(request().validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_dates_and_zero_quota() {
        let bad_date = NewProject {
            data_retention_period_end_date: "01-01-2040".into(),
            ..request()
        };
        assert!(matches!(
            bad_date.validate(),
            Err(ValidationError::InvalidIdentifier { kind: "date", .. })
        ));

        let no_quota = NewProject {
            storage_quota_gb: 0,
            ..request()
        };
        assert!(matches!(
            no_quota.validate(),
            Err(ValidationError::InvalidArgument {
                field: "storage quota",
                ..
            })
        ));
    }

    #[test]
    fn call_lists_every_field_in_order() {
        let call = request().to_call();
        assert_eq!(call.rule_name, "create_new_project");
        assert_eq!(call.args.len(), 14);
        assert_eq!(call.args[4].as_str(), "10");
        assert_eq!(call.args[13].as_str(), "false");
    }
}
