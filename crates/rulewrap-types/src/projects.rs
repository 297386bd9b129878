use serde::{Deserialize, Serialize};

use crate::compose::{
    bool_text, f64_text, list_shape, opt_bool_text, rule_result_shapes, sentinel_shapes,
    text_or_number,
};
use crate::users::{Groups, Users};

/// Users and groups holding one role (manager, contributor, viewer) on a project.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectMembers {
    #[serde(default)]
    pub users: Users,
    #[serde(default)]
    pub groups: Groups,
}

impl ProjectMembers {
    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.groups.is_empty()
    }
}

/// A project with its settings and role lists.
///
/// Only `project`/`id` and `title` are required. Missing archive and export
/// flags read as `false`; a missing `enableDropzoneSharing` stays `None`
/// because older servers never sent it and callers fall back to their own
/// default. Missing role lists compose to empty members.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "ProjectRecord")]
pub struct Project {
    pub id: String,
    pub path: String,
    pub title: String,
    pub principal_investigator_display_name: String,
    pub data_steward_display_name: String,
    pub resp_cost_center: String,
    #[serde(rename = "storageQuotaGiB")]
    pub storage_quota_gib: f64,
    #[serde(rename = "dataSizeGiB")]
    pub data_size_gib: f64,
    pub collection_metadata_schemas: String,
    pub enable_open_access_export: bool,
    pub enable_archive: bool,
    pub enable_unarchive: bool,
    pub enable_dropzone_sharing: Option<bool>,
    #[serde(rename = "has_financial_view_access")]
    pub has_financial_view_access: bool,
    pub managers: ProjectMembers,
    pub contributors: ProjectMembers,
    pub viewers: ProjectMembers,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectRecord {
    #[serde(default, deserialize_with = "opt_text_or_number")]
    project: Option<String>,
    #[serde(default, deserialize_with = "opt_text_or_number")]
    id: Option<String>,
    #[serde(default)]
    path: String,
    title: String,
    #[serde(default)]
    principal_investigator_display_name: String,
    #[serde(default)]
    data_steward_display_name: String,
    #[serde(default)]
    resp_cost_center: String,
    #[serde(rename = "storageQuotaGiB", default, deserialize_with = "f64_text")]
    storage_quota_gib: f64,
    #[serde(rename = "dataSizeGiB", default, deserialize_with = "f64_text")]
    data_size_gib: f64,
    #[serde(default)]
    collection_metadata_schemas: String,
    #[serde(default, deserialize_with = "bool_text")]
    enable_open_access_export: bool,
    #[serde(default, deserialize_with = "bool_text")]
    enable_archive: bool,
    #[serde(default, deserialize_with = "bool_text")]
    enable_unarchive: bool,
    #[serde(default, deserialize_with = "opt_bool_text")]
    enable_dropzone_sharing: Option<bool>,
    #[serde(
        rename = "has_financial_view_access",
        default,
        deserialize_with = "bool_text"
    )]
    has_financial_view_access: bool,
    #[serde(default)]
    managers: ProjectMembers,
    #[serde(default)]
    contributors: ProjectMembers,
    #[serde(default)]
    viewers: ProjectMembers,
}

impl From<ProjectRecord> for Project {
    fn from(record: ProjectRecord) -> Self {
        Self {
            id: record.project.or(record.id).unwrap_or_default(),
            path: record.path,
            title: record.title,
            principal_investigator_display_name: record.principal_investigator_display_name,
            data_steward_display_name: record.data_steward_display_name,
            resp_cost_center: record.resp_cost_center,
            storage_quota_gib: record.storage_quota_gib,
            data_size_gib: record.data_size_gib,
            collection_metadata_schemas: record.collection_metadata_schemas,
            enable_open_access_export: record.enable_open_access_export,
            enable_archive: record.enable_archive,
            enable_unarchive: record.enable_unarchive,
            enable_dropzone_sharing: record.enable_dropzone_sharing,
            has_financial_view_access: record.has_financial_view_access,
            managers: record.managers,
            contributors: record.contributors,
            viewers: record.viewers,
        }
    }
}

fn opt_text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    text_or_number(deserializer).map(Some)
}

list_shape!(
    /// Projects visible to the current user.
    Projects,
    projects,
    Project
);

/// Who manages a project, as seen by one of its managers.
///
/// Composed as `Option<ManagingProjects>`: the server answers `{}` when the
/// caller manages nothing, which composes to `None`. `managers` is required
/// once the mapping is populated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagingProjects {
    #[serde(default)]
    pub principal_investigator: String,
    #[serde(default)]
    pub data_steward: String,
    pub managers: Users,
    #[serde(default)]
    pub manager_groups: Groups,
}

/// A project the current user may deposit data into.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "ContributingProjectRecord")]
pub struct ContributingProject {
    pub id: String,
    pub title: String,
    pub resource: String,
    pub collection_metadata_schemas: String,
    pub enable_dropzone_sharing: bool,
    pub managers: ProjectMembers,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributingProjectRecord {
    #[serde(default, deserialize_with = "opt_text_or_number")]
    project: Option<String>,
    #[serde(default, deserialize_with = "opt_text_or_number")]
    id: Option<String>,
    title: String,
    #[serde(default)]
    resource: String,
    #[serde(default)]
    collection_metadata_schemas: String,
    #[serde(default, deserialize_with = "bool_text")]
    enable_dropzone_sharing: bool,
    #[serde(default)]
    managers: ProjectMembers,
}

impl From<ContributingProjectRecord> for ContributingProject {
    fn from(record: ContributingProjectRecord) -> Self {
        Self {
            id: record.project.or(record.id).unwrap_or_default(),
            title: record.title,
            resource: record.resource,
            collection_metadata_schemas: record.collection_metadata_schemas,
            enable_dropzone_sharing: record.enable_dropzone_sharing,
            managers: record.managers,
        }
    }
}

list_shape!(
    /// Projects the current user contributes to; composed as an `Option`,
    /// `None` when the user contributes to none.
    ContributingProjects,
    projects,
    ContributingProject
);

/// Identifiers of a freshly created project.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedProject {
    #[serde(deserialize_with = "text_or_number")]
    pub project_id: String,
    pub project_path: String,
}

/// Yearly and monthly storage cost of one project.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectCost {
    pub project_id: String,
    #[serde(default)]
    pub project_title: String,
    #[serde(default)]
    pub budget_number: String,
    #[serde(default, deserialize_with = "f64_text")]
    pub project_size_gib: f64,
    #[serde(default, deserialize_with = "f64_text")]
    pub project_cost_yearly: f64,
    #[serde(default, deserialize_with = "f64_text")]
    pub project_cost_monthly: f64,
    #[serde(default, deserialize_with = "f64_text")]
    pub storage_quota_gib: f64,
}

list_shape!(ProjectCosts, costs, ProjectCost);

/// Progress of an archive, unarchive or export job on one collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationCard {
    pub collection: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub repository: String,
    pub status: String,
    #[serde(default)]
    pub process_type: String,
}

list_shape!(MigrationCards, cards, MigrationCard);

rule_result_shapes!(
    Project,
    Projects,
    ProjectMembers,
    ManagingProjects,
    ContributingProject,
    ContributingProjects,
    CreatedProject,
    ProjectCosts,
    MigrationCards,
);

sentinel_shapes!(ManagingProjects, ContributingProjects);
