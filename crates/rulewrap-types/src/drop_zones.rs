use serde::{Deserialize, Serialize};

use crate::compose::{bool_text, list_shape, rule_result_shapes, u64_text};
use crate::ids::DropZoneType;

/// A staging area where data waits before ingestion into a project.
///
/// `token`, `project`, `title`, `state` and `type` are required; everything
/// else is tolerated with `""`, `0` or `false`. `sharedWithMe` and
/// `enableDropzoneSharing` arrive as `"true"`/`"false"` text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropZone {
    pub token: String,
    pub project: String,
    #[serde(default)]
    pub project_title: String,
    pub title: String,
    pub state: String,
    #[serde(default)]
    pub validate_state: String,
    #[serde(default)]
    pub validate_msg: String,
    #[serde(default, deserialize_with = "u64_text")]
    pub total_size: u64,
    #[serde(default, deserialize_with = "u64_text")]
    pub number_of_files: u64,
    #[serde(default)]
    pub destination: String,
    #[serde(rename = "type")]
    pub drop_zone_type: DropZoneType,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub creator: String,
    #[serde(default)]
    pub resource_status: String,
    #[serde(default, deserialize_with = "bool_text")]
    pub shared_with_me: bool,
    #[serde(default, deserialize_with = "bool_text")]
    pub enable_dropzone_sharing: bool,
}

impl DropZone {
    /// Whether ingestion has started or finished for this drop zone.
    pub fn is_ingesting(&self) -> bool {
        !matches!(self.state.as_str(), "open" | "warning-validation-incorrect")
    }
}

list_shape!(
    /// Active drop zones of the current user, in server order.
    DropZones,
    drop_zones,
    DropZone
);

rule_result_shapes!(DropZone, DropZones);
