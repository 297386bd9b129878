use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::compose::{bool_text, list_shape, rule_result_shapes, text_or_number, u64_text};
use crate::projects::ProjectMembers;

/// One collection inside a project listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    #[serde(deserialize_with = "text_or_number")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub creator: String,
    #[serde(default, deserialize_with = "u64_text")]
    pub size: u64,
    #[serde(default, deserialize_with = "u64_text")]
    pub num_files: u64,
    #[serde(rename = "PID", default)]
    pub pid: String,
}

list_shape!(
    /// Collections of one project, in server order.
    Collections,
    collections,
    Collection
);

/// A persistent identifier minted for a collection by an external repository.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalPid {
    pub repository: String,
    #[serde(alias = "value")]
    pub pid: String,
}

list_shape!(ExternalPids, pids, ExternalPid);

/// Full description of one collection.
///
/// `collection` and `title` are required. Archive and export flags default to
/// `false`, sizes to `0`, `externalPIDs` and `managers` to empty.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionDetails {
    #[serde(rename = "collection", deserialize_with = "text_or_number")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub creator: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "u64_text")]
    pub byte_size: u64,
    #[serde(default, deserialize_with = "u64_text")]
    pub num_files: u64,
    #[serde(rename = "PID", default)]
    pub pid: String,
    #[serde(default, deserialize_with = "bool_text")]
    pub enable_archive: bool,
    #[serde(default, deserialize_with = "bool_text")]
    pub enable_unarchive: bool,
    #[serde(default, deserialize_with = "bool_text")]
    pub enable_open_access_export: bool,
    #[serde(rename = "externalPIDs", default)]
    pub external_pids: ExternalPids,
    #[serde(default)]
    pub managers: ProjectMembers,
}

/// Size of a collection per storage resource, in the unit that was requested.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionSizes {
    pub per_resource: BTreeMap<String, f64>,
}

impl CollectionSizes {
    pub fn total(&self) -> f64 {
        self.per_resource.values().sum()
    }

    pub fn get(&self, resource: &str) -> Option<f64> {
        self.per_resource.get(resource).copied()
    }
}

/// An attribute-value-unit triple attached to a collection or data object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Avu {
    pub attribute: String,
    #[serde(deserialize_with = "text_or_number")]
    pub value: String,
    #[serde(default)]
    pub unit: String,
}

list_shape!(Avus, avus, Avu);

impl Avus {
    /// First value recorded for `attribute`.
    pub fn value_of(&self, attribute: &str) -> Option<&str> {
        self.avus
            .iter()
            .find(|avu| avu.attribute == attribute)
            .map(|avu| avu.value.as_str())
    }
}

rule_result_shapes!(
    Collection,
    Collections,
    ExternalPids,
    CollectionDetails,
    CollectionSizes,
    Avus,
);
