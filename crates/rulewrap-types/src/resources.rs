use serde::{Deserialize, Serialize};

use crate::compose::{bool_text, list_shape, rule_result_shapes};

/// A storage resource that can receive ingested data.
///
/// Servers that predate the availability check omit `available`; such
/// resources read as unavailable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default, deserialize_with = "bool_text")]
    pub available: bool,
}

list_shape!(Resources, resources, Resource);

impl Resources {
    pub fn available(&self) -> impl Iterator<Item = &Resource> {
        self.resources.iter().filter(|resource| resource.available)
    }
}

rule_result_shapes!(Resource, Resources);
