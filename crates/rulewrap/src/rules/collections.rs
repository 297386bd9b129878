use rulewrap_types::ids::{CollectionPath, ObjectPath, ProjectPath, Rounding, SizeUnit, require_text};
use rulewrap_types::{AttributeValue, Avus, CollectionDetails, CollectionSizes, Collections};

use crate::error::RuleResult;
use crate::manager::RuleManager;
use crate::pipeline::RuleCall;
use crate::session::RuleSession;

impl<S: RuleSession> RuleManager<S> {
    pub async fn get_collections(&self, project_path: &str) -> RuleResult<Collections> {
        let project_path = ProjectPath::new(project_path)?;
        self.call_typed(RuleCall::new("get_collections").arg(project_path))
            .await
    }

    pub async fn get_collection_details(
        &self,
        collection_path: &str,
    ) -> RuleResult<CollectionDetails> {
        let collection_path = CollectionPath::new(collection_path)?;
        self.call_typed(RuleCall::new("get_collection_details").arg(collection_path))
            .await
    }

    /// Size of a collection per storage resource. `unit` is one of `B`,
    /// `KiB`, `MiB`, `GiB`, `TiB`; `round` one of `none`, `floor`, `ceiling`.
    pub async fn get_collection_size(
        &self,
        collection_path: &str,
        unit: &str,
        round: &str,
    ) -> RuleResult<CollectionSizes> {
        let collection_path = CollectionPath::new(collection_path)?;
        let unit: SizeUnit = unit.parse()?;
        let round: Rounding = round.parse()?;
        self.call_typed(
            RuleCall::new("get_collection_size")
                .arg(collection_path)
                .arg(unit)
                .arg(round),
        )
        .await
    }

    pub async fn get_collection_attribute_value(
        &self,
        path: &str,
        attribute: &str,
    ) -> RuleResult<AttributeValue> {
        let path = ObjectPath::new(path)?;
        require_text("attribute", attribute)?;
        self.call_typed(
            RuleCall::new("get_collection_attribute_value")
                .arg(path)
                .arg(attribute),
        )
        .await
    }

    pub async fn set_collection_avu(
        &self,
        path: &str,
        attribute: &str,
        value: &str,
    ) -> RuleResult<()> {
        let path = ObjectPath::new(path)?;
        require_text("attribute", attribute)?;
        require_text("value", value)?;
        self.call_unit(
            RuleCall::new("set_collection_avu")
                .arg(path)
                .arg(attribute)
                .arg(value),
        )
        .await
    }

    pub async fn remove_collection_avu(&self, path: &str, attribute: &str) -> RuleResult<()> {
        let path = ObjectPath::new(path)?;
        require_text("attribute", attribute)?;
        self.call_unit(
            RuleCall::new("remove_collection_avu")
                .arg(path)
                .arg(attribute),
        )
        .await
    }

    pub async fn get_collection_avus(&self, path: &str) -> RuleResult<Avus> {
        let path = ObjectPath::new(path)?;
        self.call_typed(RuleCall::new("get_collection_avus").arg(path))
            .await
    }
}
