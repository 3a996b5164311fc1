use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::DefaultResources;

/// A stored JS object: a named group of functions bound to one page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionCollection {
    pub id: Option<String>,
    pub application_id: Option<String>,
    pub organization_id: Option<String>,
    pub unpublished_collection: Option<ActionCollectionDTO>,
    pub published_collection: Option<ActionCollectionDTO>,
    pub default_resources: Option<DefaultResources>,
    /// Fields not modelled here, carried through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionCollectionDTO {
    pub id: Option<String>,
    pub name: Option<String>,
    pub application_id: Option<String>,
    pub page_id: Option<String>,
    pub body: Option<String>,
    pub action_ids: Vec<String>,
    pub default_resources: Option<DefaultResources>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
