use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::DefaultResources;

/// A stored action (query or API call), with edit-mode and deployed variants.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewAction {
    pub id: Option<String>,
    pub application_id: Option<String>,
    pub organization_id: Option<String>,
    pub plugin_type: Option<String>,
    pub plugin_id: Option<String>,
    pub unpublished_action: Option<ActionDTO>,
    pub published_action: Option<ActionDTO>,
    pub default_resources: Option<DefaultResources>,
    /// Fields not modelled here, carried through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionDTO {
    pub id: Option<String>,
    pub name: Option<String>,
    pub application_id: Option<String>,
    pub page_id: Option<String>,
    pub collection_id: Option<String>,
    pub execute_on_load: Option<bool>,
    pub action_configuration: Option<Value>,
    pub default_resources: Option<DefaultResources>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Read-only projection of an action served to deployed applications.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionViewDTO {
    pub id: Option<String>,
    pub name: Option<String>,
    pub page_id: Option<String>,
    pub timeout_in_millisecond: Option<u64>,
    pub confirm_before_execute: Option<bool>,
    pub json_path_keys: Vec<String>,
    pub default_resources: Option<DefaultResources>,
}
