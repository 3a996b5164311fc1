use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A page layout: the widget tree plus the actions it triggers.
///
/// `layoutOnLoadActions` is a list of execution stages; actions inside one
/// stage may run in parallel.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Layout {
    pub id: Option<String>,
    pub dsl: Option<Value>,
    pub layout_on_load_actions: Vec<Vec<DslActionDTO>>,
    pub action_updates: Vec<LayoutActionUpdateDTO>,
    pub messages: Vec<String>,
    /// Fields not modelled here, carried through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An action referenced from a layout's on-load stages.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DslActionDTO {
    pub id: Option<String>,
    pub name: Option<String>,
    pub plugin_type: Option<String>,
    pub json_path_keys: Vec<String>,
    pub timeout_in_millisecond: Option<u64>,
    pub default_action_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An action whose on-load flag changed as a result of a layout update.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutActionUpdateDTO {
    pub id: Option<String>,
    pub name: Option<String>,
    pub execute_on_load: Option<bool>,
    pub default_action_id: Option<String>,
}
