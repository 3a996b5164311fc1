use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Datasource {
    pub id: Option<String>,
    pub name: Option<String>,
    pub plugin_id: Option<String>,
    pub organization_id: Option<String>,
    pub datasource_configuration: Option<Value>,
    pub is_valid: Option<bool>,
    /// Fields not modelled here, carried through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
