use serde::{Deserialize, Serialize};

use super::DefaultResources;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CommentThread {
    pub id: Option<String>,
    pub application_id: Option<String>,
    pub page_id: Option<String>,
    pub branch_name: Option<String>,
    pub resolved: Option<bool>,
    pub default_resources: Option<DefaultResources>,
}
