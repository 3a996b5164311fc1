use serde::{Deserialize, Serialize};

/// Branch-independent identity of a resource.
///
/// A resource checked out on a feature branch is stored under a branch-local
/// id; these are the ids of the same resource on the default branch, which
/// are what API clients are allowed to see.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DefaultResources {
    pub application_id: Option<String>,
    pub page_id: Option<String>,
    pub action_id: Option<String>,
    pub action_collection_id: Option<String>,
    pub branch_name: Option<String>,
}
