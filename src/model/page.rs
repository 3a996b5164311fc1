use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{DefaultResources, Layout};

/// A stored page, holding both its edit-mode and deployed variants.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewPage {
    pub id: Option<String>,
    pub application_id: Option<String>,
    pub unpublished_page: Option<PageDTO>,
    pub published_page: Option<PageDTO>,
    pub default_resources: Option<DefaultResources>,
    /// Fields not modelled here, carried through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One variant of a page as seen by API clients.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageDTO {
    pub id: Option<String>,
    pub name: Option<String>,
    pub application_id: Option<String>,
    pub layouts: Vec<Layout>,
    pub default_resources: Option<DefaultResources>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
