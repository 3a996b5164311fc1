use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The application body.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Application {
    pub id: Option<String>,
    pub name: Option<String>,
    pub organization_id: Option<String>,
    pub slug: Option<String>,
    pub is_public: Option<bool>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub pages: Vec<ApplicationPage>,
    pub git_application_metadata: Option<GitApplicationMetadata>,
    /// Fields not modelled here, carried through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A page reference as listed on the application body.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationPage {
    pub id: Option<String>,
    pub is_default: Option<bool>,
    pub default_page_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Git connection details of an application.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GitApplicationMetadata {
    pub branch_name: Option<String>,
    pub default_branch_name: Option<String>,
    pub default_application_id: Option<String>,
    pub remote_url: Option<String>,
    pub browser_supported_remote_url: Option<String>,
    pub repo_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Listing of an application's pages returned by the pages endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationPagesDTO {
    pub organization_id: Option<String>,
    pub application: Option<Application>,
    pub pages: Vec<PageNameIdDTO>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageNameIdDTO {
    pub id: Option<String>,
    pub name: Option<String>,
    pub is_default: Option<bool>,
    pub git_default_page_id: Option<String>,
}
