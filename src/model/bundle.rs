use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::{ActionCollection, Application, Datasource, NewAction, NewPage};

/// Widget names whose keys had to be escaped for the document store, per page.
pub type EscapedWidgets = BTreeMap<String, BTreeSet<String>>;

/// The exported application aggregate.
///
/// Besides the application body and the four resource lists, every other
/// field is treated as bundle metadata (see
/// [`ApplicationMetadata`](crate::reference::ApplicationMetadata)).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationBundle {
    pub file_format_version: Option<u32>,
    pub exported_application: Option<Application>,
    pub datasource_list: Vec<Datasource>,
    pub page_list: Vec<NewPage>,
    pub action_list: Vec<NewAction>,
    pub action_collection_list: Vec<ActionCollection>,
    /// Datasource secrets keyed by datasource name. Never written to Git.
    pub decrypted_fields: Option<BTreeMap<String, DecryptedSensitiveFields>>,
    pub published_default_page_name: Option<String>,
    pub unpublished_default_page_name: Option<String>,
    pub published_layoutmongo_escaped_widgets: Option<EscapedWidgets>,
    pub unpublished_layoutmongo_escaped_widgets: Option<EscapedWidgets>,
}

impl ApplicationBundle {
    /// Create an empty bundle around an application body.
    pub fn new(application: Application) -> Self {
        Self {
            exported_application: Some(application),
            ..Default::default()
        }
    }

    /// Total number of resources across the four lists.
    pub fn resource_count(&self) -> usize {
        self.page_list.len()
            + self.action_list.len()
            + self.action_collection_list.len()
            + self.datasource_list.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DecryptedSensitiveFields {
    pub password: Option<String>,
    pub token: Option<String>,
    pub refresh_token: Option<String>,
    pub auth_type: Option<String>,
}
