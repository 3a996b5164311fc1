//! The file-tree-neutral staging shape of an application.
//!
//! An [`ApplicationReference`] sits between the in-memory
//! [`ApplicationBundle`](crate::model::ApplicationBundle) and the repository:
//! the export path builds one from a bundle and hands it to the writer, the
//! import path receives one from the reader and rehydrates a bundle from it.
//!
//! ```text
//!   ApplicationBundle ──build_reference──▶ ApplicationReference ──save_bundle──▶ repo
//!   ApplicationBundle ◀────rehydrate────── ApplicationReference ◀──load_bundle─── repo
//! ```
//!
//! A reference lives for exactly one export or import call.

mod builder;
mod collector;
mod metadata;
mod rehydrate;

use serde::{Deserialize, Serialize};

use crate::model::{ActionCollection, Application, Datasource, NewAction, NewPage};

pub use builder::build_reference;
pub use collector::{
    collect_resources, collect_with_policy, CollisionPolicy, ResourceKey, ResourceMap,
    KEY_COLLISION_POLICY,
};
pub use metadata::ApplicationMetadata;
pub use rehydrate::{rehydrate, rehydrate_into};

/// An application split into its body, metadata and name-keyed resources.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationReference {
    pub application: Option<Application>,
    pub metadata: ApplicationMetadata,
    pub pages: ResourceMap<NewPage>,
    pub actions: ResourceMap<NewAction>,
    pub action_collections: ResourceMap<ActionCollection>,
    pub datasources: ResourceMap<Datasource>,
}

impl ApplicationReference {
    /// Total number of keyed resources.
    pub fn resource_count(&self) -> usize {
        self.pages.len() + self.actions.len() + self.action_collections.len() + self.datasources.len()
    }
}
