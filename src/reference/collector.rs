//! Groups resource lists under derived, human-readable keys.
//!
//! Keys become file names in the repository, so they are derived from
//! resource names rather than storage ids:
//!
//! - page: edit-mode name, else deployed name
//! - action / action collection: `<name>_<pageId>` of the edit-mode variant,
//!   else of the deployed variant
//! - datasource: its name
//!
//! Names are not guaranteed unique. Two resources deriving the same key are
//! resolved by [`KEY_COLLISION_POLICY`].

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::model::{ActionCollection, Datasource, NewAction, NewPage};

/// Resources keyed by derived name, in key order.
pub type ResourceMap<T> = BTreeMap<String, T>;

/// What to do when two resources of one kind derive the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// The resource processed last replaces the earlier one.
    LastWriteWins,
    /// The resource processed first is kept; later ones are dropped.
    FirstWriteWins,
}

/// Collision policy used on the export path.
///
/// Colliding resources are lost from the written tree. Each drop is logged.
pub const KEY_COLLISION_POLICY: CollisionPolicy = CollisionPolicy::LastWriteWins;

/// A resource that can be filed under a derived key.
pub trait ResourceKey {
    /// Resource kind, used in logs.
    const KIND: &'static str;

    /// Derive the key. Never fails: missing names yield empty components.
    fn resource_key(&self) -> String;
}

fn name_with_page(name: Option<&str>, page_id: Option<&str>) -> String {
    format!("{}_{}", name.unwrap_or_default(), page_id.unwrap_or_default())
}

impl ResourceKey for NewPage {
    const KIND: &'static str = "page";

    fn resource_key(&self) -> String {
        self.unpublished_page
            .as_ref()
            .or(self.published_page.as_ref())
            .and_then(|page| page.name.clone())
            .unwrap_or_default()
    }
}

impl ResourceKey for NewAction {
    const KIND: &'static str = "action";

    fn resource_key(&self) -> String {
        match self.unpublished_action.as_ref().or(self.published_action.as_ref()) {
            Some(action) => name_with_page(action.name.as_deref(), action.page_id.as_deref()),
            None => String::new(),
        }
    }
}

impl ResourceKey for ActionCollection {
    const KIND: &'static str = "actionCollection";

    fn resource_key(&self) -> String {
        match self
            .unpublished_collection
            .as_ref()
            .or(self.published_collection.as_ref())
        {
            Some(collection) => {
                name_with_page(collection.name.as_deref(), collection.page_id.as_deref())
            }
            None => String::new(),
        }
    }
}

impl ResourceKey for Datasource {
    const KIND: &'static str = "datasource";

    fn resource_key(&self) -> String {
        self.name.clone().unwrap_or_default()
    }
}

/// Key every resource under [`KEY_COLLISION_POLICY`].
pub fn collect_resources<T, I>(resources: I) -> ResourceMap<T>
where
    T: ResourceKey,
    I: IntoIterator<Item = T>,
{
    collect_with_policy(resources, KEY_COLLISION_POLICY)
}

/// Key every resource, resolving collisions with `policy`.
pub fn collect_with_policy<T, I>(resources: I, policy: CollisionPolicy) -> ResourceMap<T>
where
    T: ResourceKey,
    I: IntoIterator<Item = T>,
{
    let mut map = ResourceMap::new();

    for resource in resources {
        let key = resource.resource_key();
        debug!(kind = T::KIND, key = %key, "collecting resource");

        if map.contains_key(&key) {
            warn!(kind = T::KIND, key = %key, ?policy, "resource key collision");
            if policy == CollisionPolicy::FirstWriteWins {
                continue;
            }
        }
        map.insert(key, resource);
    }

    map
}
