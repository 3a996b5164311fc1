use tracing::debug;

use super::{ApplicationReference, ResourceMap};
use crate::model::ApplicationBundle;

/// Rebuild a bundle from a reference, starting from an empty bundle.
pub fn rehydrate(reference: ApplicationReference) -> ApplicationBundle {
    rehydrate_into(reference, ApplicationBundle::default())
}

/// Rebuild a bundle from a reference on top of `target`.
///
/// The application body and the resource lists are replaced. Metadata only
/// overwrites the target where the reference carries a value, so defaults
/// already on `target` survive null metadata fields.
///
/// Resource lists come out in key order, not in the order of the bundle the
/// reference was built from.
pub fn rehydrate_into(reference: ApplicationReference, mut target: ApplicationBundle) -> ApplicationBundle {
    let ApplicationReference {
        application,
        metadata,
        pages,
        actions,
        action_collections,
        datasources,
    } = reference;

    target.exported_application = application;
    metadata.merge_into(&mut target);

    target.page_list = into_list(pages);
    target.action_list = into_list(actions);
    target.action_collection_list = into_list(action_collections);
    target.datasource_list = into_list(datasources);

    debug!(resources = target.resource_count(), "rehydrated application bundle");
    target
}

fn into_list<T>(resources: ResourceMap<T>) -> Vec<T> {
    resources.into_values().collect()
}
