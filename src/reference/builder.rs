use tracing::debug;

use super::{collect_resources, ApplicationMetadata, ApplicationReference};
use crate::model::ApplicationBundle;

/// Split a bundle into an [`ApplicationReference`].
///
/// The bundle is left untouched; every resource is cloned into its map.
pub fn build_reference(bundle: &ApplicationBundle) -> ApplicationReference {
    let reference = ApplicationReference {
        application: bundle.exported_application.clone(),
        metadata: ApplicationMetadata::from_bundle(bundle),
        pages: collect_resources(bundle.page_list.iter().cloned()),
        actions: collect_resources(bundle.action_list.iter().cloned()),
        action_collections: collect_resources(bundle.action_collection_list.iter().cloned()),
        datasources: collect_resources(bundle.datasource_list.iter().cloned()),
    };

    debug!(
        resources = bundle.resource_count(),
        keyed = reference.resource_count(),
        "built application reference"
    );

    reference
}
