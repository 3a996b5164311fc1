use serde::{Deserialize, Serialize};

use crate::model::{ApplicationBundle, EscapedWidgets};

/// Bundle fields that are neither the application body nor a resource list.
///
/// Datasource secrets (`decryptedFields`) are deliberately absent: they must
/// never reach a Git repository. Adding a field to
/// [`ApplicationBundle`] means adding it here and to both copy functions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationMetadata {
    pub file_format_version: Option<u32>,
    pub published_default_page_name: Option<String>,
    pub unpublished_default_page_name: Option<String>,
    pub published_layoutmongo_escaped_widgets: Option<EscapedWidgets>,
    pub unpublished_layoutmongo_escaped_widgets: Option<EscapedWidgets>,
}

impl ApplicationMetadata {
    /// Copy the metadata fields of a bundle as-is, nulls included.
    pub fn from_bundle(bundle: &ApplicationBundle) -> Self {
        Self {
            file_format_version: bundle.file_format_version,
            published_default_page_name: bundle.published_default_page_name.clone(),
            unpublished_default_page_name: bundle.unpublished_default_page_name.clone(),
            published_layoutmongo_escaped_widgets: bundle
                .published_layoutmongo_escaped_widgets
                .clone(),
            unpublished_layoutmongo_escaped_widgets: bundle
                .unpublished_layoutmongo_escaped_widgets
                .clone(),
        }
    }

    /// Merge into a bundle, skipping fields that are null here.
    ///
    /// Escaped-widget maps merge per page: pages present here replace the
    /// target's entry, pages only on the target are kept.
    pub fn merge_into(self, bundle: &mut ApplicationBundle) {
        if let Some(version) = self.file_format_version {
            bundle.file_format_version = Some(version);
        }
        if let Some(name) = self.published_default_page_name {
            bundle.published_default_page_name = Some(name);
        }
        if let Some(name) = self.unpublished_default_page_name {
            bundle.unpublished_default_page_name = Some(name);
        }
        merge_widgets(
            &mut bundle.published_layoutmongo_escaped_widgets,
            self.published_layoutmongo_escaped_widgets,
        );
        merge_widgets(
            &mut bundle.unpublished_layoutmongo_escaped_widgets,
            self.unpublished_layoutmongo_escaped_widgets,
        );
    }
}

fn merge_widgets(target: &mut Option<EscapedWidgets>, source: Option<EscapedWidgets>) {
    let Some(source) = source else {
        return;
    };
    match target {
        Some(existing) => existing.extend(source),
        None => *target = Some(source),
    }
}
