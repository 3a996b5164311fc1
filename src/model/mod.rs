//! Application model shared by the export, import and sanitize paths.
//!
//! Every DTO here mirrors the JSON shape the platform exchanges with its
//! clients: camelCase field names and every field optional. Resources and
//! the application body keep fields they do not model in an `extra` map, so
//! a save followed by a load gives back everything that was exported.
//! Unknown fields at the top of a bundle are ignored.

mod action;
mod application;
mod bundle;
mod collection;
mod comment;
mod datasource;
mod defaults;
mod layout;
mod page;

pub use action::{ActionDTO, ActionViewDTO, NewAction};
pub use application::{Application, ApplicationPage, ApplicationPagesDTO, GitApplicationMetadata, PageNameIdDTO};
pub use bundle::{ApplicationBundle, DecryptedSensitiveFields, EscapedWidgets};
pub use collection::{ActionCollection, ActionCollectionDTO};
pub use comment::CommentThread;
pub use datasource::Datasource;
pub use defaults::DefaultResources;
pub use layout::{DslActionDTO, Layout, LayoutActionUpdateDTO};
pub use page::{NewPage, PageDTO};

/// Returns the value when it is present and not the empty string.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(&Some("abc".to_string())), Some("abc"));
        assert_eq!(non_empty(&Some(String::new())), None);
        assert_eq!(non_empty(&None), None);
    }
}
