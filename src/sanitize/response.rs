//! Outgoing DTO rewrites: branch-local ids become default ids.

use tracing::trace;

use super::error::{ResourceKind, SanitizeError, SanitizeResult};
use crate::model::{
    non_empty, ActionDTO, ActionViewDTO, Application, ApplicationPagesDTO, CommentThread,
    DefaultResources, Layout, PageDTO,
};

/// Look up one default id; empty strings count as missing.
fn default_id<F>(defaults: Option<&DefaultResources>, pick: F) -> Option<String>
where
    F: Fn(&DefaultResources) -> &Option<String>,
{
    defaults.and_then(|d| non_empty(pick(d))).map(str::to_string)
}

/// Requires default `applicationId` and `pageId`.
pub fn sanitise_page(mut page: PageDTO) -> SanitizeResult<PageDTO> {
    let defaults = page.default_resources.as_ref();
    match (
        default_id(defaults, |d| &d.application_id),
        default_id(defaults, |d| &d.page_id),
    ) {
        (Some(application_id), Some(page_id)) => {
            trace!(from = ?page.id, to = %page_id, "sanitising page");
            page.application_id = Some(application_id);
            page.id = Some(page_id);
            Ok(page)
        }
        _ => Err(SanitizeError::unavailable(ResourceKind::Page, &page.id)),
    }
}

/// Replace every listed page id with its git default page id.
///
/// Fails on the first entry without one; the listing is then discarded.
pub fn sanitise_application_pages(mut pages: ApplicationPagesDTO) -> SanitizeResult<ApplicationPagesDTO> {
    for page in &mut pages.pages {
        let Some(default_page_id) = non_empty(&page.git_default_page_id).map(str::to_string) else {
            return Err(SanitizeError::unavailable(ResourceKind::ApplicationPage, &page.id));
        };
        page.id = Some(default_page_id);
    }
    Ok(pages)
}

/// Requires default `applicationId`, `pageId` and `actionId`.
pub fn sanitise_action(mut action: ActionDTO) -> SanitizeResult<ActionDTO> {
    let defaults = action.default_resources.as_ref();
    match (
        default_id(defaults, |d| &d.application_id),
        default_id(defaults, |d| &d.page_id),
        default_id(defaults, |d| &d.action_id),
    ) {
        (Some(application_id), Some(page_id), Some(action_id)) => {
            trace!(from = ?action.id, to = %action_id, "sanitising action");
            action.application_id = Some(application_id);
            action.page_id = Some(page_id);
            action.id = Some(action_id);
            Ok(action)
        }
        _ => Err(SanitizeError::unavailable(ResourceKind::Action, &action.id)),
    }
}

/// Point every action reference in a layout at its default action id.
///
/// Entries are trusted to carry a default action id; no check is made.
pub fn sanitise_layout(mut layout: Layout) -> Layout {
    for update in &mut layout.action_updates {
        update.id = update.default_action_id.clone();
    }
    for stage in &mut layout.layout_on_load_actions {
        for action in stage {
            action.id = action.default_action_id.clone();
        }
    }
    layout
}

/// Requires default `pageId` and `actionId`.
pub fn sanitise_action_view(mut view: ActionViewDTO) -> SanitizeResult<ActionViewDTO> {
    let defaults = view.default_resources.as_ref();
    match (
        default_id(defaults, |d| &d.page_id),
        default_id(defaults, |d| &d.action_id),
    ) {
        (Some(page_id), Some(action_id)) => {
            view.id = Some(action_id);
            view.page_id = Some(page_id);
            Ok(view)
        }
        _ => Err(SanitizeError::unavailable(ResourceKind::ActionView, &view.id)),
    }
}

/// Best effort: ids without a default counterpart are left alone.
pub fn sanitise_application(mut application: Application) -> Application {
    let default_application_id = application
        .git_application_metadata
        .as_ref()
        .and_then(|meta| non_empty(&meta.default_application_id))
        .map(str::to_string);
    if let Some(id) = default_application_id {
        application.id = Some(id);
    }

    for page in &mut application.pages {
        if let Some(id) = non_empty(&page.default_page_id).map(str::to_string) {
            page.id = Some(id);
        }
    }
    application
}

/// Requires default `applicationId` and `pageId`.
pub fn sanitise_comment_thread(mut thread: CommentThread) -> SanitizeResult<CommentThread> {
    let defaults = thread.default_resources.as_ref();
    match (
        default_id(defaults, |d| &d.application_id),
        default_id(defaults, |d| &d.page_id),
    ) {
        (Some(application_id), Some(page_id)) => {
            thread.application_id = Some(application_id);
            thread.page_id = Some(page_id);
            Ok(thread)
        }
        _ => Err(SanitizeError::unavailable(ResourceKind::CommentThread, &thread.id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        ApplicationPage, DslActionDTO, GitApplicationMetadata, LayoutActionUpdateDTO, PageNameIdDTO,
    };

    fn s(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    fn defaults(application_id: Option<&str>, page_id: Option<&str>, action_id: Option<&str>) -> Option<DefaultResources> {
        Some(DefaultResources {
            application_id: application_id.map(str::to_string),
            page_id: page_id.map(str::to_string),
            action_id: action_id.map(str::to_string),
            ..Default::default()
        })
    }

    #[test]
    fn test_sanitise_page() {
        let page = PageDTO {
            id: s("branchPage"),
            application_id: s("branchApp"),
            default_resources: defaults(Some("A"), Some("P"), None),
            ..Default::default()
        };

        let page = sanitise_page(page).unwrap();
        assert_eq!(page.id.as_deref(), Some("P"));
        assert_eq!(page.application_id.as_deref(), Some("A"));
    }

    #[test]
    fn test_sanitise_page_without_defaults() {
        let page = PageDTO {
            id: s("branchPage"),
            default_resources: None,
            ..Default::default()
        };

        let err = sanitise_page(page).unwrap_err();
        assert_eq!(
            err,
            SanitizeError::DefaultResourcesUnavailable {
                resource: ResourceKind::Page,
                id: s("branchPage"),
            }
        );
    }

    #[test]
    fn test_sanitise_page_empty_default_is_missing() {
        let page = PageDTO {
            id: s("branchPage"),
            default_resources: defaults(Some("A"), Some(""), None),
            ..Default::default()
        };
        assert!(sanitise_page(page).is_err());
    }

    #[test]
    fn test_sanitise_action() {
        let action = ActionDTO {
            id: s("a-branch"),
            page_id: s("p-branch"),
            application_id: s("app-branch"),
            default_resources: defaults(Some("A"), Some("P"), Some("X")),
            ..Default::default()
        };

        let action = sanitise_action(action).unwrap();
        assert_eq!(action.id.as_deref(), Some("X"));
        assert_eq!(action.page_id.as_deref(), Some("P"));
        assert_eq!(action.application_id.as_deref(), Some("A"));
    }

    #[test]
    fn test_sanitise_action_requires_action_id() {
        let action = ActionDTO {
            id: s("a-branch"),
            default_resources: defaults(Some("A"), Some("P"), None),
            ..Default::default()
        };

        let err = sanitise_action(action).unwrap_err();
        assert!(matches!(
            err,
            SanitizeError::DefaultResourcesUnavailable { resource: ResourceKind::Action, .. }
        ));
    }

    #[test]
    fn test_sanitise_action_view_ignores_application() {
        let view = ActionViewDTO {
            id: s("v-branch"),
            default_resources: defaults(None, Some("P"), Some("X")),
            ..Default::default()
        };

        let view = sanitise_action_view(view).unwrap();
        assert_eq!(view.id.as_deref(), Some("X"));
        assert_eq!(view.page_id.as_deref(), Some("P"));

        let missing = ActionViewDTO {
            id: s("v-branch"),
            default_resources: defaults(Some("A"), None, Some("X")),
            ..Default::default()
        };
        assert!(sanitise_action_view(missing).is_err());
    }

    #[test]
    fn test_sanitise_comment_thread() {
        let thread = CommentThread {
            id: s("thread1"),
            application_id: s("app-branch"),
            page_id: s("page-branch"),
            default_resources: defaults(Some("A"), Some("P"), None),
            ..Default::default()
        };

        let thread = sanitise_comment_thread(thread).unwrap();
        assert_eq!(thread.id.as_deref(), Some("thread1"));
        assert_eq!(thread.application_id.as_deref(), Some("A"));
        assert_eq!(thread.page_id.as_deref(), Some("P"));

        let orphan = CommentThread {
            id: s("thread2"),
            ..Default::default()
        };
        let err = sanitise_comment_thread(orphan).unwrap_err();
        assert_eq!(err.to_string(), "unable to find default ids for commentThread: thread2");
    }

    #[test]
    fn test_sanitise_application_pages() {
        let listing = ApplicationPagesDTO {
            pages: vec![
                PageNameIdDTO {
                    id: s("p1-branch"),
                    git_default_page_id: s("p1"),
                    ..Default::default()
                },
                PageNameIdDTO {
                    id: s("p2-branch"),
                    git_default_page_id: s("p2"),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        let listing = sanitise_application_pages(listing).unwrap();
        let ids: Vec<_> = listing.pages.iter().map(|p| p.id.as_deref().unwrap()).collect();
        assert_eq!(ids, vec!["p1", "p2"]);
    }

    #[test]
    fn test_sanitise_application_pages_missing_default() {
        let listing = ApplicationPagesDTO {
            pages: vec![
                PageNameIdDTO {
                    id: s("p1-branch"),
                    git_default_page_id: s("p1"),
                    ..Default::default()
                },
                PageNameIdDTO {
                    id: s("p2-branch"),
                    git_default_page_id: None,
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        let err = sanitise_application_pages(listing).unwrap_err();
        assert_eq!(
            err,
            SanitizeError::DefaultResourcesUnavailable {
                resource: ResourceKind::ApplicationPage,
                id: s("p2-branch"),
            }
        );
    }

    #[test]
    fn test_sanitise_layout() {
        let layout = Layout {
            layout_on_load_actions: vec![vec![DslActionDTO {
                id: s("x"),
                default_action_id: s("y"),
                ..Default::default()
            }]],
            action_updates: vec![LayoutActionUpdateDTO {
                id: s("u-branch"),
                default_action_id: s("u"),
                ..Default::default()
            }],
            ..Default::default()
        };

        let layout = sanitise_layout(layout);
        assert_eq!(layout.layout_on_load_actions[0][0].id.as_deref(), Some("y"));
        assert_eq!(layout.action_updates[0].id.as_deref(), Some("u"));
    }

    #[test]
    fn test_sanitise_layout_nested_stages() {
        let action = |id: &str, default: &str| DslActionDTO {
            id: s(id),
            default_action_id: s(default),
            ..Default::default()
        };
        let layout = Layout {
            layout_on_load_actions: vec![
                vec![action("a", "A"), action("b", "B")],
                vec![],
                vec![action("c", "C")],
            ],
            ..Default::default()
        };

        let layout = sanitise_layout(layout);
        let ids: Vec<Vec<&str>> = layout
            .layout_on_load_actions
            .iter()
            .map(|stage| stage.iter().map(|a| a.id.as_deref().unwrap()).collect())
            .collect();
        assert_eq!(ids, vec![vec!["A", "B"], vec![], vec!["C"]]);
    }

    #[test]
    fn test_sanitise_application() {
        let application = Application {
            id: s("app-branch"),
            git_application_metadata: Some(GitApplicationMetadata {
                default_application_id: s("app"),
                ..Default::default()
            }),
            pages: vec![
                ApplicationPage {
                    id: s("p1-branch"),
                    default_page_id: s("p1"),
                    ..Default::default()
                },
                ApplicationPage {
                    id: s("p2-branch"),
                    default_page_id: s(""),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        let application = sanitise_application(application);
        assert_eq!(application.id.as_deref(), Some("app"));
        assert_eq!(application.pages[0].id.as_deref(), Some("p1"));
        assert_eq!(application.pages[1].id.as_deref(), Some("p2-branch"));
    }

    #[test]
    fn test_sanitise_application_without_git() {
        let application = Application {
            id: s("app1"),
            ..Default::default()
        };
        assert_eq!(sanitise_application(application.clone()), application);
    }
}
