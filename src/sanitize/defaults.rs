//! Write-side counterpart of sanitization: stamping default resources.

use crate::model::{
    ActionCollection, ActionCollectionDTO, ActionDTO, Application, CommentThread, Datasource,
    DefaultResources, NewAction, NewPage,
};

/// A resource that may receive a [`DefaultResources`] block.
///
/// The first five kinds are branch-tracked; the rest carry no default
/// resources and pass through [`update_default_resources`] unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum BranchResource {
    Action(NewAction),
    ActionDto(ActionDTO),
    Page(NewPage),
    Collection(ActionCollection),
    CollectionDto(ActionCollectionDTO),
    Datasource(Datasource),
    Application(Application),
    CommentThread(CommentThread),
}

impl BranchResource {
    /// Whether [`update_default_resources`] stamps this kind.
    pub fn is_branch_tracked(&self) -> bool {
        !matches!(
            self,
            Self::Datasource(_) | Self::Application(_) | Self::CommentThread(_)
        )
    }
}

macro_rules! impl_from {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for BranchResource {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from!(
    Action(NewAction),
    ActionDto(ActionDTO),
    Page(NewPage),
    Collection(ActionCollection),
    CollectionDto(ActionCollectionDTO),
    Datasource(Datasource),
    Application(Application),
    CommentThread(CommentThread),
);

/// Attach a fresh [`DefaultResources`] block built from the resource's own ids.
///
/// Any existing block is replaced. Which ids are recorded depends on the kind:
///
/// | kind                | applicationId | pageId       | actionId | actionCollectionId | branchName |
/// |---------------------|---------------|--------------|----------|--------------------|------------|
/// | NewAction           | yes           |              | id       |                    | yes        |
/// | ActionDTO           |               | yes          |          | collectionId       |            |
/// | NewPage             | yes           | id           |          |                    | yes        |
/// | ActionCollection    | yes           |              |          | id                 | yes        |
/// | ActionCollectionDTO |               | yes          |          |                    |            |
pub fn update_default_resources(resource: BranchResource, branch_name: &str) -> BranchResource {
    let branch = Some(branch_name.to_string());

    match resource {
        BranchResource::Action(mut action) => {
            action.default_resources = Some(DefaultResources {
                application_id: action.application_id.clone(),
                action_id: action.id.clone(),
                branch_name: branch,
                ..Default::default()
            });
            BranchResource::Action(action)
        }
        BranchResource::ActionDto(mut action) => {
            action.default_resources = Some(DefaultResources {
                page_id: action.page_id.clone(),
                action_collection_id: action.collection_id.clone(),
                ..Default::default()
            });
            BranchResource::ActionDto(action)
        }
        BranchResource::Page(mut page) => {
            page.default_resources = Some(DefaultResources {
                application_id: page.application_id.clone(),
                page_id: page.id.clone(),
                branch_name: branch,
                ..Default::default()
            });
            BranchResource::Page(page)
        }
        BranchResource::Collection(mut collection) => {
            collection.default_resources = Some(DefaultResources {
                application_id: collection.application_id.clone(),
                action_collection_id: collection.id.clone(),
                branch_name: branch,
                ..Default::default()
            });
            BranchResource::Collection(collection)
        }
        BranchResource::CollectionDto(mut collection) => {
            collection.default_resources = Some(DefaultResources {
                page_id: collection.page_id.clone(),
                ..Default::default()
            });
            BranchResource::CollectionDto(collection)
        }
        untracked @ (BranchResource::Datasource(_)
        | BranchResource::Application(_)
        | BranchResource::CommentThread(_)) => untracked,
    }
}
