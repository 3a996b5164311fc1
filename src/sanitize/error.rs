//! Sanitizer error types.

use std::fmt;

use thiserror::Error;

/// Result type for sanitize operations.
pub type SanitizeResult<T> = Result<T, SanitizeError>;

/// The kind of DTO a sanitize call was working on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Page,
    ApplicationPage,
    Action,
    ActionView,
    CommentThread,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::ApplicationPage => "applicationPage",
            Self::Action => "action",
            Self::ActionView => "actionView",
            Self::CommentThread => "commentThread",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while remapping ids on an outgoing DTO.
///
/// A response that fails sanitization must not be served.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SanitizeError {
    /// The resource lacks the default ids needed for its public identity.
    #[error("unable to find default ids for {resource}: {}", id_display(.id))]
    DefaultResourcesUnavailable {
        resource: ResourceKind,
        /// The resource's branch-local id, if it had one.
        id: Option<String>,
    },
}

fn id_display(id: &Option<String>) -> &str {
    id.as_deref().unwrap_or("<no id>")
}

impl SanitizeError {
    pub(crate) fn unavailable(resource: ResourceKind, id: &Option<String>) -> Self {
        Self::DefaultResourcesUnavailable {
            resource,
            id: id.clone(),
        }
    }
}
