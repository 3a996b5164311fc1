//! Branch-independent identities for API responses.
//!
//! Every resource exists once per Git branch, each copy under its own
//! storage id. Clients only ever see the default (branch-independent) ids:
//! [`update_default_resources`] records them when a resource is created on a
//! branch, and the `sanitise_*` functions swap them in before a DTO leaves
//! the server.

mod defaults;
mod error;
mod response;

pub use defaults::{update_default_resources, BranchResource};
pub use error::{ResourceKind, SanitizeError, SanitizeResult};
pub use response::{
    sanitise_action, sanitise_action_view, sanitise_application, sanitise_application_pages,
    sanitise_comment_thread, sanitise_layout, sanitise_page,
};
