//! Export and import of applications through a Git repository.
//!
//! [`GitFileUtils`] composes the pure reference builder and rehydrator with
//! the repository collaborators declared in [`adapter`].

pub mod adapter;
mod file_utils;

pub use adapter::{FileRepository, GitExecutor};
pub use file_utils::GitFileUtils;
