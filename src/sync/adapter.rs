//! Seams between the serialization core and the repository that stores it.
//!
//! [`GitFileUtils`](super::GitFileUtils) only talks to these traits. The
//! git2-backed implementation is [`LocalGitStore`](crate::storage::LocalGitStore);
//! tests substitute in-memory fakes.

use std::path::{Path, PathBuf};

use crate::reference::ApplicationReference;
use crate::storage::StorageResult;

/// Branch switching for a repository working directory.
pub trait GitExecutor {
    /// Make `branch` the checked-out branch of the repository at `repo_suffix`,
    /// creating it from the current HEAD if it does not exist.
    fn checkout_to_branch(&self, repo_suffix: &Path, branch: &str) -> StorageResult<()>;
}

/// Reads and writes application references as repository files.
pub trait FileRepository {
    /// Persist `reference` on `branch` and return the repository path.
    fn save_bundle(
        &self,
        repo_suffix: &Path,
        reference: &ApplicationReference,
        branch: &str,
    ) -> StorageResult<PathBuf>;

    /// Read the reference stored on `branch` of `<org_id>/<app_id>/<repo_name>`.
    fn load_bundle(
        &self,
        org_id: &str,
        app_id: &str,
        repo_name: &str,
        branch: &str,
    ) -> StorageResult<ApplicationReference>;

    /// Create the repository if needed and write a readme linking to the
    /// deployed application.
    fn initialize_repo(&self, repo_suffix: &Path, view_url: &str, edit_url: &str) -> StorageResult<PathBuf>;

    /// Remove the repository from disk. Returns whether anything was removed.
    fn detach_remote(&self, repo_suffix: &Path) -> StorageResult<bool>;

    fn is_directory_empty(&self, repo_suffix: &Path) -> StorageResult<bool>;
}

impl<T: GitExecutor + ?Sized> GitExecutor for &T {
    fn checkout_to_branch(&self, repo_suffix: &Path, branch: &str) -> StorageResult<()> {
        (**self).checkout_to_branch(repo_suffix, branch)
    }
}

impl<T: FileRepository + ?Sized> FileRepository for &T {
    fn save_bundle(
        &self,
        repo_suffix: &Path,
        reference: &ApplicationReference,
        branch: &str,
    ) -> StorageResult<PathBuf> {
        (**self).save_bundle(repo_suffix, reference, branch)
    }

    fn load_bundle(
        &self,
        org_id: &str,
        app_id: &str,
        repo_name: &str,
        branch: &str,
    ) -> StorageResult<ApplicationReference> {
        (**self).load_bundle(org_id, app_id, repo_name, branch)
    }

    fn initialize_repo(&self, repo_suffix: &Path, view_url: &str, edit_url: &str) -> StorageResult<PathBuf> {
        (**self).initialize_repo(repo_suffix, view_url, edit_url)
    }

    fn detach_remote(&self, repo_suffix: &Path) -> StorageResult<bool> {
        (**self).detach_remote(repo_suffix)
    }

    fn is_directory_empty(&self, repo_suffix: &Path) -> StorageResult<bool> {
        (**self).is_directory_empty(repo_suffix)
    }
}
