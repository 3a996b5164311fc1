//! git2-backed implementation of the repository collaborator traits.

use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::reference::ApplicationReference;
use crate::storage::commit::CommitMessage;
use crate::storage::config::StoreConfig;
use crate::storage::error::{StorageError, StorageResult};
use crate::storage::repository::GitRepository;
use crate::storage::types::{BranchName, InvalidNameError, README_FILE};
use crate::sync::{FileRepository, GitExecutor};

/// Application repositories under one root directory.
///
/// Every repository path is `<root>/<suffix>`. Opened repositories are cached
/// by path and shared between calls.
pub struct LocalGitStore {
    config: StoreConfig,
    repos: Mutex<HashMap<PathBuf, GitRepository>>,
}

impl LocalGitStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            repos: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Absolute location of a repository suffix.
    ///
    /// The suffix must be relative and made only of normal components, so the
    /// result always lies under the root.
    pub fn repo_path(&self, repo_suffix: &Path) -> StorageResult<PathBuf> {
        let confined = repo_suffix.components().next().is_some()
            && repo_suffix.components().all(|c| matches!(c, Component::Normal(_)));
        if !confined {
            return Err(InvalidNameError::InvalidPath(repo_suffix.display().to_string()).into());
        }
        Ok(self.config.root.join(repo_suffix))
    }

    /// Open the repository at `path`, initializing it when allowed.
    fn repository(&self, path: &Path, create: bool) -> StorageResult<GitRepository> {
        let mut repos = self.repos.lock();
        if let Some(repo) = repos.get(path) {
            return Ok(repo.clone());
        }

        let repo = if path.join(".git").exists() {
            GitRepository::open(path)?.with_signature(self.config.signature.clone())
        } else if create && self.config.create_if_missing {
            fs::create_dir_all(path)?;
            GitRepository::init_with(path, self.config.signature.clone())?
        } else {
            return Err(StorageError::NotInitialized(path.to_path_buf()));
        };

        debug!(path = %repo.path().display(), "opened repository");
        repos.insert(path.to_path_buf(), repo.clone());
        Ok(repo)
    }

    fn readme(view_url: &str, edit_url: &str) -> String {
        format!(
            "# Welcome to your application repository\n\
             \n\
             This repository holds the source of an application, one JSON file per\n\
             page, action, action collection and datasource.\n\
             \n\
             - View the deployed application: {view_url}\n\
             - Edit the application: {edit_url}\n\
             \n\
             Files are rewritten on every save. Edit the application through the\n\
             editor rather than by hand.\n"
        )
    }
}

impl GitExecutor for LocalGitStore {
    fn checkout_to_branch(&self, repo_suffix: &Path, branch: &str) -> StorageResult<()> {
        let branch = BranchName::new(branch)?;
        let repo = self.repository(&self.repo_path(repo_suffix)?, true)?;
        repo.checkout_branch(&branch)?;
        Ok(())
    }
}

impl FileRepository for LocalGitStore {
    fn save_bundle(
        &self,
        repo_suffix: &Path,
        reference: &ApplicationReference,
        branch: &str,
    ) -> StorageResult<PathBuf> {
        let branch = BranchName::new(branch)?;
        let path = self.repo_path(repo_suffix)?;
        let repo = self.repository(&path, true)?;

        repo.write_reference(reference, &branch)?;
        Ok(path)
    }

    fn load_bundle(
        &self,
        org_id: &str,
        app_id: &str,
        repo_name: &str,
        branch: &str,
    ) -> StorageResult<ApplicationReference> {
        let branch = BranchName::new(branch)?;
        for part in [org_id, app_id, repo_name] {
            let mut components = Path::new(part).components();
            let single = matches!(components.next(), Some(Component::Normal(_))) && components.next().is_none();
            if !single {
                return Err(InvalidNameError::InvalidPath(part.to_string()).into());
            }
        }
        let suffix = Path::new(org_id).join(app_id).join(repo_name);
        let repo = self.repository(&self.repo_path(&suffix)?, false)?;

        repo.read_reference(&branch)
    }

    fn initialize_repo(&self, repo_suffix: &Path, view_url: &str, edit_url: &str) -> StorageResult<PathBuf> {
        let path = self.repo_path(repo_suffix)?;
        let repo = self.repository(&path, true)?;

        let branch = repo.current_branch()?.unwrap_or_else(BranchName::default_branch);
        let readme = Self::readme(view_url, edit_url);
        repo.write_root_file(README_FILE, readme.as_bytes(), &branch, CommitMessage::readme())?;

        info!(path = %path.display(), branch = %branch, "initialized application repository");
        Ok(path)
    }

    fn detach_remote(&self, repo_suffix: &Path) -> StorageResult<bool> {
        let path = self.repo_path(repo_suffix)?;
        self.repos.lock().remove(&path);

        if !path.exists() {
            debug!(path = %path.display(), "nothing to detach");
            return Ok(false);
        }

        fs::remove_dir_all(&path)?;
        info!(path = %path.display(), "removed repository");
        Ok(true)
    }

    fn is_directory_empty(&self, repo_suffix: &Path) -> StorageResult<bool> {
        let path = self.repo_path(repo_suffix)?;
        Ok(fs::read_dir(path)?.next().is_none())
    }
}
