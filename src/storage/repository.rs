//!   Core Git repository wrapper.
//!
//!  This is the central component of the storage layer. It wraps
//!  `git2::Repository` behind a lock and maps an [`ApplicationReference`]
//!  onto the repository file layout.
//!
//! All other storage modules use this for Git access.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use git2::{Repository, RepositoryInitOptions};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::reference::{ApplicationReference, ResourceKey, ResourceMap};
use crate::storage::blob;
use crate::storage::commit::{self, CommitBuilder, CommitMessage};
use crate::storage::error::{StorageError, StorageResult};
use crate::storage::refs::RefManager;
use crate::storage::tree::{TreeHandle, TreeMutator};
use crate::storage::types::{
    file_name_to_key, key_to_file_name, BlobId, BranchName, CommitId, GitSignature,
    InvalidNameError, ResourceDir, APPLICATION_FILE, METADATA_FILE,
};

/// The main Git repository wrapper.
///
/// Clones share one handle and can move between threads. Every operation
/// holds the handle's lock for its whole duration.
#[derive(Clone)]
pub struct GitRepository {
    inner: Arc<GitRepositoryInner>,
    signature: GitSignature,
}

struct GitRepositoryInner {
    repo: Mutex<Repository>,
    path: PathBuf,
}

impl GitRepository {
    fn from_repo(repo: Repository, path: &Path) -> Self {
        Self {
            inner: Arc::new(GitRepositoryInner {
                repo: Mutex::new(repo),
                path: path.to_path_buf(),
            }),
            signature: GitSignature::appgit(),
        }
    }

    /// Open an existing repository.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        let repo = Repository::open(path).map_err(|_| StorageError::NotInitialized(path.to_path_buf()))?;
        Ok(Self::from_repo(repo, path))
    }

    /// Initialize a new repository with an empty root commit on the default
    /// branch, signed by `signature`.
    pub fn init_with(path: impl AsRef<Path>, signature: GitSignature) -> StorageResult<Self> {
        let path = path.as_ref();
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head(BranchName::DEFAULT);
        let repo = Repository::init_opts(path, &opts)?;

        let storage = Self::from_repo(repo, path).with_signature(signature);
        storage.with_repo(|repo| {
            let commit_id = commit::create_initial_commit(repo, &storage.signature)?;
            info!(path = %path.display(), commit = %commit_id.short(), "initialized repository");
            Ok(())
        })?;

        Ok(storage)
    }

    /// Get the repository path.
    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Set the signature for commits.
    pub fn with_signature(mut self, signature: GitSignature) -> Self {
        self.signature = signature;
        self
    }

    /// Execute a function with exclusive access to the repository.
    pub fn with_repo<F, T>(&self, f: F) -> StorageResult<T>
    where
        F: FnOnce(&Repository) -> StorageResult<T>,
    {
        let repo = self.inner.repo.lock();
        f(&repo)
    }

    // ==================== Branch Operations ====================

    /// Get the checked-out branch.
    pub fn current_branch(&self) -> StorageResult<Option<BranchName>> {
        self.with_repo(RefManager::current_branch)
    }

    /// Check out a branch, creating it from HEAD if it does not exist.
    pub fn checkout_branch(&self, branch: &BranchName) -> StorageResult<CommitId> {
        self.with_repo(|repo| RefManager::checkout_branch(repo, branch))
    }

    // ==================== Application Operations ====================

    /// Write a reference as one commit on `branch`.
    ///
    /// The root files and the four resource directories are replaced; other
    /// root entries are kept. Returns the branch tip, which is unchanged when
    /// the reference matches what is already committed.
    pub fn write_reference(
        &self,
        reference: &ApplicationReference,
        branch: &BranchName,
    ) -> StorageResult<CommitId> {
        let message = CommitMessage::save(branch.as_str(), reference.resource_count());

        self.commit_on_branch(branch, message, |repo, mutator| {
            match &reference.application {
                Some(application) => {
                    mutator.put_file(APPLICATION_FILE, blob::write_json_blob(repo, application)?)?
                }
                None => mutator.remove(APPLICATION_FILE)?,
            }
            mutator.put_file(METADATA_FILE, blob::write_json_blob(repo, &reference.metadata)?)?;

            mutator.replace_resource_dir(ResourceDir::Pages, &resource_blobs(repo, &reference.pages)?)?;
            mutator.replace_resource_dir(ResourceDir::Actions, &resource_blobs(repo, &reference.actions)?)?;
            mutator.replace_resource_dir(
                ResourceDir::ActionCollections,
                &resource_blobs(repo, &reference.action_collections)?,
            )?;
            mutator.replace_resource_dir(
                ResourceDir::Datasources,
                &resource_blobs(repo, &reference.datasources)?,
            )?;
            Ok(())
        })
    }

    /// Read the reference committed at the tip of `branch`.
    ///
    /// Missing root files read as an absent application and default metadata.
    pub fn read_reference(&self, branch: &BranchName) -> StorageResult<ApplicationReference> {
        self.with_repo(|repo| {
            let tip = RefManager::resolve_branch(repo, branch)?;
            let tree = commit::get_tree_at_commit(repo, tip)?;

            let application = match tree.root_file(APPLICATION_FILE)? {
                Some(id) => Some(blob::read_json_blob(repo, id, Path::new(APPLICATION_FILE))?),
                None => None,
            };
            let metadata = match tree.root_file(METADATA_FILE)? {
                Some(id) => blob::read_json_blob(repo, id, Path::new(METADATA_FILE))?,
                None => Default::default(),
            };

            let reference = ApplicationReference {
                application,
                metadata,
                pages: read_resources(repo, &tree, ResourceDir::Pages)?,
                actions: read_resources(repo, &tree, ResourceDir::Actions)?,
                action_collections: read_resources(repo, &tree, ResourceDir::ActionCollections)?,
                datasources: read_resources(repo, &tree, ResourceDir::Datasources)?,
            };

            debug!(branch = %branch, commit = %tip.short(), resources = reference.resource_count(), "read application reference");
            Ok(reference)
        })
    }

    /// Write a single file at the root as one commit on `branch`.
    pub fn write_root_file(
        &self,
        name: &str,
        bytes: &[u8],
        branch: &BranchName,
        message: impl Into<String>,
    ) -> StorageResult<CommitId> {
        self.commit_on_branch(branch, message.into(), |repo, mutator| {
            mutator.put_file(name, blob::write_blob(repo, bytes)?)
        })
    }

    /// Apply `edit` to the branch tip's tree and commit the result.
    ///
    /// Skips the commit when the tree is unchanged. When the branch is
    /// checked out, the working directory is updated before the branch
    /// moves; if that fails the branch keeps its old tip.
    fn commit_on_branch<F>(&self, branch: &BranchName, message: String, edit: F) -> StorageResult<CommitId>
    where
        F: FnOnce(&Repository, &mut TreeMutator<'_>) -> StorageResult<()>,
    {
        self.with_repo(|repo| {
            let parent = RefManager::ensure_branch(repo, branch)?;
            let tree = commit::get_tree_at_commit(repo, parent)?;

            let mut mutator = TreeMutator::from_tree(repo, &tree)?;
            edit(repo, &mut mutator)?;
            let new_tree = mutator.write()?;

            if new_tree == tree.id() {
                debug!(branch = %branch, "tree unchanged, skipping commit");
                return Ok(parent);
            }

            let commit_id = CommitBuilder::new(repo)
                .tree(new_tree)
                .parent(parent)
                .message(message)
                .signature(self.signature.clone())
                .commit()?;

            if RefManager::current_branch(repo)?.as_ref() == Some(branch) {
                if let Err(err) = RefManager::checkout_commit(repo, commit_id) {
                    warn!(branch = %branch, error = %err, "working directory update failed, branch not moved");
                    if let Err(restore) = RefManager::refresh_workdir(repo) {
                        warn!(branch = %branch, error = %restore, "could not restore working directory");
                    }
                    return Err(err);
                }
            }
            RefManager::advance_branch(repo, branch, parent, commit_id)?;

            info!(branch = %branch, commit = %commit_id.short(), "committed");
            Ok(commit_id)
        })
    }
}

/// Hashed file names are only readable when the key can be derived again
/// from the resource itself.
fn resource_blobs<T: Serialize + ResourceKey>(
    repo: &Repository,
    resources: &ResourceMap<T>,
) -> StorageResult<Vec<(String, BlobId)>> {
    resources
        .iter()
        .map(|(key, resource)| -> StorageResult<(String, BlobId)> {
            let file_name = key_to_file_name(key);
            if file_name_to_key(&file_name)?.is_none() && resource.resource_key() != *key {
                return Err(InvalidNameError::UnrecoverableKey(key.clone()).into());
            }
            Ok((file_name, blob::write_json_blob(repo, resource)?))
        })
        .collect()
}

fn read_resources<'repo, T: DeserializeOwned + ResourceKey>(
    repo: &'repo Repository,
    tree: &TreeHandle<'repo>,
    dir: ResourceDir,
) -> StorageResult<ResourceMap<T>> {
    let mut resources = ResourceMap::new();
    for (key, path, blob_id) in tree.resource_files(repo, dir)? {
        let resource: T = blob::read_json_blob(repo, blob_id, &path)?;
        let key = match key {
            Some(key) => key,
            None => {
                let key = resource.resource_key();
                let expected = key_to_file_name(&key);
                if path.file_name().and_then(|name| name.to_str()) != Some(expected.as_str()) {
                    return Err(StorageError::CorruptedData {
                        path,
                        reason: format!("{} content does not match its file name", T::KIND),
                    });
                }
                key
            }
        };
        resources.insert(key, resource);
    }
    Ok(resources)
}
