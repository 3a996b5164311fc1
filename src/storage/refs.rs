//!  Branch and reference management.
//!
//! every application branch is a local Git branch. This module resolves,
//! creates and checks out those branches. It takes no locks of its own:
//! callers are expected to serialize checkouts of one working directory.

use git2::{ObjectType, Repository};
use tracing::{debug, info};

use crate::storage::error::{StorageError, StorageResult};
use crate::storage::types::{BranchName, CommitId};

/// Manages Git references (branches).
pub struct RefManager;

impl RefManager {
    /// Resolve a branch name to its current commit ID.
    pub fn resolve_branch(repo: &Repository, branch: &BranchName) -> StorageResult<CommitId> {
        let reference = repo
            .find_reference(&branch.as_ref_path())
            .map_err(|_| StorageError::RefNotFound(branch.to_string()))?;

        let commit = reference
            .peel_to_commit()
            .map_err(|_| StorageError::RefNotFound(branch.to_string()))?;

        Ok(CommitId::new(commit.id()))
    }

    /// Get the commit HEAD points to.
    pub fn head_commit(repo: &Repository) -> StorageResult<CommitId> {
        let head = repo.head().map_err(|e| {
            if e.code() == git2::ErrorCode::UnbornBranch {
                StorageError::EmptyRepository
            } else {
                StorageError::Git(e)
            }
        })?;

        let commit = head.peel_to_commit()?;
        Ok(CommitId::new(commit.id()))
    }

    /// Get the branch HEAD points to, `None` when detached.
    pub fn current_branch(repo: &Repository) -> StorageResult<Option<BranchName>> {
        let head = repo.find_reference("HEAD")?;
        let target = match head.symbolic_target() {
            Some(target) => target,
            None => return Ok(None),
        };

        Ok(target
            .strip_prefix("refs/heads/")
            .and_then(|name| BranchName::new(name).ok()))
    }

    /// Check if a branch exists.
    pub fn branch_exists(repo: &Repository, branch: &BranchName) -> bool {
        repo.find_reference(&branch.as_ref_path()).is_ok()
    }

    /// Create a new branch pointing to the given commit.
    pub fn create_branch(repo: &Repository, branch: &BranchName, target: CommitId) -> StorageResult<()> {
        let commit = repo.find_commit(target.raw())?;
        repo.branch(branch.as_str(), &commit, false)?;
        debug!(branch = %branch, at = %target.short(), "created branch");
        Ok(())
    }

    /// Create the branch from HEAD unless it already exists.
    pub fn ensure_branch(repo: &Repository, branch: &BranchName) -> StorageResult<CommitId> {
        if Self::branch_exists(repo, branch) {
            return Self::resolve_branch(repo, branch);
        }

        let head = Self::head_commit(repo)?;
        Self::create_branch(repo, branch, head)?;
        Ok(head)
    }

    /// Point HEAD at the branch (creating it from HEAD if needed) and force
    /// the working directory to match it.
    pub fn checkout_branch(repo: &Repository, branch: &BranchName) -> StorageResult<CommitId> {
        let tip = Self::ensure_branch(repo, branch)?;

        repo.set_head(&branch.as_ref_path())?;
        Self::refresh_workdir(repo)?;

        info!(branch = %branch, commit = %tip.short(), "checked out branch");
        Ok(tip)
    }

    /// Force the working directory to match HEAD.
    ///
    /// Untracked files are left alone; tracked files removed from HEAD are
    /// deleted.
    pub fn refresh_workdir(repo: &Repository) -> StorageResult<()> {
        if repo.is_bare() {
            return Ok(());
        }

        let mut checkout_builder = git2::build::CheckoutBuilder::new();
        checkout_builder.force();
        repo.checkout_head(Some(&mut checkout_builder))?;
        Ok(())
    }

    /// Force the working directory and index to a commit's tree without
    /// moving any ref.
    pub fn checkout_commit(repo: &Repository, commit: CommitId) -> StorageResult<()> {
        if repo.is_bare() {
            return Ok(());
        }

        let object = repo.find_object(commit.raw(), Some(ObjectType::Commit))?;
        let mut checkout_builder = git2::build::CheckoutBuilder::new();
        checkout_builder.force();
        repo.checkout_tree(&object, Some(&mut checkout_builder))?;
        Ok(())
    }

    /// Move a branch from `from` to `to`, failing if it no longer points at `from`.
    pub fn advance_branch(repo: &Repository, branch: &BranchName, from: CommitId, to: CommitId) -> StorageResult<()> {
        repo.reference_matching(
            &branch.as_ref_path(),
            to.raw(),
            true,
            from.raw(),
            &format!("appgit: advance {} to {}", branch, to.short()),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::commit::{create_initial_commit, CommitBuilder};
    use crate::storage::types::GitSignature;
    use tempfile::TempDir;

    fn setup_repo_with_commit() -> (TempDir, Repository, CommitId) {
        let dir = TempDir::new().unwrap();
        let mut opts = git2::RepositoryInitOptions::new();
        opts.initial_head(BranchName::DEFAULT);
        let repo = Repository::init_opts(dir.path(), &opts).unwrap();
        let commit_id = create_initial_commit(&repo, &GitSignature::appgit()).unwrap();
        (dir, repo, commit_id)
    }

    #[test]
    fn test_head_commit() {
        let (_dir, repo, expected) = setup_repo_with_commit();
        assert_eq!(RefManager::head_commit(&repo).unwrap(), expected);
        assert_eq!(
            RefManager::current_branch(&repo).unwrap(),
            Some(BranchName::default_branch())
        );
    }

    #[test]
    fn test_checkout_creates_branch() {
        let (_dir, repo, base) = setup_repo_with_commit();
        let feature = BranchName::new("feature/login").unwrap();

        assert!(!RefManager::branch_exists(&repo, &feature));
        let tip = RefManager::checkout_branch(&repo, &feature).unwrap();

        assert_eq!(tip, base);
        assert!(RefManager::branch_exists(&repo, &feature));
        assert_eq!(RefManager::current_branch(&repo).unwrap(), Some(feature));
    }

    #[test]
    fn test_checkout_existing_branch() {
        let (_dir, repo, _base) = setup_repo_with_commit();
        let feature = BranchName::new("feature").unwrap();

        RefManager::checkout_branch(&repo, &feature).unwrap();
        RefManager::checkout_branch(&repo, &BranchName::default_branch()).unwrap();

        assert_eq!(
            RefManager::current_branch(&repo).unwrap(),
            Some(BranchName::default_branch())
        );
        assert!(RefManager::branch_exists(&repo, &feature));
    }

    #[test]
    fn test_advance_branch_checks_expected_tip() {
        let (_dir, repo, base) = setup_repo_with_commit();
        let main = BranchName::default_branch();

        let tree = crate::storage::tree::create_initial_tree(&repo).unwrap();
        let next = CommitBuilder::new(&repo).tree(tree).parent(base).message("next").commit().unwrap();

        // a stale expectation leaves the branch alone
        let result = RefManager::advance_branch(&repo, &main, next, next);
        assert!(matches!(result, Err(StorageError::Git(_))));
        assert_eq!(RefManager::resolve_branch(&repo, &main).unwrap(), base);

        RefManager::advance_branch(&repo, &main, base, next).unwrap();
        assert_eq!(RefManager::resolve_branch(&repo, &main).unwrap(), next);
    }

    #[test]
    fn test_checkout_commit_leaves_refs() {
        let (dir, repo, base) = setup_repo_with_commit();

        let mut mutator = crate::storage::tree::TreeMutator::empty(&repo).unwrap();
        let blob = crate::storage::BlobId::new(repo.blob(b"{}\n").unwrap());
        mutator.put_file("application.json", blob).unwrap();
        let tree = mutator.write().unwrap();
        let next = CommitBuilder::new(&repo).tree(tree).parent(base).message("next").commit().unwrap();

        RefManager::checkout_commit(&repo, next).unwrap();

        assert!(dir.path().join("application.json").is_file());
        assert_eq!(RefManager::head_commit(&repo).unwrap(), base);
    }

    #[test]
    fn test_resolve_missing_branch() {
        let (_dir, repo, _base) = setup_repo_with_commit();
        let missing = BranchName::new("nope").unwrap();

        let result = RefManager::resolve_branch(&repo, &missing);
        assert!(matches!(result, Err(StorageError::RefNotFound(_))));
    }

    #[test]
    fn test_empty_repository() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();

        let result = RefManager::head_commit(&repo);
        assert!(matches!(result, Err(StorageError::EmptyRepository)));
    }
}
