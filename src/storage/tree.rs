//!  tree operations for the application file layout.
//!
//! in Git, a tree is a directory. In an application repository:
//! - the root tree holds `application.json`, `metadata.json` and the readme
//! - each resource kind has a directory of `<key>.json` blobs
//!
//! a save rewrites the root files and the four resource directories in one
//! go; every other root entry (the readme, anything a user added) is kept.

use std::path::PathBuf;

use git2::{FileMode, ObjectType, Repository, Tree, TreeBuilder as Git2TreeBuilder};

use crate::storage::error::{StorageError, StorageResult};
use crate::storage::types::{file_name_to_key, BlobId, ResourceDir, TreeId};

/// A read only handle to a git tree at a specific commit
#[derive(Debug)]
pub struct TreeHandle<'repo> {
    tree: Tree<'repo>,
}

impl<'repo> TreeHandle<'repo> {
    pub(crate) fn new(tree: Tree<'repo>) -> Self {
        Self { tree }
    }

    pub fn id(&self) -> TreeId {
        TreeId::new(self.tree.id())
    }

    pub(crate) fn inner(&self) -> &Tree<'repo> {
        &self.tree
    }

    /// get the blob id of a file at the root, if present
    pub fn root_file(&self, name: &str) -> StorageResult<Option<BlobId>> {
        match self.tree.get_name(name) {
            Some(entry) => {
                if entry.kind() != Some(ObjectType::Blob) {
                    return Err(StorageError::UnexpectedEntryType {
                        path: name.into(),
                        expected: "blob (file)".to_string(),
                        found: format!("{:?}", entry.kind()),
                    });
                }
                Ok(Some(BlobId::new(entry.id())))
            }
            None => Ok(None),
        }
    }

    /// list the resources of one kind as `(key, path, blob)` triples
    ///
    /// a missing directory means no resources. Files that are not `.json`
    /// are ignored; `.json` files with undecodable names are an error. The
    /// key is `None` for hashed names.
    pub fn resource_files(
        &self,
        repo: &'repo Repository,
        dir: ResourceDir,
    ) -> StorageResult<Vec<(Option<String>, PathBuf, BlobId)>> {
        let entry = match self.tree.get_name(dir.as_str()) {
            Some(entry) => entry,
            None => return Ok(Vec::new()),
        };
        if entry.kind() != Some(ObjectType::Tree) {
            return Err(StorageError::UnexpectedEntryType {
                path: dir.as_str().into(),
                expected: "tree (directory)".to_string(),
                found: format!("{:?}", entry.kind()),
            });
        }

        let subtree = repo.find_tree(entry.id())?;
        let mut files = Vec::new();
        for entry in subtree.iter() {
            if entry.kind() != Some(ObjectType::Blob) {
                continue;
            }
            let Some(name) = entry.name() else {
                continue;
            };
            if !name.ends_with(".json") {
                continue;
            }

            let key = file_name_to_key(name)?;
            let path = PathBuf::from(dir.as_str()).join(name);
            files.push((key, path, BlobId::new(entry.id())));
        }

        Ok(files)
    }

}

/// a mutable tree builder for making changes
///
/// changes accumulate against the root and produce a new tree on `write`;
/// the original tree is not modified.
pub struct TreeMutator<'repo> {
    repo: &'repo Repository,
    root_builder: Git2TreeBuilder<'repo>,
}

impl<'repo> TreeMutator<'repo> {
    /// create a new TreeMutator from an existing tree
    pub fn from_tree(repo: &'repo Repository, tree: &TreeHandle<'_>) -> StorageResult<Self> {
        let root_builder = repo.treebuilder(Some(tree.inner()))?;
        Ok(Self { repo, root_builder })
    }

    /// create a new TreeMutator for an empty tree
    pub fn empty(repo: &'repo Repository) -> StorageResult<Self> {
        let root_builder = repo.treebuilder(None)?;
        Ok(Self { repo, root_builder })
    }

    /// insert or replace a file at the root
    pub fn put_file(&mut self, name: &str, blob_id: BlobId) -> StorageResult<()> {
        self.root_builder
            .insert(name, blob_id.raw(), FileMode::Blob.into())?;
        Ok(())
    }

    /// remove a root entry if it exists
    pub fn remove(&mut self, name: &str) -> StorageResult<()> {
        if self.root_builder.get(name)?.is_some() {
            self.root_builder.remove(name)?;
        }
        Ok(())
    }

    /// replace a resource directory with exactly the given files
    ///
    /// git does not track empty directories, so no files removes the entry.
    pub fn replace_resource_dir(
        &mut self,
        dir: ResourceDir,
        files: &[(String, BlobId)],
    ) -> StorageResult<()> {
        if files.is_empty() {
            return self.remove(dir.as_str());
        }

        let mut builder = self.repo.treebuilder(None)?;
        for (file_name, blob_id) in files {
            builder.insert(file_name, blob_id.raw(), FileMode::Blob.into())?;
        }
        let dir_tree = builder.write()?;

        self.root_builder
            .insert(dir.as_str(), dir_tree, FileMode::Tree.into())?;
        Ok(())
    }

    /// write all changes and return the new root tree ID
    pub fn write(self) -> StorageResult<TreeId> {
        let root_id = self.root_builder.write()?;
        Ok(TreeId::new(root_id))
    }
}

/// create an empty root tree
pub fn create_initial_tree(repo: &Repository) -> StorageResult<TreeId> {
    TreeMutator::empty(repo)?.write()
}
