//! storage layer for application repositories
//!
//! this module maps an [`ApplicationReference`](crate::reference::ApplicationReference)
//! onto a Git repository. The sync layer reaches it only through the traits in
//! [`crate::sync`]; [`LocalGitStore`] is the implementation of those traits.
//!
//!  # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     LocalGitStore                           │
//! │   (repository paths, readme, detach, collaborator traits)   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     GitRepository                           │
//! │      (High-level API: references, branches, root files)        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!        ┌─────────────────────┼─────────────────────┐
//!        │                     │                     │
//!        ▼                     ▼                     ▼
//!  ┌─────────────┐       ┌─────────────┐       ┌─────────────┐
//!  │    tree     │       │    blob     │       │    refs     │
//!  │ (resource   │       │   (JSON     │       │ (branches,  │
//!  │    dirs)    │       │   files)    │       │  checkout)  │
//!  └─────────────┘       └─────────────┘       └─────────────┘
//!         │                     │                     │
//!         └─────────────────────┼─────────────────────┘
//!                               │
//!                               ▼
//!                        ┌─────────────┐
//!                        │   commit    │
//!                        │  (builder)  │
//!                        └─────────────┘
//!  ```
//!
//! # Usage
//!
//! ```ignore
//! use appgit::storage::{BranchName, GitRepository};
//!
//! let repo = GitRepository::open("./crm")?;
//! let main = BranchName::default_branch();
//!
//! repo.write_reference(&reference, &main)?;
//! let restored = repo.read_reference(&main)?;
//! ```

mod blob;
mod commit;
mod config;
mod error;
mod refs;
mod repository;
mod store;
mod tree;
mod types;

// Re-export public API
pub use commit::CommitMessage;
pub use config::{StoreConfig, ROOT_ENV_VAR};
pub use error::{StorageError, StorageResult};
pub use repository::GitRepository;
pub use store::LocalGitStore;
pub use types::{
    file_name_to_key, key_to_file_name, BlobId, BranchName, CommitId, GitSignature,
    InvalidNameError, ResourceDir, TreeId, APPLICATION_FILE, MAX_FILE_NAME_LEN, METADATA_FILE,
    README_FILE,
};
