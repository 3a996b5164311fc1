//! appgit - Git-backed serialization for low-code applications
//!
//! This crate stores an exported application as a tree of JSON files in a
//! Git repository (one file per page, action, action collection and
//! datasource), reads it back into a bundle, and rewrites branch-local
//! resource ids into their branch-independent defaults before they are
//! returned to clients.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use appgit::model::ApplicationBundle;
//! use appgit::storage::{LocalGitStore, StoreConfig};
//! use appgit::sync::GitFileUtils;
//!
//! let store = LocalGitStore::new(StoreConfig::new("./apps"));
//! let utils = GitFileUtils::new(&store, &store);
//!
//! let bundle = ApplicationBundle::default();
//! utils.save_application_to_local_repo(Path::new("org/app/repo"), &bundle, "main").unwrap();
//! let restored = utils
//!     .reconstruct_application_from_git_repo("org", "app", "repo", "main")
//!     .unwrap();
//! ```

pub mod model;
pub mod reference;
pub mod sanitize;
pub mod storage;
pub mod sync;
