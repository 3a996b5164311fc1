use std::path::PathBuf;

use crate::storage::types::GitSignature;

/// Environment variable that overrides the store root.
pub const ROOT_ENV_VAR: &str = "APPGIT_ROOT";

/// Local git store configuration options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory every repository path is resolved against.
    pub root: PathBuf,
    /// Initialize repositories on first use.
    pub create_if_missing: bool,
    /// Author and committer of every commit.
    pub signature: GitSignature,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(".appgit"),
            create_if_missing: true,
            signature: GitSignature::appgit(),
        }
    }
}

impl StoreConfig {
    /// Create a new configuration with the given root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Default configuration, with the root taken from `APPGIT_ROOT` when set.
    pub fn from_env() -> Self {
        match std::env::var_os(ROOT_ENV_VAR) {
            Some(root) if !root.is_empty() => Self::new(root),
            _ => Self::default(),
        }
    }

    /// Set create_if_missing flag.
    pub fn create_if_missing(mut self, value: bool) -> Self {
        self.create_if_missing = value;
        self
    }

    /// Set commit signature.
    pub fn signature(mut self, signature: GitSignature) -> Self {
        self.signature = signature;
        self
    }
}
