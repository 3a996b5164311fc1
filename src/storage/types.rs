//! Type-safe wrappers around git primitives and the repository file layout.

use std::fmt;
use std::fmt::Write as _;

use git2::Oid;
use sha2::{Digest, Sha256};

/// A commit identifier.
///
/// Kept distinct from [`BlobId`] and [`TreeId`] so they cannot be mixed up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommitId(pub(crate) Oid);

impl CommitId {
    pub(crate) fn new(oid: Oid) -> Self {
        Self(oid)
    }

    pub(crate) fn raw(&self) -> Oid {
        self.0
    }

    /// short form of the commit ID
    pub fn short(&self) -> String {
        self.0.to_string()[..7].to_string()
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Git blob identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlobId(pub(crate) Oid);

impl BlobId {
    pub(crate) fn new(oid: Oid) -> Self {
        Self(oid)
    }

    pub(crate) fn raw(&self) -> Oid {
        self.0
    }
}

impl fmt::Display for BlobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Git tree identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreeId(pub(crate) Oid);

impl TreeId {
    pub(crate) fn new(oid: Oid) -> Self {
        Self(oid)
    }

    pub(crate) fn raw(&self) -> Oid {
        self.0
    }
}

impl fmt::Display for TreeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated local branch name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BranchName(String);

impl BranchName {
    /// branch created by `init`
    pub const DEFAULT: &'static str = "main";

    pub fn new(name: impl Into<String>) -> Result<Self, InvalidNameError> {
        let name = name.into();
        if name.is_empty() {
            return Err(InvalidNameError::Empty);
        }
        if !git2::Reference::is_valid_name(&format!("refs/heads/{}", name)) {
            return Err(InvalidNameError::InvalidBranch(name));
        }
        Ok(Self(name))
    }

    pub fn default_branch() -> Self {
        Self(Self::DEFAULT.to_string())
    }

    /// get the full ref path (e.g., "refs/heads/main")
    pub fn as_ref_path(&self) -> String {
        format!("refs/heads/{}", self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// git signature (author/committer info)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitSignature {
    pub name: String,
    pub email: String,
}

impl GitSignature {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// default signature for commits made by this crate
    pub fn appgit() -> Self {
        Self::new("appgit", "appgit@localhost")
    }

    pub(crate) fn to_git2_signature(&self) -> Result<git2::Signature<'static>, git2::Error> {
        git2::Signature::now(&self.name, &self.email)
    }
}

impl Default for GitSignature {
    fn default() -> Self {
        Self::appgit()
    }
}

/// Application body file at the repository root.
pub const APPLICATION_FILE: &str = "application.json";
/// Bundle metadata file at the repository root.
pub const METADATA_FILE: &str = "metadata.json";
/// Readme written when a repository is first connected.
pub const README_FILE: &str = "README.md";

const JSON_SUFFIX: &str = ".json";

/// A directory holding one JSON file per keyed resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceDir {
    Pages,
    Actions,
    ActionCollections,
    Datasources,
}

impl ResourceDir {
    pub const ALL: [ResourceDir; 4] = [
        ResourceDir::Pages,
        ResourceDir::Actions,
        ResourceDir::ActionCollections,
        ResourceDir::Datasources,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pages => "pages",
            Self::Actions => "actions",
            Self::ActionCollections => "actionCollections",
            Self::Datasources => "datasources",
        }
    }
}

impl fmt::Display for ResourceDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Longest file name written for a resource, well under common filesystem limits.
pub const MAX_FILE_NAME_LEN: usize = 128;

const HASH_MARKER: char = '~';
const HASH_LEN: usize = 16;

/// Encode a resource key as a file name.
///
/// ASCII letters, digits, space, `_` and `-` are kept; every other byte
/// becomes `%XX`. The empty key maps to `.json`.
///
/// An encoding longer than [`MAX_FILE_NAME_LEN`] is cut short and suffixed
/// with `~` and a hash of the whole key. `~` is always escaped otherwise, so
/// the two shapes never overlap.
pub fn key_to_file_name(key: &str) -> String {
    let mut stem = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b' ' | b'_' | b'-') {
            stem.push(byte as char);
        } else {
            let _ = write!(stem, "%{:02X}", byte);
        }
    }

    if stem.len() + JSON_SUFFIX.len() > MAX_FILE_NAME_LEN {
        let mut cut = MAX_FILE_NAME_LEN - JSON_SUFFIX.len() - HASH_LEN - 1;
        // do not split a %XX escape
        let bytes = stem.as_bytes();
        if bytes[cut - 1] == b'%' {
            cut -= 1;
        } else if bytes[cut - 2] == b'%' {
            cut -= 2;
        }
        stem.truncate(cut);

        let digest = format!("{:x}", Sha256::digest(key.as_bytes()));
        stem.push(HASH_MARKER);
        stem.push_str(&digest[..HASH_LEN]);
    }

    stem.push_str(JSON_SUFFIX);
    stem
}

/// Decode a file name written by [`key_to_file_name`].
///
/// Returns `None` for a hashed name: its key is not in the name and has to
/// be recovered from the file's content.
pub fn file_name_to_key(name: &str) -> Result<Option<String>, InvalidNameError> {
    let stem = name
        .strip_suffix(JSON_SUFFIX)
        .ok_or_else(|| InvalidNameError::InvalidFileName(name.to_string()))?;

    if stem.contains(HASH_MARKER) {
        return Ok(None);
    }

    let bytes = stem.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let byte = stem
                .get(i + 1..i + 3)
                .and_then(|hex| u8::from_str_radix(hex, 16).ok())
                .ok_or_else(|| InvalidNameError::InvalidFileName(name.to_string()))?;
            decoded.push(byte);
            i += 3;
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8(decoded)
        .map(Some)
        .map_err(|_| InvalidNameError::InvalidFileName(name.to_string()))
}

/// error type for invalid branch names and resource file names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidNameError {
    Empty,
    InvalidBranch(String),
    InvalidFileName(String),
    /// a repository path that is absolute or leaves its root
    InvalidPath(String),
    /// a key whose hashed file name cannot be mapped back to it
    UnrecoverableKey(String),
}

impl fmt::Display for InvalidNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "name cannot be empty"),
            Self::InvalidBranch(name) => write!(f, "'{}' is not a valid branch name", name),
            Self::InvalidFileName(name) => write!(f, "'{}' is not a resource file name", name),
            Self::InvalidPath(path) => write!(f, "'{}' is not a relative repository path", path),
            Self::UnrecoverableKey(key) => {
                write!(f, "key '{}' is too long and does not match its resource", key)
            }
        }
    }
}

impl std::error::Error for InvalidNameError {}
