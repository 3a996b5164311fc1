//!  Blob operations for resource files.
//!
//! every file in an application repository is a pretty-printed JSON document
//! (except the readme). Field order follows the struct definitions and map
//! keys are sorted, so an unchanged resource always hashes to the same blob.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::storage::error::{StorageError, StorageResult};
use crate::storage::types::BlobId;

/// serialize a value to the JSON bytes stored in Git
pub fn serialize_json<T: Serialize>(value: &T) -> StorageResult<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(value)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// deserialize a file's bytes, naming the file on failure
pub fn deserialize_json<T: DeserializeOwned>(bytes: &[u8], path: &Path) -> StorageResult<T> {
    serde_json::from_slice(bytes).map_err(|e| StorageError::CorruptedData {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// write raw bytes as a blob, returning its id
pub fn write_blob(repo: &git2::Repository, bytes: &[u8]) -> StorageResult<BlobId> {
    let oid = repo.blob(bytes)?;
    Ok(BlobId::new(oid))
}

/// serialize a value and write it as a blob
pub fn write_json_blob<T: Serialize>(repo: &git2::Repository, value: &T) -> StorageResult<BlobId> {
    let bytes = serialize_json(value)?;
    write_blob(repo, &bytes)
}

/// read a blob's content from the repository
pub fn read_blob(repo: &git2::Repository, blob_id: BlobId) -> StorageResult<Vec<u8>> {
    let blob = repo.find_blob(blob_id.raw())?;
    Ok(blob.content().to_vec())
}

/// read a blob and deserialize it
pub fn read_json_blob<T: DeserializeOwned>(
    repo: &git2::Repository,
    blob_id: BlobId,
    path: &Path,
) -> StorageResult<T> {
    let bytes = read_blob(repo, blob_id)?;
    deserialize_json(&bytes, path)
}
