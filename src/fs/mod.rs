mod real;

#[cfg(test)]
mod mock;

pub use real::RealStorageFs;

#[cfg(test)]
pub use mock::MockStorageFs;

use async_trait::async_trait;
use std::path::Path;

use crate::error::VolumeError;
use crate::models::{Entry, EntryMeta};

/// Capability set of the external filesystem.
///
/// Every method issues exactly one host call and settles exactly once; there
/// is no retry, no caching, and no partial completion.
#[async_trait]
pub trait StorageFs: Send + Sync {
    /// Resolve a path to a live entry, canonicalizing it. Fails if nothing
    /// exists at that location.
    async fn resolve(&self, path: &Path) -> Result<Entry, VolumeError>;

    /// Create a directory. Non-exclusive: succeeds if it already exists.
    async fn create_dir(&self, path: &Path) -> Result<(), VolumeError>;

    /// Create an empty file, truncating any existing content.
    async fn create_file(&self, path: &Path) -> Result<(), VolumeError>;

    /// Append one chunk to the end of an existing file. The call completes
    /// only once the chunk is fully written.
    async fn append_chunk(&self, path: &Path, chunk: &[u8]) -> Result<(), VolumeError>;

    /// Write a text payload in a single call, replacing the file's content.
    async fn write_text(&self, path: &Path, text: &str) -> Result<(), VolumeError>;

    async fn remove_file(&self, path: &Path) -> Result<(), VolumeError>;

    /// Remove a directory and all of its descendants.
    async fn remove_dir_all(&self, path: &Path) -> Result<(), VolumeError>;

    /// Move an entry to a new location, replacing nothing implicitly beyond
    /// what the host's rename semantics allow.
    async fn rename(&self, from: &Path, to: &Path) -> Result<(), VolumeError>;

    async fn copy_file(&self, from: &Path, to: &Path) -> Result<(), VolumeError>;

    /// Read a directory's immediate children in one batch, in host order.
    async fn read_dir(&self, dir: &Path) -> Result<Vec<Entry>, VolumeError>;

    async fn metadata(&self, path: &Path) -> Result<EntryMeta, VolumeError>;
}
