use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::warn;

use crate::error::VolumeError;
use crate::models::{Entry, EntryKind, EntryMeta};

use super::StorageFs;

/// Backend over the host filesystem via `tokio::fs`.
pub struct RealStorageFs;

fn resolve_err(path: &Path, source: io::Error) -> VolumeError {
    warn!(path = %path.display(), error = %source, "path resolution failed");
    VolumeError::Resolve {
        path: path.to_path_buf(),
        source,
    }
}

fn mutation_err(op: &'static str, path: &Path, source: io::Error) -> VolumeError {
    warn!(op, path = %path.display(), error = %source, "storage mutation failed");
    VolumeError::Mutation {
        op,
        path: path.to_path_buf(),
        source,
    }
}

fn write_err(path: &Path, source: io::Error) -> VolumeError {
    warn!(path = %path.display(), error = %source, "write failed");
    VolumeError::Write {
        path: path.to_path_buf(),
        source,
    }
}

fn entry_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.as_os_str().to_string_lossy().into_owned())
}

#[async_trait]
impl StorageFs for RealStorageFs {
    async fn resolve(&self, path: &Path) -> Result<Entry, VolumeError> {
        let canonical: PathBuf = tokio::fs::canonicalize(path)
            .await
            .map_err(|e| resolve_err(path, e))?;
        let meta = tokio::fs::metadata(&canonical)
            .await
            .map_err(|e| resolve_err(path, e))?;
        let kind = if meta.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };
        Ok(Entry {
            name: entry_name(&canonical),
            path: canonical,
            kind,
        })
    }

    async fn create_dir(&self, path: &Path) -> Result<(), VolumeError> {
        tokio::fs::create_dir_all(path)
            .await
            .map_err(|e| mutation_err("create_dir", path, e))
    }

    async fn create_file(&self, path: &Path) -> Result<(), VolumeError> {
        tokio::fs::File::create(path)
            .await
            .map(drop)
            .map_err(|e| mutation_err("create_file", path, e))
    }

    async fn append_chunk(&self, path: &Path, chunk: &[u8]) -> Result<(), VolumeError> {
        let mut file = tokio::fs::OpenOptions::new()
            .append(true)
            .open(path)
            .await
            .map_err(|e| write_err(path, e))?;
        file.write_all(chunk).await.map_err(|e| write_err(path, e))?;
        file.flush().await.map_err(|e| write_err(path, e))
    }

    async fn write_text(&self, path: &Path, text: &str) -> Result<(), VolumeError> {
        tokio::fs::write(path, text)
            .await
            .map_err(|e| write_err(path, e))
    }

    async fn remove_file(&self, path: &Path) -> Result<(), VolumeError> {
        tokio::fs::remove_file(path)
            .await
            .map_err(|e| mutation_err("remove_file", path, e))
    }

    async fn remove_dir_all(&self, path: &Path) -> Result<(), VolumeError> {
        tokio::fs::remove_dir_all(path)
            .await
            .map_err(|e| mutation_err("remove_dir", path, e))
    }

    async fn rename(&self, from: &Path, to: &Path) -> Result<(), VolumeError> {
        tokio::fs::rename(from, to)
            .await
            .map_err(|e| mutation_err("rename", from, e))
    }

    async fn copy_file(&self, from: &Path, to: &Path) -> Result<(), VolumeError> {
        tokio::fs::copy(from, to)
            .await
            .map(drop)
            .map_err(|e| mutation_err("copy_file", from, e))
    }

    async fn read_dir(&self, dir: &Path) -> Result<Vec<Entry>, VolumeError> {
        let mut reader = tokio::fs::read_dir(dir)
            .await
            .map_err(|e| resolve_err(dir, e))?;

        let mut entries = Vec::new();
        while let Some(entry) = reader
            .next_entry()
            .await
            .map_err(|e| resolve_err(dir, e))?
        {
            let Ok(file_type) = entry.file_type().await else {
                continue;
            };
            // Symlinks are leaves: never classified as directories, so a
            // self-referential link cannot loop a recursive listing.
            let kind = if file_type.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            entries.push(Entry {
                path: entry.path(),
                name: entry.file_name().to_string_lossy().into_owned(),
                kind,
            });
        }
        Ok(entries)
    }

    async fn metadata(&self, path: &Path) -> Result<EntryMeta, VolumeError> {
        let meta = tokio::fs::metadata(path)
            .await
            .map_err(|e| resolve_err(path, e))?;
        Ok(EntryMeta {
            size: meta.len(),
            modified: meta.modified().ok(),
        })
    }
}
