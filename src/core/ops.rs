use std::io;
use std::path::{Path, PathBuf};

use crate::error::VolumeError;
use crate::fs::StorageFs;
use crate::models::{Entry, EntryKind, EntryMeta};

/// Chunk size used by [`create_file`] for binary payloads.
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

/// Content written by [`create_file`]. Text goes out in a single call;
/// binary payloads are streamed in bounded chunks.
#[derive(Clone, Debug)]
pub enum FilePayload {
    Text(String),
    Bytes(Vec<u8>),
}

fn validate_name(name: &str) -> Result<(), VolumeError> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.chars().any(std::path::is_separator);
    if invalid {
        return Err(VolumeError::InvalidName {
            name: name.to_owned(),
        });
    }
    Ok(())
}

fn ensure_dir(entry: &Entry) -> Result<(), VolumeError> {
    if entry.kind != EntryKind::Directory {
        return Err(VolumeError::NotADirectory {
            path: entry.path.clone(),
        });
    }
    Ok(())
}

fn ensure_file(entry: &Entry) -> Result<(), VolumeError> {
    if entry.kind != EntryKind::File {
        return Err(VolumeError::NotAFile {
            path: entry.path.clone(),
        });
    }
    Ok(())
}

fn parent_of(entry: &Entry) -> Result<PathBuf, VolumeError> {
    entry
        .path
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| VolumeError::Mutation {
            op: "rename",
            path: entry.path.clone(),
            source: io::Error::other("entry has no parent"),
        })
}

/// Create a directory named `name` under `parent`. Non-exclusive: an
/// already-existing directory is not an error.
pub async fn create_dir<F: StorageFs>(
    fs: &F,
    parent: &Path,
    name: &str,
) -> Result<Entry, VolumeError> {
    validate_name(name)?;
    let path = parent.join(name);
    fs.create_dir(&path).await?;
    fs.resolve(&path).await
}

/// Create a file named `name` under `parent` with the given payload.
///
/// Binary payloads are streamed with [`DEFAULT_CHUNK_SIZE`] chunks; see
/// [`create_file_chunked`].
pub async fn create_file<F: StorageFs>(
    fs: &F,
    parent: &Path,
    name: &str,
    payload: FilePayload,
) -> Result<Entry, VolumeError> {
    match payload {
        FilePayload::Text(text) => {
            validate_name(name)?;
            let path = parent.join(name);
            fs.write_text(&path, &text).await?;
            fs.resolve(&path).await
        }
        FilePayload::Bytes(bytes) => {
            create_file_chunked(fs, parent, name, &bytes, DEFAULT_CHUNK_SIZE).await
        }
    }
}

/// Create a file and stream `bytes` into it in `chunk_size` pieces, each
/// appended only after the previous one completed.
///
/// A failing chunk aborts the whole operation and leaves the target
/// partially written; callers must treat the file's state as undefined after
/// a [`VolumeError::Write`].
pub async fn create_file_chunked<F: StorageFs>(
    fs: &F,
    parent: &Path,
    name: &str,
    bytes: &[u8],
    chunk_size: usize,
) -> Result<Entry, VolumeError> {
    validate_name(name)?;
    let chunk_size = chunk_size.max(1);
    let path = parent.join(name);
    fs.create_file(&path).await?;
    for chunk in bytes.chunks(chunk_size) {
        fs.append_chunk(&path, chunk).await?;
    }
    fs.resolve(&path).await
}

/// Remove a directory and all of its descendants.
pub async fn remove_dir<F: StorageFs>(fs: &F, path: &Path) -> Result<(), VolumeError> {
    let entry = fs.resolve(path).await?;
    ensure_dir(&entry)?;
    fs.remove_dir_all(&entry.path).await
}

pub async fn remove_file<F: StorageFs>(fs: &F, path: &Path) -> Result<(), VolumeError> {
    let entry = fs.resolve(path).await?;
    ensure_file(&entry)?;
    fs.remove_file(&entry.path).await
}

async fn rename_entry<F: StorageFs>(
    fs: &F,
    entry: Entry,
    new_name: &str,
) -> Result<Entry, VolumeError> {
    validate_name(new_name)?;
    // Rename never crosses parents; relocation is move_dir/move_file.
    let dest = parent_of(&entry)?.join(new_name);
    fs.rename(&entry.path, &dest).await?;
    fs.resolve(&dest).await
}

/// Rename a directory in place, keeping its parent.
pub async fn rename_dir<F: StorageFs>(
    fs: &F,
    path: &Path,
    new_name: &str,
) -> Result<Entry, VolumeError> {
    let entry = fs.resolve(path).await?;
    ensure_dir(&entry)?;
    rename_entry(fs, entry, new_name).await
}

/// Rename a file in place, keeping its parent.
pub async fn rename_file<F: StorageFs>(
    fs: &F,
    path: &Path,
    new_name: &str,
) -> Result<Entry, VolumeError> {
    let entry = fs.resolve(path).await?;
    ensure_file(&entry)?;
    rename_entry(fs, entry, new_name).await
}

async fn dest_path<F: StorageFs>(
    fs: &F,
    entry: &Entry,
    dest_parent: &Path,
    new_name: Option<&str>,
) -> Result<PathBuf, VolumeError> {
    let dest_dir = fs.resolve(dest_parent).await?;
    ensure_dir(&dest_dir)?;
    let name = match new_name {
        Some(name) => {
            validate_name(name)?;
            name
        }
        None => entry.name.as_str(),
    };
    Ok(dest_dir.path.join(name))
}

/// Move a directory into `dest_parent`, optionally renaming it.
pub async fn move_dir<F: StorageFs>(
    fs: &F,
    path: &Path,
    dest_parent: &Path,
    new_name: Option<&str>,
) -> Result<Entry, VolumeError> {
    let entry = fs.resolve(path).await?;
    ensure_dir(&entry)?;
    let dest = dest_path(fs, &entry, dest_parent, new_name).await?;
    fs.rename(&entry.path, &dest).await?;
    fs.resolve(&dest).await
}

/// Move a file into `dest_parent`, optionally renaming it.
pub async fn move_file<F: StorageFs>(
    fs: &F,
    path: &Path,
    dest_parent: &Path,
    new_name: Option<&str>,
) -> Result<Entry, VolumeError> {
    let entry = fs.resolve(path).await?;
    ensure_file(&entry)?;
    let dest = dest_path(fs, &entry, dest_parent, new_name).await?;
    fs.rename(&entry.path, &dest).await?;
    fs.resolve(&dest).await
}

/// Copy a directory and its whole subtree into `dest_parent`.
pub async fn copy_dir<F: StorageFs>(
    fs: &F,
    path: &Path,
    dest_parent: &Path,
    new_name: Option<&str>,
) -> Result<Entry, VolumeError> {
    let entry = fs.resolve(path).await?;
    ensure_dir(&entry)?;
    let dest = dest_path(fs, &entry, dest_parent, new_name).await?;
    copy_dir_tree(fs, &entry.path, &dest).await?;
    fs.resolve(&dest).await
}

async fn copy_dir_tree<F: StorageFs>(fs: &F, from: &Path, to: &Path) -> Result<(), VolumeError> {
    fs.create_dir(to).await?;
    for child in fs.read_dir(from).await? {
        let dest = to.join(&child.name);
        match child.kind {
            EntryKind::Directory => Box::pin(copy_dir_tree(fs, &child.path, &dest)).await?,
            EntryKind::File => fs.copy_file(&child.path, &dest).await?,
        }
    }
    Ok(())
}

/// Copy a file into `dest_parent`, optionally renaming the copy.
pub async fn copy_file<F: StorageFs>(
    fs: &F,
    path: &Path,
    dest_parent: &Path,
    new_name: Option<&str>,
) -> Result<Entry, VolumeError> {
    let entry = fs.resolve(path).await?;
    ensure_file(&entry)?;
    let dest = dest_path(fs, &entry, dest_parent, new_name).await?;
    fs.copy_file(&entry.path, &dest).await?;
    fs.resolve(&dest).await
}

/// Size and timestamp metadata for a directory.
pub async fn dir_meta<F: StorageFs>(fs: &F, path: &Path) -> Result<EntryMeta, VolumeError> {
    let entry = fs.resolve(path).await?;
    ensure_dir(&entry)?;
    fs.metadata(&entry.path).await
}

/// Size and timestamp metadata for a file.
pub async fn file_meta<F: StorageFs>(fs: &F, path: &Path) -> Result<EntryMeta, VolumeError> {
    let entry = fs.resolve(path).await?;
    ensure_file(&entry)?;
    fs.metadata(&entry.path).await
}

/// Whether anything currently resolves at `path`.
pub async fn exists<F: StorageFs>(fs: &F, path: &Path) -> bool {
    fs.resolve(path).await.is_ok()
}
