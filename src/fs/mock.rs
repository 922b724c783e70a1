use async_trait::async_trait;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::VolumeError;
use crate::models::{Entry, EntryMeta};

use super::StorageFs;

#[derive(Clone, Debug)]
enum ReadResponse {
    Ok(Vec<Entry>),
    Err(String),
}

/// Scripted in-memory backend for unit tests.
///
/// Reads and resolutions answer from configured responses; mutations are
/// recorded and succeed. Unconfigured paths fail with a not-found error.
#[derive(Clone, Default)]
pub struct MockStorageFs {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    dir_responses: HashMap<PathBuf, ReadResponse>,
    entries: HashMap<PathBuf, Entry>,
    metas: HashMap<PathBuf, EntryMeta>,
    write_failures: HashMap<PathBuf, WriteFailure>,
    calls: Vec<(&'static str, PathBuf)>,
}

struct WriteFailure {
    chunks_before_failure: usize,
    message: String,
}

impl MockStorageFs {
    pub fn set_dir_entries(&self, dir: impl Into<PathBuf>, entries: Vec<Entry>) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner
            .dir_responses
            .insert(dir.into(), ReadResponse::Ok(entries));
    }

    pub fn set_read_error(&self, dir: impl Into<PathBuf>, message: impl Into<String>) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner
            .dir_responses
            .insert(dir.into(), ReadResponse::Err(message.into()));
    }

    pub fn set_entry(&self, entry: Entry) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.entries.insert(entry.path.clone(), entry);
    }

    pub fn set_metadata(&self, path: impl Into<PathBuf>, meta: EntryMeta) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.metas.insert(path.into(), meta);
    }

    /// Make writes to `path` fail after `chunks_before_failure` appends have
    /// succeeded. Text writes fail immediately regardless of the count.
    pub fn set_write_error(
        &self,
        path: impl Into<PathBuf>,
        chunks_before_failure: usize,
        message: impl Into<String>,
    ) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.write_failures.insert(
            path.into(),
            WriteFailure {
                chunks_before_failure,
                message: message.into(),
            },
        );
    }

    pub fn calls(&self) -> Vec<(&'static str, PathBuf)> {
        let inner = self.inner.lock().expect("mock fs lock");
        inner.calls.clone()
    }

    fn record(&self, op: &'static str, path: &Path) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.calls.push((op, path.to_path_buf()));
    }

    fn not_found(path: &Path) -> VolumeError {
        VolumeError::Resolve {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotFound, "no mock entry"),
        }
    }
}

#[async_trait]
impl StorageFs for MockStorageFs {
    async fn resolve(&self, path: &Path) -> Result<Entry, VolumeError> {
        self.record("resolve", path);
        let inner = self.inner.lock().expect("mock fs lock");
        inner
            .entries
            .get(path)
            .cloned()
            .ok_or_else(|| Self::not_found(path))
    }

    async fn create_dir(&self, path: &Path) -> Result<(), VolumeError> {
        self.record("create_dir", path);
        Ok(())
    }

    async fn create_file(&self, path: &Path) -> Result<(), VolumeError> {
        self.record("create_file", path);
        Ok(())
    }

    async fn append_chunk(&self, path: &Path, _chunk: &[u8]) -> Result<(), VolumeError> {
        self.record("append_chunk", path);
        let mut inner = self.inner.lock().expect("mock fs lock");
        if let Some(failure) = inner.write_failures.get_mut(path) {
            if failure.chunks_before_failure == 0 {
                return Err(VolumeError::Write {
                    path: path.to_path_buf(),
                    source: io::Error::other(failure.message.clone()),
                });
            }
            failure.chunks_before_failure -= 1;
        }
        Ok(())
    }

    async fn write_text(&self, path: &Path, _text: &str) -> Result<(), VolumeError> {
        self.record("write_text", path);
        let inner = self.inner.lock().expect("mock fs lock");
        if let Some(failure) = inner.write_failures.get(path) {
            return Err(VolumeError::Write {
                path: path.to_path_buf(),
                source: io::Error::other(failure.message.clone()),
            });
        }
        Ok(())
    }

    async fn remove_file(&self, path: &Path) -> Result<(), VolumeError> {
        self.record("remove_file", path);
        Ok(())
    }

    async fn remove_dir_all(&self, path: &Path) -> Result<(), VolumeError> {
        self.record("remove_dir_all", path);
        Ok(())
    }

    async fn rename(&self, from: &Path, _to: &Path) -> Result<(), VolumeError> {
        self.record("rename", from);
        Ok(())
    }

    async fn copy_file(&self, from: &Path, _to: &Path) -> Result<(), VolumeError> {
        self.record("copy_file", from);
        Ok(())
    }

    async fn read_dir(&self, dir: &Path) -> Result<Vec<Entry>, VolumeError> {
        self.record("read_dir", dir);
        let inner = self.inner.lock().expect("mock fs lock");
        match inner.dir_responses.get(dir) {
            Some(ReadResponse::Ok(entries)) => Ok(entries.clone()),
            Some(ReadResponse::Err(message)) => Err(VolumeError::Resolve {
                path: dir.to_path_buf(),
                source: io::Error::other(message.clone()),
            }),
            None => Err(Self::not_found(dir)),
        }
    }

    async fn metadata(&self, path: &Path) -> Result<EntryMeta, VolumeError> {
        self.record("metadata", path);
        let inner = self.inner.lock().expect("mock fs lock");
        inner
            .metas
            .get(path)
            .copied()
            .ok_or_else(|| Self::not_found(path))
    }
}
