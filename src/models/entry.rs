use std::path::PathBuf;
use std::time::SystemTime;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntryKind {
    Directory,
    File,
}

/// A resolved handle to a live filesystem location.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Entry {
    pub path: PathBuf,
    pub name: String,
    pub kind: EntryKind,
}

/// Size and last-modified metadata for a file or directory.
///
/// `modified` is `None` on platforms where the host does not report a
/// modification timestamp.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EntryMeta {
    pub size: u64,
    pub modified: Option<SystemTime>,
}
