//! Async facade over an external storage volume.
//!
//! One function per filesystem operation (create/remove/rename/move/copy,
//! metadata, existence), plus an optionally-recursive directory listing. The
//! host filesystem sits behind the [`fs::StorageFs`] seam; [`fs::RealStorageFs`]
//! backs it with `tokio::fs`. Permission and volume-location capabilities
//! live in [`context`] and produce an explicit [`context::StorageContext`].

pub mod context;
pub mod core;
pub mod error;
pub mod format;
pub mod fs;
pub mod models;

pub use context::{
    LocationKind, PermissionGateway, PermissionStatus, StorageContext, VolumeLocation,
    VolumeLocator,
};
pub use crate::core::list::list_dir;
pub use crate::core::ops::{
    DEFAULT_CHUNK_SIZE, FilePayload, copy_dir, copy_file, create_dir, create_file,
    create_file_chunked, dir_meta, exists, file_meta, move_dir, move_file, remove_dir,
    remove_file, rename_dir, rename_file,
};
pub use error::VolumeError;
pub use format::{UnitBase, format_bytes};
pub use fs::{RealStorageFs, StorageFs};
pub use models::{Entry, EntryKind, EntryMeta, Listing, ListingNode};
