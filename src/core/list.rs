use std::path::Path;

use crate::error::VolumeError;
use crate::fs::StorageFs;
use crate::models::{EntryKind, Listing, ListingNode};

/// List the immediate children of `dir`, split into directories and files.
///
/// With `recursive` set, every directory child's full subtree is expanded
/// into its `files` field before this future resolves: each branch is awaited
/// depth-first, so no node is ever observed with an incomplete expansion.
/// Children keep the order the host returned them in; nothing is sorted.
///
/// Any failed read, at any depth, rejects the whole listing.
pub async fn list_dir<F: StorageFs>(
    fs: &F,
    dir: &Path,
    recursive: bool,
) -> Result<Listing, VolumeError> {
    let mut listing = Listing::default();
    for entry in fs.read_dir(dir).await? {
        match entry.kind {
            EntryKind::Directory => {
                let files = if recursive {
                    Box::pin(expand_dir(fs, &entry.path)).await?
                } else {
                    Vec::new()
                };
                listing.dirs.push(ListingNode {
                    url: entry.path,
                    name: entry.name,
                    files,
                });
            }
            EntryKind::File => listing.files.push(ListingNode {
                url: entry.path,
                name: entry.name,
                files: Vec::new(),
            }),
        }
    }
    Ok(listing)
}

/// Expand one directory's children, recursing into subdirectories. Completes
/// only after every descendant read has resolved.
async fn expand_dir<F: StorageFs>(fs: &F, dir: &Path) -> Result<Vec<ListingNode>, VolumeError> {
    let mut nodes = Vec::new();
    for entry in fs.read_dir(dir).await? {
        let files = match entry.kind {
            EntryKind::Directory => Box::pin(expand_dir(fs, &entry.path)).await?,
            EntryKind::File => Vec::new(),
        };
        nodes.push(ListingNode {
            url: entry.path,
            name: entry.name,
            files,
        });
    }
    Ok(nodes)
}
