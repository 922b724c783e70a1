use std::path::PathBuf;

/// One item in a directory listing.
///
/// `files` holds the node's children (files and subdirectories alike) and is
/// populated only for directory nodes, and only when the listing was
/// recursive. Plain file nodes always have an empty `files`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ListingNode {
    pub url: PathBuf,
    pub name: String,
    pub files: Vec<ListingNode>,
}

/// Result of listing a single directory: its immediate children, split into
/// subdirectories and files, in the order the host returned them.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Listing {
    pub dirs: Vec<ListingNode>,
    pub files: Vec<ListingNode>,
}
