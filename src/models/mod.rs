mod entry;
mod listing;

pub use entry::{Entry, EntryKind, EntryMeta};
pub use listing::{Listing, ListingNode};
