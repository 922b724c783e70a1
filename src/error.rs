use std::path::PathBuf;

use thiserror::Error;

/// Failure taxonomy for volume operations.
///
/// Host `io::Error`s are carried verbatim as sources; nothing here is ever
/// downgraded to a partial success.
#[derive(Debug, Error)]
pub enum VolumeError {
    /// The user declined the storage permission; re-requesting may succeed.
    #[error("storage permission denied")]
    PermissionDenied,

    /// The storage permission is permanently denied; only an external
    /// settings change can recover.
    #[error("storage permission permanently denied")]
    PermissionPermanentlyDenied,

    #[error("no external storage volume reported by the host")]
    NoVolume,

    #[error("invalid entry name {name:?}")]
    InvalidName { name: String },

    #[error("{} is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    #[error("{} is not a file", path.display())]
    NotAFile { path: PathBuf },

    #[error("cannot resolve {}", path.display())]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{op} failed for {}", path.display())]
    Mutation {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A payload write failed mid-operation. The target file may exist in a
    /// partially-written state; no cleanup is performed.
    #[error("write to {} failed", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl VolumeError {
    /// True when the failed path simply did not resolve, as opposed to a
    /// rejected mutation or a permission problem.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Resolve { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}
