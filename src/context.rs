use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::VolumeError;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    PermanentlyDenied,
}

/// Host capability that grants or denies access to removable storage.
#[async_trait]
pub trait PermissionGateway: Send + Sync {
    async fn request(&self, permission: &str) -> Result<PermissionStatus, VolumeError>;
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LocationKind {
    Root,
    Application,
}

/// One storage location reported by the host for the removable volume.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VolumeLocation {
    pub kind: LocationKind,
    pub path: PathBuf,
    pub free_space_bytes: u64,
}

/// Host capability that reports where the removable volume is mounted.
#[async_trait]
pub trait VolumeLocator: Send + Sync {
    async fn locate(&self) -> Result<Vec<VolumeLocation>, VolumeError>;
}

/// Resolved access to the external volume: the root path, the
/// application-scoped path, and an advisory free-space figure.
///
/// Built once by [`StorageContext::initialize`] and passed around explicitly;
/// the free-space figure is cached at initialization and may go stale; it is
/// never re-validated automatically.
#[derive(Clone, Debug)]
pub struct StorageContext {
    root: PathBuf,
    app_root: PathBuf,
    free_space_bytes: u64,
}

impl StorageContext {
    /// Request the storage permission, then resolve the volume's locations.
    ///
    /// A `Denied` answer fails with [`VolumeError::PermissionDenied`], a
    /// `PermanentlyDenied` answer with
    /// [`VolumeError::PermissionPermanentlyDenied`]; the two are distinct so
    /// callers can tell a re-requestable denial from a terminal one.
    pub async fn initialize<P, L>(
        gateway: &P,
        locator: &L,
        permission: &str,
    ) -> Result<Self, VolumeError>
    where
        P: PermissionGateway,
        L: VolumeLocator,
    {
        match gateway.request(permission).await? {
            PermissionStatus::Granted => {}
            PermissionStatus::Denied => {
                warn!(permission, "storage permission denied");
                return Err(VolumeError::PermissionDenied);
            }
            PermissionStatus::PermanentlyDenied => {
                warn!(permission, "storage permission permanently denied");
                return Err(VolumeError::PermissionPermanentlyDenied);
            }
        }

        let locations = locator.locate().await?;
        let root = locations
            .iter()
            .find(|loc| loc.kind == LocationKind::Root)
            .ok_or_else(|| {
                warn!("host reported no root location for the removable volume");
                VolumeError::NoVolume
            })?;
        // Hosts without an application-scoped directory fall back to the root.
        let app_root = locations
            .iter()
            .find(|loc| loc.kind == LocationKind::Application)
            .map_or_else(|| root.path.clone(), |loc| loc.path.clone());

        Ok(Self {
            root: root.path.clone(),
            app_root,
            free_space_bytes: root.free_space_bytes,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn app_root(&self) -> &Path {
        &self.app_root
    }

    /// Free space on the volume as reported at initialization. Advisory only.
    pub fn free_space_bytes(&self) -> u64 {
        self.free_space_bytes
    }

    /// Path of `item` directly under the volume root.
    pub fn root_child(&self, item: &str) -> PathBuf {
        self.root.join(item)
    }

    /// Path of `item` under the application-scoped directory.
    pub fn app_child(&self, item: &str) -> PathBuf {
        self.app_root.join(item)
    }
}
