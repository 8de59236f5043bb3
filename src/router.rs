//! Request router for mounted credential backends.
//!
//! Routes request paths to the backend mounted at the longest matching
//! prefix. The router holds no durable state of its own: it is rebuilt
//! from the persisted auth table on every unseal, which is what makes the
//! persist-before-mount commit ordering safe.

use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::backend::CredentialBackend;
use crate::barrier::BarrierView;

/// Router error type.
#[derive(Debug, Error)]
pub enum RouterError {
    /// A backend is already mounted at this path prefix.
    #[error("path already claimed: {0}")]
    PathClaimed(String),

    /// No backend is mounted at this path prefix.
    #[error("no mount at path: {0}")]
    NoSuchMount(String),
}

/// Router result type.
pub type RouterResult<T> = Result<T, RouterError>;

/// A live backend bound to a path prefix and a private storage view.
struct MountedBackend {
    backend: Arc<dyn CredentialBackend>,
    view: BarrierView,
}

/// Routes request paths to mounted backend instances.
///
/// Prefixes are matched longest-first, so a mount at `auth/github/` wins
/// over one at `auth/` for a path like `auth/github/login`.
pub struct Router {
    mounts: RwLock<BTreeMap<String, MountedBackend>>,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router").field("mounts", &"<locked>").finish()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Create a new empty router.
    pub fn new() -> Self {
        Self {
            mounts: RwLock::new(BTreeMap::new()),
        }
    }

    /// Mount a backend at `prefix` with its private storage view.
    ///
    /// Fails with [`RouterError::PathClaimed`] if the prefix is taken; the
    /// registry never double-mounts, so replacing would only mask a bug.
    pub async fn mount(
        &self,
        backend: Arc<dyn CredentialBackend>,
        prefix: impl Into<String>,
        view: BarrierView,
    ) -> RouterResult<()> {
        let prefix = prefix.into();
        let mut mounts = self.mounts.write().await;
        if mounts.contains_key(&prefix) {
            return Err(RouterError::PathClaimed(prefix));
        }
        mounts.insert(prefix, MountedBackend { backend, view });
        Ok(())
    }

    /// Unmount the backend at `prefix`.
    pub async fn unmount(&self, prefix: &str) -> RouterResult<()> {
        let mut mounts = self.mounts.write().await;
        match mounts.remove(prefix) {
            Some(_) => Ok(()),
            None => Err(RouterError::NoSuchMount(prefix.to_string())),
        }
    }

    /// Find the backend for `path` by longest-prefix match.
    ///
    /// Returns the backend and the path remainder relative to its mount.
    pub async fn route(&self, path: &str) -> Option<(Arc<dyn CredentialBackend>, String)> {
        let mounts = self.mounts.read().await;

        let mut best: Option<(&String, &MountedBackend)> = None;
        for (prefix, mounted) in mounts.iter() {
            if path.starts_with(prefix.as_str())
                && best.is_none_or(|(p, _)| prefix.len() > p.len())
            {
                best = Some((prefix, mounted));
            }
        }

        best.map(|(prefix, mounted)| {
            (
                Arc::clone(&mounted.backend),
                path[prefix.len()..].to_string(),
            )
        })
    }

    /// Storage view prefix for the backend mounted at `prefix`, if any.
    pub async fn storage_prefix(&self, prefix: &str) -> Option<String> {
        let mounts = self.mounts.read().await;
        mounts.get(prefix).map(|m| m.view.prefix().to_string())
    }

    /// All currently mounted path prefixes, sorted.
    pub async fn mounted_paths(&self) -> Vec<String> {
        let mounts = self.mounts.read().await;
        mounts.keys().cloned().collect()
    }

    /// Whether a backend is mounted at exactly `prefix`.
    pub async fn is_mounted(&self, prefix: &str) -> bool {
        let mounts = self.mounts.read().await;
        mounts.contains_key(prefix)
    }
}
