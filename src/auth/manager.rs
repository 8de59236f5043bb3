//! Credential mount lifecycle.
//!
//! The manager owns the live auth table and runs every operation that
//! mutates, persists, loads, or reconciles it. Commit ordering for
//! mutations is fixed: validate, clone, persist the candidate, swap it in
//! as the live table, and only then touch the router. The barrier record
//! is the durable truth; the router is rebuilt from it on every unseal.

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::entry::{AuthEntry, AuthTable};
use super::error::{AuthError, AuthResult};
use super::{AUTH_TABLE_KEY, TOKEN_BACKEND_TYPE};
use crate::backend::{BackendConfig, BackendRegistry, CredentialBackend};
use crate::barrier::{Barrier, BarrierError, BarrierView};
use crate::router::Router;

/// Manages the credential mount table across its whole lifecycle.
///
/// The table lives behind one coarse lock: `None` while sealed, `Some`
/// while unsealed. Each administrative operation holds the write lock end
/// to end, barrier and router calls included — these are infrequent
/// control-plane calls, and the single lock keeps the consistency story
/// simple. Readers take the lock in read mode and clone out a snapshot.
pub struct CredentialManager {
    barrier: Arc<dyn Barrier>,
    router: Arc<Router>,
    backends: Arc<BackendRegistry>,
    table: RwLock<Option<AuthTable>>,
}

impl std::fmt::Debug for CredentialManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialManager")
            .field("backends", &self.backends)
            .finish()
    }
}

impl CredentialManager {
    /// Create a manager in the sealed (not-loaded) state.
    ///
    /// The registry must already hold every factory the persisted table
    /// will need; it is read-only from here on.
    pub fn new(
        barrier: Arc<dyn Barrier>,
        router: Arc<Router>,
        backends: Arc<BackendRegistry>,
    ) -> Self {
        Self {
            barrier,
            router,
            backends,
            table: RwLock::new(None),
        }
    }

    /// Whether the auth table is currently loaded.
    pub async fn is_loaded(&self) -> bool {
        self.table.read().await.is_some()
    }

    /// Enable a new credential backend.
    ///
    /// Validates, assigns the entry a fresh uuid, persists a candidate
    /// table, commits it, and mounts the new backend into the router.
    /// Fails with no observable effect unless the persist succeeded.
    pub async fn enable_credential(&self, entry: AuthEntry) -> AuthResult<()> {
        let mut guard = self.table.write().await;
        let table = guard.as_ref().ok_or(AuthError::Sealed)?;

        // Validation, all before any mutation
        if entry.name.is_empty() {
            return Err(AuthError::InvalidRequest(
                "backend name must be specified".to_string(),
            ));
        }
        if table.find(&entry.name).is_some() {
            return Err(AuthError::NameInUse(entry.name));
        }
        if entry.backend_type == TOKEN_BACKEND_TYPE {
            return Err(AuthError::ReservedType);
        }

        let factory = self
            .backends
            .lookup(&entry.backend_type)
            .ok_or_else(|| AuthError::UnknownBackendType(entry.backend_type.clone()))?;
        let backend = factory(&BackendConfig::new())?;

        let mut entry = entry;
        entry.uuid = Uuid::new_v4().to_string();
        let view = BarrierView::new(Arc::clone(&self.barrier), entry.barrier_prefix());

        // Candidate table: persist first, then swap it in
        let mut candidate = table.clone();
        candidate.entries.push(entry.clone());
        self.persist_auth(&candidate).await?;
        *guard = Some(candidate);

        self.router.mount(backend, entry.mount_path(), view).await?;
        info!(
            name = %entry.name,
            backend_type = %entry.backend_type,
            "enabled credential backend"
        );
        Ok(())
    }

    /// Disable an existing credential backend.
    ///
    /// Removes the entry from a candidate table, persists it, commits it,
    /// and unmounts the backend's path. Same persist-before-router
    /// ordering as enable.
    pub async fn disable_credential(&self, name: &str) -> AuthResult<()> {
        let mut guard = self.table.write().await;
        let table = guard.as_ref().ok_or(AuthError::Sealed)?;

        if name == TOKEN_BACKEND_TYPE {
            return Err(AuthError::ReservedType);
        }

        let mut candidate = table.clone();
        let idx = candidate
            .entries
            .iter()
            .position(|e| e.name == name)
            .ok_or_else(|| AuthError::NotFound(name.to_string()))?;
        // Entry order carries no meaning
        let removed = candidate.entries.swap_remove(idx);

        self.persist_auth(&candidate).await?;
        *guard = Some(candidate);

        self.router.unmount(&removed.mount_path()).await?;
        info!(name = %removed.name, "disabled credential backend");
        Ok(())
    }

    /// A consistent snapshot of the enabled authentication methods.
    ///
    /// Entry order is unspecified.
    pub async fn list_backends(&self) -> AuthResult<Vec<AuthEntry>> {
        let guard = self.table.read().await;
        let table = guard.as_ref().ok_or(AuthError::Sealed)?;
        Ok(table.entries.clone())
    }

    /// Load the auth table from the barrier. Invoked once per unseal,
    /// before any administrative operation is accepted.
    ///
    /// An empty barrier bootstraps and persists the default table. Every
    /// failure mode collapses to [`AuthError::LoadFailed`]: an unloadable
    /// registry is a security-relevant unknown state and the unseal must
    /// not proceed.
    pub async fn load_credentials(&self) -> AuthResult<()> {
        let mut guard = self.table.write().await;

        let raw = self.barrier.get(AUTH_TABLE_KEY).await.map_err(|err| {
            error!(%err, "failed to read auth table");
            AuthError::LoadFailed
        })?;

        let table = match raw {
            Some(bytes) => serde_json::from_slice::<AuthTable>(&bytes).map_err(|err| {
                error!(%err, "failed to decode auth table");
                AuthError::LoadFailed
            })?,
            None => {
                let table = AuthTable::default_table();
                self.persist_auth(&table).await.map_err(|err| {
                    error!(%err, "failed to persist default auth table");
                    AuthError::LoadFailed
                })?;
                table
            }
        };

        *guard = Some(table);
        Ok(())
    }

    /// Rebuild the router from the loaded table. Invoked once per unseal,
    /// immediately after [`load_credentials`](Self::load_credentials).
    ///
    /// Any per-entry failure unwinds the mounts made so far and aborts
    /// with [`AuthError::LoadFailed`]: a partially mounted authentication
    /// surface must never be exposed.
    pub async fn setup_credentials(&self) -> AuthResult<()> {
        let guard = self.table.read().await;
        let table = guard.as_ref().ok_or(AuthError::Sealed)?;

        let mut mounted: Vec<String> = Vec::new();
        for entry in &table.entries {
            if let Err(err) = self.setup_entry(entry).await {
                error!(
                    name = %entry.name,
                    backend_type = %entry.backend_type,
                    %err,
                    "failed to setup credential backend"
                );
                self.unwind_mounts(&mounted).await;
                return Err(AuthError::LoadFailed);
            }
            mounted.push(entry.mount_path());
        }
        Ok(())
    }

    /// Seal-time teardown: forget the live table.
    ///
    /// After this returns, every operation fails with
    /// [`AuthError::Sealed`] until the next
    /// [`load_credentials`](Self::load_credentials). Unmounting individual
    /// router paths is the broader seal procedure's job.
    pub async fn teardown_credentials(&self) {
        *self.table.write().await = None;
    }

    /// Construct and mount one entry's backend.
    async fn setup_entry(&self, entry: &AuthEntry) -> AuthResult<()> {
        let factory = self
            .backends
            .lookup(&entry.backend_type)
            .ok_or_else(|| AuthError::UnknownBackendType(entry.backend_type.clone()))?;
        let backend: Arc<dyn CredentialBackend> = factory(&BackendConfig::new())?;
        let view = BarrierView::new(Arc::clone(&self.barrier), entry.barrier_prefix());
        self.router.mount(backend, entry.mount_path(), view).await?;
        Ok(())
    }

    /// Roll back the mounts of an aborted setup pass.
    async fn unwind_mounts(&self, paths: &[String]) {
        for path in paths {
            if let Err(err) = self.router.unmount(path).await {
                warn!(%path, %err, "failed to unwind mount");
            }
        }
    }

    /// Serialize `table` and write it to the fixed barrier key.
    ///
    /// Errors surface to the caller verbatim; retry policy, if any, is the
    /// caller's.
    async fn persist_auth(&self, table: &AuthTable) -> AuthResult<()> {
        let raw = serde_json::to_vec(table)
            .map_err(|err| AuthError::TableUpdateFailed(BarrierError::other(err.to_string())))?;
        self.barrier.put(AUTH_TABLE_KEY, &raw).await.map_err(|err| {
            error!(%err, "failed to persist auth table");
            AuthError::TableUpdateFailed(err)
        })
    }
}
