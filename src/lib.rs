//! # strongbox-core
//!
//! Credential mount registry for the strongbox secrets service.
//!
//! This crate tracks which credential backends (token, oauth, certificate,
//! ...) are enabled, persists that registry behind the storage barrier, and
//! mounts live backend instances into the request router. Key components:
//!
//! - [`Barrier`] - Encrypted key/value storage collaborator
//! - [`BarrierView`] - Prefix-scoped view giving each backend a private
//!   storage namespace
//! - [`BackendRegistry`] - Type tag → backend constructor lookup
//! - [`Router`] - Path prefix → live backend instance table
//! - [`CredentialManager`] - The lifecycle operations: enable, disable,
//!   load, setup, teardown
//!
//! ## Design Decisions
//!
//! - **Copy-on-write table updates**: mutations build a candidate clone,
//!   persist it through the barrier, and only then swap it in as the live
//!   table. Readers never observe a partially-committed registry.
//! - **Persist-before-mount**: the barrier is the source of truth. The
//!   router is rebuilt from the persisted table on every unseal, so a
//!   missed mount self-heals while a missed write would not.
//! - **Coarse locking**: one table-wide lock serializes each administrative
//!   operation end to end, collaborator calls included. These are rare
//!   control-plane calls; the simple consistency story wins.

pub mod auth;
pub mod backend;
pub mod barrier;
pub mod router;

pub use auth::{
    AUTH_TABLE_KEY, AuthEntry, AuthError, AuthResult, AuthTable, CREDENTIAL_BARRIER_PREFIX,
    CREDENTIAL_MOUNT_PREFIX, CredentialManager, TOKEN_BACKEND_TYPE,
};
pub use backend::{BackendConfig, BackendFactory, BackendRegistry, CredentialBackend, TokenBackend};
pub use barrier::{Barrier, BarrierError, BarrierResult, BarrierView, MemoryBarrier};
pub use router::{Router, RouterError, RouterResult};
