//! Auth operation error taxonomy.
//!
//! Three families matter to callers: validation errors (nothing changed),
//! persistence errors (candidate discarded, nothing changed), and the
//! single fatal load class that aborts an unseal. A router failure after a
//! successful persist is its own family: committed, not yet reconciled.

use thiserror::Error;

use crate::barrier::BarrierError;
use crate::router::RouterError;

/// Auth error type.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The request is malformed (e.g. empty backend name).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// An entry with this name already exists.
    #[error("backend name already in use: {0}")]
    NameInUse(String),

    /// The token backend is a singleton and cannot be enabled or disabled.
    #[error("token credential backend cannot be instantiated or disabled")]
    ReservedType,

    /// No factory is registered for this backend type.
    #[error("unknown backend type: {0}")]
    UnknownBackendType(String),

    /// No mounted backend matches this name.
    #[error("no matching backend: {0}")]
    NotFound(String),

    /// Persisting the candidate table failed; the live table is unchanged.
    #[error("failed to update auth table")]
    TableUpdateFailed(#[source] BarrierError),

    /// Fatal failure while loading or setting up the auth table. The
    /// unseal must abort rather than serve a partial surface.
    #[error("failed to setup auth table")]
    LoadFailed,

    /// Router mount/unmount failed after the table was already persisted.
    /// Bounded inconsistency; self-heals on the next load/setup pass.
    #[error("router error: {0}")]
    Router(#[from] RouterError),

    /// The table is not loaded (sealed); no operation may proceed.
    #[error("auth table is not loaded")]
    Sealed,

    /// Backend constructor failure.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Auth result type.
pub type AuthResult<T> = Result<T, AuthError>;
