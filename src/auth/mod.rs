//! The auth table and its lifecycle.
//!
//! This module is the registry proper:
//!
//! - [`AuthEntry`] / [`AuthTable`] - The data model persisted behind the
//!   barrier
//! - [`CredentialManager`] - enable/disable/load/setup/teardown over a
//!   copy-on-write table
//! - [`AuthError`] - The operation error taxonomy

mod entry;
mod error;
mod manager;

pub use entry::{AuthEntry, AuthTable};
pub use error::{AuthError, AuthResult};
pub use manager::CredentialManager;

/// Barrier key holding the serialized auth table. Protected within the
/// barrier itself, so it can only be read or written after an unseal.
pub const AUTH_TABLE_KEY: &str = "core/auth";

/// Barrier key prefix under which each backend's uuid-scoped view lives.
pub const CREDENTIAL_BARRIER_PREFIX: &str = "auth/";

/// Router path prefix under which credential backends are mounted.
pub const CREDENTIAL_MOUNT_PREFIX: &str = "auth/";

/// Type tag of the singleton token backend.
pub const TOKEN_BACKEND_TYPE: &str = "token";
