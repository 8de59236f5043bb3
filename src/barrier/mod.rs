//! Encrypted storage barrier.
//!
//! The barrier is the durable key/value collaborator that transparently
//! encrypts everything behind it. This core treats it as an opaque
//! get/put service; sealing, key management, and the cipher itself live
//! elsewhere.

use async_trait::async_trait;
use std::io;
use thiserror::Error;

mod memory;
mod view;

pub use memory::MemoryBarrier;
pub use view::BarrierView;

/// Barrier error type.
#[derive(Debug, Error)]
pub enum BarrierError {
    /// The barrier is sealed and cannot serve reads or writes.
    #[error("barrier is sealed")]
    Sealed,

    /// I/O error from the underlying store.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl BarrierError {
    /// Create an Other error.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

/// Barrier result type.
pub type BarrierResult<T> = Result<T, BarrierError>;

/// Encrypted key/value storage.
///
/// Keys are `/`-separated strings. Values are opaque bytes; encryption and
/// decryption happen below this trait.
#[async_trait]
pub trait Barrier: Send + Sync {
    /// Fetch the value at `key`, or `None` if the key is absent.
    async fn get(&self, key: &str) -> BarrierResult<Option<Vec<u8>>>;

    /// Write `value` at `key`, replacing any existing value.
    async fn put(&self, key: &str, value: &[u8]) -> BarrierResult<()>;

    /// Remove the value at `key`. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> BarrierResult<()>;

    /// List all keys starting with `prefix`, sorted.
    async fn list(&self, prefix: &str) -> BarrierResult<Vec<String>>;
}
