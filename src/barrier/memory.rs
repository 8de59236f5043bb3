//! In-memory barrier backend.
//!
//! Used for testing and for embedders that do not need durable storage.
//! All data is ephemeral.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

use super::{Barrier, BarrierResult};

/// In-memory [`Barrier`] implementation.
///
/// Thread-safe via internal `RwLock`. All data is lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryBarrier {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryBarrier {
    /// Create a new empty barrier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the barrier holds no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl Barrier for MemoryBarrier {
    async fn get(&self, key: &str) -> BarrierResult<Option<Vec<u8>>> {
        Ok(self.entries.read().get(key).cloned())
    }

    async fn put(&self, key: &str, value: &[u8]) -> BarrierResult<()> {
        self.entries.write().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn delete(&self, key: &str) -> BarrierResult<()> {
        self.entries.write().remove(key);
        Ok(())
    }

    async fn list(&self, prefix: &str) -> BarrierResult<Vec<String>> {
        let entries = self.entries.read();
        let mut keys: Vec<String> = entries
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect();
        keys.sort();
        Ok(keys)
    }
}
