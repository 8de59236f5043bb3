//! Prefix-scoped barrier views.
//!
//! A view exposes a slice of the shared barrier under a fixed key prefix.
//! Each mounted credential backend gets a view rooted at its uuid, so its
//! persisted state cannot collide with the registry record or with any
//! other backend's state.

use async_trait::async_trait;
use std::sync::Arc;

use super::{Barrier, BarrierResult};

/// A prefix-isolated view over a shared [`Barrier`].
///
/// Keys are rewritten with the view's prefix on the way in and stripped of
/// it in `list` output, so the holder never sees outside its namespace.
#[derive(Clone)]
pub struct BarrierView {
    barrier: Arc<dyn Barrier>,
    prefix: String,
}

impl std::fmt::Debug for BarrierView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BarrierView")
            .field("prefix", &self.prefix)
            .finish()
    }
}

impl BarrierView {
    /// Create a view over `barrier` rooted at `prefix`.
    ///
    /// The prefix should end with `/` so sibling namespaces with a common
    /// stem cannot bleed into each other.
    pub fn new(barrier: Arc<dyn Barrier>, prefix: impl Into<String>) -> Self {
        Self {
            barrier,
            prefix: prefix.into(),
        }
    }

    /// The key prefix this view is rooted at.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }
}

#[async_trait]
impl Barrier for BarrierView {
    async fn get(&self, key: &str) -> BarrierResult<Option<Vec<u8>>> {
        self.barrier.get(&self.full_key(key)).await
    }

    async fn put(&self, key: &str, value: &[u8]) -> BarrierResult<()> {
        self.barrier.put(&self.full_key(key), value).await
    }

    async fn delete(&self, key: &str) -> BarrierResult<()> {
        self.barrier.delete(&self.full_key(key)).await
    }

    async fn list(&self, prefix: &str) -> BarrierResult<Vec<String>> {
        let keys = self.barrier.list(&self.full_key(prefix)).await?;
        Ok(keys
            .into_iter()
            .filter_map(|k| k.strip_prefix(&self.prefix).map(str::to_string))
            .collect())
    }
}
