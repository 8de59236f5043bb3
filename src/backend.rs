//! Credential backend trait and factory registry.
//!
//! A credential backend implements one authentication method (token,
//! oauth, certificate, ...). The registry maps a backend type tag to a
//! constructor; it is populated once by the hosting system at startup and
//! read-only from this core's perspective.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::auth::{AuthResult, TOKEN_BACKEND_TYPE};

/// Configuration mapping handed to backend constructors.
pub type BackendConfig = HashMap<String, String>;

/// Constructor for a credential backend.
pub type BackendFactory =
    Arc<dyn Fn(&BackendConfig) -> AuthResult<Arc<dyn CredentialBackend>> + Send + Sync>;

/// A pluggable credential backend.
///
/// Backend internals (how a token is validated, how an oauth exchange
/// runs) are out of scope for the registry; this trait is only what the
/// router needs to hold a live instance and dispatch to it.
#[async_trait]
pub trait CredentialBackend: Send + Sync {
    /// The backend type tag this instance was constructed for.
    fn backend_type(&self) -> &str;

    /// Handle a request routed to this backend.
    ///
    /// `path` is relative to the backend's mount point. The default
    /// implementation answers nothing.
    async fn handle_request(&self, path: &str) -> AuthResult<Option<serde_json::Value>> {
        let _ = path;
        Ok(None)
    }
}

/// Registry of credential backend constructors, keyed by type tag.
///
/// Populated by the hosting system before the first unseal; the mount
/// manager only performs lookups.
#[derive(Default)]
pub struct BackendRegistry {
    factories: HashMap<String, BackendFactory>,
}

impl fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendRegistry")
            .field("types", &self.registered_types())
            .finish()
    }
}

impl BackendRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory for `backend_type`, replacing any previous one.
    pub fn register(&mut self, backend_type: impl Into<String>, factory: BackendFactory) {
        self.factories.insert(backend_type.into(), factory);
    }

    /// Look up the factory for `backend_type`.
    pub fn lookup(&self, backend_type: &str) -> Option<&BackendFactory> {
        self.factories.get(backend_type)
    }

    /// All registered type tags, sorted.
    pub fn registered_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.factories.keys().cloned().collect();
        types.sort();
        types
    }
}

/// The built-in token backend.
///
/// The token method is a singleton: the bootstrap table creates its one
/// entry, and the public enable/disable operations refuse to touch it.
#[derive(Debug, Default)]
pub struct TokenBackend;

impl TokenBackend {
    /// Factory suitable for [`BackendRegistry::register`].
    pub fn factory() -> BackendFactory {
        Arc::new(|_conf| Ok(Arc::new(TokenBackend) as Arc<dyn CredentialBackend>))
    }
}

impl CredentialBackend for TokenBackend {
    fn backend_type(&self) -> &str {
        TOKEN_BACKEND_TYPE
    }
}
