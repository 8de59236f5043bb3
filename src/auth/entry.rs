//! Auth table data model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CREDENTIAL_BARRIER_PREFIX, CREDENTIAL_MOUNT_PREFIX, TOKEN_BACKEND_TYPE};

/// One enabled authentication method.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthEntry {
    /// Backend name, the routable path segment (e.g. "github").
    pub name: String,
    /// Backend type tag resolved against the factory registry (e.g.
    /// "oauth"). Immutable once created.
    #[serde(rename = "type")]
    pub backend_type: String,
    /// User-provided description.
    #[serde(default)]
    pub description: String,
    /// Barrier view uuid, assigned at enable time and never reused.
    #[serde(default)]
    pub uuid: String,
}

impl AuthEntry {
    /// Create an entry with no uuid yet; the manager assigns one when the
    /// backend is enabled.
    pub fn new(
        name: impl Into<String>,
        backend_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            backend_type: backend_type.into(),
            description: description.into(),
            uuid: String::new(),
        }
    }

    /// Router path prefix this entry is mounted at.
    pub fn mount_path(&self) -> String {
        format!("{}{}/", CREDENTIAL_MOUNT_PREFIX, self.name)
    }

    /// Barrier key prefix of this entry's private storage namespace.
    pub fn barrier_prefix(&self) -> String {
        format!("{}{}/", CREDENTIAL_BARRIER_PREFIX, self.uuid)
    }
}

/// The auth table: the ordered set of enabled authentication methods.
///
/// A plain value. The manager guards the live table with its own lock and
/// mutates via candidate clones; `Clone` here is the deep copy those
/// candidates are built from. Entry order carries no semantic meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTable {
    /// The mount entries.
    pub entries: Vec<AuthEntry>,
}

impl AuthTable {
    /// The bootstrap table: just the token singleton with a fresh uuid.
    ///
    /// This is the only way a token entry ever comes into existence.
    pub fn default_table() -> Self {
        let token = AuthEntry {
            name: TOKEN_BACKEND_TYPE.to_string(),
            backend_type: TOKEN_BACKEND_TYPE.to_string(),
            description: "token based credentials".to_string(),
            uuid: Uuid::new_v4().to_string(),
        };
        Self {
            entries: vec![token],
        }
    }

    /// Find an entry by name.
    pub fn find(&self, name: &str) -> Option<&AuthEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
