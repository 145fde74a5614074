//! The authentication fact a trusted backend reports for one player.

use crate::Identity;

/// One player's currently-trusted authentication record.
///
/// Fields are private and there are no setters: once a record has been
/// built from a validated `login` message it never changes. A newer login
/// replaces the whole record in the cache instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuthRecord {
    /// Display-cased name, exactly as the backend sent it.
    name: String,
    /// Opaque credential hash. Passed through, never compared.
    credential_hash: String,
    /// Address the backend saw the player log in from.
    source_ip: String,
    /// Login time in milliseconds since the Unix epoch.
    last_login: i64,
}

impl AuthRecord {
    pub fn new(
        name: impl Into<String>,
        credential_hash: impl Into<String>,
        source_ip: impl Into<String>,
        last_login: i64,
    ) -> Self {
        Self {
            name: name.into(),
            credential_hash: credential_hash.into(),
            source_ip: source_ip.into(),
            last_login,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn credential_hash(&self) -> &str {
        &self.credential_hash
    }

    pub fn source_ip(&self) -> &str {
        &self.source_ip
    }

    /// Login time in epoch milliseconds.
    pub fn last_login(&self) -> i64 {
        self.last_login
    }

    /// The cache key this record belongs under.
    pub fn identity(&self) -> Identity {
        Identity::new(&self.name)
    }
}
