//! Player identity normalization.
//!
//! Player names are case-insensitive in this domain: "Alice", "alice" and
//! "ALICE" are the same account. Every lookup in the authentication cache
//! goes through [`Identity`] so that no call site can forget to fold case.

use std::fmt;

/// Folds a player name to its canonical cache-key form.
pub fn normalize(name: &str) -> String {
    name.to_lowercase()
}

/// A normalized (lowercased) player name.
///
/// This is a newtype wrapper around `String`. The only way to build one is
/// through [`Identity::new`], so an `Identity` is always already
/// normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity(String);

impl Identity {
    /// Creates the identity for a display-cased player name.
    pub fn new(name: &str) -> Self {
        Self(normalize(name))
    }

    /// Returns the normalized name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if `name` refers to this identity, ignoring case.
    pub fn matches(&self, name: &str) -> bool {
        self.0 == normalize(name)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
