//! The authentication cache: who is currently trusted to act.
//!
//! This is the single source of truth for "is this player authenticated".
//! It is responsible for:
//! - Recording a player's [`AuthRecord`] when a trusted backend reports a login
//! - Forgetting it on logout or disconnect
//! - Answering lookups from every player's event handlers concurrently
//!
//! # Concurrency note
//!
//! Unlike a plain `HashMap` behind one big lock, the cache is a
//! [`DashMap`]: the key space is split into shards, each with its own
//! read-write lock. A `put` or `remove` locks exactly one shard for the
//! duration of the insert, so readers of that key see either the old
//! record or the new one, never half of each, and players that hash to
//! other shards are not blocked at all.
//!
//! Records are stored behind `Arc` so a lookup can hand out the record and
//! release the shard lock immediately.
//!
//! Entries never expire on their own. There is no background sweep and no
//! iteration API: every access on the event path is a single-key lookup.

use std::sync::Arc;

use authbridge_protocol::{AuthRecord, Identity};
use dashmap::DashMap;

use crate::AuthState;

/// Concurrent mapping from normalized player identity to auth record.
///
/// ## Lifecycle of an entry
///
/// ```text
/// validated login ──→ put() ──→ [present] ──→ remove() ←── validated logout
///                                   │                  ←── player disconnect
///                      put() again ─┘ (last write wins)
/// ```
#[derive(Debug, Default)]
pub struct AuthCache {
    entries: DashMap<Identity, Arc<AuthRecord>>,
}

impl AuthCache {
    /// Creates an empty cache. Every player starts unauthenticated.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or unconditionally overwrites the record for the player it
    /// names. The key is always `record.identity()`.
    ///
    /// Returns the record it replaced, if any.
    pub fn put(&self, record: AuthRecord) -> Option<Arc<AuthRecord>> {
        let identity = record.identity();
        tracing::info!(%identity, "added to the authentication cache");
        self.entries.insert(identity, Arc::new(record))
    }

    /// Looks up the record for `identity`.
    ///
    /// `None` is the normal answer for a player who hasn't logged in.
    pub fn get(&self, identity: &Identity) -> Option<Arc<AuthRecord>> {
        self.entries
            .get(identity)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Forgets `identity`. Removing an absent player is a no-op.
    pub fn remove(&self, identity: &Identity) -> Option<Arc<AuthRecord>> {
        let removed = self.entries.remove(identity).map(|(_, record)| record);
        if removed.is_some() {
            tracing::info!(%identity, "removed from the authentication cache");
        } else {
            tracing::debug!(%identity, "not in the authentication cache");
        }
        removed
    }

    /// The player's current [`AuthState`].
    pub fn state(&self, identity: &Identity) -> AuthState {
        match self.get(identity) {
            Some(record) => AuthState::Authenticated(record),
            None => AuthState::Unauthenticated,
        }
    }

    pub fn is_authenticated(&self, identity: &Identity) -> bool {
        self.entries.contains_key(identity)
    }

    /// Number of authenticated players.
    ///
    /// Visits every shard in turn, so this is for diagnostics and tests
    /// only. Event handling never calls it.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Diagnostics only; see [`len`](Self::len).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =========================================================================
// Tests
// =========================================================================
