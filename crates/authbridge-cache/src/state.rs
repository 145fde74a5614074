//! The per-player authentication state machine.
//!
//! There are exactly two states and no in-between:
//!
//! ```text
//!   Unauthenticated ──(validated login)──→ Authenticated
//!          ↑                                     │
//!          └──────(validated logout / disconnect)┘
//! ```
//!
//! The state is never stored on its own. It is derived from cache presence
//! in one place, [`AuthCache::state`](crate::AuthCache::state), so there is
//! a single authoritative definition of "authenticated".

use std::fmt;
use std::sync::Arc;

use authbridge_protocol::AuthRecord;

/// Whether a player may act, and on the strength of which record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// No trusted backend has vouched for this player (yet).
    Unauthenticated,

    /// A trusted backend reported a successful login.
    Authenticated(Arc<AuthRecord>),
}

impl AuthState {
    /// Returns `true` for [`AuthState::Authenticated`].
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// The record behind an authenticated state.
    pub fn record(&self) -> Option<&Arc<AuthRecord>> {
        match self {
            Self::Authenticated(record) => Some(record),
            Self::Unauthenticated => None,
        }
    }
}

impl fmt::Display for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthenticated => write!(f, "Unauthenticated"),
            Self::Authenticated(_) => write!(f, "Authenticated"),
        }
    }
}
