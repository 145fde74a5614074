//! Player authentication state for AuthBridge.
//!
//! This crate answers one question, as fast as possible and from any
//! thread: "is this player authenticated right now?"
//!
//! 1. **Storage**: who is authenticated, and with which record
//!    ([`AuthCache`])
//! 2. **State**: the two-state view every gate decision is made on
//!    ([`AuthState`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Bridge (above)     ← writes on validated login/logout, reads on connect/chat
//!     ↕
//! Cache (this crate) ← identity → record, per-key atomic
//!     ↕
//! Protocol (below)   ← provides Identity, AuthRecord
//! ```

mod cache;
mod state;

pub use cache::AuthCache;
pub use state::AuthState;
