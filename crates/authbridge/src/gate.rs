//! Gating policy: what an unauthenticated player may and may not do.
//!
//! The functions here are pure. They look at an [`AuthState`] and an event
//! and return a decision; [`AuthBridge`](crate::AuthBridge) applies it. This
//! keeps the whole policy in one place and lets it be tested without a
//! cache, a codec or a transport.

use std::sync::Arc;

use authbridge_cache::AuthState;
use authbridge_protocol::AuthRecord;

use crate::ServerConnectEvent;

/// Chat command that must reach the login plugin un-gated.
pub const LOGIN_COMMAND: &str = "/login";

/// Chat command that must reach the login plugin un-gated.
pub const REGISTER_COMMAND: &str = "/register";

/// What to do with a server connect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectDecision {
    /// Let it through.
    Allow,
    /// Let it through, but first hand this record to the trusted backend.
    Propagate(Arc<AuthRecord>),
    /// Cancel it; the player stays where they are.
    Deny,
}

/// What to do with a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatDecision {
    Allow,
    Deny,
}

/// Returns `true` if `message` starts with a login or register command,
/// ignoring case.
///
/// This is a plain prefix test, so `/loginfoo` also passes. The backend's
/// own command handling decides what the text means.
pub fn is_auth_command(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.starts_with(LOGIN_COMMAND) || lower.starts_with(REGISTER_COMMAND)
}

/// Decides a server connect for a player in `state`.
///
/// A player's very first routing into the network is never gated: they
/// have to reach a server before they can log in anywhere.
pub fn decide_connect(
    state: &AuthState,
    event: &ServerConnectEvent,
    auth_server: &str,
) -> ConnectDecision {
    if event.is_initial() {
        return ConnectDecision::Allow;
    }
    match state {
        AuthState::Unauthenticated => ConnectDecision::Deny,
        AuthState::Authenticated(record) if event.target == auth_server => {
            ConnectDecision::Propagate(Arc::clone(record))
        }
        AuthState::Authenticated(_) => ConnectDecision::Allow,
    }
}

/// Decides a chat message from a player in `state`.
pub fn decide_chat(state: &AuthState, message: &str) -> ChatDecision {
    if state.is_authenticated() || is_auth_command(message) {
        ChatDecision::Allow
    } else {
        ChatDecision::Deny
    }
}
