//! Proxy events the bridge listens to.
//!
//! The host proxy builds these, hands them to the matching
//! [`AuthBridge`](crate::AuthBridge) handler, and afterwards checks
//! [`Cancellable::is_cancelled`]. The bridge only ever reads the fields and
//! sets the cancel flag; it never starts or ends a connection itself.

use bytes::Bytes;

/// Something that took part in a proxy event: a backend or a player.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// A backend server, by configured name.
    Server(String),
    /// A connected player, by display name.
    Player(String),
}

impl Endpoint {
    pub fn server(name: impl Into<String>) -> Self {
        Self::Server(name.into())
    }

    pub fn player(name: impl Into<String>) -> Self {
        Self::Player(name.into())
    }

    /// The player name, if this endpoint is a player.
    pub fn as_player(&self) -> Option<&str> {
        match self {
            Self::Player(name) => Some(name),
            Self::Server(_) => None,
        }
    }
}

/// An event the bridge may veto.
pub trait Cancellable {
    fn is_cancelled(&self) -> bool;
    fn set_cancelled(&mut self, cancelled: bool);
}

// Every event type stores its flag in a `cancelled` field.
macro_rules! impl_cancellable {
    ($($event:ty),* $(,)?) => {
        $(
            impl Cancellable for $event {
                fn is_cancelled(&self) -> bool {
                    self.cancelled
                }

                fn set_cancelled(&mut self, cancelled: bool) {
                    self.cancelled = cancelled;
                }
            }
        )*
    };
}

impl_cancellable!(ServerConnectEvent, ChatEvent, PluginMessageEvent);

// ---------------------------------------------------------------------------
// ServerConnectEvent
// ---------------------------------------------------------------------------

/// A player is about to be routed to a backend server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConnectEvent {
    /// Display name of the player being routed.
    pub player: String,
    /// Server the player is on now. `None` while the player is still joining
    /// the network.
    pub current_server: Option<String>,
    /// Server the player is being sent to.
    pub target: String,
    cancelled: bool,
}

impl ServerConnectEvent {
    /// A server switch from `current_server` to `target`.
    pub fn new(
        player: impl Into<String>,
        current_server: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            player: player.into(),
            current_server: Some(current_server.into()),
            target: target.into(),
            cancelled: false,
        }
    }

    /// The first routing of a player who just joined the proxy.
    pub fn initial(player: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            player: player.into(),
            current_server: None,
            target: target.into(),
            cancelled: false,
        }
    }

    /// `true` when the player is not on any server yet.
    pub fn is_initial(&self) -> bool {
        self.current_server.is_none()
    }
}

// ---------------------------------------------------------------------------
// ChatEvent
// ---------------------------------------------------------------------------

/// Chat text or a command is being sent through the proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEvent {
    pub sender: Endpoint,
    /// The raw text, commands included (`/login pw`).
    pub message: String,
    cancelled: bool,
}

impl ChatEvent {
    pub fn new(sender: Endpoint, message: impl Into<String>) -> Self {
        Self {
            sender,
            message: message.into(),
            cancelled: false,
        }
    }
}

// ---------------------------------------------------------------------------
// PluginMessageEvent
// ---------------------------------------------------------------------------

/// A plugin message is passing through the proxy.
///
/// Cancelling it stops the proxy from forwarding it to `receiver`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginMessageEvent {
    pub sender: Endpoint,
    pub receiver: Endpoint,
    /// Channel tag, e.g. `authme:login`.
    pub tag: String,
    pub data: Bytes,
    cancelled: bool,
}

impl PluginMessageEvent {
    pub fn new(
        sender: Endpoint,
        receiver: Endpoint,
        tag: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            sender,
            receiver,
            tag: tag.into(),
            data: data.into(),
            cancelled: false,
        }
    }
}

// ---------------------------------------------------------------------------
// PlayerDisconnectEvent
// ---------------------------------------------------------------------------

/// A player left the proxy. Not cancellable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerDisconnectEvent {
    pub player: String,
}

impl PlayerDisconnectEvent {
    pub fn new(player: impl Into<String>) -> Self {
        Self {
            player: player.into(),
        }
    }
}
