//! # AuthBridge
//!
//! Login gating for a game proxy that fronts several backend servers.
//!
//! A player counts as authenticated only after the trusted backend's own
//! login plugin reports it over the `authme:*` side channel. Until then the
//! bridge cancels the player's server switches and chat (login and register
//! commands excepted).
//!
//! The host proxy owns the event bus; it hands each event to the matching
//! [`AuthBridge`] handler, which may flip the event's cancel flag.
//!
//! ## Quick Start
//!
//! ```rust
//! use authbridge::prelude::*;
//!
//! let channel = MemoryChannel::new();
//! let _backend = channel.connect("main");
//! let bridge = AuthBridge::new(BridgeConfig::default(), BinaryCodec, channel);
//!
//! let mut chat = ChatEvent::new(Endpoint::player("alice"), "hello");
//! bridge.on_chat(&mut chat);
//! assert!(chat.is_cancelled());
//! ```

mod bridge;
mod config;
mod error;
mod events;
pub mod gate;
mod propagator;
pub mod telemetry;

pub use bridge::AuthBridge;
pub use config::{
    BridgeConfig, ConfigError, CONFIG_FILE, DEFAULT_AUTH_SERVER,
    DEFAULT_SECRET_KEY,
};
pub use error::{BridgeError, PropagationCause};
pub use events::{
    Cancellable, ChatEvent, Endpoint, PlayerDisconnectEvent,
    PluginMessageEvent, ServerConnectEvent,
};
pub use propagator::LoginPropagator;

pub mod prelude {
    //! Everything a host integration needs, in one import.

    pub use crate::gate::{ChatDecision, ConnectDecision};
    pub use crate::{
        AuthBridge, BridgeConfig, BridgeError, Cancellable, ChatEvent,
        ConfigError, Endpoint, LoginPropagator, PlayerDisconnectEvent,
        PluginMessageEvent, ServerConnectEvent,
    };
    pub use authbridge_cache::{AuthCache, AuthState};
    pub use authbridge_protocol::{
        AuthRecord, BinaryCodec, BridgeMessage, Channel, Codec, Identity,
        ProtocolError,
    };
    #[cfg(feature = "memory")]
    pub use authbridge_transport::{MemoryChannel, MemoryReceiver};
    pub use authbridge_transport::{
        PluginChannel, PluginMessage, TransportError,
    };
    pub use bytes::Bytes;
}
