//! Side-channel transport abstraction for AuthBridge.
//!
//! Provides the [`PluginChannel`] trait that abstracts over the host proxy's
//! named-channel plugin-message transport, the thing that carries
//! `authme:*` payloads to a backend server.
//!
//! # Feature Flags
//!
//! - `memory` (default): in-process channel via `tokio::sync::mpsc`, used
//!   by tests and the demo in place of a real proxy

mod error;
#[cfg(feature = "memory")]
mod memory;

pub use error::TransportError;
#[cfg(feature = "memory")]
pub use memory::{MemoryChannel, MemoryReceiver};

use std::sync::Arc;

use bytes::Bytes;

/// One plugin message addressed to a backend server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginMessage {
    /// Name of the destination backend.
    pub server: String,
    /// Channel tag, e.g. `authme:login`.
    pub tag: String,
    /// Raw payload.
    pub data: Bytes,
}

/// Sends plugin messages to backend servers.
///
/// The transport gives no delivery acknowledgment, so `send` only queues
/// the message and must return without waiting on the network. An `Ok`
/// means "handed off", not "delivered".
pub trait PluginChannel: Send + Sync + 'static {
    /// Queues `data` on channel `tag` for delivery to `server`.
    fn send(
        &self,
        server: &str,
        tag: &str,
        data: Bytes,
    ) -> Result<(), TransportError>;
}

impl<T: PluginChannel + ?Sized> PluginChannel for Arc<T> {
    fn send(
        &self,
        server: &str,
        tag: &str,
        data: Bytes,
    ) -> Result<(), TransportError> {
        (**self).send(server, tag, data)
    }
}
