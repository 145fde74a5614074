//! In-process [`PluginChannel`] built on unbounded `tokio` mpsc queues.

use bytes::Bytes;
use dashmap::DashMap;
use tokio::sync::mpsc;

use crate::{PluginChannel, PluginMessage, TransportError};

/// An in-memory stand-in for the proxy's server connections.
///
/// Each backend registers with [`connect`](Self::connect) and gets a
/// [`MemoryReceiver`] for the messages addressed to it. Sending never
/// blocks: the queues are unbounded, like the proxy's own outbound buffer.
#[derive(Debug, Default)]
pub struct MemoryChannel {
    servers: DashMap<String, mpsc::UnboundedSender<PluginMessage>>,
}

impl MemoryChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a backend named `server` and returns its inbox.
    ///
    /// Connecting the same name again replaces the previous inbox; the old
    /// receiver stops getting messages.
    pub fn connect(&self, server: &str) -> MemoryReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        self.servers.insert(server.to_owned(), tx);
        tracing::debug!(server, "memory channel connected");
        MemoryReceiver { rx }
    }

    /// Drops the connection to `server`.
    pub fn disconnect(&self, server: &str) {
        self.servers.remove(server);
        tracing::debug!(server, "memory channel disconnected");
    }
}

impl PluginChannel for MemoryChannel {
    fn send(
        &self,
        server: &str,
        tag: &str,
        data: Bytes,
    ) -> Result<(), TransportError> {
        let tx = self
            .servers
            .get(server)
            .ok_or_else(|| TransportError::UnknownServer(server.to_owned()))?;

        tx.send(PluginMessage {
            server: server.to_owned(),
            tag: tag.to_owned(),
            data,
        })
        .map_err(|_| TransportError::Closed(server.to_owned()))?;

        tracing::trace!(server, tag, "plugin message queued");
        Ok(())
    }
}

/// The receiving end of one backend's queue.
#[derive(Debug)]
pub struct MemoryReceiver {
    rx: mpsc::UnboundedReceiver<PluginMessage>,
}

impl MemoryReceiver {
    /// Waits for the next message. `None` once the channel is gone.
    pub async fn recv(&mut self) -> Option<PluginMessage> {
        self.rx.recv().await
    }

    /// Takes the next message if one is already queued.
    pub fn try_recv(&mut self) -> Option<PluginMessage> {
        self.rx.try_recv().ok()
    }
}
