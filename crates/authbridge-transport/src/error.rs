/// Errors that can occur in the transport layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The channel to the server has been closed.
    #[error("channel closed: {0}")]
    Closed(String),

    /// No connection to a server with this name.
    #[error("unknown server: {0}")]
    UnknownServer(String),
}
