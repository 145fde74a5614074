//! Unified error type for the bridge.
//!
//! Every variant except [`BridgeError::Config`] is a *drop decision*: the
//! message or propagation in question is abandoned, the diagnostic is
//! logged, and the bridge carries on serving every other player. None of
//! them is ever shown to the player.

use authbridge_protocol::{Channel, ProtocolError};
use authbridge_transport::TransportError;

use crate::ConfigError;

/// Errors raised while handling side-channel traffic or loading config.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// The payload could not be parsed with the channel's layout.
    #[error("failed to read {channel} for {player}: {source}")]
    MalformedMessage {
        channel: Channel,
        player: String,
        #[source]
        source: ProtocolError,
    },

    /// The message carried the wrong shared secret.
    #[error("{channel} for {player} from server {server} has an invalid secret key")]
    UntrustedSource {
        channel: Channel,
        player: String,
        server: String,
    },

    /// A login names a different player than the one it was sent through.
    #[error(
        "the name '{claimed}' specified in authme:login does not match the name of the target player {target}"
    )]
    IdentityMismatch { claimed: String, target: String },

    /// The login propagator could not hand a record to the backend.
    #[error("failed to propagate login for {player} to server {server}: {source}")]
    PropagationFailure {
        player: String,
        server: String,
        #[source]
        source: PropagationCause,
    },

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Why a login propagation failed.
#[derive(Debug, thiserror::Error)]
pub enum PropagationCause {
    #[error(transparent)]
    Encode(#[from] ProtocolError),

    #[error(transparent)]
    Send(#[from] TransportError),
}

impl BridgeError {
    /// Short machine-readable name, recorded as the `kind` log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedMessage { .. } => "malformed_message",
            Self::UntrustedSource { .. } => "untrusted_source",
            Self::IdentityMismatch { .. } => "identity_mismatch",
            Self::PropagationFailure { .. } => "propagation_failure",
            Self::Config(_) => "config",
        }
    }

    /// Emits the diagnostic for this drop at its level.
    ///
    /// Parse and propagation failures are errors; a bad secret or a name
    /// mismatch is a warning, since it points at a misconfigured or hostile
    /// backend rather than a bridge fault.
    pub fn log(&self) {
        match self {
            Self::UntrustedSource { .. } | Self::IdentityMismatch { .. } => {
                tracing::warn!(kind = self.kind(), "{}", self);
            }
            Self::MalformedMessage { .. }
            | Self::PropagationFailure { .. }
            | Self::Config(_) => {
                tracing::error!(kind = self.kind(), "{}", self);
            }
        }
    }
}
