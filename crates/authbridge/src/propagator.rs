//! Re-sending a known login to the trusted backend.
//!
//! When an already-authenticated player is routed (back) to the auth server,
//! that server's login plugin has no session for them and would prompt for
//! the password again. The propagator sends the cached [`AuthRecord`] ahead
//! of the player as an `authme:login` message so the backend can restore
//! the session silently.
//!
//! Delivery is fire-and-forget. If encoding or queueing fails the player
//! simply logs in again on that backend.

use authbridge_protocol::{AuthRecord, BridgeMessage, Channel, Codec};
use authbridge_transport::PluginChannel;

use crate::{BridgeError, PropagationCause};

/// Encodes auth records and queues them for a backend server.
///
/// Borrowed from the bridge for the duration of one connect event; see
/// [`AuthBridge::propagator`](crate::AuthBridge::propagator).
pub struct LoginPropagator<'a, C: Codec, T: PluginChannel> {
    codec: &'a C,
    channel: &'a T,
    secret: &'a str,
}

impl<'a, C: Codec, T: PluginChannel> LoginPropagator<'a, C, T> {
    pub fn new(codec: &'a C, channel: &'a T, secret: &'a str) -> Self {
        Self {
            codec,
            channel,
            secret,
        }
    }

    /// Sends `record` to `server` on the login channel.
    ///
    /// # Errors
    /// [`BridgeError::PropagationFailure`] if the record can't be encoded
    /// or the channel refuses the message.
    pub fn propagate(
        &self,
        server: &str,
        record: &AuthRecord,
    ) -> Result<(), BridgeError> {
        let failure = |source: PropagationCause| BridgeError::PropagationFailure {
            player: record.name().to_owned(),
            server: server.to_owned(),
            source,
        };

        let message = BridgeMessage::Login {
            secret: self.secret.to_owned(),
            record: record.clone(),
        };
        let data = self
            .codec
            .encode(&message)
            .map_err(|e| failure(e.into()))?;
        self.channel
            .send(server, Channel::Login.tag(), data)
            .map_err(|e| failure(e.into()))?;

        tracing::info!(player = %record.name(), %server, "propagated login");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use authbridge_protocol::BinaryCodec;
    use authbridge_transport::{MemoryChannel, TransportError};

    use super::*;

    fn record() -> AuthRecord {
        AuthRecord::new("Bob", "h1", "1.2.3.4", 1000)
    }

    #[test]
    fn test_propagate_sends_login_message_to_server() {
        let channel = MemoryChannel::new();
        let mut inbox = channel.connect("main");
        let propagator = LoginPropagator::new(&BinaryCodec, &channel, "s");

        propagator.propagate("main", &record()).unwrap();

        let sent = inbox.try_recv().expect("message should be queued");
        assert_eq!(sent.server, "main");
        assert_eq!(sent.tag, "authme:login");
        let decoded = BinaryCodec.decode(Channel::Login, &sent.data).unwrap();
        assert_eq!(
            decoded,
            BridgeMessage::Login {
                secret: "s".into(),
                record: record(),
            }
        );
    }

    #[test]
    fn test_propagate_unknown_server_is_propagation_failure() {
        let channel = MemoryChannel::new();
        let propagator = LoginPropagator::new(&BinaryCodec, &channel, "s");

        let result = propagator.propagate("main", &record());

        assert!(matches!(
            result,
            Err(BridgeError::PropagationFailure {
                source: PropagationCause::Send(TransportError::UnknownServer(_)),
                ..
            })
        ));
    }

    #[test]
    fn test_propagate_unencodable_record_is_propagation_failure() {
        let channel = MemoryChannel::new();
        let mut inbox = channel.connect("main");
        let propagator = LoginPropagator::new(&BinaryCodec, &channel, "s");
        let oversized =
            AuthRecord::new("Bob", "h".repeat(70_000), "1.2.3.4", 1000);

        let result = propagator.propagate("main", &oversized);

        assert!(matches!(
            result,
            Err(BridgeError::PropagationFailure {
                source: PropagationCause::Encode(_),
                ..
            })
        ));
        assert!(inbox.try_recv().is_none(), "nothing should be sent");
    }
}
