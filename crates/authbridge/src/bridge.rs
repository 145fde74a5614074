//! `AuthBridge`: the proxy-side listener that ties cache, codec and gate
//! together.
//!
//! The host proxy calls one handler per event:
//!
//! - [`on_plugin_message`](AuthBridge::on_plugin_message): side-channel
//!   traffic from a backend; validated logins/logouts mutate the cache
//! - [`on_server_connect`](AuthBridge::on_server_connect): server switches;
//!   gated, and may trigger login propagation
//! - [`on_chat`](AuthBridge::on_chat): chat and commands; gated
//! - [`on_disconnect`](AuthBridge::on_disconnect): forgets the player
//!
//! Every handler takes `&self`, so one bridge behind an `Arc` serves all
//! player contexts concurrently. Handlers never return errors: a bad
//! message is logged and dropped without affecting anyone else.

use std::path::Path;
use std::sync::Arc;

use authbridge_cache::{AuthCache, AuthState};
use authbridge_protocol::{AuthRecord, BridgeMessage, Channel, Codec, Identity};
use authbridge_transport::PluginChannel;

use crate::gate::{self, ChatDecision, ConnectDecision};
use crate::{
    BridgeConfig, BridgeError, Cancellable, ChatEvent, Endpoint,
    LoginPropagator, PlayerDisconnectEvent, PluginMessageEvent,
    ServerConnectEvent,
};

/// The login-gating bridge.
///
/// Generic over the [`Codec`] used on the wire and the [`PluginChannel`]
/// used to reach backends, so tests can substitute either.
///
/// The cache is private to the bridge. Callers can look players up, but
/// the only writers are validated `authme:*` messages and disconnects:
///
/// ```compile_fail
/// use authbridge::prelude::*;
///
/// let channel = MemoryChannel::new();
/// let bridge = AuthBridge::new(BridgeConfig::default(), BinaryCodec, channel);
/// bridge.cache().put(AuthRecord::new("mallory", "h", "1.2.3.4", 0));
/// ```
pub struct AuthBridge<C: Codec, T: PluginChannel> {
    config: BridgeConfig,
    cache: AuthCache,
    codec: C,
    channel: T,
}

impl<C: Codec, T: PluginChannel> AuthBridge<C, T> {
    /// Creates a bridge with an empty cache: nobody is authenticated.
    pub fn new(config: BridgeConfig, codec: C, channel: T) -> Self {
        tracing::info!(
            auth_server = %config.auth_server(),
            channels = ?Channel::ALL.map(Channel::tag),
            "auth bridge ready"
        );
        Self {
            config,
            cache: AuthCache::new(),
            codec,
            channel,
        }
    }

    /// Loads `config.yml` from `data_dir` and creates the bridge with it.
    ///
    /// # Errors
    /// [`BridgeError::Config`] if the file can't be read, parsed or
    /// written back.
    pub fn load(
        data_dir: impl AsRef<Path>,
        codec: C,
        channel: T,
    ) -> Result<Self, BridgeError> {
        let config = BridgeConfig::load(data_dir)?;
        Ok(Self::new(config, codec, channel))
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// The record the trusted backend reported for `player`, if any.
    pub fn record(&self, player: &str) -> Option<Arc<AuthRecord>> {
        self.cache.get(&Identity::new(player))
    }

    /// Number of authenticated players. Diagnostics only: this visits
    /// every cache shard.
    pub fn authenticated_count(&self) -> usize {
        self.cache.len()
    }

    /// The player's current [`AuthState`].
    pub fn state(&self, player: &str) -> AuthState {
        self.cache.state(&Identity::new(player))
    }

    pub fn is_authenticated(&self, player: &str) -> bool {
        self.cache.is_authenticated(&Identity::new(player))
    }

    /// A propagator wired to this bridge's codec, channel and secret.
    pub fn propagator(&self) -> LoginPropagator<'_, C, T> {
        LoginPropagator::new(
            &self.codec,
            &self.channel,
            self.config.secret_key(),
        )
    }

    // -- Side channel -----------------------------------------------------

    /// Handles a plugin message passing through the proxy.
    ///
    /// Only backend → player messages on an `authme:*` tag are ours. Those
    /// are always cancelled, valid or not, so the client never sees them;
    /// everything else is left alone.
    pub fn on_plugin_message(&self, event: &mut PluginMessageEvent) {
        let (Endpoint::Server(server), Endpoint::Player(player)) =
            (&event.sender, &event.receiver)
        else {
            return;
        };
        let Some(channel) = Channel::from_tag(&event.tag) else {
            return;
        };

        tracing::info!(%channel, %player, %server, "received bridge message");
        let result = self.handle_message(channel, player, server, &event.data);
        event.set_cancelled(true);

        if let Err(e) = result {
            e.log();
        }
    }

    /// Decodes and validates one side-channel message, then applies it.
    ///
    /// `player` is the receiver the transport delivered the message to; a
    /// login must be about that same player.
    fn handle_message(
        &self,
        channel: Channel,
        player: &str,
        server: &str,
        data: &[u8],
    ) -> Result<(), BridgeError> {
        let message = self.codec.decode(channel, data).map_err(|source| {
            BridgeError::MalformedMessage {
                channel,
                player: player.to_owned(),
                source,
            }
        })?;

        if message.secret() != self.config.secret_key() {
            return Err(BridgeError::UntrustedSource {
                channel,
                player: player.to_owned(),
                server: server.to_owned(),
            });
        }

        match message {
            BridgeMessage::Login { record, .. } => {
                let target = Identity::new(player);
                if !target.matches(record.name()) {
                    return Err(BridgeError::IdentityMismatch {
                        claimed: record.name().to_owned(),
                        target: player.to_owned(),
                    });
                }
                self.cache.put(record);
            }
            BridgeMessage::Logout { name, .. } => {
                self.cache.remove(&Identity::new(&name));
            }
        }
        Ok(())
    }

    // -- Gated actions ----------------------------------------------------

    /// Gates a server connect.
    ///
    /// Unauthenticated players are kept on their current server. An
    /// authenticated player heading to the auth server has their record
    /// propagated first; a failed propagation does not block the connect.
    pub fn on_server_connect(&self, event: &mut ServerConnectEvent) {
        let state = self.state(&event.player);

        match gate::decide_connect(&state, event, self.config.auth_server()) {
            ConnectDecision::Allow => {}
            ConnectDecision::Propagate(record) => {
                if let Err(e) =
                    self.propagator().propagate(&event.target, &record)
                {
                    e.log();
                }
            }
            ConnectDecision::Deny => {
                event.set_cancelled(true);
                tracing::info!(
                    kind = "connect_denied",
                    player = %event.player,
                    target = %event.target,
                    "tried to connect to a server while unauthenticated"
                );
            }
        }
    }

    /// Gates a chat message. Non-player senders are not gated.
    pub fn on_chat(&self, event: &mut ChatEvent) {
        let Some(player) = event.sender.as_player() else {
            return;
        };

        let state = self.state(player);
        if gate::decide_chat(&state, &event.message) == ChatDecision::Deny {
            tracing::info!(
                kind = "chat_denied",
                %player,
                message = %event.message,
                "tried to chat while unauthenticated"
            );
            event.set_cancelled(true);
        }
    }

    /// Forgets a player who left the proxy.
    pub fn on_disconnect(&self, event: &PlayerDisconnectEvent) {
        self.cache.remove(&Identity::new(&event.player));
    }
}

#[cfg(test)]
mod tests {
    //! Handler-level tests. Full login/logout scenarios live in
    //! `tests/bridge.rs`.

    use authbridge_protocol::BinaryCodec;
    use authbridge_transport::{MemoryChannel, MemoryReceiver};

    use super::*;

    fn bridge() -> (AuthBridge<BinaryCodec, MemoryChannel>, MemoryReceiver) {
        let channel = MemoryChannel::new();
        let inbox = channel.connect("main");
        let config = BridgeConfig::new("main", "s");
        let bridge = AuthBridge::new(config, BinaryCodec, channel);
        (bridge, inbox)
    }

    fn login_bytes(secret: &str, name: &str) -> bytes::Bytes {
        BinaryCodec
            .encode(&BridgeMessage::Login {
                secret: secret.into(),
                record: AuthRecord::new(name, "h1", "1.2.3.4", 1000),
            })
            .unwrap()
    }

    #[test]
    fn test_load_missing_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let bridge =
            AuthBridge::load(dir.path(), BinaryCodec, MemoryChannel::new())
                .unwrap();

        assert_eq!(bridge.config(), &BridgeConfig::default());
        assert!(dir.path().join(crate::CONFIG_FILE).exists());
    }

    #[test]
    fn test_load_invalid_config_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(crate::CONFIG_FILE), "secret-key: ''\n")
            .unwrap();

        let result =
            AuthBridge::load(dir.path(), BinaryCodec, MemoryChannel::new());

        assert!(matches!(result, Err(BridgeError::Config(_))));
    }

    #[test]
    fn test_on_plugin_message_ignores_foreign_tags() {
        let (bridge, _inbox) = bridge();
        let mut event = PluginMessageEvent::new(
            Endpoint::server("main"),
            Endpoint::player("bob"),
            "bungeecord:main",
            login_bytes("s", "bob"),
        );

        bridge.on_plugin_message(&mut event);

        assert!(!event.is_cancelled());
        assert!(!bridge.is_authenticated("bob"));
    }

    #[test]
    fn test_on_plugin_message_ignores_player_to_server_direction() {
        // A client must not be able to forge its own login.
        let (bridge, _inbox) = bridge();
        let mut event = PluginMessageEvent::new(
            Endpoint::player("bob"),
            Endpoint::server("main"),
            "authme:login",
            login_bytes("s", "bob"),
        );

        bridge.on_plugin_message(&mut event);

        assert!(!event.is_cancelled());
        assert!(!bridge.is_authenticated("bob"));
    }

    #[test]
    fn test_on_plugin_message_cancels_even_when_dropped() {
        let (bridge, _inbox) = bridge();
        let mut event = PluginMessageEvent::new(
            Endpoint::server("main"),
            Endpoint::player("bob"),
            "authme:login",
            login_bytes("wrong", "bob"),
        );

        bridge.on_plugin_message(&mut event);

        assert!(event.is_cancelled());
        assert!(!bridge.is_authenticated("bob"));
    }

    #[test]
    fn test_handle_message_truncated_is_malformed() {
        let (bridge, _inbox) = bridge();

        let result =
            bridge.handle_message(Channel::Login, "bob", "main", &[0, 5, b'a']);

        assert!(matches!(result, Err(BridgeError::MalformedMessage { .. })));
        assert_eq!(bridge.authenticated_count(), 0);
    }

    #[test]
    fn test_handle_message_wrong_secret_is_untrusted() {
        let (bridge, _inbox) = bridge();

        let result = bridge.handle_message(
            Channel::Login,
            "bob",
            "main",
            &login_bytes("WRONG", "bob"),
        );

        assert!(matches!(
            result,
            Err(BridgeError::UntrustedSource { ref server, .. })
                if server == "main"
        ));
        assert_eq!(bridge.authenticated_count(), 0);
    }

    #[test]
    fn test_handle_message_name_mismatch_is_identity_mismatch() {
        let (bridge, _inbox) = bridge();

        let result = bridge.handle_message(
            Channel::Login,
            "bob",
            "main",
            &login_bytes("s", "mallory"),
        );

        assert!(matches!(
            result,
            Err(BridgeError::IdentityMismatch { ref claimed, ref target })
                if claimed == "mallory" && target == "bob"
        ));
        assert_eq!(bridge.authenticated_count(), 0);
    }

    #[test]
    fn test_handle_message_login_keeps_display_case() {
        let (bridge, _inbox) = bridge();

        bridge
            .handle_message(
                Channel::Login,
                "bob",
                "main",
                &login_bytes("s", "Bob"),
            )
            .unwrap();

        let state = bridge.state("BOB");
        assert_eq!(state.record().unwrap().name(), "Bob");
    }

    #[test]
    fn test_on_chat_non_player_sender_not_gated() {
        let (bridge, _inbox) = bridge();
        let mut event = ChatEvent::new(Endpoint::server("main"), "hello");

        bridge.on_chat(&mut event);

        assert!(!event.is_cancelled());
    }

    #[test]
    fn test_on_server_connect_propagation_failure_still_allows() {
        let channel = MemoryChannel::new(); // "main" never connected
        let config = BridgeConfig::new("main", "s");
        let bridge = AuthBridge::new(config, BinaryCodec, channel);
        bridge
            .handle_message(
                Channel::Login,
                "bob",
                "main",
                &login_bytes("s", "bob"),
            )
            .unwrap();
        let mut event = ServerConnectEvent::new("bob", "survival", "main");

        bridge.on_server_connect(&mut event);

        assert!(!event.is_cancelled());
    }

    #[test]
    fn test_on_disconnect_unknown_player_is_noop() {
        let (bridge, _inbox) = bridge();

        bridge.on_disconnect(&PlayerDisconnectEvent::new("ghost"));

        assert_eq!(bridge.authenticated_count(), 0);
    }
}
