//! Plays out one player's session against an in-memory proxy:
//! join, gated chat and switch, backend login, propagation, logout.
//!
//! ```text
//! cargo run -p login-flow -- [data-dir]
//! ```

use std::sync::Arc;

use authbridge::prelude::*;

/// Millisecond timestamp the simulated backend stamps on its login.
const LOGGED_IN_AT: i64 = 1_700_000_000_000;

/// The trusted backend's side of the channel: decodes what the proxy
/// propagates and reports it.
async fn run_auth_server(mut inbox: MemoryReceiver, secret: String) {
    while let Some(message) = inbox.recv().await {
        let Some(channel) = Channel::from_tag(&message.tag) else {
            continue;
        };
        match BinaryCodec.decode(channel, &message.data) {
            Ok(BridgeMessage::Login { secret: s, record }) if s == secret => {
                tracing::info!(
                    server = %message.server,
                    player = %record.name(),
                    "auth server restored session without a password prompt"
                );
            }
            Ok(other) => {
                tracing::warn!(
                    player = %other.name(),
                    "auth server ignored message"
                );
            }
            Err(e) => {
                tracing::error!(error = %e, "auth server could not decode");
            }
        }
    }
}

fn backend_login(
    config: &BridgeConfig,
    player: &str,
) -> Result<Bytes, ProtocolError> {
    let record = AuthRecord::new(
        player,
        "$SHA$salt$digest",
        "203.0.113.7",
        LOGGED_IN_AT,
    );
    BinaryCodec.encode(&BridgeMessage::Login {
        secret: config.secret_key().to_owned(),
        record,
    })
}

fn backend_logout(
    config: &BridgeConfig,
    player: &str,
) -> Result<Bytes, ProtocolError> {
    BinaryCodec.encode(&BridgeMessage::Logout {
        secret: config.secret_key().to_owned(),
        name: player.to_owned(),
    })
}

fn report(what: &str, cancelled: bool) {
    let outcome = if cancelled { "cancelled" } else { "allowed" };
    tracing::info!("{what}: {outcome}");
}

fn chat_as(
    bridge: &AuthBridge<BinaryCodec, Arc<MemoryChannel>>,
    player: &str,
    text: &str,
) -> bool {
    let mut event = ChatEvent::new(Endpoint::player(player), text);
    bridge.on_chat(&mut event);
    event.is_cancelled()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    authbridge::telemetry::init();

    let data_dir = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "authbridge-data".to_string());

    let channel = Arc::new(MemoryChannel::new());
    let bridge =
        AuthBridge::load(&data_dir, BinaryCodec, Arc::clone(&channel))?;
    let config = bridge.config().clone();
    let auth_server = config.auth_server().to_owned();

    let auth_inbox = channel.connect(&auth_server);
    let _survival = channel.connect("survival");
    let backend = tokio::spawn(run_auth_server(
        auth_inbox,
        config.secret_key().to_owned(),
    ));

    let player = "Alice";

    // Joining the network is never gated.
    let mut join = ServerConnectEvent::initial(player, &auth_server);
    bridge.on_server_connect(&mut join);
    report("initial join", join.is_cancelled());

    report("chat before login", chat_as(&bridge, player, "hello everyone"));
    report("/login command", chat_as(&bridge, player, "/login hunter2"));

    let mut early_switch =
        ServerConnectEvent::new(player, &auth_server, "survival");
    bridge.on_server_connect(&mut early_switch);
    report("switch before login", early_switch.is_cancelled());

    // The auth server accepted the password and reports it.
    let mut reported = PluginMessageEvent::new(
        Endpoint::server(&auth_server),
        Endpoint::player(player),
        Channel::Login.tag(),
        backend_login(&config, player)?,
    );
    bridge.on_plugin_message(&mut reported);

    let mut switch = ServerConnectEvent::new(player, &auth_server, "survival");
    bridge.on_server_connect(&mut switch);
    report("switch after login", switch.is_cancelled());

    // Heading back to the auth server sends the record ahead of the player.
    let mut back = ServerConnectEvent::new(player, "survival", &auth_server);
    bridge.on_server_connect(&mut back);
    report("switch back to auth server", back.is_cancelled());

    let mut logout = PluginMessageEvent::new(
        Endpoint::server(&auth_server),
        Endpoint::player(player),
        Channel::Logout.tag(),
        backend_logout(&config, player)?,
    );
    bridge.on_plugin_message(&mut logout);

    report("chat after logout", chat_as(&bridge, player, "still here?"));

    bridge.on_disconnect(&PlayerDisconnectEvent::new(player));

    channel.disconnect(&auth_server);
    backend.await?;
    Ok(())
}
