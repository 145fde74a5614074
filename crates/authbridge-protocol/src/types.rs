//! Message types for the AuthBridge side channel.
//!
//! Two messages travel from a backend login server to the proxy (and the
//! first one also travels back, see the login propagator in `authbridge`):
//!
//! ```text
//! authme:login   secretKey, name, credentialHash, sourceIp, lastLogin
//! authme:logout  secretKey, name
//! ```
//!
//! The channel tag tells the receiver which layout to expect; the payload
//! itself carries no type byte.

use std::fmt;

use crate::AuthRecord;

/// Plugin-message tag for login reports.
pub const LOGIN_CHANNEL: &str = "authme:login";

/// Plugin-message tag for logout reports.
pub const LOGOUT_CHANNEL: &str = "authme:logout";

// ---------------------------------------------------------------------------
// Channel
// ---------------------------------------------------------------------------

/// One of the named plugin channels the bridge listens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// `authme:login`
    Login,
    /// `authme:logout`
    Logout,
}

impl Channel {
    /// Every channel the host proxy must register for the bridge.
    pub const ALL: [Channel; 2] = [Channel::Login, Channel::Logout];

    /// The wire tag for this channel.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Login => LOGIN_CHANNEL,
            Self::Logout => LOGOUT_CHANNEL,
        }
    }

    /// Maps a plugin-message tag to a bridge channel.
    ///
    /// Returns `None` for tags that belong to someone else. Matching is
    /// exact: tags are case-sensitive identifiers.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            LOGIN_CHANNEL => Some(Self::Login),
            LOGOUT_CHANNEL => Some(Self::Logout),
            _ => None,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// ---------------------------------------------------------------------------
// BridgeMessage
// ---------------------------------------------------------------------------

/// A structurally decoded side-channel message.
///
/// "Structurally" is the key word: the secret has NOT been checked yet and
/// the name has NOT been matched against the receiving player. Those checks
/// belong to the bridge, which knows the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeMessage {
    /// A backend reports that a player logged in.
    Login { secret: String, record: AuthRecord },

    /// A backend reports that a player logged out.
    Logout { secret: String, name: String },
}

impl BridgeMessage {
    /// The channel this message travels on.
    pub fn channel(&self) -> Channel {
        match self {
            Self::Login { .. } => Channel::Login,
            Self::Logout { .. } => Channel::Logout,
        }
    }

    /// The shared secret the sender attached.
    pub fn secret(&self) -> &str {
        match self {
            Self::Login { secret, .. } | Self::Logout { secret, .. } => secret,
        }
    }

    /// The player name the message is about.
    pub fn name(&self) -> &str {
        match self {
            Self::Login { record, .. } => record.name(),
            Self::Logout { name, .. } => name,
        }
    }
}
