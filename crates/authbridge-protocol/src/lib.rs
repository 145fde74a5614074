//! Side-channel protocol for AuthBridge.
//!
//! This crate defines the "language" a backend login server and the proxy
//! speak about authentication:
//!
//! - **Identity** ([`Identity`], [`normalize`]): the case-insensitive key
//!   every player is tracked under.
//! - **Records** ([`AuthRecord`]): the immutable login fact a trusted
//!   backend reports.
//! - **Types** ([`Channel`], [`BridgeMessage`]): the two messages that
//!   travel on the `authme:*` plugin channels.
//! - **Codec** ([`Codec`] trait, [`BinaryCodec`]): how those messages are
//!   converted to/from bytes.
//! - **Errors** ([`ProtocolError`]): what can go wrong while doing so.
//!
//! # Architecture
//!
//! The protocol layer sits between the plugin-message transport (raw bytes
//! addressed to a server) and the bridge (cache + gating). It doesn't know
//! about secrets, caches, or players being online. It only knows how to
//! read and write the wire layout.
//!
//! ```text
//! Transport (tag + bytes) → Protocol (BridgeMessage) → Bridge (AuthCache)
//! ```

mod codec;
mod error;
mod identity;
mod record;
mod types;

pub use codec::{BinaryCodec, Codec};
pub use error::ProtocolError;
pub use identity::{normalize, Identity};
pub use record::AuthRecord;
pub use types::{BridgeMessage, Channel, LOGIN_CHANNEL, LOGOUT_CHANNEL};
