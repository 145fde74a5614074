//! Codec trait and the binary implementation used on the `authme:*` channels.
//!
//! A "codec" (coder/decoder) converts between [`BridgeMessage`] and raw
//! bytes. The bridge doesn't care HOW messages are laid out; it just needs
//! something that implements [`Codec`]. Tests can swap in their own.
//!
//! # Wire layout
//!
//! Everything is big-endian. Strings are a 2-byte unsigned length followed
//! by that many UTF-8 bytes (the layout `DataOutputStream::writeUTF`
//! produces for the ASCII names, hashes and addresses the backend sends).
//!
//! ```text
//! login:  [u16 len][secret] [u16 len][name] [u16 len][hash] [u16 len][ip] [i64 last_login]
//! logout: [u16 len][secret] [u16 len][name]
//! ```
//!
//! Bytes after the last field are ignored, the same way a stream reader
//! would simply stop reading.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::{AuthRecord, BridgeMessage, Channel, ProtocolError};

const SECRET: &str = "secret_key";
const NAME: &str = "name";
const CREDENTIAL_HASH: &str = "credential_hash";
const SOURCE_IP: &str = "source_ip";
const LAST_LOGIN: &str = "last_login";

/// Encodes and decodes bridge messages.
///
/// `Send + Sync + 'static` because the codec lives inside the bridge, which
/// is shared by every player's event handlers.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a message into its wire layout.
    ///
    /// # Errors
    /// Returns [`ProtocolError::FieldTooLong`] if a string does not fit its
    /// length prefix.
    fn encode(&self, message: &BridgeMessage) -> Result<Bytes, ProtocolError>;

    /// Parses the payload of a message received on `channel`.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Truncated`] or [`ProtocolError::InvalidUtf8`]
    /// when the bytes don't match the channel's layout.
    fn decode(
        &self,
        channel: Channel,
        data: &[u8],
    ) -> Result<BridgeMessage, ProtocolError>;
}

// ---------------------------------------------------------------------------
// BinaryCodec
// ---------------------------------------------------------------------------

/// The length-prefixed binary [`Codec`] the backend login plugin speaks.
///
/// ## Example
///
/// ```rust
/// use authbridge_protocol::{AuthRecord, BinaryCodec, BridgeMessage, Channel, Codec};
///
/// let codec = BinaryCodec;
/// let message = BridgeMessage::Login {
///     secret: "s".into(),
///     record: AuthRecord::new("bob", "h1", "1.2.3.4", 1000),
/// };
///
/// let bytes = codec.encode(&message).unwrap();
/// let decoded = codec.decode(Channel::Login, &bytes).unwrap();
/// assert_eq!(message, decoded);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryCodec;

impl Codec for BinaryCodec {
    fn encode(&self, message: &BridgeMessage) -> Result<Bytes, ProtocolError> {
        let mut out = BytesMut::new();
        match message {
            BridgeMessage::Login { secret, record } => {
                write_utf(&mut out, secret, SECRET)?;
                write_utf(&mut out, record.name(), NAME)?;
                write_utf(&mut out, record.credential_hash(), CREDENTIAL_HASH)?;
                write_utf(&mut out, record.source_ip(), SOURCE_IP)?;
                out.put_i64(record.last_login());
            }
            BridgeMessage::Logout { secret, name } => {
                write_utf(&mut out, secret, SECRET)?;
                write_utf(&mut out, name, NAME)?;
            }
        }
        Ok(out.freeze())
    }

    fn decode(
        &self,
        channel: Channel,
        data: &[u8],
    ) -> Result<BridgeMessage, ProtocolError> {
        let mut buf = data;
        let secret = read_utf(&mut buf, SECRET)?;
        let name = read_utf(&mut buf, NAME)?;

        match channel {
            Channel::Login => {
                let credential_hash = read_utf(&mut buf, CREDENTIAL_HASH)?;
                let source_ip = read_utf(&mut buf, SOURCE_IP)?;
                ensure(buf, 8, LAST_LOGIN)?;
                let last_login = buf.get_i64();
                Ok(BridgeMessage::Login {
                    secret,
                    record: AuthRecord::new(
                        name,
                        credential_hash,
                        source_ip,
                        last_login,
                    ),
                })
            }
            Channel::Logout => Ok(BridgeMessage::Logout { secret, name }),
        }
    }
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

/// Fails with `Truncated` unless `needed` bytes are left in `buf`.
fn ensure(
    buf: &[u8],
    needed: usize,
    field: &'static str,
) -> Result<(), ProtocolError> {
    if buf.len() < needed {
        return Err(ProtocolError::Truncated {
            field,
            needed,
            remaining: buf.len(),
        });
    }
    Ok(())
}

/// Reads one length-prefixed UTF-8 string and advances `buf` past it.
fn read_utf(
    buf: &mut &[u8],
    field: &'static str,
) -> Result<String, ProtocolError> {
    ensure(*buf, 2, field)?;
    let len = usize::from(buf.get_u16());
    ensure(*buf, len, field)?;

    let (raw, rest) = (*buf).split_at(len);
    let value = std::str::from_utf8(raw)
        .map_err(|_| ProtocolError::InvalidUtf8 { field })?
        .to_owned();
    *buf = rest;
    Ok(value)
}

fn write_utf(
    out: &mut BytesMut,
    value: &str,
    field: &'static str,
) -> Result<(), ProtocolError> {
    let len = u16::try_from(value.len()).map_err(|_| {
        ProtocolError::FieldTooLong {
            field,
            len: value.len(),
        }
    })?;
    out.put_u16(len);
    out.put_slice(value.as_bytes());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login(secret: &str, name: &str) -> BridgeMessage {
        BridgeMessage::Login {
            secret: secret.into(),
            record: AuthRecord::new(name, "h1", "1.2.3.4", 1000),
        }
    }

    /// Hand-assembles a payload the way the backend plugin writes it.
    fn raw_utf(parts: &[&str]) -> Vec<u8> {
        let mut out = Vec::new();
        for part in parts {
            out.extend_from_slice(&(part.len() as u16).to_be_bytes());
            out.extend_from_slice(part.as_bytes());
        }
        out
    }

    // =====================================================================
    // encode()
    // =====================================================================

    #[test]
    fn test_encode_login_produces_exact_layout() {
        let bytes = BinaryCodec.encode(&login("s", "bob")).unwrap();

        let mut expected = raw_utf(&["s", "bob", "h1", "1.2.3.4"]);
        expected.extend_from_slice(&1000i64.to_be_bytes());
        assert_eq!(bytes.as_ref(), expected.as_slice());
    }

    #[test]
    fn test_encode_logout_produces_exact_layout() {
        let message = BridgeMessage::Logout {
            secret: "s".into(),
            name: "bob".into(),
        };

        let bytes = BinaryCodec.encode(&message).unwrap();

        assert_eq!(bytes.as_ref(), raw_utf(&["s", "bob"]).as_slice());
    }

    #[test]
    fn test_encode_oversized_field_returns_field_too_long() {
        let huge = "x".repeat(usize::from(u16::MAX) + 1);
        let message = BridgeMessage::Login {
            secret: "s".into(),
            record: AuthRecord::new("bob", huge, "1.2.3.4", 1000),
        };

        let result = BinaryCodec.encode(&message);

        assert!(matches!(
            result,
            Err(ProtocolError::FieldTooLong { field: "credential_hash", len })
                if len == usize::from(u16::MAX) + 1
        ));
    }

    // =====================================================================
    // decode()
    // =====================================================================

    #[test]
    fn test_decode_login_from_backend_bytes() {
        let mut data = raw_utf(&["s", "Bob", "h1", "1.2.3.4"]);
        data.extend_from_slice(&1000i64.to_be_bytes());

        let message = BinaryCodec.decode(Channel::Login, &data).unwrap();

        assert_eq!(
            message,
            BridgeMessage::Login {
                secret: "s".into(),
                record: AuthRecord::new("Bob", "h1", "1.2.3.4", 1000),
            }
        );
    }

    #[test]
    fn test_decode_login_negative_timestamp_preserved() {
        let mut data = raw_utf(&["s", "bob", "h1", "::1"]);
        data.extend_from_slice(&(-5i64).to_be_bytes());

        let message = BinaryCodec.decode(Channel::Login, &data).unwrap();

        match message {
            BridgeMessage::Login { record, .. } => {
                assert_eq!(record.last_login(), -5);
                assert_eq!(record.source_ip(), "::1");
            }
            other => panic!("expected login, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_logout_from_backend_bytes() {
        let data = raw_utf(&["s", "bob"]);

        let message = BinaryCodec.decode(Channel::Logout, &data).unwrap();

        assert_eq!(
            message,
            BridgeMessage::Logout {
                secret: "s".into(),
                name: "bob".into(),
            }
        );
    }

    #[test]
    fn test_decode_empty_payload_truncated_at_secret() {
        let result = BinaryCodec.decode(Channel::Logout, &[]);

        assert_eq!(
            result,
            Err(ProtocolError::Truncated {
                field: "secret_key",
                needed: 2,
                remaining: 0,
            })
        );
    }

    #[test]
    fn test_decode_string_shorter_than_prefix_is_truncated() {
        // Prefix claims 10 bytes, only 3 follow.
        let mut data = raw_utf(&["s"]);
        data.extend_from_slice(&10u16.to_be_bytes());
        data.extend_from_slice(b"bob");

        let result = BinaryCodec.decode(Channel::Logout, &data);

        assert_eq!(
            result,
            Err(ProtocolError::Truncated {
                field: "name",
                needed: 10,
                remaining: 3,
            })
        );
    }

    #[test]
    fn test_decode_login_missing_timestamp_is_truncated() {
        let mut data = raw_utf(&["s", "bob", "h1", "1.2.3.4"]);
        data.extend_from_slice(&[0, 0, 0]);

        let result = BinaryCodec.decode(Channel::Login, &data);

        assert_eq!(
            result,
            Err(ProtocolError::Truncated {
                field: "last_login",
                needed: 8,
                remaining: 3,
            })
        );
    }

    #[test]
    fn test_decode_invalid_utf8_names_the_field() {
        let mut data = raw_utf(&["s"]);
        data.extend_from_slice(&2u16.to_be_bytes());
        data.extend_from_slice(&[0xff, 0xfe]);

        let result = BinaryCodec.decode(Channel::Logout, &data);

        assert_eq!(result, Err(ProtocolError::InvalidUtf8 { field: "name" }));
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        let mut data = raw_utf(&["s", "bob"]);
        data.extend_from_slice(b"extra");

        let message = BinaryCodec.decode(Channel::Logout, &data).unwrap();

        assert_eq!(message.name(), "bob");
    }

    #[test]
    fn test_roundtrip_preserves_every_login_field() {
        let original = BridgeMessage::Login {
            secret: "change_me".into(),
            record: AuthRecord::new("Ünïcode_Name", "$SHA$abc$def", "10.0.0.7", i64::MAX),
        };

        let bytes = BinaryCodec.encode(&original).unwrap();
        let decoded = BinaryCodec.decode(Channel::Login, &bytes).unwrap();

        assert_eq!(original, decoded);
    }
}
