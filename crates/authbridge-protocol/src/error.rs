//! Error types for the protocol layer.
//!
//! Each crate in AuthBridge defines its own error enum. When you see a
//! `ProtocolError`, you know the bytes themselves were the problem and
//! not the secret or the transport.

/// Errors that can occur while encoding or decoding side-channel messages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// The buffer ended before a field could be read in full.
    ///
    /// `needed` is the number of bytes the field (or its length prefix)
    /// required, `remaining` how many were actually left.
    #[error("truncated {field}: needed {needed} bytes, {remaining} remaining")]
    Truncated {
        field: &'static str,
        needed: usize,
        remaining: usize,
    },

    /// A string field was not valid UTF-8.
    #[error("{field} is not valid UTF-8")]
    InvalidUtf8 { field: &'static str },

    /// A string is too long for its 2-byte length prefix.
    #[error("{field} is {len} bytes, exceeding the 65535 byte limit")]
    FieldTooLong { field: &'static str, len: usize },
}
