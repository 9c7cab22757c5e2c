//! MessagePack error types.

use msgpack_ref_buffers::BufferError;
use thiserror::Error;

use crate::Value;

/// Why a byte run was rejected as malformed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Malformed {
    #[error("invalid format byte 0x{0:02x}")]
    InvalidMarker(u8),
    #[error("timestamp extension payload of {0} bytes (expected 4, 8 or 12)")]
    TimestampLength(usize),
    #[error("nesting deeper than {0} levels")]
    TooDeep(usize),
}

/// Error type for MessagePack decoding and the host-value adapters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MsgPackError {
    /// A declared header or payload needs more bytes than remain.
    #[error("truncated input at offset {offset}: needed {needed} bytes, {remaining} remaining")]
    TruncatedInput {
        offset: usize,
        needed: usize,
        remaining: usize,
    },
    #[error("malformed input at offset {offset}: {reason}")]
    MalformedInput { offset: usize, reason: Malformed },
    /// A string payload is not valid UTF-8. `bytes` is the untouched payload.
    #[error("invalid UTF-8 in {} byte string at offset {offset}", .bytes.len())]
    InvalidUtf8 { offset: usize, bytes: Vec<u8> },
    /// A host value has no mapping into [`Value`] (or back out of it).
    #[error("unrepresentable value of type `{type_name}`")]
    UnrepresentableValue { type_name: String },
    /// Error raised by a user `Serialize`/`Deserialize` implementation.
    #[error("{0}")]
    Custom(String),
}

impl MsgPackError {
    pub(crate) fn truncated(offset: usize, err: BufferError) -> Self {
        let BufferError::EndOfBuffer { needed, remaining } = err;
        log::trace!("msgpack input truncated at offset {offset}: needed {needed}, remaining {remaining}");
        MsgPackError::TruncatedInput {
            offset,
            needed,
            remaining,
        }
    }

    pub(crate) fn malformed(offset: usize, reason: Malformed) -> Self {
        log::trace!("msgpack input malformed at offset {offset}: {reason}");
        MsgPackError::MalformedInput { offset, reason }
    }

    pub(crate) fn unrepresentable(type_name: impl Into<String>) -> Self {
        MsgPackError::UnrepresentableValue {
            type_name: type_name.into(),
        }
    }

    /// Recovers the payload of an [`MsgPackError::InvalidUtf8`] as
    /// [`Value::Bin`]. Returns `None` for every other variant.
    pub fn into_bin_value(self) -> Option<Value> {
        match self {
            MsgPackError::InvalidUtf8 { bytes, .. } => Some(Value::Bin(bytes)),
            _ => None,
        }
    }
}

impl serde::ser::Error for MsgPackError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        MsgPackError::Custom(msg.to_string())
    }
}

impl serde::de::Error for MsgPackError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        MsgPackError::Custom(msg.to_string())
    }
}
