//! Convenience MessagePack helpers.

use crate::{MsgPackDecoder, MsgPackEncoder, MsgPackError, Value};

/// Encodes `value` into a fresh buffer.
///
/// # Panics
///
/// Panics if a string, binary, extension payload, array or map is longer
/// than `u32::MAX`, which the wire format cannot express.
pub fn encode(value: &Value) -> Vec<u8> {
    MsgPackEncoder::new().encode(value)
}

/// Encodes `value` into a buffer pre-sized to `capacity` bytes. The output is
/// identical to [`encode`], and so are the panic conditions.
pub fn encode_with_capacity(value: &Value, capacity: usize) -> Vec<u8> {
    MsgPackEncoder::with_capacity(capacity).encode(value)
}

/// Decodes the first value in `blob`, ignoring anything after it.
pub fn decode(blob: &[u8]) -> Result<Value, MsgPackError> {
    decode_with_consumed(blob).map(|(value, _)| value)
}

/// Decodes the first value in `blob` and reports how many bytes it used.
pub fn decode_with_consumed(blob: &[u8]) -> Result<(Value, usize), MsgPackError> {
    let mut decoder = MsgPackDecoder::new(blob);
    let value = decoder.read_any()?;
    Ok((value, decoder.offset()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consumed_excludes_trailing_bytes() {
        let mut bytes = encode(&Value::Str("hi".into()));
        let len = bytes.len();
        bytes.extend_from_slice(&[0xc1, 0xc1]);
        assert_eq!(
            decode_with_consumed(&bytes),
            Ok((Value::Str("hi".into()), len))
        );
    }
}
