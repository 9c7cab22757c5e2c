use msgpack_ref::{decode, encode, Extension, MsgPackError, Timestamp, Value};
use proptest::prelude::*;

fn arb_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Nil),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        any::<u64>().prop_map(Value::UInt),
        any::<u32>().prop_map(|bits| Value::Float32(f32::from_bits(bits))),
        any::<u64>().prop_map(|bits| Value::Float64(f64::from_bits(bits))),
        ".{0,40}".prop_map(Value::Str),
        prop::collection::vec(any::<u8>(), 0..64).prop_map(Value::Bin),
        (
            any::<i8>().prop_filter("reserved tag", |t| *t != -1),
            prop::collection::vec(any::<u8>(), 0..20)
        )
            .prop_map(|(tag, data)| Value::Extension(Extension::new(tag, data))),
        (any::<i64>(), 0u32..1_000_000_000)
            .prop_map(|(s, ns)| Value::Timestamp(Timestamp::new(s, ns))),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_leaf().prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(Value::Array),
            prop::collection::vec((inner.clone(), inner), 0..8)
                .prop_map(|pairs| pairs.into_iter().collect::<Value>()),
        ]
    })
}

proptest! {
    #[test]
    fn roundtrip_preserves_value(value in arb_value()) {
        let bytes = encode(&value);
        prop_assert_eq!(decode(&bytes), Ok(value));
    }

    #[test]
    fn float32_roundtrips_bit_for_bit(bits in any::<u32>()) {
        let bytes = encode(&Value::Float32(f32::from_bits(bits)));
        match decode(&bytes) {
            Ok(Value::Float32(back)) => prop_assert_eq!(back.to_bits(), bits),
            other => prop_assert!(false, "unexpected {:?}", other),
        }
    }

    #[test]
    fn timestamps_roundtrip(seconds in any::<i64>(), nanoseconds in any::<u32>()) {
        let ts = Value::Timestamp(Timestamp::new(seconds, nanoseconds));
        prop_assert_eq!(decode(&encode(&ts)), Ok(ts));
    }

    #[test]
    fn every_strict_prefix_is_rejected(value in arb_value()) {
        let bytes = encode(&value);
        for end in 0..bytes.len() {
            let result = decode(&bytes[..end]);
            prop_assert!(
                matches!(result, Err(MsgPackError::TruncatedInput { .. })),
                "prefix {} of {:02x?} gave {:?}", end, bytes, result
            );
        }
    }

    #[test]
    fn arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = decode(&bytes);
    }

    #[test]
    fn broken_utf8_is_never_repaired(
        prefix in "[a-z]{0,10}",
        suffix in "[a-z]{0,10}",
        bad in 0x80u8..0xc0,
    ) {
        // a lone continuation byte is never valid UTF-8
        let mut bytes = encode(&Value::Str(format!("{prefix}é{suffix}")));
        let header = bytes.len() - prefix.len() - 2 - suffix.len();
        bytes[header + prefix.len()] = bad;
        let mut expected = prefix.clone().into_bytes();
        expected.extend_from_slice(&[bad, 0xa9]);
        expected.extend_from_slice(suffix.as_bytes());
        prop_assert_eq!(
            decode(&bytes),
            Err(MsgPackError::InvalidUtf8 { offset: header, bytes: expected })
        );
    }
}
