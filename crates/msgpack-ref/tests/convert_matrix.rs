use std::collections::BTreeMap;

use msgpack_ref::{decode, encode, from_value, to_value, Extension, MsgPackError, Timestamp, Value};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Reading {
    sensor: String,
    celsius: f64,
    samples: Vec<u16>,
    offset: i32,
    note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum Event {
    Reset,
    Moved(i64),
    Pair(u8, u8),
    Renamed { from: String, to: String },
}

fn s(v: &str) -> Value {
    Value::Str(v.to_owned())
}

fn single(key: &str, value: Value) -> Value {
    vec![(s(key), value)].into_iter().collect()
}

#[test]
fn struct_to_value_and_back() {
    let reading = Reading {
        sensor: "t1".into(),
        celsius: 21.5,
        samples: vec![1, 300],
        offset: -4,
        note: None,
    };
    let value = to_value(&reading).expect("to_value");
    assert_eq!(value.get(&s("sensor")), Some(&s("t1")));
    assert_eq!(value.get(&s("celsius")), Some(&Value::Float64(21.5)));
    assert_eq!(
        value.get(&s("samples")),
        Some(&Value::Array(vec![Value::UInt(1), Value::UInt(300)]))
    );
    assert_eq!(value.get(&s("offset")), Some(&Value::Int(-4)));
    assert_eq!(value.get(&s("note")), Some(&Value::Nil));

    let decoded = decode(&encode(&value)).expect("decode");
    let back: Reading = from_value(decoded).expect("from_value");
    assert_eq!(back, reading);
}

#[test]
fn enums_are_externally_tagged() {
    assert_eq!(to_value(&Event::Reset), Ok(s("Reset")));
    assert_eq!(to_value(&Event::Moved(-3)), Ok(single("Moved", Value::Int(-3))));
    assert_eq!(
        to_value(&Event::Pair(1, 2)),
        Ok(single(
            "Pair",
            Value::Array(vec![Value::UInt(1), Value::UInt(2)])
        ))
    );
    assert_eq!(
        to_value(&Event::Renamed {
            from: "a".into(),
            to: "b".into()
        }),
        Ok(single(
            "Renamed",
            vec![(s("from"), s("a")), (s("to"), s("b"))]
                .into_iter()
                .collect()
        ))
    );
}

#[test]
fn maps_keep_non_string_keys() {
    let mut scores = BTreeMap::new();
    scores.insert(3u32, "three");
    scores.insert(7u32, "seven");
    let value = to_value(&scores).expect("to_value");
    assert_eq!(value.get(&Value::UInt(7)), Some(&s("seven")));
    assert_eq!(decode(&encode(&value)), Ok(value));
}

#[test]
fn bytes_serialize_as_bin() {
    struct Raw(&'static [u8]);
    impl Serialize for Raw {
        fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_bytes(self.0)
        }
    }
    assert_eq!(to_value(&Raw(b"\x00\xff")), Ok(Value::Bin(vec![0x00, 0xff])));
}

#[test]
fn wide_integers_name_the_offending_type() {
    assert_eq!(to_value(&5i128), Ok(Value::Int(5)));
    assert_eq!(to_value(&(u64::MAX as u128)), Ok(Value::UInt(u64::MAX)));
    assert_eq!(
        to_value(&(u64::MAX as u128 + 1)),
        Err(MsgPackError::UnrepresentableValue {
            type_name: "u128".into()
        })
    );
    assert_eq!(
        to_value(&i128::MIN),
        Err(MsgPackError::UnrepresentableValue {
            type_name: "i128".into()
        })
    );
}

#[test]
fn enums_roundtrip_through_the_wire() {
    for event in [
        Event::Reset,
        Event::Moved(-3),
        Event::Pair(1, 2),
        Event::Renamed {
            from: "a".into(),
            to: "b".into(),
        },
    ] {
        let decoded = decode(&encode(&to_value(&event).unwrap())).unwrap();
        assert_eq!(from_value::<Event>(decoded), Ok(event));
    }
}

#[test]
fn decoded_msgpack_only_values_reach_host_types() {
    let bin = decode(&encode(&Value::Bin(vec![1, 2, 3]))).unwrap();
    assert_eq!(from_value::<Vec<u8>>(bin), Ok(vec![1, 2, 3]));

    let ts = decode(&encode(&Value::Timestamp(Timestamp::new(1_700_000_000, 5)))).unwrap();
    assert_eq!(from_value::<(i64, u32)>(ts), Ok((1_700_000_000, 5)));

    let ext = decode(&encode(&Value::Extension(Extension::new(3, vec![9])))).unwrap();
    assert_eq!(from_value::<(i8, Vec<u8>)>(ext), Ok((3, vec![9])));
}

#[test]
fn from_value_keeps_integer_and_float_width() {
    assert_eq!(from_value::<u64>(Value::UInt(u64::MAX)), Ok(u64::MAX));
    assert!(from_value::<u32>(Value::Int(-1)).is_err());
    let back: f32 = from_value(Value::Float32(0.1)).unwrap();
    assert_eq!(back.to_bits(), 0.1f32.to_bits());
}

#[test]
fn from_value_reports_shape_mismatch() {
    assert!(matches!(
        from_value::<Reading>(s("not a struct")),
        Err(MsgPackError::Custom(_))
    ));
}

#[test]
fn json_bridge_still_rejects_bin() {
    assert_eq!(
        serde_json::Value::try_from(Value::Bin(vec![1, 2])),
        Err(MsgPackError::UnrepresentableValue {
            type_name: "bin".into()
        })
    );
}
