//! Host-value adapters into and out of [`Value`].
//!
//! - `From` impls for Rust primitives and containers.
//! - [`to_value`]: any `serde::Serialize` type.
//! - [`from_value`]: any `serde::de::DeserializeOwned` type, read straight
//!   off the tree.
//! - `serde_json::Value` in both directions.

mod de;
mod json;
mod ser;

pub use de::from_value;
pub use ser::{to_value, ValueSerializer};

use crate::{Extension, Map, Timestamp, Value};

macro_rules! from_signed {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Int(v as i64)
                }
            }
        )*
    };
}

macro_rules! from_unsigned {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::UInt(v as u64)
                }
            }
        )*
    };
}

from_signed!(i8, i16, i32, i64, isize);
from_unsigned!(u8, u16, u32, u64, usize);

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Nil
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float32(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bin(v.to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bin(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Value::Map(v)
    }
}

impl From<Extension> for Value {
    fn from(v: Extension) -> Self {
        Value::Extension(v)
    }
}

impl From<Timestamp> for Value {
    fn from(v: Timestamp) -> Self {
        Value::Timestamp(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Nil, Into::into)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}

/// Collects pairs into a map; a repeated key keeps its last value.
impl FromIterator<(Value, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        Value::Map(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_conversions_pick_variants_by_signedness() {
        assert_eq!(Value::from(5i8), Value::Int(5));
        assert_eq!(Value::from(5u8), Value::UInt(5));
        assert_eq!(Value::from(usize::MAX), Value::UInt(u64::MAX));
        assert_eq!(Value::from(1.5f32), Value::Float32(1.5));
        assert_eq!(Value::from(()), Value::Nil);
        assert_eq!(Value::from(None::<i32>), Value::Nil);
        assert_eq!(Value::from(Some("x")), Value::Str("x".into()));
        assert_eq!(Value::from(&b"\x00\x01"[..]), Value::Bin(vec![0, 1]));
    }

    #[test]
    fn collecting_pairs_keeps_last_duplicate() {
        let value: Value = vec![
            (Value::from("a"), Value::from(1u8)),
            (Value::from("a"), Value::from(2u8)),
        ]
        .into_iter()
        .collect();
        let map = value.as_map().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&Value::from("a")), Some(&Value::UInt(2)));
    }
}
