//! [`Value`], the closed value model every encode/decode reads or produces.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;

use crate::{Extension, Timestamp};

/// Key→value pairs of a MessagePack map.
///
/// Keys are arbitrary [`Value`]s. Iteration follows first-insertion order so
/// encoding is stable; equality ignores order.
pub type Map = IndexMap<Value, Value>;

/// Any MessagePack-representable datum.
///
/// Equality is structural. Floats compare by bit pattern, so `NaN` equals
/// itself and `0.0` differs from `-0.0`; this keeps [`Eq`] and [`Hash`]
/// consistent for use as map keys. `Int` and `UInt` never compare equal to
/// each other, nor to either float variant.
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    /// Signed integer; produced by the decoder for the signed wire families.
    Int(i64),
    /// Unsigned integer; produced by the decoder for the unsigned wire families.
    UInt(u64),
    Float32(f32),
    Float64(f64),
    Str(String),
    Bin(Vec<u8>),
    Array(Vec<Value>),
    Map(Map),
    /// Application-defined extension payload.
    Extension(Extension),
    /// The reserved timestamp extension (type −1).
    Timestamp(Timestamp),
}

impl Value {
    /// Short lowercase name of the variant.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::Float32(_) => "float32",
            Value::Float64(_) => "float64",
            Value::Str(_) => "str",
            Value::Bin(_) => "bin",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
            Value::Extension(_) => "extension",
            Value::Timestamp(_) => "timestamp",
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bin(&self) -> Option<&[u8]> {
        match self {
            Value::Bin(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Looks up `key` in a map value. Returns `None` for non-maps.
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.as_map().and_then(|m| m.get(key))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::UInt(a), Value::UInt(b)) => a == b,
            (Value::Float32(a), Value::Float32(b)) => a.to_bits() == b.to_bits(),
            (Value::Float64(a), Value::Float64(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bin(a), Value::Bin(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            // IndexMap equality is order-independent.
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Extension(a), Value::Extension(b)) => a == b,
            (Value::Timestamp(a), Value::Timestamp(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Nil => {}
            Value::Bool(b) => b.hash(state),
            Value::Int(n) => n.hash(state),
            Value::UInt(n) => n.hash(state),
            Value::Float32(f) => f.to_bits().hash(state),
            Value::Float64(f) => f.to_bits().hash(state),
            Value::Str(s) => s.hash(state),
            Value::Bin(b) => b.hash(state),
            Value::Array(a) => a.hash(state),
            Value::Map(m) => hash_unordered(m, state),
            Value::Extension(e) => e.hash(state),
            Value::Timestamp(t) => t.hash(state),
        }
    }
}

/// Order-independent map hash: pairs are hashed on their own and summed.
fn hash_unordered<H: Hasher>(map: &Map, state: &mut H) {
    let mut sum = 0u64;
    for (key, value) in map {
        let mut pair = DefaultHasher::new();
        key.hash(&mut pair);
        value.hash(&mut pair);
        sum = sum.wrapping_add(pair.finish());
    }
    map.len().hash(state);
    sum.hash(state);
}
