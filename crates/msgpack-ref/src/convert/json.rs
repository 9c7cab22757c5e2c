//! Conversions between [`Value`] and `serde_json::Value`.

use crate::{MsgPackError, Value};

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Nil,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    Value::UInt(u)
                } else if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    Value::Float64(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(arr) => {
                Value::Array(arr.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => Value::Map(
                obj.into_iter()
                    .map(|(k, v)| (Value::Str(k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

/// JSON has no binary, extension or timestamp type, no non-finite numbers
/// and only string keys; those values are rejected.
impl TryFrom<Value> for serde_json::Value {
    type Error = MsgPackError;

    fn try_from(v: Value) -> Result<Self, Self::Error> {
        Ok(match v {
            Value::Nil => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Int(i) => serde_json::Value::from(i),
            Value::UInt(u) => serde_json::Value::from(u),
            Value::Float32(f) => finite(f as f64, "float32")?,
            Value::Float64(f) => finite(f, "float64")?,
            Value::Str(s) => serde_json::Value::String(s),
            Value::Array(arr) => serde_json::Value::Array(
                arr.into_iter()
                    .map(serde_json::Value::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            Value::Map(map) => {
                let mut obj = serde_json::Map::with_capacity(map.len());
                for (key, val) in map {
                    let Value::Str(key) = key else {
                        return Err(MsgPackError::unrepresentable(format!(
                            "map key of type {}",
                            key.type_name()
                        )));
                    };
                    obj.insert(key, serde_json::Value::try_from(val)?);
                }
                serde_json::Value::Object(obj)
            }
            other @ (Value::Bin(_) | Value::Extension(_) | Value::Timestamp(_)) => {
                return Err(MsgPackError::unrepresentable(other.type_name()));
            }
        })
    }
}

fn finite(f: f64, type_name: &str) -> Result<serde_json::Value, MsgPackError> {
    serde_json::Number::from_f64(f)
        .map(serde_json::Value::Number)
        .ok_or_else(|| MsgPackError::unrepresentable(format!("non-finite {type_name}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_numbers_split_by_sign() {
        assert_eq!(Value::from(json!(3)), Value::UInt(3));
        assert_eq!(Value::from(json!(-3)), Value::Int(-3));
        assert_eq!(Value::from(json!(0.5)), Value::Float64(0.5));
    }

    #[test]
    fn json_roundtrip() {
        let doc = json!({"a": [1, -2, true, null, "x"], "b": {"c": 1.25}});
        let value = Value::from(doc.clone());
        assert_eq!(serde_json::Value::try_from(value), Ok(doc));
    }

    #[test]
    fn unrepresentable_in_json() {
        assert_eq!(
            serde_json::Value::try_from(Value::Bin(vec![1])),
            Err(MsgPackError::UnrepresentableValue {
                type_name: "bin".into()
            })
        );
        let map: Value = vec![(Value::UInt(1), Value::Nil)].into_iter().collect();
        assert_eq!(
            serde_json::Value::try_from(map),
            Err(MsgPackError::UnrepresentableValue {
                type_name: "map key of type uint".into()
            })
        );
        assert!(serde_json::Value::try_from(Value::Float64(f64::INFINITY)).is_err());
    }
}
