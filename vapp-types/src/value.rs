use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A value of a vehicle signal
///
/// Serializes to a bare JSON scalar so it can be embedded directly in topic payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int32(i32),
    Int64(i64),
    UInt32(u32),
    UInt64(u64),
    Float(f32),
    Double(f64),
    String(String),
}

#[derive(Error, Debug, PartialEq)]
pub enum ValueError {
    #[error("Value type mismatch: expected {expected}, got {actual:?}")]
    TypeMismatch { expected: &'static str, actual: Value },
}

macro_rules! impl_value_conversions {
    ($type:ty, $variant:ident) => {
        impl From<$type> for Value {
            fn from(value: $type) -> Self {
                Value::$variant(value)
            }
        }

        impl TryFrom<Value> for $type {
            type Error = ValueError;

            fn try_from(value: Value) -> Result<Self, Self::Error> {
                match value {
                    Value::$variant(v) => Ok(v),
                    actual => Err(ValueError::TypeMismatch {
                        expected: stringify!($type),
                        actual,
                    }),
                }
            }
        }
    };
}

impl_value_conversions!(bool, Bool);
impl_value_conversions!(i32, Int32);
impl_value_conversions!(i64, Int64);
impl_value_conversions!(u32, UInt32);
impl_value_conversions!(u64, UInt64);
impl_value_conversions!(f32, Float);
impl_value_conversions!(f64, Double);
impl_value_conversions!(String, String);

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int32(v) => write!(f, "{v}"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::UInt32(v) => write!(f, "{v}"),
            Value::UInt64(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Double(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "{v}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_undecorated() {
        assert_eq!(Value::Float(42.0).to_string(), "42");
        assert_eq!(Value::Float(12.5).to_string(), "12.5");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::String("abc".into()).to_string(), "abc");
    }

    #[test]
    fn serializes_as_bare_scalar() {
        assert_eq!(serde_json::to_string(&Value::Float(42.0)).unwrap(), "42.0");
        assert_eq!(serde_json::to_string(&Value::Int32(-3)).unwrap(), "-3");
        assert_eq!(serde_json::to_string(&Value::Bool(false)).unwrap(), "false");
    }

    #[test]
    fn try_from_checks_variant() {
        let v: f32 = Value::Float(1.5).try_into().unwrap();
        assert_eq!(v, 1.5);
        let err = bool::try_from(Value::Float(1.5)).unwrap_err();
        assert_eq!(
            err,
            ValueError::TypeMismatch {
                expected: "bool",
                actual: Value::Float(1.5)
            }
        );
    }
}
