//! Wire ids of enum values.
//!
//! Schemas are expected to give every enum value an integer id, but the
//! reflection layer does not enforce it. Integers (and floats with no
//! fractional part) become [`ValueId::Int`]; anything else is carried
//! verbatim as [`ValueId::Raw`] so that malformed schemas still load and
//! can be reported on by a validation layer later.

use crate::error::ReflectError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// The id an enum value is encoded as on the wire.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueId {
    /// A well-formed integer id.
    Int(i64),

    /// Any other JSON value, kept as its compact JSON text.
    Raw(String),
}

impl ValueId {
    /// Classify a raw JSON value as an id. Never fails.
    pub fn from_json_value(value: &Value) -> Self {
        if let Value::Number(number) = value {
            if let Some(int) = number.as_i64() {
                return Self::Int(int);
            }
            if let Some(float) = number.as_f64() {
                // 2^63 itself is out of range, hence the strict upper bound.
                if float.fract() == 0.0 && float >= i64::MIN as f64 && float < i64::MAX as f64 {
                    return Self::Int(float as i64);
                }
            }
        }
        Self::Raw(value.to_string())
    }

    /// The JSON value this id was read from.
    pub fn to_json_value(&self) -> Value {
        match self {
            Self::Int(int) => Value::from(*int),
            Self::Raw(text) => {
                serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.clone()))
            }
        }
    }

    /// The integer id, if this is one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(int) => Some(*int),
            Self::Raw(_) => None,
        }
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Self::Int(_))
    }
}

impl From<i64> for ValueId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ValueId {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl TryFrom<&ValueId> for i64 {
    type Error = ReflectError;

    fn try_from(id: &ValueId) -> Result<Self, Self::Error> {
        match id {
            ValueId::Int(int) => Ok(*int),
            ValueId::Raw(text) => Err(ReflectError::NonIntegerId { id: text.clone() }),
        }
    }
}

impl TryFrom<ValueId> for i64 {
    type Error = ReflectError;

    fn try_from(id: ValueId) -> Result<Self, Self::Error> {
        i64::try_from(&id)
    }
}

impl std::fmt::Display for ValueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(int) => write!(f, "{int}"),
            Self::Raw(text) => write!(f, "{text}"),
        }
    }
}

impl Serialize for ValueId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Int(int) => serializer.serialize_i64(*int),
            Self::Raw(_) => self.to_json_value().serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for ValueId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_json_value(&value))
    }
}
