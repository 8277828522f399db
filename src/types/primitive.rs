use serde_json::{Number, Value};
use std::fmt::{Display, Formatter};

/// The primitive kinds a configuration or extension value can be rendered as.
///
/// Anything that is not a boolean, an integer, a floating point number or a string
/// converts to [`PrimitiveValue::Unsupported`], and callers decide what that means for them.
#[derive(Debug, Clone, PartialEq)]
pub enum PrimitiveValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Unsupported,
}

impl Display for PrimitiveValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PrimitiveValue::Bool(value) => write!(f, "{}", value),
            PrimitiveValue::Integer(value) => write!(f, "{}", value),
            PrimitiveValue::Float(value) => write!(f, "{}", value),
            PrimitiveValue::String(value) => write!(f, "{}", value),
            PrimitiveValue::Unsupported => write!(f, "unsupported"),
        }
    }
}

impl From<&Value> for PrimitiveValue {
    fn from(value: &Value) -> Self {
        PrimitiveValue::from_json(value)
    }
}

impl PrimitiveValue {
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Bool(value) => PrimitiveValue::Bool(*value),
            Value::Number(number) => Self::from_number(number),
            Value::String(value) => PrimitiveValue::String(value.clone()),
            Value::Null | Value::Array(_) | Value::Object(_) => PrimitiveValue::Unsupported,
        }
    }

    fn from_number(number: &Number) -> Self {
        if let Some(integer) = number.as_i64() {
            PrimitiveValue::Integer(integer)
        } else if number.is_f64() {
            number
                .as_f64()
                .map_or(PrimitiveValue::Unsupported, PrimitiveValue::Float)
        } else {
            // u64 values above i64::MAX
            PrimitiveValue::Unsupported
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, PrimitiveValue::Unsupported)
    }

    /// Renders the value as configuration text. `None` for unsupported values.
    pub fn as_text(&self) -> Option<String> {
        match self {
            PrimitiveValue::Unsupported => None,
            supported => Some(supported.to_string()),
        }
    }

    /// Converts back into a JSON value. Non-finite floats and unsupported values yield `None`.
    pub fn to_json(&self) -> Option<Value> {
        match self {
            PrimitiveValue::Bool(value) => Some(Value::Bool(*value)),
            PrimitiveValue::Integer(value) => Some(Value::Number(Number::from(*value))),
            PrimitiveValue::Float(value) => Number::from_f64(*value).map(Value::Number),
            PrimitiveValue::String(value) => Some(Value::String(value.clone())),
            PrimitiveValue::Unsupported => None,
        }
    }
}
