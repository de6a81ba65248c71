use std::fmt;

/// A slot in the variable store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    /// A quoted string literal, quotes included.
    Text(String),
}

impl Value {
    /// Integer view used by arithmetic and conditions; text reads as 0.
    pub fn as_int(&self) -> i64 {
        match self {
            Value::Int(value) => *value,
            Value::Text(_) => 0,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Int(0)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{}", value),
            Value::Text(text) => f.write_str(text),
        }
    }
}
