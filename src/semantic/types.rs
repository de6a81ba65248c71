use std::fmt;

use crate::parser::ast::TypeName;

/// Result of typing an expression. `Unknown` marks an expression whose
/// type could not be established because a diagnostic was already raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Int,
    Str,
    Unknown,
}

impl Type {
    pub fn is_known(self) -> bool {
        !matches!(self, Type::Unknown)
    }
}

impl From<TypeName> for Type {
    fn from(name: TypeName) -> Self {
        match name {
            TypeName::Int => Type::Int,
            TypeName::Str => Type::Str,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => f.write_str("intt"),
            Type::Str => f.write_str("sttring"),
            Type::Unknown => f.write_str("unknown"),
        }
    }
}

/// `Unknown` on either side is compatible so one fault is reported once.
pub fn compatible(actual: Type, expected: Type) -> bool {
    !actual.is_known() || !expected.is_known() || actual == expected
}
