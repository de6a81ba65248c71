//! Three-address intermediate representation.
//!
//! A program is a flat `Vec<Instruction>`; control flow is expressed with
//! `label`, `goto` and `ifFalse` instructions that refer to labels by name.

pub mod printer;

use std::fmt;

/// Instruction operator. The textual spelling of each variant is the
/// operator string used by the IR dumps; `Move` is the empty operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Move,
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Gt,
    Lt,
    Ge,
    Le,
    Eq,
    Ne,
    And,
    Or,
    IfFalse,
    Goto,
    Label,
    Call,
    Param,
    Return,
    Print,
}

impl Op {
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Move => "",
            Op::Assign => "=",
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "*",
            Op::Div => "/",
            Op::Mod => "%",
            Op::Gt => ">",
            Op::Lt => "<",
            Op::Ge => ">=",
            Op::Le => "<=",
            Op::Eq => "==",
            Op::Ne => "!=",
            Op::And => "&&",
            Op::Or => "||",
            Op::IfFalse => "ifFalse",
            Op::Goto => "goto",
            Op::Label => "label",
            Op::Call => "call",
            Op::Param => "param",
            Op::Return => "return",
            Op::Print => "print",
        }
    }

    /// Operators of the form `result = arg1 op arg2`.
    pub fn is_binary(self) -> bool {
        matches!(
            self,
            Op::Add
                | Op::Sub
                | Op::Mul
                | Op::Div
                | Op::Mod
                | Op::Gt
                | Op::Lt
                | Op::Ge
                | Op::Le
                | Op::Eq
                | Op::Ne
                | Op::And
                | Op::Or
        )
    }

    pub fn is_jump(self) -> bool {
        matches!(self, Op::Goto | Op::IfFalse)
    }

    pub fn is_move(self) -> bool {
        matches!(self, Op::Move | Op::Assign)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `{op, arg1, arg2, result}`. Unused fields are empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub op: Op,
    pub arg1: String,
    pub arg2: String,
    pub result: String,
}

impl Instruction {
    pub fn new(
        op: Op,
        arg1: impl Into<String>,
        arg2: impl Into<String>,
        result: impl Into<String>,
    ) -> Self {
        Self {
            op,
            arg1: arg1.into(),
            arg2: arg2.into(),
            result: result.into(),
        }
    }

    pub fn binary(
        op: Op,
        lhs: impl Into<String>,
        rhs: impl Into<String>,
        dest: impl Into<String>,
    ) -> Self {
        Self::new(op, lhs, rhs, dest)
    }

    pub fn assign(value: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(Op::Assign, value, "", target)
    }

    pub fn mov(value: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(Op::Move, value, "", target)
    }

    pub fn label(name: impl Into<String>) -> Self {
        Self::new(Op::Label, "", "", name)
    }

    pub fn goto(label: impl Into<String>) -> Self {
        Self::new(Op::Goto, "", "", label)
    }

    pub fn if_false(condition: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(Op::IfFalse, condition, "", label)
    }

    pub fn print(value: impl Into<String>) -> Self {
        Self::new(Op::Print, value, "", "")
    }

    pub fn param(value: impl Into<String>) -> Self {
        Self::new(Op::Param, value, "", "")
    }

    pub fn call(function: impl Into<String>) -> Self {
        Self::new(Op::Call, "", "", function)
    }

    pub fn ret(value: impl Into<String>) -> Self {
        Self::new(Op::Return, value, "", "")
    }

    /// Name of the label this instruction jumps to, if it is a jump.
    pub fn jump_target(&self) -> Option<&str> {
        self.op.is_jump().then_some(self.result.as_str())
    }
}

/// Integer literal text as it appears in operands: optional `-`, then digits.
pub fn is_int_literal(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Quoted string literal operand, e.g. `"hi"`.
pub fn is_string_literal(text: &str) -> bool {
    text.starts_with('"')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_integer_literals() {
        assert!(is_int_literal("42"));
        assert!(is_int_literal("-7"));
        assert!(!is_int_literal("-"));
        assert!(!is_int_literal(""));
        assert!(!is_int_literal("%t0"));
        assert!(!is_int_literal("+3"));
    }

    #[test]
    fn moves_are_spelled_empty_and_equals() {
        assert_eq!(Op::Move.as_str(), "");
        assert_eq!(Op::Assign.as_str(), "=");
        assert!(Op::Move.is_move() && Op::Assign.is_move());
        assert!(!Op::Move.is_binary());
    }
}
