//! Direct execution of the three-address IR.
//!
//! The interpreter never fails. Unbound names read as 0, zero divisors
//! yield 0, and jumps to unknown labels fall through.

pub mod value;

use std::collections::HashMap;

use crate::ir::{is_int_literal, is_string_literal, Instruction, Op};
use crate::semantic::PRINT_BUILTIN;

use self::value::Value;

/// Observable result of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Execution {
    /// Lines written by `print` / `call prrint`, in execution order.
    pub output: Vec<String>,
    pub variables: HashMap<String, Value>,
    /// Value of the `return` that stopped execution, if any.
    pub returned: Option<Value>,
}

#[derive(Debug, Default)]
struct ExecutionState {
    variables: HashMap<String, Value>,
    labels: HashMap<String, usize>,
    params: Vec<String>,
    output: Vec<String>,
}

enum Flow {
    Next,
    Jump(usize),
    Halt(Option<Value>),
}

#[derive(Debug, Default)]
pub struct Interpreter;

impl Interpreter {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, code: &[Instruction]) -> Execution {
        let mut state = ExecutionState {
            labels: resolve_labels(code),
            ..ExecutionState::default()
        };

        let mut returned = None;
        let mut pc = 0;
        while pc < code.len() {
            let inst = &code[pc];
            tracing::trace!(pc, instruction = %inst, "execute");
            match self.step(&mut state, inst) {
                Flow::Next => pc += 1,
                Flow::Jump(target) => pc = target,
                Flow::Halt(value) => {
                    returned = value;
                    break;
                }
            }
        }

        tracing::debug!(
            lines = state.output.len(),
            variables = state.variables.len(),
            "execution finished"
        );
        Execution {
            output: state.output,
            variables: state.variables,
            returned,
        }
    }

    fn step(&self, state: &mut ExecutionState, inst: &Instruction) -> Flow {
        match inst.op {
            Op::Move | Op::Assign => {
                let value = state.value_of(&inst.arg1);
                state.variables.insert(inst.result.clone(), value);
            }
            op if op.is_binary() => {
                let lhs = state.resolve(&inst.arg1);
                let rhs = state.resolve(&inst.arg2);
                let value = apply_binary(op, lhs, rhs);
                state.variables.insert(inst.result.clone(), Value::from(value));
            }
            Op::IfFalse => {
                if state.resolve(&inst.arg1) == 0 {
                    return state.jump(&inst.result);
                }
            }
            Op::Goto => return state.jump(&inst.result),
            Op::Label => {}
            Op::Param => {
                let arg = if inst.arg1.is_empty() {
                    &inst.result
                } else {
                    &inst.arg1
                };
                state.params.push(arg.clone());
            }
            Op::Call => {
                if inst.result == PRINT_BUILTIN {
                    if let Some(top) = state.params.last() {
                        let line = state.value_of(top).to_string();
                        state.params.clear();
                        state.output.push(line);
                    }
                }
            }
            Op::Print => {
                let line = match state.variables.get(&inst.arg1) {
                    Some(value) => value.to_string(),
                    None => inst.arg1.clone(),
                };
                state.output.push(line);
            }
            Op::Return => {
                let value = (!inst.arg1.is_empty()).then(|| state.value_of(&inst.arg1));
                return Flow::Halt(value);
            }
            _ => {}
        }
        Flow::Next
    }

}

impl ExecutionState {
    /// Integer value of an operand: literal, bound name, or 0.
    fn resolve(&self, token: &str) -> i64 {
        if is_int_literal(token) {
            return token.parse().unwrap_or(0);
        }
        self.variables.get(token).map(Value::as_int).unwrap_or(0)
    }

    /// Full value of an operand, keeping string literals as text.
    fn value_of(&self, token: &str) -> Value {
        if is_int_literal(token) {
            return Value::Int(token.parse().unwrap_or(0));
        }
        if is_string_literal(token) {
            return Value::Text(token.to_string());
        }
        self.variables.get(token).cloned().unwrap_or_default()
    }

    fn jump(&self, label: &str) -> Flow {
        match self.labels.get(label) {
            Some(&target) => Flow::Jump(target),
            None => {
                tracing::warn!(label, "jump to undefined label ignored");
                Flow::Next
            }
        }
    }
}

/// Index of every `label` instruction, by name.
fn resolve_labels(code: &[Instruction]) -> HashMap<String, usize> {
    code.iter()
        .enumerate()
        .filter(|(_, inst)| inst.op == Op::Label)
        .map(|(index, inst)| (inst.result.clone(), index))
        .collect()
}

fn apply_binary(op: Op, lhs: i64, rhs: i64) -> i64 {
    match op {
        Op::Add => lhs.wrapping_add(rhs),
        Op::Sub => lhs.wrapping_sub(rhs),
        Op::Mul => lhs.wrapping_mul(rhs),
        Op::Div | Op::Mod if rhs == 0 => {
            tracing::warn!(op = %op, lhs, "zero divisor yields 0");
            0
        }
        Op::Div => lhs.wrapping_div(rhs),
        Op::Mod => lhs.wrapping_rem(rhs),
        Op::Gt => i64::from(lhs > rhs),
        Op::Lt => i64::from(lhs < rhs),
        Op::Ge => i64::from(lhs >= rhs),
        Op::Le => i64::from(lhs <= rhs),
        Op::Eq => i64::from(lhs == rhs),
        Op::Ne => i64::from(lhs != rhs),
        Op::And => i64::from(lhs != 0 && rhs != 0),
        Op::Or => i64::from(lhs != 0 || rhs != 0),
        _ => 0,
    }
}

/// Execute with a fresh interpreter.
pub fn execute(code: &[Instruction]) -> Execution {
    Interpreter::new().execute(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_label_definition_wins() {
        let code = vec![Instruction::label(".L0"), Instruction::label(".L0")];
        assert_eq!(resolve_labels(&code).get(".L0"), Some(&1));
    }

    #[test]
    fn modulo_and_logic_produce_integers() {
        assert_eq!(apply_binary(Op::Mod, 7, 3), 1);
        assert_eq!(apply_binary(Op::Mod, 7, 0), 0);
        assert_eq!(apply_binary(Op::And, 2, 0), 0);
        assert_eq!(apply_binary(Op::Or, 0, 5), 1);
    }
}
