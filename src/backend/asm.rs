//! Pseudo-assembly listing, one mnemonic group per IR instruction.

use crate::backend::Backend;
use crate::ir::{Instruction, Op};

/// Register-per-operation pseudo-assembly emitter
#[derive(Debug, Default)]
pub struct AsmBackend;

impl AsmBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Backend for AsmBackend {
    fn generate(&self, code: &[Instruction]) -> String {
        let mut out = String::new();
        let mut next_register = 0;

        for inst in code {
            match inst.op {
                Op::Move | Op::Assign => {
                    out.push_str(&format!("MOV {}, {}\n", inst.result, inst.arg1));
                }
                op if op.is_binary() => {
                    let reg = format!("R{}", next_register);
                    next_register += 1;
                    out.push_str(&format!("MOV {}, {}\n", reg, inst.arg1));
                    out.push_str(&format!("{} {}, {}\n", mnemonic(op), reg, inst.arg2));
                    out.push_str(&format!("MOV {}, {}\n", inst.result, reg));
                }
                Op::Label => out.push_str(&format!("{}:\n", inst.result)),
                Op::Goto => out.push_str(&format!("JMP {}\n", inst.result)),
                Op::IfFalse => {
                    out.push_str(&format!("JZ {}, {}\n", inst.arg1, inst.result));
                }
                Op::Print => out.push_str(&format!("OUT {}\n", inst.arg1)),
                Op::Param => out.push_str(&format!("PUSH {}\n", inst.arg1)),
                Op::Call => out.push_str(&format!("CALL {}\n", inst.result)),
                Op::Return if inst.arg1.is_empty() => out.push_str("RET\n"),
                Op::Return => out.push_str(&format!("RET {}\n", inst.arg1)),
                _ => {}
            }
        }

        out
    }

    fn name(&self) -> &'static str {
        "pseudo-asm"
    }
}

fn mnemonic(op: Op) -> &'static str {
    match op {
        Op::Add => "ADD",
        Op::Sub => "SUB",
        Op::Mul => "MUL",
        Op::Div => "DIV",
        Op::Mod => "MOD",
        Op::Gt => "SETG",
        Op::Lt => "SETL",
        Op::Ge => "SETGE",
        Op::Le => "SETLE",
        Op::Eq => "SETE",
        Op::Ne => "SETNE",
        Op::And => "AND",
        Op::Or => "OR",
        _ => "NOP",
    }
}
