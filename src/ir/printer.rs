//! IR pretty-printing for the stage dumps

use super::*;

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.op {
            Op::Label => write!(f, "{}:", self.result),
            Op::Goto => write!(f, "goto {}", self.result),
            Op::IfFalse => write!(f, "ifFalse {} goto {}", self.arg1, self.result),
            Op::Call => write!(f, "call {}", self.result),
            Op::Return if self.arg1.is_empty() => f.write_str("return"),
            Op::Return => write!(f, "return {}", self.arg1),
            Op::Move | Op::Assign => write!(f, "{} = {}", self.result, self.arg1),
            Op::Param => write!(f, "param {}", self.arg1),
            Op::Print => write!(f, "print {}", self.arg1),
            _ => write!(
                f,
                "{} = {} {} {}",
                self.result, self.arg1, self.op, self.arg2
            ),
        }
    }
}

/// One instruction per line.
pub fn render_program(instructions: &[Instruction]) -> String {
    let mut out = String::new();
    for inst in instructions {
        out.push_str(&inst.to_string());
        out.push('\n');
    }
    out
}
