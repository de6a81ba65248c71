//! AST to three-address IR lowering
//!
//! Temporaries are named `%t<n>` and labels `.L<n>`; neither prefix can
//! start a source identifier, so generated names never shadow user
//! variables. Counters start at zero for every run.

use crate::ir::{Instruction, Op};
use crate::parser::ast::{BinaryOp, Expr, Program, Stmt};
use crate::semantic::is_builtin;

/// Lower a checked program into a flat instruction sequence.
pub fn generate(program: &Program) -> Vec<Instruction> {
    Lowering::new().lower_program(program)
}

#[derive(Debug, Clone)]
struct LoopLabels {
    start: String,
    end: String,
}

/// Per-run lowering context.
#[derive(Debug, Default)]
pub struct Lowering {
    instructions: Vec<Instruction>,
    next_temp: usize,
    next_label: usize,
    loops: Vec<LoopLabels>,
}

impl Lowering {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_temp(&mut self) -> String {
        let temp = format!("%t{}", self.next_temp);
        self.next_temp += 1;
        temp
    }

    pub fn new_label(&mut self) -> String {
        let label = format!(".L{}", self.next_label);
        self.next_label += 1;
        label
    }

    pub fn lower_program(mut self, program: &Program) -> Vec<Instruction> {
        self.lower_block(&program.body);
        tracing::debug!(
            instructions = self.instructions.len(),
            temporaries = self.next_temp,
            labels = self.next_label,
            "generated IR"
        );
        self.instructions
    }

    fn lower_block(&mut self, statements: &[Stmt]) {
        for stmt in statements {
            self.lower_statement(stmt);
        }
    }

    fn lower_statement(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Declaration {
                name, initializer, ..
            } => {
                if let Some(expr) = initializer {
                    let value = self.lower_expr(expr);
                    self.emit(Instruction::assign(value, name.as_str()));
                }
            }
            Stmt::Assignment { name, value } => {
                let value = self.lower_expr(value);
                self.emit(Instruction::assign(value, name.as_str()));
            }
            Stmt::Return { value } => {
                let value = match value {
                    Some(expr) => self.lower_expr(expr),
                    None => String::new(),
                };
                self.emit(Instruction::ret(value));
            }
            Stmt::Call { callee, arg } => {
                let arg = match arg {
                    Some(expr) => self.lower_expr(expr),
                    None => String::new(),
                };
                if is_builtin(callee) {
                    self.emit(Instruction::print(arg));
                } else {
                    self.emit(Instruction::param(arg));
                    self.emit(Instruction::call(callee.as_str()));
                }
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let else_label = self.new_label();
                let end_label = self.new_label();
                let cond = self.lower_expr(condition);

                self.emit(Instruction::if_false(cond, else_label.as_str()));
                self.lower_block(then_branch);
                self.emit(Instruction::goto(end_label.as_str()));
                self.emit(Instruction::label(else_label));
                if let Some(body) = else_branch {
                    self.lower_block(body);
                }
                self.emit(Instruction::label(end_label));
            }
            Stmt::Loop { condition, body } => {
                let start = self.new_label();
                let end = self.new_label();
                self.loops.push(LoopLabels {
                    start: start.clone(),
                    end: end.clone(),
                });

                self.emit(Instruction::label(start.as_str()));
                let cond = self.lower_expr(condition);
                self.emit(Instruction::if_false(cond, end.as_str()));
                self.lower_block(body);
                self.emit(Instruction::goto(start));
                self.emit(Instruction::label(end));

                self.loops.pop();
            }
            Stmt::Break => {
                if let Some(labels) = self.loops.last() {
                    let target = labels.end.clone();
                    self.emit(Instruction::goto(target));
                }
            }
            Stmt::Continue => {
                if let Some(labels) = self.loops.last() {
                    let target = labels.start.clone();
                    self.emit(Instruction::goto(target));
                }
            }
        }
    }

    /// Returns the operand naming the expression's value.
    fn lower_expr(&mut self, expr: &Expr) -> String {
        match expr {
            Expr::Number(text) | Expr::Str(text) | Expr::Identifier(text) => text.clone(),
            Expr::Binary { lhs, op, rhs } => {
                let left = self.lower_expr(lhs);
                let right = self.lower_expr(rhs);
                let dest = self.new_temp();
                self.emit(Instruction::binary(
                    map_binary_op(*op),
                    left,
                    right,
                    dest.as_str(),
                ));
                dest
            }
        }
    }

    fn emit(&mut self, inst: Instruction) {
        self.instructions.push(inst);
    }
}

fn map_binary_op(op: BinaryOp) -> Op {
    match op {
        BinaryOp::Add => Op::Add,
        BinaryOp::Subtract => Op::Sub,
        BinaryOp::Multiply => Op::Mul,
        BinaryOp::Divide => Op::Div,
        BinaryOp::Equal => Op::Eq,
        BinaryOp::NotEqual => Op::Ne,
        BinaryOp::Less => Op::Lt,
        BinaryOp::LessEqual => Op::Le,
        BinaryOp::Greater => Op::Gt,
        BinaryOp::GreaterEqual => Op::Ge,
        BinaryOp::And => Op::And,
        BinaryOp::Or => Op::Or,
    }
}
