//! IR optimization passes
//!
//! Passes rewrite the instruction sequence in place. Each pass is a single
//! forward scan; the pass manager runs them once, in insertion order.

use std::collections::HashMap;

use crate::ir::{is_int_literal, Instruction, Op};

/// Optimization pass trait
pub trait Pass {
    /// Run the pass, returning how many instructions it rewrote.
    fn run(&self, instructions: &mut [Instruction]) -> usize;

    /// Get pass name
    fn name(&self) -> &'static str;
}

/// Pass manager - runs optimization passes in order
pub struct PassManager {
    passes: Vec<Box<dyn Pass>>,
}

impl PassManager {
    /// Create a new pass manager
    pub fn new() -> Self {
        Self { passes: Vec::new() }
    }

    /// Folding first, so propagation sees the folded literals.
    pub fn standard() -> Self {
        let mut manager = Self::new();
        manager.add_pass(Box::new(ConstantFolding));
        manager.add_pass(Box::new(ConstantPropagation));
        manager
    }

    /// Add an optimization pass
    pub fn add_pass(&mut self, pass: Box<dyn Pass>) {
        self.passes.push(pass);
    }

    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|pass| pass.name()).collect()
    }

    /// Run all passes over the sequence
    pub fn run(&self, instructions: &mut [Instruction]) {
        tracing::debug!(passes = ?self.pass_names(), "running optimization passes");
        for pass in &self.passes {
            let rewritten = pass.run(instructions);
            tracing::debug!(pass = pass.name(), rewritten, "optimization pass finished");
        }
    }
}

impl Default for PassManager {
    fn default() -> Self {
        Self::standard()
    }
}

/// Run the standard pipeline on a copy of `instructions`.
pub fn optimize(instructions: &[Instruction]) -> Vec<Instruction> {
    let mut optimized = instructions.to_vec();
    PassManager::standard().run(&mut optimized);
    optimized
}

/// Constant folding pass
///
/// `t = 2 + 3` becomes the plain move `t = 5`. Only `+ - * /` with two
/// literal operands are folded; a literal zero divisor folds to 0.
pub struct ConstantFolding;

impl Pass for ConstantFolding {
    fn run(&self, instructions: &mut [Instruction]) -> usize {
        instructions
            .iter_mut()
            .map(fold_instruction)
            .filter(|folded| *folded)
            .count()
    }

    fn name(&self) -> &'static str {
        "constant-folding"
    }
}

/// Constant propagation pass
///
/// Tracks names last bound by a plain move of a literal and substitutes
/// them into later operands. The table is not reset at labels, so a value
/// recorded before a loop stays visible inside the loop body.
pub struct ConstantPropagation;

impl Pass for ConstantPropagation {
    fn run(&self, instructions: &mut [Instruction]) -> usize {
        let mut constants: HashMap<String, String> = HashMap::new();
        let mut rewritten = 0;

        for inst in instructions.iter_mut() {
            if inst.op == Op::Move && is_int_literal(&inst.arg1) {
                constants.insert(inst.result.clone(), inst.arg1.clone());
                continue;
            }

            let mut changed = substitute(&mut inst.arg1, &constants);
            changed |= substitute(&mut inst.arg2, &constants);

            if fold_instruction(inst) {
                constants.insert(inst.result.clone(), inst.arg1.clone());
                changed = true;
            } else if writes_result(inst.op) {
                constants.remove(&inst.result);
            }

            if changed {
                rewritten += 1;
            }
        }

        rewritten
    }

    fn name(&self) -> &'static str {
        "constant-propagation"
    }
}

fn substitute(operand: &mut String, constants: &HashMap<String, String>) -> bool {
    match constants.get(operand.as_str()) {
        Some(literal) => {
            *operand = literal.clone();
            true
        }
        None => false,
    }
}

fn writes_result(op: Op) -> bool {
    op.is_binary() || op.is_move()
}

/// Rewrites `r = a op b` into `r = value` when both operands are literals.
fn fold_instruction(inst: &mut Instruction) -> bool {
    if !matches!(inst.op, Op::Add | Op::Sub | Op::Mul | Op::Div) {
        return false;
    }
    if !is_int_literal(&inst.arg1) || !is_int_literal(&inst.arg2) {
        return false;
    }
    let (Ok(lhs), Ok(rhs)) = (inst.arg1.parse::<i64>(), inst.arg2.parse::<i64>()) else {
        return false;
    };

    let value = match inst.op {
        Op::Add => lhs.wrapping_add(rhs),
        Op::Sub => lhs.wrapping_sub(rhs),
        Op::Mul => lhs.wrapping_mul(rhs),
        Op::Div if rhs == 0 => 0,
        Op::Div => lhs.wrapping_div(rhs),
        _ => return false,
    };

    inst.op = Op::Move;
    inst.arg1 = value.to_string();
    inst.arg2.clear();
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_division_by_literal_zero_to_zero() {
        let mut inst = Instruction::binary(Op::Div, "9", "0", "%t0");
        assert!(fold_instruction(&mut inst));
        assert_eq!(inst, Instruction::mov("0", "%t0"));
    }

    #[test]
    fn leaves_comparisons_unfolded() {
        let mut inst = Instruction::binary(Op::Lt, "1", "2", "%t0");
        assert!(!fold_instruction(&mut inst));
        assert_eq!(inst.op, Op::Lt);
    }

    #[test]
    fn skips_literals_that_overflow() {
        let mut inst = Instruction::binary(Op::Add, "99999999999999999999", "1", "%t0");
        assert!(!fold_instruction(&mut inst));
    }
}
