//! Text backends
//!
//! Backends render an optimized instruction sequence for display only;
//! nothing they produce is fed back into the pipeline.

pub mod asm;

use crate::ir::Instruction;

/// Code generation backend trait
pub trait Backend {
    /// Render the instruction sequence
    fn generate(&self, code: &[Instruction]) -> String;

    /// Get backend name
    fn name(&self) -> &'static str;
}
