//! Miniature compiler and interpreter for a toy imperative language.
//!
//! Stages run strictly in order, each consuming the previous stage's output:
//! - `lexer` turns source text into tokens and never fails.
//! - `parser` builds the syntax tree and stops at the first syntax error.
//! - `semantic` checks declarations and types, collecting diagnostics.
//! - `irgen` lowers the tree into three-address `ir` instructions.
//! - `optimize` folds and propagates constants.
//! - `runtime` executes the instructions directly.
//!
//! `backend` renders a cosmetic assembly listing and `driver` holds the
//! line-oriented console front end.

pub mod backend;
pub mod config;
pub mod driver;
pub mod errors;
pub mod ir;
pub mod irgen;
pub mod lexer;
pub mod optimize;
pub mod parser;
pub mod runtime;
pub mod semantic;
mod stage;

pub use config::{EmitSet, PipelineOptions};
pub use errors::CompileError;
pub use runtime::Execution;

use ir::Instruction;
use lexer::token::Token;
use parser::ast::Program;

/// Every artifact of a successful compile.
#[derive(Debug, Clone)]
pub struct Compilation {
    pub tokens: Vec<Token>,
    pub program: Program,
    pub ir: Vec<Instruction>,
    /// Equal to `ir` when optimization is disabled.
    pub optimized: Vec<Instruction>,
}

/// Run every stage up to (and including) optimization.
pub fn compile(source: &str, options: &PipelineOptions) -> Result<Compilation, CompileError> {
    let tokens = stage::lex(source);
    let program = stage::parse(tokens.clone())?;
    stage::analyze(&program)?;
    let ir = stage::generate(&program);
    let optimized = stage::optimize(&ir, options.optimize);

    Ok(Compilation {
        tokens,
        program,
        ir,
        optimized,
    })
}

/// Compile with default options and execute the optimized code.
pub fn run(source: &str) -> Result<Execution, CompileError> {
    let compilation = compile(source, &PipelineOptions::default())?;
    Ok(stage::execute(&compilation.optimized))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unoptimized_compile_keeps_ir_verbatim() {
        let options = PipelineOptions {
            optimize: false,
            ..PipelineOptions::default()
        };
        let compilation = compile("mainn(){ intt x = 2 + 3; }", &options).expect("compile");
        assert_eq!(compilation.ir, compilation.optimized);
    }
}
