//! The pipeline stages, one tracing span each. `compile`, `run` and the
//! driver all go through here.

use tracing::info_span;

use crate::errors::CompileError;
use crate::ir::Instruction;
use crate::lexer::token::Token;
use crate::parser::ast::Program;
use crate::parser::ParseError;
use crate::runtime::{Execution, Interpreter};
use crate::semantic::SemanticAnalyzer;
use crate::{irgen, lexer, optimize, parser};

pub(crate) fn lex(source: &str) -> Vec<Token> {
    info_span!("pipeline.lex").in_scope(|| lexer::lex(source))
}

pub(crate) fn parse(tokens: Vec<Token>) -> Result<Program, ParseError> {
    info_span!("pipeline.parse").in_scope(|| parser::parse(tokens))
}

/// Fails with every diagnostic when the program is rejected.
pub(crate) fn analyze(program: &Program) -> Result<(), CompileError> {
    info_span!("pipeline.semantic").in_scope(|| {
        let mut analyzer = SemanticAnalyzer::new();
        analyzer.analyze(program);
        if analyzer.has_errors() {
            Err(CompileError::Semantic(analyzer.into_diagnostics()))
        } else {
            Ok(())
        }
    })
}

pub(crate) fn generate(program: &Program) -> Vec<Instruction> {
    info_span!("pipeline.irgen").in_scope(|| irgen::generate(program))
}

/// A copy of `ir` when optimization is off.
pub(crate) fn optimize(ir: &[Instruction], enabled: bool) -> Vec<Instruction> {
    if !enabled {
        return ir.to_vec();
    }
    info_span!("pipeline.optimize").in_scope(|| optimize::optimize(ir))
}

pub(crate) fn execute(code: &[Instruction]) -> Execution {
    info_span!("pipeline.execute").in_scope(|| Interpreter::new().execute(code))
}
