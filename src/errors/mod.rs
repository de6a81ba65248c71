pub mod pretty;

use thiserror::Error;

use crate::parser::ParseError;
use crate::semantic::Diagnostic;

/// Why a pipeline run stopped before IR generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// Fatal and immediate; only the first violation is reported.
    #[error(transparent)]
    Syntax(#[from] ParseError),
    /// Every finding of the analysis pass.
    #[error("Compilation stopped due to semantic errors ({} found)", .0.len())]
    Semantic(Vec<Diagnostic>),
}

impl CompileError {
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            CompileError::Semantic(diagnostics) => diagnostics,
            CompileError::Syntax(_) => &[],
        }
    }
}
