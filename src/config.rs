//! Pipeline options shared by the library entry points and the CLI.

/// Which intermediate artifacts the driver prints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitSet {
    pub tokens: bool,
    pub tree: bool,
    pub diagnostics: bool,
    pub ir: bool,
    pub optimized: bool,
    pub asm: bool,
}

impl EmitSet {
    pub fn all() -> Self {
        Self {
            tokens: true,
            tree: true,
            diagnostics: true,
            ir: true,
            optimized: true,
            asm: true,
        }
    }

    pub fn any(&self) -> bool {
        self.tokens || self.tree || self.diagnostics || self.ir || self.optimized || self.asm
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Run constant folding and propagation before execution.
    pub optimize: bool,
    pub emit: EmitSet,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            optimize: true,
            emit: EmitSet::default(),
        }
    }
}
