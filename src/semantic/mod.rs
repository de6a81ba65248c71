pub mod types;

use std::collections::HashMap;

use thiserror::Error;

use crate::parser::ast::{BinaryOp, Expr, Program, Stmt, TypeName};
use types::{compatible, Type};

pub const PRINT_BUILTIN: &str = "prrint";
pub const SAN_BUILTIN: &str = "san";

pub fn is_builtin(name: &str) -> bool {
    name == PRINT_BUILTIN || name == SAN_BUILTIN
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    Redeclaration,
    UndeclaredVariable,
    TypeMismatch,
    ReturnTypeMismatch,
    ArityMismatch,
    UnknownFunction,
    OutsideLoop,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub ty: TypeName,
    pub name: String,
}

/// Read-only validation pass. Findings are collected, never raised.
#[derive(Debug)]
pub struct SemanticAnalyzer {
    symbols: HashMap<String, Symbol>,
    diagnostics: Vec<Diagnostic>,
    loop_depth: usize,
    return_type: Type,
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self {
            symbols: HashMap::new(),
            diagnostics: Vec::new(),
            loop_depth: 0,
            return_type: Type::Int,
        }
    }

    pub fn analyze(&mut self, program: &Program) -> &[Diagnostic] {
        self.symbols.clear();
        self.diagnostics.clear();
        self.loop_depth = 0;
        self.return_type = program.return_type.into();

        for stmt in &program.body {
            self.check_statement(stmt);
        }

        tracing::debug!(
            symbols = self.symbols.len(),
            diagnostics = self.diagnostics.len(),
            "semantic analysis finished"
        );
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn symbols(&self) -> &HashMap<String, Symbol> {
        &self.symbols
    }

    fn check_statement(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Declaration {
                ty,
                name,
                initializer,
            } => {
                if self.symbols.contains_key(name) {
                    self.report(
                        DiagnosticKind::Redeclaration,
                        format!("Error: Redeclaration of variable '{}'", name),
                    );
                } else {
                    self.symbols.insert(
                        name.clone(),
                        Symbol {
                            ty: *ty,
                            name: name.clone(),
                        },
                    );
                }

                if let Some(expr) = initializer {
                    let declared = Type::from(*ty);
                    let actual = self.check_expr(expr);
                    self.check_assignable(actual, declared, name);
                }
            }
            Stmt::Assignment { name, value } => {
                let declared = self.symbols.get(name).map(|symbol| Type::from(symbol.ty));
                let actual = self.check_expr(value);
                match declared {
                    Some(declared) => self.check_assignable(actual, declared, name),
                    None => self.report(
                        DiagnosticKind::UndeclaredVariable,
                        format!("Error: Assignment to undeclared variable '{}'", name),
                    ),
                }
            }
            Stmt::Return { value } => {
                if let Some(expr) = value {
                    let actual = self.check_expr(expr);
                    if !compatible(actual, self.return_type) {
                        self.report(
                            DiagnosticKind::ReturnTypeMismatch,
                            format!(
                                "Type Error: Return type '{}' does not match function return type '{}'",
                                actual, self.return_type
                            ),
                        );
                    }
                }
            }
            Stmt::Call { callee, arg } => self.check_call(callee, arg.as_ref()),
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.check_expr(condition);
                for stmt in then_branch {
                    self.check_statement(stmt);
                }
                for stmt in else_branch.iter().flatten() {
                    self.check_statement(stmt);
                }
            }
            Stmt::Loop { condition, body } => {
                self.loop_depth += 1;
                self.check_expr(condition);
                for stmt in body {
                    self.check_statement(stmt);
                }
                self.loop_depth -= 1;
            }
            Stmt::Break => self.check_in_loop("brreak"),
            Stmt::Continue => self.check_in_loop("conttinue"),
        }
    }

    fn check_call(&mut self, callee: &str, arg: Option<&Expr>) {
        let allowed: &[Type] = match callee {
            PRINT_BUILTIN => &[Type::Int, Type::Str],
            SAN_BUILTIN => &[Type::Int],
            _ => {
                self.report(
                    DiagnosticKind::UnknownFunction,
                    format!("Error: Unknown function '{}'", callee),
                );
                if let Some(expr) = arg {
                    self.check_expr(expr);
                }
                return;
            }
        };

        let Some(expr) = arg else {
            self.report(
                DiagnosticKind::ArityMismatch,
                format!("Error: '{}' expects exactly one argument", callee),
            );
            return;
        };

        let actual = self.check_expr(expr);
        if actual.is_known() && !allowed.contains(&actual) {
            let expected = allowed
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" or ");
            self.report(
                DiagnosticKind::TypeMismatch,
                format!(
                    "Type Error: '{}' argument must be {}, got '{}'",
                    callee, expected, actual
                ),
            );
        }
    }

    fn check_in_loop(&mut self, keyword: &str) {
        if self.loop_depth == 0 {
            self.report(
                DiagnosticKind::OutsideLoop,
                format!("Error: '{}' used outside of loop", keyword),
            );
        }
    }

    fn check_assignable(&mut self, actual: Type, declared: Type, name: &str) {
        if !compatible(actual, declared) {
            self.report(
                DiagnosticKind::TypeMismatch,
                format!(
                    "Type Error: Cannot assign type '{}' to variable '{}' of type '{}'",
                    actual, name, declared
                ),
            );
        }
    }

    /// Types an expression, reporting each undeclared identifier once.
    fn check_expr(&mut self, expr: &Expr) -> Type {
        match expr {
            Expr::Number(_) => Type::Int,
            Expr::Str(_) => Type::Str,
            Expr::Identifier(name) => match self.symbols.get(name) {
                Some(symbol) => symbol.ty.into(),
                None => {
                    self.report(
                        DiagnosticKind::UndeclaredVariable,
                        format!("Error: Undeclared variable '{}'", name),
                    );
                    Type::Unknown
                }
            },
            Expr::Binary { lhs, op, rhs } => {
                let left = self.check_expr(lhs);
                let right = self.check_expr(rhs);
                self.binary_result(*op, left, right)
            }
        }
    }

    fn binary_result(&mut self, op: BinaryOp, left: Type, right: Type) -> Type {
        let yields_int = op.is_comparison() || op.is_logical();
        if !compatible(left, right) {
            self.report(
                DiagnosticKind::TypeMismatch,
                format!(
                    "Type Error: Mismatched types '{}' and '{}' in operation '{}'",
                    left,
                    right,
                    op.symbol()
                ),
            );
            return if yields_int { Type::Int } else { Type::Unknown };
        }

        if yields_int {
            Type::Int
        } else if left.is_known() {
            left
        } else {
            right
        }
    }

    fn report(&mut self, kind: DiagnosticKind, message: String) {
        self.diagnostics.push(Diagnostic::new(kind, message));
    }
}

/// Convenience wrapper: analyze a program with a fresh analyzer.
pub fn analyze(program: &Program) -> Vec<Diagnostic> {
    let mut analyzer = SemanticAnalyzer::new();
    analyzer.analyze(program);
    analyzer.into_diagnostics()
}
