//! Indented `NODE_KIND[: value]` rendering of a parsed program.

use super::ast::{Expr, Program, Stmt};

pub fn render_tree(program: &Program) -> String {
    let mut out = String::new();
    line(&mut out, 0, "PROGRAM_NODE", "mainn");
    if !program.body.is_empty() {
        statement_list(&mut out, 1, &program.body);
    }
    out
}

fn statement_list(out: &mut String, depth: usize, statements: &[Stmt]) {
    line(out, depth, "STATEMENT_NODE", "stmt_list");
    for stmt in statements {
        statement(out, depth + 1, stmt);
    }
}

fn statement(out: &mut String, depth: usize, stmt: &Stmt) {
    match stmt {
        Stmt::Declaration {
            ty,
            name,
            initializer,
        } => {
            line(out, depth, "DECLARATION_NODE", &format!("{} {}", ty, name));
            if let Some(expr) = initializer {
                expression(out, depth + 1, expr);
            }
        }
        Stmt::Assignment { name, value } => {
            line(out, depth, "ASSIGNMENT_NODE", name);
            expression(out, depth + 1, value);
        }
        Stmt::Return { value } => {
            line(out, depth, "RETURN_STATEMENT_NODE", "retturn");
            if let Some(expr) = value {
                expression(out, depth + 1, expr);
            }
        }
        Stmt::Call { callee, arg } => {
            line(out, depth, "FUNCTION_CALL_NODE", callee);
            if let Some(expr) = arg {
                expression(out, depth + 1, expr);
            }
        }
        Stmt::If {
            condition,
            then_branch,
            else_branch,
        } => {
            line(out, depth, "IF_STATEMENT_NODE", "iif");
            expression(out, depth + 1, condition);
            statement_list(out, depth + 1, then_branch);
            if let Some(body) = else_branch {
                statement_list(out, depth + 1, body);
            }
        }
        Stmt::Loop { condition, body } => {
            line(out, depth, "LOOP_STATEMENT_NODE", "loop");
            expression(out, depth + 1, condition);
            statement_list(out, depth + 1, body);
        }
        Stmt::Break => line(out, depth, "BREAK_STATEMENT_NODE", "brreak"),
        Stmt::Continue => line(out, depth, "CONTINUE_STATEMENT_NODE", "conttinue"),
    }
}

fn expression(out: &mut String, depth: usize, expr: &Expr) {
    match expr {
        Expr::Number(digits) => line(out, depth, "NUMBER_NODE", digits),
        Expr::Str(literal) => line(out, depth, "STRING_NODE", literal),
        Expr::Identifier(name) => line(out, depth, "IDENTIFIER_NODE", name),
        Expr::Binary { lhs, op, rhs } => {
            line(out, depth, "EXPRESSION_NODE", op.symbol());
            expression(out, depth + 1, lhs);
            expression(out, depth + 1, rhs);
        }
    }
}

fn line(out: &mut String, depth: usize, kind: &str, value: &str) {
    out.push_str(&"  ".repeat(depth));
    out.push_str(kind);
    if !value.is_empty() {
        out.push_str(": ");
        out.push_str(value);
    }
    out.push('\n');
}
