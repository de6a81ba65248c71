use crate::lexer::token::TokenKind;

use super::ast::{BinaryOp, Expr};
use super::{ParseError, Parser};

const LOGIC_OPS: &[&str] = &["&&", "||"];
const COMPARISON_OPS: &[&str] = &["==", "!=", "<", "<=", ">", ">="];
const TERM_OPS: &[&str] = &["+", "-"];
const FACTOR_OPS: &[&str] = &["*", "/"];

impl Parser {
    pub(crate) fn expression(&mut self) -> Result<Expr, ParseError> {
        self.enter("Expression nested too deeply")?;
        let expr = self.logic();
        self.depth -= 1;
        expr
    }

    fn logic(&mut self) -> Result<Expr, ParseError> {
        self.binary_level(LOGIC_OPS, Self::comparison)
    }

    fn comparison(&mut self) -> Result<Expr, ParseError> {
        self.binary_level(COMPARISON_OPS, Self::term)
    }

    fn term(&mut self) -> Result<Expr, ParseError> {
        self.binary_level(TERM_OPS, Self::factor)
    }

    fn factor(&mut self) -> Result<Expr, ParseError> {
        self.binary_level(FACTOR_OPS, Self::primary)
    }

    /// Left-associative chain of `operand (op operand)*`. Each link deepens
    /// the tree, so it counts against the nesting limit.
    fn binary_level(
        &mut self,
        symbols: &[&str],
        operand: fn(&mut Self) -> Result<Expr, ParseError>,
    ) -> Result<Expr, ParseError> {
        let mut expr = operand(self)?;
        let mut links = 0;
        while let Some(op) = self.matches_operator(symbols) {
            self.enter("Expression nested too deeply")?;
            links += 1;
            let rhs = operand(self)?;
            expr = Expr::binary(expr, op, rhs);
        }
        self.depth -= links;
        Ok(expr)
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        if let Some(digits) = self.matches_kind(TokenKind::Number) {
            return Ok(Expr::Number(digits));
        }

        if let Some(literal) = self.matches_kind(TokenKind::StringLiteral) {
            return Ok(Expr::Str(literal));
        }

        if let Some(name) = self.matches_kind(TokenKind::Identifier) {
            return Ok(Expr::Identifier(name));
        }

        if self.matches(TokenKind::Delimiter, "(") {
            let expr = self.expression()?;
            self.consume(TokenKind::Delimiter, ")", "Expected ')' after expression")?;
            return Ok(expr);
        }

        Err(self.error("Invalid factor"))
    }

    fn matches_operator(&mut self, symbols: &[&str]) -> Option<BinaryOp> {
        let symbol = symbols
            .iter()
            .find(|symbol| self.check(TokenKind::Operator, symbol))?;
        let op = BinaryOp::from_symbol(symbol)?;
        self.current += 1;
        Some(op)
    }
}
