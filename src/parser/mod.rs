pub mod ast;
mod expr;
pub mod printer;

use thiserror::Error;

use crate::lexer::token::{Token, TokenKind};
use ast::{Program, Stmt, TypeName};

/// The first structural violation found. Parsing stops here; there is
/// no recovery.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Syntax Error: {message} at token: '{found}'")]
pub struct ParseError {
    pub message: String,
    pub found: String,
    pub line: usize,
    pub column: usize,
}

/// Deepest combined nesting of blocks, parentheses and operator chains.
/// Every later stage recurses over the tree, so this also bounds them.
pub const MAX_NESTING: usize = 256;

pub fn parse(tokens: Vec<Token>) -> Result<Program, ParseError> {
    Parser::new(tokens).parse_program()
}

pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            current: 0,
            depth: 0,
        }
    }

    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let return_type = if self.matches(TokenKind::Keyword, "intt") {
            TypeName::Int
        } else if self.matches(TokenKind::Keyword, "sttring") {
            TypeName::Str
        } else {
            TypeName::Int
        };

        self.consume(TokenKind::Keyword, "mainn", "Expected 'mainn'")?;
        self.consume(TokenKind::Delimiter, "(", "Expected '(' after 'mainn'")?;
        self.consume(TokenKind::Delimiter, ")", "Expected ')' after '('")?;
        self.consume(TokenKind::Delimiter, "{", "Expected '{' after mainn()")?;
        let body = self.statement_list()?;
        self.consume(TokenKind::Delimiter, "}", "Expected '}' at end of mainn")?;

        tracing::debug!(statements = body.len(), "parsed program");
        Ok(Program { return_type, body })
    }

    fn statement_list(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut statements = Vec::new();
        while !self.check_text("}") && !self.is_at_end() {
            statements.push(self.statement()?);
        }
        Ok(statements)
    }

    fn statement(&mut self) -> Result<Stmt, ParseError> {
        self.enter("Statement nested too deeply")?;
        let stmt = self.statement_inner();
        self.depth -= 1;
        stmt
    }

    fn statement_inner(&mut self) -> Result<Stmt, ParseError> {
        if let Some(ty) = self.type_keyword() {
            return self.declaration(ty);
        }

        if let Some(name) = self.matches_kind(TokenKind::Identifier) {
            return self.assignment(name);
        }

        if self.matches(TokenKind::Keyword, "retturn") {
            return self.return_statement();
        }

        if self.matches(TokenKind::Keyword, "prrint") || self.matches(TokenKind::Keyword, "san")
        {
            let callee = self.previous_text();
            return self.call_statement(callee);
        }

        if self.matches(TokenKind::Keyword, "iif") {
            return self.if_statement();
        }

        if self.matches(TokenKind::Keyword, "loop") {
            return self.loop_statement();
        }

        if self.matches(TokenKind::Keyword, "brreak") {
            self.consume(TokenKind::Delimiter, ";", "Expected ';' after 'brreak'")?;
            return Ok(Stmt::Break);
        }

        if self.matches(TokenKind::Keyword, "conttinue") {
            self.consume(TokenKind::Delimiter, ";", "Expected ';' after 'conttinue'")?;
            return Ok(Stmt::Continue);
        }

        Err(self.error("Unknown or invalid statement"))
    }

    fn type_keyword(&mut self) -> Option<TypeName> {
        let ty = self
            .peek()
            .filter(|token| token.kind == TokenKind::Keyword)
            .and_then(|token| TypeName::from_keyword(&token.text))?;
        self.current += 1;
        Some(ty)
    }

    fn declaration(&mut self, ty: TypeName) -> Result<Stmt, ParseError> {
        let name = self
            .matches_kind(TokenKind::Identifier)
            .ok_or_else(|| self.error("Expected identifier after type"))?;
        let initializer = if self.matches(TokenKind::Operator, "=") {
            Some(self.expression()?)
        } else {
            None
        };
        self.consume(TokenKind::Delimiter, ";", "Expected ';' after declaration")?;
        Ok(Stmt::Declaration {
            ty,
            name,
            initializer,
        })
    }

    fn assignment(&mut self, name: String) -> Result<Stmt, ParseError> {
        self.consume(TokenKind::Operator, "=", "Expected '=' after identifier")?;
        let value = self.expression()?;
        self.consume(TokenKind::Delimiter, ";", "Expected ';' after assignment")?;
        Ok(Stmt::Assignment { name, value })
    }

    fn return_statement(&mut self) -> Result<Stmt, ParseError> {
        let value = if self.check_text(";") {
            None
        } else {
            Some(self.expression()?)
        };
        self.consume(TokenKind::Delimiter, ";", "Expected ';' after retturn")?;
        Ok(Stmt::Return { value })
    }

    fn call_statement(&mut self, callee: String) -> Result<Stmt, ParseError> {
        self.consume(TokenKind::Delimiter, "(", "Expected '(' after function name")?;
        let arg = if self.check(TokenKind::Delimiter, ")") {
            None
        } else {
            Some(self.expression()?)
        };
        self.consume(TokenKind::Delimiter, ")", "Expected ')' after args")?;
        self.consume(TokenKind::Delimiter, ";", "Expected ';' after function call")?;
        Ok(Stmt::Call { callee, arg })
    }

    fn if_statement(&mut self) -> Result<Stmt, ParseError> {
        self.consume(TokenKind::Delimiter, "(", "Expected '(' after iif")?;
        let condition = self.expression()?;
        self.consume(TokenKind::Delimiter, ")", "Expected ')' after condition")?;
        self.consume(TokenKind::Delimiter, "{", "Expected '{' after iif()")?;
        let then_branch = self.statement_list()?;
        self.consume(TokenKind::Delimiter, "}", "Expected '}' after if body")?;

        let else_branch = if self.matches(TokenKind::Keyword, "ellse") {
            self.consume(TokenKind::Delimiter, "{", "Expected '{' after ellse")?;
            let body = self.statement_list()?;
            self.consume(TokenKind::Delimiter, "}", "Expected '}' after else body")?;
            Some(body)
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    fn loop_statement(&mut self) -> Result<Stmt, ParseError> {
        self.consume(TokenKind::Delimiter, "(", "Expected '(' after 'loop'")?;
        let condition = self.expression()?;
        self.consume(TokenKind::Delimiter, ")", "Expected ')' after loop condition")?;
        self.consume(TokenKind::Delimiter, "{", "Expected '{' after loop condition")?;
        let body = self.statement_list()?;
        self.consume(TokenKind::Delimiter, "}", "Expected '}' after loop body")?;
        Ok(Stmt::Loop { condition, body })
    }

    pub(crate) fn enter(&mut self, message: &str) -> Result<(), ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(self.error(message));
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn matches(&mut self, kind: TokenKind, text: &str) -> bool {
        if self.check(kind, text) {
            self.current += 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn matches_kind(&mut self, kind: TokenKind) -> Option<String> {
        let text = self
            .peek()
            .filter(|token| token.kind == kind)
            .map(|token| token.text.clone())?;
        self.current += 1;
        Some(text)
    }

    pub(crate) fn consume(
        &mut self,
        kind: TokenKind,
        text: &str,
        message: &str,
    ) -> Result<(), ParseError> {
        if self.matches(kind, text) {
            Ok(())
        } else {
            Err(self.error(message))
        }
    }

    pub(crate) fn check(&self, kind: TokenKind, text: &str) -> bool {
        self.peek().is_some_and(|token| token.is(kind, text))
    }

    fn check_text(&self, text: &str) -> bool {
        self.peek().is_some_and(|token| token.text == text)
    }

    pub(crate) fn previous_text(&self) -> String {
        self.tokens
            .get(self.current.wrapping_sub(1))
            .map(|token| token.text.clone())
            .unwrap_or_default()
    }

    pub(crate) fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.current)
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    pub(crate) fn error(&self, message: &str) -> ParseError {
        match self.peek() {
            Some(token) => ParseError {
                message: message.to_string(),
                found: token.text.clone(),
                line: token.line,
                column: token.column,
            },
            None => {
                let (line, column) = self
                    .tokens
                    .last()
                    .map(|token| (token.line, token.column + token.text.chars().count()))
                    .unwrap_or((1, 1));
                ParseError {
                    message: message.to_string(),
                    found: "EOF".to_string(),
                    line,
                    column,
                }
            }
        }
    }
}
