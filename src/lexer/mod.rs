pub mod token;

use token::{Token, TokenKind};

pub const KEYWORDS: &[&str] = &[
    "intt",
    "sttring",
    "mainn",
    "retturn",
    "iif",
    "ellse",
    "loop",
    "brreak",
    "conttinue",
    "prrint",
    "san",
];

const TWO_CHAR_OPERATORS: &[&str] = &["==", "!=", "<=", ">=", "=>", "&&", "||"];
const SINGLE_CHAR_OPERATORS: &str = "+-*/=<>";
const DELIMITERS: &str = "(){};,";

/// Tokenize the whole source. Never fails: characters outside the
/// language become `Unknown` tokens.
pub fn lex(source: &str) -> Vec<Token> {
    Lexer::new(source).lex()
}

pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

/// One `<KIND, text>` line per token.
pub fn render_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        out.push_str(&token.to_string());
        out.push('\n');
    }
    out
}

struct Lexer {
    chars: Vec<char>,
    current: usize,
    start: usize,
    line: usize,
    column: usize,
    token_line: usize,
    token_column: usize,
    tokens: Vec<Token>,
}

impl Lexer {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            current: 0,
            start: 0,
            line: 1,
            column: 1,
            token_line: 1,
            token_column: 1,
            tokens: Vec::new(),
        }
    }

    fn lex(mut self) -> Vec<Token> {
        while !self.is_at_end() {
            self.start_token();
            self.scan_token();
        }
        tracing::debug!(tokens = self.tokens.len(), "tokenized source");
        self.tokens
    }

    fn scan_token(&mut self) {
        let c = self.advance();
        match c {
            c if c.is_whitespace() => {}
            c if is_ident_start(c) => self.identifier(),
            c if c.is_ascii_digit() => self.number(),
            '"' => self.string(),
            _ => {
                if self.two_char_operator(c) {
                    self.add_token(TokenKind::Operator);
                } else if SINGLE_CHAR_OPERATORS.contains(c) {
                    self.add_token(TokenKind::Operator);
                } else if DELIMITERS.contains(c) {
                    self.add_token(TokenKind::Delimiter);
                } else {
                    self.add_token(TokenKind::Unknown);
                }
            }
        }
    }

    fn two_char_operator(&mut self, first: char) -> bool {
        let next = self.peek();
        let matched = TWO_CHAR_OPERATORS.iter().any(|op| {
            let mut chars = op.chars();
            chars.next() == Some(first) && chars.next() == Some(next)
        });
        if matched {
            self.advance();
        }
        matched
    }

    fn identifier(&mut self) {
        while is_ident_continue(self.peek()) {
            self.advance();
        }

        let kind = if is_keyword(&self.current_lexeme()) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        self.add_token(kind);
    }

    fn number(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }
        self.add_token(TokenKind::Number);
    }

    // Unterminated literals run to end of input and keep their opening quote.
    fn string(&mut self) {
        while !self.is_at_end() {
            if self.advance() == '"' {
                break;
            }
        }
        self.add_token(TokenKind::StringLiteral);
    }

    fn add_token(&mut self, kind: TokenKind) {
        let lexeme = self.current_lexeme();
        self.tokens
            .push(Token::new(kind, lexeme, self.token_line, self.token_column));
    }

    fn start_token(&mut self) {
        self.start = self.current;
        self.token_line = self.line;
        self.token_column = self.column;
    }

    fn current_lexeme(&self) -> String {
        self.chars[self.start..self.current].iter().collect()
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.chars[self.current]
        }
    }

    fn advance(&mut self) -> char {
        let c = self.chars[self.current];
        self.current += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        c
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}
