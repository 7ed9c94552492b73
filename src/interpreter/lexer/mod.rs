//! Lexer - PEST-based tokenizer for one line of BASIC
//!
//! Produces a [`TokenStream`] that the parser and the session dispatcher
//! consume one token at a time.

use pest::Parser;
use pest_derive::Parser;

use super::errors::{BasicError, BasicResult};


/* ===================== PEST Lexer ===================== */

#[derive(Parser)]
#[grammar = "interpreter/lexer/basic.pest"]
struct LineLexer;

/* ===================== Tokens ===================== */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Unsigned run of decimal digits
    Number,
    /// Identifier or keyword
    Word,
    /// Any other single character
    Operator,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn is_number(&self) -> bool {
        self.kind == TokenKind::Number
    }

    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }

    /// True if this is the operator token `op`
    pub fn is_operator(&self, op: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == op
    }
}

/* ===================== Token Stream ===================== */

/// Cursor over the tokens of one line
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenStream {
    /// Split a line into tokens, skipping blanks
    pub fn tokenize(line: &str) -> BasicResult<Self> {
        let mut pairs = LineLexer::parse(Rule::line, line)
            .map_err(|err| BasicError::syntax(format!("unreadable line: {}", err)))?;

        let Some(line_pair) = pairs.next() else {
            return Ok(Self::from_tokens(Vec::new()));
        };

        let tokens = line_pair
            .into_inner()
            .filter_map(|pair| {
                let kind = match pair.as_rule() {
                    Rule::number => TokenKind::Number,
                    Rule::word => TokenKind::Word,
                    Rule::operator => TokenKind::Operator,
                    // EOI
                    _ => return None,
                };
                Some(Token {
                    kind,
                    text: pair.as_str().to_string(),
                })
            })
            .collect();

        Ok(Self::from_tokens(tokens))
    }

    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Consume and return the next token, or None at end of line
    pub fn next_token(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    pub fn has_more_tokens(&self) -> bool {
        self.pos < self.tokens.len()
    }

    /// Drop everything left on the line
    pub fn skip_rest(&mut self) {
        self.pos = self.tokens.len();
    }

    /// Fail with a syntax error if anything is left on the line
    pub fn expect_end(&self) -> BasicResult<()> {
        match self.peek() {
            None => Ok(()),
            Some(token) => Err(BasicError::syntax(format!(
                "unexpected trailing token '{}'",
                token.text
            ))),
        }
    }
}
