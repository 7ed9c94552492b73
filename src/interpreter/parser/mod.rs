//! Parser - recursive descent over a [`TokenStream`]
//!
//! Produces the AST consumed by the executor. Expressions use precedence
//! climbing; statements are built by a constructor picked by keyword.
//!
//! Grammar (one line, after the optional line number):
//!
//! ```text
//! statement := "REM" any*
//!            | "LET" word "=" expr
//!            | "PRINT" expr
//!            | "INPUT" word
//!            | "END"
//!            | "GOTO" number
//!            | "IF" expr ("=" | "<" | ">") expr "THEN" number
//! expr      := term (("+" | "-" | "*" | "/") term)*
//! term      := number | word | "(" expr ")" | "-" term
//! ```

use super::errors::{BasicError, BasicResult};
use super::executor::types::{BinaryOp, CmpOp, Expr, Stmt};
use super::lexer::{Token, TokenKind, TokenStream};
use super::program::LineNumber;

#[cfg(test)]
mod tests;

/// Words that can never be used as variable names
pub const KEYWORDS: &[&str] = &[
    "REM", "LET", "PRINT", "INPUT", "END", "GOTO", "IF", "THEN", "RUN", "LIST", "CLEAR", "QUIT",
    "HELP",
];

/// Minimum precedence for IF operands: every arithmetic operator binds
/// tighter, so the reader stops at the comparison.
pub const COMPARISON_PRECEDENCE: u8 = 1;

pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

/* ===================== Public API ===================== */

/// Parse one line's statement (keyword first)
pub fn parse_statement(tokens: &mut TokenStream) -> BasicResult<Stmt> {
    let keyword = tokens
        .next_token()
        .ok_or_else(|| BasicError::syntax("missing statement keyword"))?;

    if !keyword.is_word() {
        return Err(BasicError::syntax(format!(
            "expected a statement keyword, found '{}'",
            keyword.text
        )));
    }

    parse_keyword_statement(&keyword.text, tokens)
}

/// Build the statement introduced by `keyword` from the rest of the line
pub fn parse_keyword_statement(keyword: &str, tokens: &mut TokenStream) -> BasicResult<Stmt> {
    let stmt = match keyword {
        "REM" => {
            tokens.skip_rest();
            Stmt::Rem
        }
        "LET" => build_let(tokens)?,
        "PRINT" => Stmt::Print {
            value: parse_expression(tokens)?,
        },
        "INPUT" => Stmt::Input {
            name: expect_variable_name(tokens)?,
        },
        "END" => Stmt::End,
        "GOTO" => Stmt::Goto {
            target: expect_line_number(tokens)?,
        },
        "IF" => build_if(tokens)?,
        other => {
            return Err(BasicError::syntax(format!(
                "unknown statement keyword '{}'",
                other
            )))
        }
    };

    tokens.expect_end()?;
    Ok(stmt)
}

/// Parse a full expression, leaving the stream just past it
pub fn parse_expression(tokens: &mut TokenStream) -> BasicResult<Expr> {
    read_expression(tokens, 0)
}

/// Parse an expression whose operators all bind tighter than `precedence`
pub fn parse_comparison_operand(tokens: &mut TokenStream, precedence: u8) -> BasicResult<Expr> {
    read_expression(tokens, precedence)
}

/// Interpret a token as a line number (positive, fits in 32 bits)
pub fn parse_line_number(token: &Token) -> BasicResult<LineNumber> {
    if !token.is_number() {
        return Err(BasicError::syntax(format!(
            "expected a line number, found '{}'",
            token.text
        )));
    }

    match token.text.parse::<LineNumber>() {
        Ok(0) => Err(BasicError::syntax("line number must be positive")),
        Ok(n) => Ok(n),
        Err(_) => Err(BasicError::syntax(format!(
            "line number '{}' out of range",
            token.text
        ))),
    }
}

/* ===================== Statement Builders ===================== */

fn build_let(tokens: &mut TokenStream) -> BasicResult<Stmt> {
    // LET name = expr
    let name = expect_variable_name(tokens)?;
    expect_operator(tokens, "=")?;
    let value = parse_expression(tokens)?;
    Ok(Stmt::Let { name, value })
}

fn build_if(tokens: &mut TokenStream) -> BasicResult<Stmt> {
    // IF lhs op rhs THEN n
    let lhs = parse_comparison_operand(tokens, COMPARISON_PRECEDENCE)?;

    let op_token = tokens
        .next_token()
        .ok_or_else(|| BasicError::syntax("IF is missing its comparison operator"))?;
    let op = match op_token.kind {
        TokenKind::Operator => CmpOp::from_symbol(&op_token.text),
        _ => None,
    }
    .ok_or_else(|| {
        BasicError::syntax(format!("'{}' is not a comparison operator", op_token.text))
    })?;

    let rhs = parse_comparison_operand(tokens, COMPARISON_PRECEDENCE)?;

    match tokens.next_token() {
        Some(token) if token.is_word() && token.text == "THEN" => {}
        Some(token) => {
            return Err(BasicError::syntax(format!(
                "expected THEN, found '{}'",
                token.text
            )))
        }
        None => return Err(BasicError::syntax("IF is missing THEN")),
    }

    let target = expect_line_number(tokens)?;

    Ok(Stmt::If {
        lhs,
        op,
        rhs,
        target,
    })
}

/* ===================== Expression Reader ===================== */

fn read_expression(tokens: &mut TokenStream, min_precedence: u8) -> BasicResult<Expr> {
    let mut left = read_term(tokens)?;

    while let Some(op) = peek_binary_op(tokens) {
        let precedence = op.precedence();
        if precedence <= min_precedence {
            break;
        }
        tokens.next_token();
        let right = read_expression(tokens, precedence)?;
        left = Expr::binary(op, left, right);
    }

    Ok(left)
}

fn read_term(tokens: &mut TokenStream) -> BasicResult<Expr> {
    let token = tokens
        .next_token()
        .ok_or_else(|| BasicError::syntax("expression ended early"))?;

    match token.kind {
        TokenKind::Number => {
            let v = token.text.parse::<i32>().map_err(|_| {
                BasicError::syntax(format!("integer literal '{}' out of range", token.text))
            })?;
            Ok(Expr::constant(v))
        }
        TokenKind::Word => {
            if is_keyword(&token.text) {
                return Err(BasicError::syntax(format!(
                    "keyword '{}' used as a variable",
                    token.text
                )));
            }
            Ok(Expr::variable(token.text))
        }
        TokenKind::Operator if token.text == "(" => {
            let inner = read_expression(tokens, 0)?;
            expect_operator(tokens, ")")?;
            Ok(inner)
        }
        TokenKind::Operator if token.text == "-" => {
            let operand = read_term(tokens)?;
            Ok(Expr::binary(BinaryOp::Sub, Expr::constant(0), operand))
        }
        TokenKind::Operator => Err(BasicError::syntax(format!(
            "illegal term in expression: '{}'",
            token.text
        ))),
    }
}

fn peek_binary_op(tokens: &TokenStream) -> Option<BinaryOp> {
    match tokens.peek() {
        Some(token) if token.kind == TokenKind::Operator => BinaryOp::from_symbol(&token.text),
        _ => None,
    }
}

/* ===================== Token Helpers ===================== */

fn expect_operator(tokens: &mut TokenStream, op: &str) -> BasicResult<()> {
    match tokens.next_token() {
        Some(token) if token.is_operator(op) => Ok(()),
        Some(token) => Err(BasicError::syntax(format!(
            "expected '{}', found '{}'",
            op, token.text
        ))),
        None => Err(BasicError::syntax(format!("expected '{}'", op))),
    }
}

fn expect_variable_name(tokens: &mut TokenStream) -> BasicResult<String> {
    match tokens.next_token() {
        Some(token) if token.is_word() && !is_keyword(&token.text) => Ok(token.text),
        Some(token) => Err(BasicError::syntax(format!(
            "expected a variable name, found '{}'",
            token.text
        ))),
        None => Err(BasicError::syntax("expected a variable name")),
    }
}

fn expect_line_number(tokens: &mut TokenStream) -> BasicResult<LineNumber> {
    let token = tokens
        .next_token()
        .ok_or_else(|| BasicError::syntax("missing target line number"))?;
    parse_line_number(&token)
}
