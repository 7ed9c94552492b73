//! Parser tests - verify parsing and AST structure
//!
//! These tests verify that token streams become the right trees. They do
//! NOT execute anything - that's covered by the executor tests.

use super::*;
use crate::interpreter::errors::SYNTAX_ERROR;

fn tokens(line: &str) -> TokenStream {
    TokenStream::tokenize(line).expect("Should tokenize")
}

fn stmt(line: &str) -> Stmt {
    parse_statement(&mut tokens(line)).expect("Should parse")
}

fn syntax_detail(line: &str) -> String {
    match parse_statement(&mut tokens(line)) {
        Err(BasicError::Syntax { detail }) => detail,
        other => panic!("Expected syntax error for {:?}, got {:?}", line, other),
    }
}

/* ===================== Expressions ===================== */

#[test]
fn test_precedence_and_associativity() {
    let expr = parse_expression(&mut tokens("1 + 2 * 3 - 4 / 2")).unwrap();
    assert_eq!(expr.to_string(), "((1 + (2 * 3)) - (4 / 2))");

    let expr = parse_expression(&mut tokens("10 - 4 - 3")).unwrap();
    assert_eq!(expr.to_string(), "((10 - 4) - 3)");
}

#[test]
fn test_parentheses_override_precedence() {
    let expr = parse_expression(&mut tokens("(A + 1) * B")).unwrap();
    assert_eq!(
        expr,
        Expr::binary(
            BinaryOp::Mul,
            Expr::binary(BinaryOp::Add, Expr::variable("A"), Expr::constant(1)),
            Expr::variable("B"),
        )
    );
}

#[test]
fn test_unary_minus_is_subtraction_from_zero() {
    let expr = parse_expression(&mut tokens("-X")).unwrap();
    assert_eq!(
        expr,
        Expr::binary(BinaryOp::Sub, Expr::constant(0), Expr::variable("X"))
    );
}

#[test]
fn test_expression_leaves_stream_after_itself() {
    let mut stream = tokens("X + 1 THEN 40");
    parse_expression(&mut stream).unwrap();
    assert_eq!(stream.peek().map(|t| t.text.as_str()), Some("THEN"));
}

#[test]
fn test_comparison_operand_stops_at_comparison() {
    let mut stream = tokens("A * 2 < B");
    let lhs = parse_comparison_operand(&mut stream, COMPARISON_PRECEDENCE).unwrap();
    assert_eq!(lhs.to_string(), "(A * 2)");
    assert!(stream.peek().unwrap().is_operator("<"));
}

#[test]
fn test_bad_expressions() {
    for source in ["", "1 +", "(1 + 2", "* 3", "PRINT", "99999999999"] {
        let err = parse_expression(&mut tokens(source)).unwrap_err();
        assert_eq!(err.code(), SYNTAX_ERROR, "source: {:?}", source);
    }
}

/* ===================== Statements ===================== */

#[test]
fn test_parse_each_keyword() {
    assert_eq!(stmt("REM anything at all, even 1 + "), Stmt::Rem);
    assert_eq!(stmt("END"), Stmt::End);
    assert_eq!(stmt("GOTO 30"), Stmt::Goto { target: 30 });
    assert_eq!(
        stmt("INPUT N"),
        Stmt::Input {
            name: "N".to_string()
        }
    );
    assert_eq!(
        stmt("PRINT X * 2"),
        Stmt::Print {
            value: Expr::binary(BinaryOp::Mul, Expr::variable("X"), Expr::constant(2)),
        }
    );
    assert_eq!(
        stmt("LET X = X + 1"),
        Stmt::Let {
            name: "X".to_string(),
            value: Expr::binary(BinaryOp::Add, Expr::variable("X"), Expr::constant(1)),
        }
    );
}

#[test]
fn test_parse_if() {
    assert_eq!(
        stmt("IF N > 10 THEN 100"),
        Stmt::If {
            lhs: Expr::variable("N"),
            op: CmpOp::Gt,
            rhs: Expr::constant(10),
            target: 100,
        }
    );

    let Stmt::If { op, .. } = stmt("IF A + 1 = B * 2 THEN 5") else {
        panic!("Expected If");
    };
    assert_eq!(op, CmpOp::Eq);
}

#[test]
fn test_if_without_then() {
    assert_eq!(syntax_detail("IF X = 1 40"), "expected THEN, found '40'");
    assert_eq!(syntax_detail("IF X = 1"), "IF is missing THEN");
}

#[test]
fn test_if_with_bad_operator() {
    let detail = syntax_detail("IF X + 1 THEN 40");
    assert!(detail.contains("not a comparison operator"), "{}", detail);
    syntax_detail("IF X");
}

#[test]
fn test_goto_needs_numeric_target() {
    syntax_detail("GOTO");
    syntax_detail("GOTO TEN");
    syntax_detail("GOTO 0");
    syntax_detail("GOTO 99999999999");
}

#[test]
fn test_trailing_tokens_rejected() {
    syntax_detail("END 10");
    syntax_detail("PRINT 1 2");
    syntax_detail("GOTO 10 20");
    syntax_detail("INPUT A B");
}

#[test]
fn test_let_needs_target_and_equals() {
    syntax_detail("LET = 5");
    syntax_detail("LET X 5");
    syntax_detail("LET PRINT = 5");
    syntax_detail("LET X = ");
}

#[test]
fn test_unknown_keyword() {
    assert_eq!(
        syntax_detail("FOR I = 1 TO 10"),
        "unknown statement keyword 'FOR'"
    );
    syntax_detail("+ 1");
    syntax_detail("");
}

#[test]
fn test_keywords_are_case_sensitive() {
    syntax_detail("print 1");
}

#[test]
fn test_line_number_token() {
    let mut stream = tokens("120 X");
    let first = stream.next_token().unwrap();
    assert_eq!(parse_line_number(&first).unwrap(), 120);
    let second = stream.next_token().unwrap();
    assert!(parse_line_number(&second).is_err());
}
