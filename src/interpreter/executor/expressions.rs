//! Expression evaluation
//!
//! Evaluation only reads the state. The one way it can fail, besides
//! division by zero, is a lookup of an unbound variable.

use super::state::EvalState;
use super::types::{BinaryOp, Expr};
use crate::interpreter::errors::{BasicError, BasicResult};

/// Evaluate an expression to an integer
///
/// Binary operands are evaluated left before right, so when both sides
/// would fail the left-hand error is the one reported.
pub fn eval_expr(expr: &Expr, state: &EvalState) -> BasicResult<i32> {
    match expr {
        Expr::Constant { v } => Ok(*v),

        Expr::Variable { name } => state.get_value(name),

        Expr::Binary { op, left, right } => {
            let l = eval_expr(left, state)?;
            let r = eval_expr(right, state)?;
            apply_binary(*op, l, r)
        }
    }
}

/// Integer arithmetic on 32-bit values
///
/// Overflow wraps. Division truncates toward zero.
pub fn apply_binary(op: BinaryOp, l: i32, r: i32) -> BasicResult<i32> {
    match op {
        BinaryOp::Add => Ok(l.wrapping_add(r)),
        BinaryOp::Sub => Ok(l.wrapping_sub(r)),
        BinaryOp::Mul => Ok(l.wrapping_mul(r)),
        BinaryOp::Div => {
            if r == 0 {
                return Err(BasicError::DivisionByZero);
            }
            Ok(l.wrapping_div(r))
        }
    }
}
