//! Statement execution handlers
//!
//! `execute` dispatches on the statement variant. Each handler either
//! mutates the state, writes to the console, or returns a control transfer.

use tracing::{debug, warn};

use super::console::Console;
use super::expressions::eval_expr;
use super::state::EvalState;
use super::types::{CmpOp, Control, Expr, Stmt};
use crate::interpreter::errors::{BasicError, BasicResult};
use crate::interpreter::program::LineNumber;

/// Execute one statement
///
/// Returns the control transfer for the run loop. Errors abort the
/// statement without touching the state: every store happens after all
/// of the statement's expressions evaluated successfully.
pub fn execute(
    stmt: &Stmt,
    state: &mut EvalState,
    console: &mut dyn Console,
) -> BasicResult<Control> {
    match stmt {
        Stmt::Rem => Ok(Control::Continue),
        Stmt::Let { name, value } => execute_let(name, value, state),
        Stmt::Print { value } => execute_print(value, state, console),
        Stmt::Input { name } => execute_input(name, state, console),
        Stmt::End => Ok(Control::Halt),
        Stmt::Goto { target } => Ok(Control::JumpTo(*target)),
        Stmt::If {
            lhs,
            op,
            rhs,
            target,
        } => execute_if(lhs, *op, rhs, *target, state),
    }
}

/* ===================== Statement Handlers ===================== */

/// Execute LET
///
/// The right-hand side is fully evaluated before the target is written,
/// so `LET X = X + 1` with X unbound fails and leaves X unbound.
fn execute_let(name: &str, value: &Expr, state: &mut EvalState) -> BasicResult<Control> {
    let v = eval_expr(value, state)?;
    state.set_value(name, v);
    debug!(var = name, value = v, "assigned");
    Ok(Control::Continue)
}

fn execute_print(
    value: &Expr,
    state: &EvalState,
    console: &mut dyn Console,
) -> BasicResult<Control> {
    let v = eval_expr(value, state)?;
    console.write_line(&v.to_string())?;
    Ok(Control::Continue)
}

/// Execute INPUT
///
/// Prompts until the user types a valid integer. Bad entries are answered
/// with `INVALID NUMBER` and a fresh prompt; only end of input is fatal.
fn execute_input(
    name: &str,
    state: &mut EvalState,
    console: &mut dyn Console,
) -> BasicResult<Control> {
    loop {
        let prompt = console.input_prompt().to_string();
        console.write(&prompt)?;

        let Some(line) = console.read_line()? else {
            return Err(BasicError::InputClosed);
        };

        match parse_integer_literal(&line) {
            Ok(v) => {
                state.set_value(name, v);
                debug!(var = name, value = v, "input accepted");
                return Ok(Control::Continue);
            }
            Err(err) => {
                warn!(var = name, entry = %line, "input rejected");
                console.write_line(&err.to_string())?;
            }
        }
    }
}

fn execute_if(
    lhs: &Expr,
    op: CmpOp,
    rhs: &Expr,
    target: LineNumber,
    state: &EvalState,
) -> BasicResult<Control> {
    let l = eval_expr(lhs, state)?;
    let r = eval_expr(rhs, state)?;

    if op.holds(l, r) {
        Ok(Control::JumpTo(target))
    } else {
        Ok(Control::Continue)
    }
}

/* ===================== Helpers ===================== */

/// Parse an INPUT entry
///
/// Accepts an optional leading `+` or `-` followed by at least one ASCII
/// digit and nothing else. Values outside the 32-bit range are rejected too.
pub fn parse_integer_literal(text: &str) -> BasicResult<i32> {
    let digits = text
        .strip_prefix('-')
        .or_else(|| text.strip_prefix('+'))
        .unwrap_or(text);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(BasicError::InvalidNumber);
    }

    text.parse::<i32>().map_err(|_| BasicError::InvalidNumber)
}
