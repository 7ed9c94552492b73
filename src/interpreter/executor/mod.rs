//! # Executor - statement and expression runtime
//!
//! ## Core Principles
//!
//! 1. **Explicit state**: the variable table, the program store and the
//!    console are passed in; nothing is global
//! 2. **Sum-type dispatch**: `Stmt` and `Expr` are enums, execution matches
//!    on the variant
//! 3. **Control as a value**: `execute` returns `Control` (continue, jump,
//!    halt) and only real failures travel as `Err`

pub mod console;
pub mod exec_loop;
pub mod expressions;
pub mod state;
pub mod statements;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use console::{BufferConsole, Console, StdConsole};
pub use exec_loop::{run, run_until_done, Driver, Step};
pub use expressions::eval_expr;
pub use state::EvalState;
pub use statements::{execute, parse_integer_literal};
pub use types::{BinaryOp, CmpOp, Control, Expr, Stmt};
