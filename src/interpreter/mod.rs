//! # Line-numbered BASIC interpreter
//!
//! Raw line text flows through the pieces in this order:
//!
//! 1. [`lexer`] splits a line into number / word / operator tokens
//! 2. [`parser`] builds a [`Stmt`] tree (owning its [`Expr`] subtrees)
//! 3. [`program`] stores the line keyed by number, with its parsed statement
//! 4. [`executor`] walks the store in line order, executing each statement
//!    against the shared [`EvalState`] and applying [`Control`] transfers

pub mod errors;
pub mod executor;
pub mod lexer;
pub mod parser;
pub mod program;

pub use errors::{BasicError, BasicResult};
pub use executor::{run, Console, Control, EvalState, Expr, Stmt};
pub use program::{LineNumber, Program};
