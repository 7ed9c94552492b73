//! Type definitions for the executor
//!
//! - AST nodes (Stmt, Expr and their operators)
//! - Control transfer (Control)

pub mod ast;
pub mod control;

// Re-export all types for convenient access
pub use ast::{BinaryOp, CmpOp, Expr, Stmt};
pub use control::Control;
