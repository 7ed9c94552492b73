//! Abstract Syntax Tree node types
//!
//! Every node owns its children outright, so dropping a statement releases
//! the whole tree, including on a failed parse.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::interpreter::program::LineNumber;

/// Statement AST node - one per program line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t")]
pub enum Stmt {
    /// `REM ...`
    Rem,
    /// `LET name = value`
    Let { name: String, value: Expr },
    /// `PRINT value`
    Print { value: Expr },
    /// `INPUT name`
    Input { name: String },
    /// `END`
    End,
    /// `GOTO target`
    Goto { target: LineNumber },
    /// `IF lhs op rhs THEN target`
    If {
        lhs: Expr,
        op: CmpOp,
        rhs: Expr,
        target: LineNumber,
    },
}

/// Expression AST node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t")]
pub enum Expr {
    Constant { v: i32 },
    Variable { name: String },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn constant(v: i32) -> Self {
        Expr::Constant { v }
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Expr::Variable { name: name.into() }
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(BinaryOp::Add),
            "-" => Some(BinaryOp::Sub),
            "*" => Some(BinaryOp::Mul),
            "/" => Some(BinaryOp::Div),
            _ => None,
        }
    }

    /// Binding strength; higher binds tighter
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::Add | BinaryOp::Sub => 2,
            BinaryOp::Mul | BinaryOp::Div => 3,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }
}

/// Comparison used by IF
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CmpOp {
    Eq,
    Lt,
    Gt,
}

impl CmpOp {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "=" => Some(CmpOp::Eq),
            "<" => Some(CmpOp::Lt),
            ">" => Some(CmpOp::Gt),
            _ => None,
        }
    }

    pub fn holds(self, left: i32, right: i32) -> bool {
        match self {
            CmpOp::Eq => left == right,
            CmpOp::Lt => left < right,
            CmpOp::Gt => left > right,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            CmpOp::Eq => "=",
            CmpOp::Lt => "<",
            CmpOp::Gt => ">",
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Constant { v } => write!(f, "{}", v),
            Expr::Variable { name } => write!(f, "{}", name),
            Expr::Binary { op, left, right } => {
                write!(f, "({} {} {})", left, op.symbol(), right)
            }
        }
    }
}
