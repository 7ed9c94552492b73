//! Error taxonomy for parsing and execution
//!
//! The `Display` text of each variant is exactly what the user sees at the
//! prompt. Anything more specific (the offending token, the variable name)
//! travels in the variant fields and is only logged.

use thiserror::Error;

pub const SYNTAX_ERROR: &str = "SyntaxError";
pub const UNDEFINED_VARIABLE: &str = "UndefinedVariable";
pub const DIVISION_BY_ZERO: &str = "DivisionByZero";
pub const INVALID_NUMBER: &str = "InvalidNumber";
pub const INPUT_CLOSED: &str = "InputClosed";
pub const IO_ERROR: &str = "IoError";

#[derive(Debug, Error)]
pub enum BasicError {
    /// Malformed statement or expression
    #[error("SYNTAX ERROR")]
    Syntax { detail: String },

    /// Read of a variable that was never assigned
    #[error("VARIABLE NOT DEFINED")]
    UndefinedVariable { name: String },

    #[error("DIVIDE BY ZERO")]
    DivisionByZero,

    /// Rejected INPUT entry. Recovered inside the INPUT loop, never surfaced.
    #[error("INVALID NUMBER")]
    InvalidNumber,

    /// End of input reached while an INPUT statement was waiting for a value
    #[error("INPUT CLOSED")]
    InputClosed,

    #[error("I/O ERROR: {0}")]
    Io(#[from] std::io::Error),
}

impl BasicError {
    pub fn syntax(detail: impl Into<String>) -> Self {
        BasicError::Syntax {
            detail: detail.into(),
        }
    }

    pub fn undefined_variable(name: impl Into<String>) -> Self {
        BasicError::UndefinedVariable { name: name.into() }
    }

    /// Stable code for logs and assertions
    pub fn code(&self) -> &'static str {
        match self {
            BasicError::Syntax { .. } => SYNTAX_ERROR,
            BasicError::UndefinedVariable { .. } => UNDEFINED_VARIABLE,
            BasicError::DivisionByZero => DIVISION_BY_ZERO,
            BasicError::InvalidNumber => INVALID_NUMBER,
            BasicError::InputClosed => INPUT_CLOSED,
            BasicError::Io(_) => IO_ERROR,
        }
    }

    /// Extra context that is logged but not shown at the prompt
    pub fn detail(&self) -> Option<&str> {
        match self {
            BasicError::Syntax { detail } => Some(detail),
            BasicError::UndefinedVariable { name } => Some(name),
            _ => None,
        }
    }
}

pub type BasicResult<T> = Result<T, BasicError>;
