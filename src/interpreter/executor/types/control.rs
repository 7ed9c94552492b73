//! Control transfer returned by statement execution

use serde::{Deserialize, Serialize};

use crate::interpreter::program::LineNumber;

/// Outcome of executing one statement
///
/// This is how GOTO, IF and END redirect the run loop. It is an ordinary
/// return value, never an error, so nothing has to unwind to deliver it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "t", content = "v")]
pub enum Control {
    /// Fall through to the next stored line
    Continue,
    /// Resume at exactly this line number
    JumpTo(LineNumber),
    /// Stop the run
    Halt,
}
