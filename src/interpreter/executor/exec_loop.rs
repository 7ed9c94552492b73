//! Core execution loop (RUN)
//!
//! The driver is a small state machine over the current line number:
//! `Some(n)` means line n executes next, `None` is the terminal state.
//!
//! ## Function Organization
//! 1. run() / run_until_done() - top-level drivers (call step repeatedly)
//! 2. Driver::step() - executes one line and picks the next

use tracing::{info, trace, warn};

use super::console::Console;
use super::state::EvalState;
use super::statements::execute;
use super::types::Control;
use crate::interpreter::errors::BasicResult;
use crate::interpreter::program::{LineNumber, Program};

/* ===================== Public API ===================== */

/// Run a program from its first line until it halts or runs off the end
pub fn run(program: &Program, state: &mut EvalState, console: &mut dyn Console) -> BasicResult<()> {
    let mut driver = Driver::new(program);
    run_until_done(&mut driver, program, state, console)
}

/// Step the driver until it reaches the terminal state
///
/// On error the driver stays on the failing line, so callers can report
/// where the run stopped.
pub fn run_until_done(
    driver: &mut Driver,
    program: &Program,
    state: &mut EvalState,
    console: &mut dyn Console,
) -> BasicResult<()> {
    info!(first_line = ?driver.current_line(), lines = program.len(), "run started");

    loop {
        match driver.step(program, state, console) {
            Ok(Step::Continue) => continue,
            Ok(Step::Done) => break,
            Err(err) => {
                warn!(
                    line = ?driver.current_line(),
                    code = err.code(),
                    detail = err.detail().unwrap_or(""),
                    "run aborted"
                );
                return Err(err);
            }
        }
    }

    info!(steps = driver.steps(), "run finished");
    Ok(())
}

/* ===================== Driver ===================== */

/// Result of executing one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// More lines to go
    Continue,
    /// Terminal state reached
    Done,
}

#[derive(Debug, Clone)]
pub struct Driver {
    current: Option<LineNumber>,
    steps: u64,
}

impl Driver {
    /// Start at the program's first line, or terminal if it is empty
    pub fn new(program: &Program) -> Self {
        Self::starting_at(program.first_line())
    }

    pub fn starting_at(line: Option<LineNumber>) -> Self {
        Self {
            current: line,
            steps: 0,
        }
    }

    pub fn current_line(&self) -> Option<LineNumber> {
        self.current
    }

    pub fn is_terminal(&self) -> bool {
        self.current.is_none()
    }

    /// Number of statements executed so far
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Execute the current line and move to the next one
    ///
    /// A line with no parsed statement, or a jump target that was never
    /// stored, is skipped without side effects.
    pub fn step(
        &mut self,
        program: &Program,
        state: &mut EvalState,
        console: &mut dyn Console,
    ) -> BasicResult<Step> {
        let Some(line) = self.current else {
            return Ok(Step::Done);
        };

        let Some(stmt) = program.parsed_statement(line) else {
            trace!(line, "no statement, skipping");
            self.current = program.next_line(line);
            return Ok(self.status());
        };

        trace!(line, ?stmt, "execute");
        let control = execute(stmt, state, console)?;
        self.steps += 1;

        match control {
            Control::Continue => {
                self.current = program.next_line(line);
            }
            Control::JumpTo(target) => {
                trace!(from = line, to = target, "jump");
                self.current = Some(target);
            }
            Control::Halt => {
                trace!(line, "halt");
                self.current = None;
            }
        }

        Ok(self.status())
    }

    fn status(&self) -> Step {
        if self.current.is_some() {
            Step::Continue
        } else {
            Step::Done
        }
    }
}
