//! Test helpers for executor tests
//!
//! Common utilities for building programs from source and running them

use crate::interpreter::executor::{run_until_done, BufferConsole, Driver, EvalState};
use crate::interpreter::lexer::TokenStream;
use crate::interpreter::parser;
use crate::interpreter::program::Program;
use crate::interpreter::BasicResult;

/// Build a program store from numbered source lines
///
/// Every non-blank line must start with a line number and parse cleanly.
pub fn load_program(source: &str) -> Program {
    let mut program = Program::new();
    for line in source.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let mut tokens = TokenStream::tokenize(line).expect("Tokenize failed");
        let number_token = tokens.next_token().expect("Missing line number");
        let number = parser::parse_line_number(&number_token).expect("Bad line number");
        let stmt = parser::parse_statement(&mut tokens).expect("Parse statement failed");
        program.add_source_line(number, line);
        program.set_parsed_statement(number, stmt);
    }
    program
}

/// Everything a finished (or failed) run leaves behind
pub struct RunOutcome {
    pub result: BasicResult<()>,
    pub driver: Driver,
    pub state: EvalState,
    pub console: BufferConsole,
}

impl RunOutcome {
    pub fn output(&self) -> &str {
        self.console.output()
    }
}

/// Load `source`, RUN it with scripted `input`, and capture the result
pub fn run_source(source: &str, input: &[&str]) -> RunOutcome {
    let program = load_program(source);
    let mut state = EvalState::new();
    let mut console = BufferConsole::with_input(input.iter().copied());
    let mut driver = Driver::new(&program);

    let result = run_until_done(&mut driver, &program, &mut state, &mut console);

    RunOutcome {
        result,
        driver,
        state,
        console,
    }
}
