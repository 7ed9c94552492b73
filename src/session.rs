//! Interactive session - the line-vs-command dispatcher
//!
//! A [`Session`] owns one program store, one variable table and a console.
//! Each input line is either a numbered program line (stored, parsed and
//! cached) or an immediate command executed at once.

use std::io;

use tracing::{debug, info};

use crate::config::Config;
use crate::interpreter::errors::{BasicError, BasicResult};
use crate::interpreter::executor::{execute, run, Console, EvalState};
use crate::interpreter::lexer::TokenStream;
use crate::interpreter::parser;
use crate::interpreter::program::Program;

pub const BANNER: &str = "BASIC interpreter. Type HELP for a list of commands.";

pub const HELP_TEXT: &str = "\
Program lines:
  <n> <statement>   store a line (replaces line n)
  <n>               delete line n
Statements:
  REM <text>  LET <var> = <expr>  PRINT <expr>  INPUT <var>
  END  GOTO <n>  IF <expr> (= | < | >) <expr> THEN <n>
Commands:
  RUN  LIST  CLEAR  HELP  QUIT
  LET, PRINT and INPUT may also be typed without a line number
";

/// What the caller should do after a line was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

pub struct Session<C: Console> {
    program: Program,
    state: EvalState,
    console: C,
    config: Config,
}

impl<C: Console> Session<C> {
    pub fn new(console: C, config: Config) -> Self {
        Self {
            program: Program::new(),
            state: EvalState::new(),
            console,
            config,
        }
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn state(&self) -> &EvalState {
        &self.state
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    /// Read and handle lines until end of input or QUIT
    pub fn run_repl(&mut self) -> io::Result<()> {
        if self.config.repl.banner {
            self.console.write_line(BANNER)?;
        }

        loop {
            if !self.config.repl.prompt.is_empty() {
                let prompt = self.config.repl.prompt.clone();
                self.console.write(&prompt)?;
            }

            let Some(line) = self.console.read_line()? else {
                break;
            };

            if self.handle_line(&line)? == Outcome::Quit {
                break;
            }
        }

        info!(lines = self.program.len(), "session ended");
        Ok(())
    }

    /// Feed every line of `source` through the dispatcher
    pub fn load(&mut self, source: &str) -> io::Result<Outcome> {
        for line in source.lines() {
            if self.handle_line(line)? == Outcome::Quit {
                return Ok(Outcome::Quit);
            }
        }
        Ok(Outcome::Continue)
    }

    /// Handle one line, printing any error as a diagnostic
    ///
    /// Only a console failure is returned as an error; everything else is
    /// reported to the user and the session carries on.
    pub fn handle_line(&mut self, line: &str) -> io::Result<Outcome> {
        match self.process_line(line) {
            Ok(outcome) => Ok(outcome),
            Err(BasicError::Io(err)) => Err(err),
            Err(err) => {
                debug!(
                    code = err.code(),
                    detail = err.detail().unwrap_or(""),
                    input = line,
                    "line rejected"
                );
                self.console.write_line(&err.to_string())?;
                Ok(Outcome::Continue)
            }
        }
    }

    /// Handle one line, returning any error to the caller
    pub fn process_line(&mut self, line: &str) -> BasicResult<Outcome> {
        let mut tokens = TokenStream::tokenize(line)?;
        let Some(first) = tokens.next_token() else {
            return Ok(Outcome::Continue);
        };

        if first.is_number() {
            let number = parser::parse_line_number(&first)?;

            if !tokens.has_more_tokens() {
                self.program.remove_source_line(number);
                return Ok(Outcome::Continue);
            }

            // Stored before parsing: a line that fails to parse is still listed
            self.program.add_source_line(number, line);
            let stmt = parser::parse_statement(&mut tokens)?;
            self.program.set_parsed_statement(number, stmt);
            return Ok(Outcome::Continue);
        }

        if !first.is_word() {
            return Err(BasicError::syntax(format!(
                "expected a command, found '{}'",
                first.text
            )));
        }

        match first.text.as_str() {
            "RUN" => self.run_program()?,
            "LIST" => self.list()?,
            "CLEAR" => self.clear(),
            "QUIT" => return Ok(Outcome::Quit),
            "HELP" => self.console.write(HELP_TEXT)?,
            "LET" | "PRINT" | "INPUT" => {
                let stmt = parser::parse_keyword_statement(&first.text, &mut tokens)?;
                execute(&stmt, &mut self.state, &mut self.console)?;
            }
            other => {
                return Err(BasicError::syntax(format!(
                    "'{}' is not an immediate command",
                    other
                )))
            }
        }

        Ok(Outcome::Continue)
    }

    /// RUN: execute the stored program from its first line
    pub fn run_program(&mut self) -> BasicResult<()> {
        run(&self.program, &mut self.state, &mut self.console)
    }

    /// LIST: write every stored line in ascending order
    pub fn list(&mut self) -> BasicResult<()> {
        for (_, source) in self.program.list_source() {
            self.console.write_line(source)?;
        }
        Ok(())
    }

    /// CLEAR: drop the program and every variable
    pub fn clear(&mut self) {
        self.program.clear();
        self.state.reset();
    }
}
