//! Console abstraction for PRINT, INPUT and the REPL
//!
//! - `StdConsole`: locked stdin/stdout (default)
//! - `BufferConsole`: scripted input and captured output (tests, embedding)

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Prompt written before every INPUT read unless configured otherwise
pub const DEFAULT_INPUT_PROMPT: &str = " ? ";

pub trait Console {
    /// Read one line without its terminator. `None` means end of input.
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// Write text as-is
    fn write(&mut self, text: &str) -> io::Result<()>;

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.write(text)?;
        self.write("\n")
    }

    fn input_prompt(&self) -> &str {
        DEFAULT_INPUT_PROMPT
    }
}

fn strip_terminator(mut line: String) -> String {
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    line
}

/* ===================== Stdio ===================== */

/// Console over the process's stdin and stdout
pub struct StdConsole {
    input_prompt: String,
}

impl StdConsole {
    pub fn new() -> Self {
        Self::with_input_prompt(DEFAULT_INPUT_PROMPT)
    }

    pub fn with_input_prompt(prompt: impl Into<String>) -> Self {
        Self {
            input_prompt: prompt.into(),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for StdConsole {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(strip_terminator(line)))
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(text.as_bytes())?;
        out.flush()
    }

    fn input_prompt(&self) -> &str {
        &self.input_prompt
    }
}

/* ===================== Buffer ===================== */

/// Console fed from a queue of lines, capturing everything written
#[derive(Debug, Clone)]
pub struct BufferConsole {
    input: VecDeque<String>,
    output: String,
    input_prompt: String,
}

impl BufferConsole {
    pub fn new() -> Self {
        Self {
            input: VecDeque::new(),
            output: String::new(),
            input_prompt: DEFAULT_INPUT_PROMPT.to_string(),
        }
    }

    /// Console that will answer reads with `lines`, in order
    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut console = Self::new();
        console.input.extend(lines.into_iter().map(Into::into));
        console
    }

    pub fn set_input_prompt(&mut self, prompt: impl Into<String>) {
        self.input_prompt = prompt.into();
    }

    pub fn push_input(&mut self, line: impl Into<String>) {
        self.input.push_back(line.into());
    }

    /// Everything written so far
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Return captured output and start a fresh capture
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    pub fn remaining_input(&self) -> usize {
        self.input.len()
    }
}

impl Default for BufferConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for BufferConsole {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.input.pop_front().map(strip_terminator))
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        self.output.push_str(text);
        Ok(())
    }

    fn input_prompt(&self) -> &str {
        &self.input_prompt
    }
}
