//! Program store - numbered source lines and their parsed statements

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::executor::types::Stmt;

/// Line number key; defines execution order
pub type LineNumber = u32;

/// One stored line: the text as typed plus its parse, if it parsed
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramLine {
    pub source: String,
    pub parsed: Option<Stmt>,
}

/// Ordered collection of program lines
///
/// Iteration is always in ascending line-number order regardless of the
/// order lines were entered. Source text and parse live in the same entry,
/// so replacing the text always discards the old parse.
#[derive(Debug, Clone, Default)]
pub struct Program {
    lines: BTreeMap<LineNumber, ProgramLine>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `text` under `number`, replacing any existing line and its parse
    pub fn add_source_line(&mut self, number: LineNumber, text: impl Into<String>) {
        let replaced = self
            .lines
            .insert(
                number,
                ProgramLine {
                    source: text.into(),
                    parsed: None,
                },
            )
            .is_some();
        debug!(line = number, replaced, "source line stored");
    }

    /// Delete a line and its parse; no-op if absent
    pub fn remove_source_line(&mut self, number: LineNumber) {
        if self.lines.remove(&number).is_some() {
            debug!(line = number, "source line removed");
        }
    }

    pub fn source_line(&self, number: LineNumber) -> Option<&str> {
        self.lines.get(&number).map(|line| line.source.as_str())
    }

    /// Attach a parsed statement to an existing line, dropping the previous one
    ///
    /// Returns false, and drops `stmt`, if no line with that number is stored.
    pub fn set_parsed_statement(&mut self, number: LineNumber, stmt: Stmt) -> bool {
        match self.lines.get_mut(&number) {
            Some(line) => {
                line.parsed = Some(stmt);
                true
            }
            None => {
                warn!(line = number, "parsed statement for a line that is not stored");
                false
            }
        }
    }

    pub fn parsed_statement(&self, number: LineNumber) -> Option<&Stmt> {
        self.lines.get(&number).and_then(|line| line.parsed.as_ref())
    }

    pub fn first_line(&self) -> Option<LineNumber> {
        self.lines.keys().next().copied()
    }

    /// The stored line after `current`
    ///
    /// Returns None at the end, and also when `current` itself is not stored:
    /// a run that jumps to a missing line ends there.
    pub fn next_line(&self, current: LineNumber) -> Option<LineNumber> {
        if !self.lines.contains_key(&current) {
            return None;
        }
        self.lines
            .range(current.saturating_add(1)..)
            .next()
            .map(|(number, _)| *number)
            .filter(|number| *number > current)
    }

    /// Every stored line in ascending order
    pub fn list_source(&self) -> impl Iterator<Item = (LineNumber, &str)> {
        self.lines
            .iter()
            .map(|(number, line)| (*number, line.source.as_str()))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::executor::types::Expr;

    fn print_stmt(v: i32) -> Stmt {
        Stmt::Print {
            value: Expr::constant(v),
        }
    }

    fn numbers(program: &Program) -> Vec<LineNumber> {
        program.list_source().map(|(n, _)| n).collect()
    }

    #[test]
    fn test_lines_are_listed_in_ascending_order() {
        let mut program = Program::new();
        program.add_source_line(30, "30 END");
        program.add_source_line(10, "10 PRINT 1");
        program.add_source_line(20, "20 PRINT 2");

        let listed: Vec<(LineNumber, &str)> = program.list_source().collect();
        assert_eq!(
            listed,
            vec![(10, "10 PRINT 1"), (20, "20 PRINT 2"), (30, "30 END")]
        );
    }

    #[test]
    fn test_mixed_add_remove_keeps_exact_set() {
        let mut program = Program::new();
        for n in [50, 5, 40, 15, 5, 25] {
            program.add_source_line(n, format!("{} REM", n));
        }
        program.remove_source_line(40);
        program.remove_source_line(99);
        program.add_source_line(1, "1 REM");

        assert_eq!(numbers(&program), vec![1, 5, 15, 25, 50]);
        assert_eq!(program.len(), 5);
    }

    #[test]
    fn test_readding_line_discards_parse() {
        let mut program = Program::new();
        program.add_source_line(10, "10 PRINT 1");
        assert!(program.set_parsed_statement(10, print_stmt(1)));
        assert_eq!(program.parsed_statement(10), Some(&print_stmt(1)));

        program.add_source_line(10, "10 PRINT 2");
        assert_eq!(program.parsed_statement(10), None);
        assert_eq!(program.source_line(10), Some("10 PRINT 2"));

        program.set_parsed_statement(10, print_stmt(2));
        assert_eq!(program.parsed_statement(10), Some(&print_stmt(2)));
    }

    #[test]
    fn test_set_parsed_replaces_previous() {
        let mut program = Program::new();
        program.add_source_line(10, "10 PRINT 1");
        program.set_parsed_statement(10, print_stmt(1));
        program.set_parsed_statement(10, print_stmt(9));
        assert_eq!(program.parsed_statement(10), Some(&print_stmt(9)));
    }

    #[test]
    fn test_set_parsed_without_line_is_dropped() {
        let mut program = Program::new();
        assert!(!program.set_parsed_statement(10, print_stmt(1)));
        assert_eq!(program.parsed_statement(10), None);
        assert!(program.is_empty());
    }

    #[test]
    fn test_remove_drops_line_and_parse() {
        let mut program = Program::new();
        program.add_source_line(10, "10 END");
        program.set_parsed_statement(10, Stmt::End);
        program.remove_source_line(10);
        assert_eq!(program.source_line(10), None);
        assert_eq!(program.parsed_statement(10), None);
    }

    #[test]
    fn test_traversal() {
        let mut program = Program::new();
        assert_eq!(program.first_line(), None);

        program.add_source_line(20, "20 END");
        program.add_source_line(10, "10 REM");
        program.add_source_line(LineNumber::MAX, "4294967295 END");

        assert_eq!(program.first_line(), Some(10));
        assert_eq!(program.next_line(10), Some(20));
        assert_eq!(program.next_line(20), Some(LineNumber::MAX));
        assert_eq!(program.next_line(LineNumber::MAX), None);
    }

    #[test]
    fn test_next_line_of_missing_line_is_none() {
        let mut program = Program::new();
        program.add_source_line(10, "10 REM");
        program.add_source_line(30, "30 REM");
        assert_eq!(program.next_line(20), None);
    }

    #[test]
    fn test_clear_twice() {
        let mut program = Program::new();
        program.add_source_line(10, "10 END");
        program.set_parsed_statement(10, Stmt::End);

        program.clear();
        assert!(program.is_empty());
        program.clear();
        assert!(program.is_empty());
        assert_eq!(program.first_line(), None);
    }
}
