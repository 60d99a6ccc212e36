//! # Error Context
//! Render the lines around an error, with the offending token underlined.
//!
//! ```text
//!     1 | (let a 1)
//!     2 | (if a
//!       |     ^
//! ```

use crate::predicate::is_printable;
use std::fmt;

/// How many lines are shown either side of the error
const CONTEXT_LINES: usize = 3;

/// An excerpt of the source around a position, with a caret underline
#[must_use]
#[derive(Debug, Clone, Copy)]
pub struct ErrorContext<'a> {
  source: &'a str,
  line: usize,
  column: usize,
  length: usize,
}
impl<'a> ErrorContext<'a> {
  /// Create the context for a token, from its 0-based line and column
  pub fn new(source: &'a str, line: usize, column: usize, length: usize) -> Self {
    Self {
      source,
      line,
      column,
      length,
    }
  }

  /// The context for a parse error
  pub fn from_error(source: &'a str, error: &crate::ParseError) -> Self {
    Self::new(source, error.line, error.column, error.token_length())
  }
}
impl fmt::Display for ErrorContext<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let lines: Vec<&str> = self
      .source
      .split('\n')
      .map(|line| line.strip_suffix('\r').unwrap_or(line))
      .collect();

    if self.line >= lines.len() {
      return Ok(());
    }

    let first = self.line.saturating_sub(CONTEXT_LINES);
    let last = (self.line + CONTEXT_LINES).min(lines.len() - 1);

    for (number, text) in lines.iter().enumerate().take(last + 1).skip(first) {
      write!(f, "{:>5} |", number + 1)?;
      if !text.is_empty() {
        write!(f, " {text}")?;
      }
      writeln!(f)?;

      if number == self.line {
        let width = text.chars().filter(|c| is_printable(*c)).count();
        let end = (self.column + self.length).min(width).max(self.column + 1);

        writeln!(
          f,
          "      | {}{}",
          padding(text, self.column),
          "^".repeat(end - self.column)
        )?;
      }
    }

    Ok(())
  }
}

/// Whitespace up to a column, keeping the tabs of the line so the caret lines up
///
/// Tabs don't take up a column, so they are copied across as they are.
fn padding(text: &str, column: usize) -> String {
  let mut padding = String::new();
  let mut printed = 0;

  for c in text.chars() {
    if c == '\t' {
      padding.push('\t');
    } else if is_printable(c) {
      if printed == column {
        break;
      }
      padding.push(' ');
      printed += 1;
    }
  }

  padding.extend(std::iter::repeat_n(' ', column.saturating_sub(printed)));
  padding
}

/// Render the lines surrounding a token, with the token underlined
#[must_use]
pub fn render_context(source: &str, line: usize, column: usize, length: usize) -> String {
  ErrorContext::new(source, line, column, length).to_string()
}

#[cfg(test)]
mod test {
  use super::render_context;
  use indoc::indoc;

  const SOURCE: &str = indoc! {"
    (let a 1)
    (let b 2)
    (let c 3)
    (let d (+ a b c))
    (let e 5)
    (let f 6)
    (let g 7)
    (let h 8)"};

  fn lines(lines: &[&str]) -> String {
    lines.iter().map(|line| format!("{line}\n")).collect()
  }

  #[test]
  fn surrounding_lines() {
    let expected = lines(&[
      "    2 | (let b 2)",
      "    3 | (let c 3)",
      "    4 | (let d (+ a b c))",
      "    5 | (let e 5)",
      "      |  ^^^",
      "    6 | (let f 6)",
      "    7 | (let g 7)",
      "    8 | (let h 8)",
    ]);
    assert_eq!(render_context(SOURCE, 4, 1, 3), expected);
  }

  #[test]
  fn clipped_at_start() {
    let expected = lines(&[
      "    1 | (let a 1)",
      "    2 | (let b 2)",
      "      |        ^",
      "    3 | (let c 3)",
      "    4 | (let d (+ a b c))",
      "    5 | (let e 5)",
    ]);
    assert_eq!(render_context(SOURCE, 1, 7, 1), expected);
  }

  #[test]
  fn clipped_at_end() {
    let expected = lines(&[
      "    5 | (let e 5)",
      "    6 | (let f 6)",
      "    7 | (let g 7)",
      "    8 | (let h 8)",
      "      |        ^^",
    ]);
    assert_eq!(render_context(SOURCE, 7, 7, 10), expected);
  }

  #[test]
  fn caret_at_end_of_line() {
    let expected = lines(&["    1 | (let", "      |     ^", "    2 |", "    3 | x"]);
    assert_eq!(render_context("(let\n\nx", 0, 4, 1), expected);
  }

  #[test]
  fn crlf_line_endings() {
    let expected = lines(&["    1 | (a)", "    2 | (b c)", "      |     ^"]);
    assert_eq!(render_context("(a)\r\n(b c)", 1, 4, 1), expected);
  }

  #[test]
  fn tab_indented_lines() {
    let expected = lines(&["    1 | {", "    2 | \t\t(let)", "      | \t\t    ^", "    3 | }"]);
    assert_eq!(render_context("{\n\t\t(let)\n}", 1, 4, 1), expected);

    let expected = lines(&["    1 | (a\tb)", "      |   \t^"]);
    assert_eq!(render_context("(a\tb)", 0, 2, 1), expected);

    let error = crate::parse("{\n\t\t(let)\n}").unwrap_err();
    let context = crate::ErrorContext::from_error("{\n\t\t(let)\n}", &error).to_string();
    assert!(context.contains("      | \t\t    ^\n"));
  }

  #[test]
  fn line_out_of_range() {
    assert_eq!(render_context("(a)", 5, 0, 1), "");
  }
}
