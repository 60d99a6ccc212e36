//! # Cursor
//! A backtracking cursor over the characters of the source.
//!
//! Tracks the current line and column alongside the byte offset, so errors can
//! be reported at the position they happen. All the lexical helpers consume one
//! or more characters, or nothing at all.

use crate::{
  config::LineTracking,
  error::{ErrorKind, ParseError},
  predicate::{self, MINUS, NAME, PACKAGE, Predicate},
};

/// A checkpoint in the source which the cursor can return to
///
/// Lines and columns start from 0. The column counts printable characters since
/// the last new line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
  offset: usize,
  line: usize,
  column: usize,
}
impl Position {
  /// The byte offset into the source
  #[must_use]
  pub const fn offset(self) -> usize {
    self.offset
  }

  /// The line, starting from 0
  #[must_use]
  pub const fn line(self) -> usize {
    self.line
  }

  /// The column, starting from 0
  #[must_use]
  pub const fn column(self) -> usize {
    self.column
  }

  fn step(&mut self, c: char) {
    self.offset += c.len_utf8();

    if c == '\n' {
      self.line += 1;
      self.column = 0;
    } else if predicate::is_printable(c) {
      self.column += 1;
    }
  }
}

/// Cursor over a source string
#[derive(Debug, Clone)]
pub struct Cursor<'source> {
  source: &'source str,
  position: Position,
  current: Option<char>,
  line_tracking: LineTracking,

  /// How many times the cursor has backtracked
  backtracks: usize,
}
impl<'source> Cursor<'source> {
  /// Create a cursor at the start of the source
  ///
  /// # Errors
  /// If the source is empty
  pub fn new(source: &'source str, line_tracking: LineTracking) -> Result<Self, ParseError> {
    if source.is_empty() {
      return Err(ParseError {
        kind: ErrorKind::EmptySource,
        line: 0,
        column: 0,
        expected: String::new(),
        symbol: None,
      });
    }

    Ok(Self {
      source,
      position: Position::default(),
      current: source.chars().next(),
      line_tracking,
      backtracks: 0,
    })
  }

  /// The source being parsed
  #[must_use]
  pub fn source(&self) -> &'source str {
    self.source
  }

  /// The current character, `None` at the end of the source
  #[must_use]
  pub fn current(&self) -> Option<char> {
    self.current
  }

  /// Has the whole source been consumed?
  #[must_use]
  pub fn at_end(&self) -> bool {
    self.current.is_none()
  }

  /// A checkpoint for the current position, to [`backtrack`](Self::backtrack) to later
  #[must_use]
  pub fn position(&self) -> Position {
    self.position
  }

  /// How many times has the cursor backtracked?
  #[must_use]
  pub fn backtrack_count(&self) -> usize {
    self.backtracks
  }

  /// Move past the current character
  pub fn advance(&mut self) {
    if let Some(c) = self.current {
      self.position.step(c);
      self.current = self.char_at(self.position.offset);
    }
  }

  /// Return to a previously taken checkpoint
  pub fn backtrack(&mut self, position: Position) {
    self.backtracks += 1;
    self.restore(position);
  }

  /// Return to a checkpoint after a short lookahead, which isn't counted as a backtrack
  pub(crate) fn restore(&mut self, position: Position) {
    self.position = match self.line_tracking {
      LineTracking::Incremental => position,
      LineTracking::Rescan => self.rescan(position.offset),
    };
    self.current = self.char_at(self.position.offset);
  }

  fn rescan(&self, offset: usize) -> Position {
    let mut position = Position::default();
    for c in self.source[..offset].chars() {
      position.step(c);
    }
    position
  }

  fn char_at(&self, offset: usize) -> Option<char> {
    self.source[offset..].chars().next()
  }

  /// The source text between a checkpoint and the current position
  #[must_use]
  pub fn text_since(&self, start: Position) -> &'source str {
    &self.source[start.offset..self.position.offset]
  }

  /// Consume the current character if it matches the predicate
  pub fn accept(&mut self, predicate: &Predicate) -> bool {
    match self.current {
      Some(c) if predicate.matches(c) => {
        self.advance();
        true
      }
      _ => false,
    }
  }

  /// Consume the current character, failing if it doesn't match the predicate
  ///
  /// # Errors
  /// If the current character doesn't match
  pub fn expect(&mut self, predicate: &Predicate) -> Result<(), ParseError> {
    if self.accept(predicate) {
      Ok(())
    } else {
      let found = self.current.map(String::from).unwrap_or_default();
      Err(self.error(ErrorKind::Expected(predicate.name()), found))
    }
  }

  /// An error at the current position
  #[must_use]
  pub fn error(&self, kind: ErrorKind, expected: impl Into<String>) -> ParseError {
    self.error_at(self.position, kind, expected)
  }

  /// An error at a previous position
  #[must_use]
  pub fn error_at(
    &self,
    position: Position,
    kind: ErrorKind,
    expected: impl Into<String>,
  ) -> ParseError {
    ParseError {
      kind,
      line: position.line,
      column: position.column,
      expected: expected.into(),
      symbol: self.char_at(position.offset),
    }
  }

  /// Consume one or more characters matching the predicate
  pub fn many(&mut self, predicate: &Predicate) -> Option<&'source str> {
    let start = self.position;
    if !self.accept(predicate) {
      return None;
    }
    while self.accept(predicate) {}

    Some(self.text_since(start))
  }

  /// Skip whitespace, including new lines
  pub fn space(&mut self) -> bool {
    self.many(&Predicate::Space).is_some()
  }

  /// Skip whitespace on the current line
  pub fn inline_space(&mut self) -> bool {
    self.many(&Predicate::InlineSpace).is_some()
  }

  /// Skip one or more line endings, either `\n` or `\r\n`
  pub fn end_of_line(&mut self) -> bool {
    let mut matched = false;
    loop {
      let start = self.position;
      self.accept(&Predicate::Char('\r'));

      if !self.accept(&Predicate::Char('\n')) {
        if self.position != start {
          self.restore(start);
        }
        return matched;
      }
      matched = true;
    }
  }

  /// Skip a `#` comment, up to and including the new line
  pub fn comment(&mut self) -> bool {
    if !self.accept(&Predicate::Char('#')) {
      return false;
    }

    while self.accept(&Predicate::Not(&Predicate::Char('\n'))) {}
    self.accept(&Predicate::Char('\n'));
    true
  }

  /// Skip any mix of whitespace and comments
  pub fn newline_or_comment(&mut self) -> bool {
    let mut matched = self.space();
    while !self.at_end() && self.comment() {
      self.space();
      matched = true;
    }

    matched
  }

  /// A run of digits
  pub fn number(&mut self) -> Option<&'source str> {
    self.many(&Predicate::Digit)
  }

  /// A run of digits, optionally preceded by a minus sign
  pub fn signed_number(&mut self) -> Option<&'source str> {
    let start = self.position;
    let signed = self.accept(&MINUS);

    if self.number().is_some() {
      Some(self.text_since(start))
    } else {
      if signed {
        self.restore(start);
      }
      None
    }
  }

  /// An identifier, made of alphanumeric characters and symbols
  pub fn name(&mut self) -> Option<&'source str> {
    self.many(&NAME)
  }

  /// A package name, an alphanumeric character followed by alphanumerics or underscores
  pub fn package_name(&mut self) -> Option<&'source str> {
    let start = self.position;
    if !self.accept(&Predicate::Alnum) {
      return None;
    }
    while self.accept(&PACKAGE) {}

    Some(self.text_since(start))
  }

  /// Every character up to the delimiter
  pub fn any_until(&mut self, delimiter: &Predicate) -> Option<&'source str> {
    self.many(&Predicate::Not(delimiter))
  }

  /// A name which is one of the given words
  ///
  /// If a name is parsed but isn't one of the words, it is still consumed.
  pub fn one_of(&mut self, words: &[&str]) -> Option<&'source str> {
    let word = self.name()?;
    words.contains(&word).then_some(word)
  }

  /// An opening delimiter, followed by any whitespace and comments
  pub fn prefix(&mut self, delimiter: char) -> bool {
    if self.accept(&Predicate::Char(delimiter)) {
      self.newline_or_comment();
      true
    } else {
      false
    }
  }

  /// Any whitespace and comments, followed by a closing delimiter
  ///
  /// Without the delimiter, nothing is consumed.
  pub fn suffix(&mut self, delimiter: char) -> bool {
    let start = self.position;
    self.newline_or_comment();

    if self.accept(&Predicate::Char(delimiter)) {
      return true;
    }
    if self.position != start {
      self.restore(start);
    }
    false
  }
}

#[cfg(test)]
mod test {
  use super::*;

  fn cursor(source: &str) -> Cursor<'_> {
    Cursor::new(source, LineTracking::Incremental).unwrap()
  }

  #[test]
  fn empty_source_is_an_error() {
    let error = Cursor::new("", LineTracking::Incremental).unwrap_err();
    assert_eq!(error.kind, ErrorKind::EmptySource);
    assert_eq!(error.message(), "Expected symbol, got empty string");
  }

  #[test]
  fn advance_over_multibyte_characters() {
    let mut cursor = cursor("é🤗a");
    assert_eq!(cursor.current(), Some('é'));

    cursor.advance();
    assert_eq!(cursor.current(), Some('🤗'));
    assert_eq!(cursor.position().offset(), 2);
    assert_eq!(cursor.position().column(), 1);

    cursor.advance();
    assert_eq!(cursor.current(), Some('a'));
    assert_eq!(cursor.position().offset(), 6);
    assert_eq!(cursor.position().column(), 2);

    cursor.advance();
    assert!(cursor.at_end());
    cursor.advance();
    assert!(cursor.at_end());
  }

  #[test]
  fn tracks_lines_and_columns() {
    let mut cursor = cursor("ab\n\tc\nd");
    for _ in 0..3 {
      cursor.advance();
    }
    assert_eq!((cursor.position().line(), cursor.position().column()), (1, 0));

    // tabs are not printable, so take no column
    cursor.advance();
    assert_eq!((cursor.position().line(), cursor.position().column()), (1, 0));
    cursor.advance();
    assert_eq!((cursor.position().line(), cursor.position().column()), (1, 1));
    cursor.advance();
    assert_eq!((cursor.position().line(), cursor.position().column()), (2, 0));
  }

  #[test]
  fn backtrack_restores_checkpoint() {
    for tracking in [LineTracking::Incremental, LineTracking::Rescan] {
      let mut cursor = Cursor::new("(let x\n  ünï 1)", tracking).unwrap();
      cursor.advance();
      let checkpoint = cursor.position();

      while !cursor.at_end() {
        cursor.advance();
      }
      cursor.backtrack(checkpoint);

      assert_eq!(cursor.position(), checkpoint);
      assert_eq!(cursor.current(), Some('l'));
      assert_eq!(cursor.backtrack_count(), 1);

      for _ in 0..10 {
        cursor.advance();
      }
      let checkpoint = cursor.position();
      assert_eq!(cursor.current(), Some('ï'));
      cursor.advance();
      cursor.backtrack(checkpoint);
      assert_eq!(cursor.position(), checkpoint);
      assert_eq!((checkpoint.line(), checkpoint.column()), (1, 4));
      assert_eq!(cursor.backtrack_count(), 2);
    }
  }

  #[test]
  fn accept_and_expect() {
    let mut cursor = cursor("(a");
    assert!(!cursor.accept(&Predicate::Digit));
    assert_eq!(cursor.position().offset(), 0);
    assert!(cursor.accept(&Predicate::Char('(')));
    assert!(cursor.expect(&Predicate::Alpha).is_ok());

    let error = cursor.expect(&Predicate::Char(')')).unwrap_err();
    assert_eq!(error.message(), "Expected ')'");
    assert_eq!(error.symbol, None);
    assert_eq!((error.line, error.column), (0, 2));
  }

  #[test]
  fn failed_helpers_consume_nothing() {
    let mut cursor = cursor("-x");
    assert_eq!(cursor.signed_number(), None);
    assert_eq!(cursor.position().offset(), 0);
    assert_eq!(cursor.number(), None);
    assert_eq!(cursor.package_name(), None);
    assert!(!cursor.space());
    assert!(!cursor.comment());
    assert!(!cursor.end_of_line());
    assert!(!cursor.prefix('('));
    assert_eq!(cursor.position().offset(), 0);
  }

  #[test]
  fn numbers() {
    let mut cursor = cursor("-42 17x");
    assert_eq!(cursor.signed_number(), Some("-42"));
    assert!(cursor.space());
    assert_eq!(cursor.signed_number(), Some("17"));
    assert_eq!(cursor.current(), Some('x'));
  }

  #[test]
  fn names() {
    let mut cursor = cursor("set-x! foo_bar2.baz");
    assert_eq!(cursor.name(), Some("set-x!"));
    cursor.space();
    assert_eq!(cursor.package_name(), Some("foo_bar2"));
    assert!(cursor.accept(&Predicate::Char('.')));
    assert_eq!(cursor.name(), Some("baz"));
  }

  #[test]
  fn one_of_words() {
    let mut cursor = cursor("let letter");
    assert_eq!(cursor.one_of(&["let", "mut"]), Some("let"));
    cursor.space();
    assert_eq!(cursor.one_of(&["let", "mut"]), None);
    assert!(cursor.at_end());
  }

  #[test]
  fn comments_and_space() {
    let mut cursor = cursor("  # a comment\n\n# another\r\n  x");
    assert!(cursor.newline_or_comment());
    assert_eq!(cursor.current(), Some('x'));
    assert_eq!(cursor.position().line(), 3);
    assert!(!cursor.newline_or_comment());
  }

  #[test]
  fn line_endings() {
    let mut cursor = cursor("\r\n\n\r\nx\r");
    assert!(cursor.end_of_line());
    assert_eq!(cursor.current(), Some('x'));
    cursor.advance();
    assert!(!cursor.end_of_line());
    assert_eq!(cursor.current(), Some('\r'));
  }

  #[test]
  fn any_until_delimiter() {
    let mut cursor = cursor("abc def");
    assert_eq!(cursor.any_until(&Predicate::Space), Some("abc"));
    assert_eq!(cursor.any_until(&Predicate::Space), None);
  }

  #[test]
  fn prefix_and_suffix() {
    let mut cursor = cursor("( # open\n x \n )");
    assert!(cursor.prefix('('));
    assert_eq!(cursor.current(), Some('x'));
    cursor.advance();
    assert!(cursor.suffix(')'));
    assert!(cursor.at_end());
  }

  #[test]
  fn suffix_without_delimiter_consumes_nothing() {
    let mut cursor = cursor("  # note\n x)");
    assert!(!cursor.suffix(')'));
    assert_eq!(cursor.position(), Position::default());
    assert_eq!(cursor.current(), Some(' '));

    let mut name = Cursor::new("x", LineTracking::Rescan).unwrap();
    assert!(!name.suffix(')'));
    assert_eq!(name.current(), Some('x'));
  }

  #[test]
  fn inline_space() {
    let mut cursor = cursor(" \t \nx");
    assert!(cursor.inline_space());
    assert_eq!(cursor.current(), Some('\n'));
    assert_eq!(cursor.position().offset(), 3);
    assert!(!cursor.inline_space());
    assert_eq!(cursor.position().offset(), 3);

    let mut crlf = Cursor::new("\t\r\n", LineTracking::Incremental).unwrap();
    assert!(crlf.inline_space());
    assert_eq!(crlf.current(), Some('\r'));

    let mut newline = Cursor::new("\nx", LineTracking::Incremental).unwrap();
    assert!(!newline.inline_space());
    assert_eq!(newline.position().offset(), 0);
  }

  #[test]
  fn lookaheads_are_not_backtracks() {
    let mut cursor = cursor("-x\r");
    assert_eq!(cursor.signed_number(), None);
    assert_eq!(cursor.position().offset(), 0);
    assert!(!cursor.suffix('x'));

    cursor.advance();
    cursor.advance();
    assert!(!cursor.end_of_line());
    assert_eq!(cursor.current(), Some('\r'));

    let mut spaced = Cursor::new("  y", LineTracking::Rescan).unwrap();
    assert!(!spaced.suffix(')'));
    assert_eq!(spaced.position().offset(), 0);

    assert_eq!(cursor.backtrack_count(), 0);
    assert_eq!(spaced.backtrack_count(), 0);
  }
}
