use crate::ast::Keyword;
use std::{error, fmt};

/// The reason a parse failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
  /// The source was empty
  EmptySource,
  /// A character didn't match the required predicate
  Expected(String),
  /// A value was required, but none could be parsed
  ExpectedValue,
  /// No form could be parsed at the top level
  UnexpectedToken,
  /// A binding, macro or del was missing its symbol
  MissingSymbol(Keyword),
  /// An `if` or `while` without a condition
  MissingCondition(Keyword),
  /// An import without a package
  MissingPackageName,
  /// A `.` in a package path not followed by a name
  MissingPackageSegment,
  /// A `:` in an import not followed by a name
  MissingImportSymbol,
  /// `:*` used after symbols were selected
  StarAfterSymbol,
  /// A plain parameter after a captured one
  CaptureBeforeParameter,
  /// A `.` in a field access not followed by a name
  MissingFieldName,
  /// A `...` in a macro's arguments not followed by a name
  MissingSpreadName,
  /// A form was not closed by its delimiter
  MissingClosingDelimiter {
    /// The delimiter which was expected
    delimiter: char,
    /// The form which was left open
    construct: &'static str,
  },
  /// A string reached the end of the file
  UnterminatedString,
  /// An unknown escape in a string
  InvalidEscape(char),
  /// Forms were nested deeper than allowed
  RecursionLimit(usize),
}
impl ErrorKind {
  /// The title of the error message
  #[must_use]
  pub fn title(&self) -> &'static str {
    match self {
      Self::EmptySource => "Empty Source",
      Self::Expected(_) => "Unexpected Character",
      Self::ExpectedValue => "Expected Value",
      Self::UnexpectedToken => "Unexpected Token",
      Self::MissingSymbol(_) => "Missing Symbol",
      Self::MissingCondition(_) => "Missing Condition",
      Self::MissingPackageName => "Missing Package Name",
      Self::MissingPackageSegment => "Missing Package Name",
      Self::MissingImportSymbol => "Missing Import Symbol",
      Self::StarAfterSymbol => "Invalid Import",
      Self::CaptureBeforeParameter => "Invalid Argument List",
      Self::MissingFieldName => "Missing Field Name",
      Self::MissingSpreadName => "Missing Spread Name",
      Self::MissingClosingDelimiter { .. } => "Missing Closing Delimiter",
      Self::UnterminatedString => "Unterminated String",
      Self::InvalidEscape(_) => "Invalid Escape Sequence",
      Self::RecursionLimit(_) => "Recursion Limit",
    }
  }

  /// The body of the error message describing what has gone wrong
  #[must_use]
  pub fn message(&self) -> String {
    match self {
      Self::EmptySource => "Expected symbol, got empty string".into(),
      Self::Expected(name) => format!("Expected {name}"),
      Self::ExpectedValue => "Expected a value".into(),
      Self::UnexpectedToken => "Unexpected token, expected a form".into(),
      Self::MissingSymbol(keyword) => format!("{keyword} needs a symbol"),
      Self::MissingCondition(Keyword::While) => "While need a valid condition".into(),
      Self::MissingCondition(_) => "If need a valid condition".into(),
      Self::MissingPackageName => "Import expected a package name".into(),
      Self::MissingPackageSegment => "Package name expected after '.'".into(),
      Self::MissingImportSymbol => "Expected a valid symbol to import".into(),
      Self::StarAfterSymbol => "Star pattern can not follow a symbol to import".into(),
      Self::CaptureBeforeParameter => {
        "Captured variables should be at the end of the argument list".into()
      }
      Self::MissingFieldName => "Expected a field name: <symbol>.<field>".into(),
      Self::MissingSpreadName => "Expected a name after '...'".into(),
      Self::MissingClosingDelimiter {
        delimiter,
        construct,
      } => format!("Missing '{delimiter}' after {construct}"),
      Self::UnterminatedString => "Missing closing quote for string".into(),
      Self::InvalidEscape(c) => format!("Invalid escape sequence '\\{c}' in string"),
      Self::RecursionLimit(depth) => format!("Forms are nested deeper than {depth} levels"),
    }
  }
}

/// An error found whilst parsing, which stops the parse
///
/// Lines and columns both start from 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
  /// What went wrong
  pub kind: ErrorKind,
  /// The line of the error
  pub line: usize,
  /// The column of the error
  pub column: usize,
  /// The text found where the error occurred
  pub expected: String,
  /// The character the cursor was on, `None` at the end of the file
  pub symbol: Option<char>,
}
impl ParseError {
  /// The title of the error message
  #[must_use]
  pub fn title(&self) -> &'static str {
    self.kind.title()
  }

  /// The body of the error message describing what has gone wrong
  #[must_use]
  pub fn message(&self) -> String {
    self.kind.message()
  }

  /// The symbol the error occurred at, escaped so it is visible when printed
  #[must_use]
  pub fn escaped_symbol(&self) -> String {
    match self.symbol {
      Some('\n') => "'\\n'".into(),
      Some('\r') => "'\\r'".into(),
      Some('\t') => "'\\t'".into(),
      Some('\u{0B}') => "'\\v'".into(),
      Some(' ') => "' '".into(),
      None | Some('\0') => "EOF".into(),
      Some(c) => c.to_string(),
    }
  }

  /// The location of the error, as shown to a user
  ///
  /// The line is counted from 1, the column from 0.
  #[must_use]
  pub fn location(&self) -> String {
    format!("{} @ {}:{}", self.escaped_symbol(), self.line + 1, self.column)
  }

  /// How many characters should be highlighted for the error
  #[must_use]
  pub fn token_length(&self) -> usize {
    self.expected.chars().count().max(1)
  }
}
impl fmt::Display for ParseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.message())
  }
}
impl error::Error for ParseError {}
