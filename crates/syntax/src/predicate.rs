//! # Predicates
//! Tests over a single character, used as the rules of the cursor.
//!
//! Each predicate has a display name, so an unmatched expectation can be
//! reported as `Expected digit` or `Expected ')'`.

use std::fmt;

/// A test over a single character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate<'a> {
  /// Any whitespace, including new lines
  Space,
  /// Whitespace which doesn't end a line
  InlineSpace,
  /// An ASCII digit `0-9`
  Digit,
  /// An uppercase letter
  Upper,
  /// A lowercase letter
  Lower,
  /// An alphabetic character
  Alpha,
  /// An alphabetic or numeric character
  Alnum,
  /// A character which isn't a control character
  Print,
  /// Punctuation allowed within names, e.g. `+`, `?`, `:`
  Symbol,
  /// Exactly the given character
  Char(char),
  /// Matches every character
  Any,
  /// Matches when the inner predicate doesn't
  Not(&'a Predicate<'a>),
  /// Matches when either of the inner predicates does
  Either(&'a Predicate<'a>, &'a Predicate<'a>),
}

/// The sign of a negative number
pub const MINUS: Predicate<'static> = Predicate::Char('-');

/// Characters which can make up a name
pub const NAME: Predicate<'static> = Predicate::Either(&Predicate::Alnum, &Predicate::Symbol);

/// Characters which can continue a package name
pub const PACKAGE: Predicate<'static> = Predicate::Either(&Predicate::Alnum, &Predicate::Char('_'));

const SYMBOLS: &str = ":!?@_-+*/|=<>%$";

impl Predicate<'_> {
  /// Does the character satisfy the predicate?
  #[must_use]
  pub fn matches(&self, c: char) -> bool {
    match self {
      Self::Space => c.is_whitespace(),
      Self::InlineSpace => c.is_whitespace() && c != '\n' && c != '\r',
      Self::Digit => c.is_ascii_digit(),
      Self::Upper => c.is_uppercase(),
      Self::Lower => c.is_lowercase(),
      Self::Alpha => c.is_alphabetic(),
      Self::Alnum => c.is_alphanumeric(),
      Self::Print => is_printable(c),
      Self::Symbol => SYMBOLS.contains(c),
      Self::Char(expected) => *expected == c,
      Self::Any => true,
      Self::Not(inner) => !inner.matches(c),
      Self::Either(a, b) => a.matches(c) || b.matches(c),
    }
  }

  /// The human readable name of the predicate
  #[must_use]
  pub fn name(&self) -> String {
    self.to_string()
  }
}

impl fmt::Display for Predicate<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Space => write!(f, "space"),
      Self::InlineSpace => write!(f, "inline space"),
      Self::Digit => write!(f, "digit"),
      Self::Upper => write!(f, "uppercase"),
      Self::Lower => write!(f, "lowercase"),
      Self::Alpha => write!(f, "alphabetic"),
      Self::Alnum => write!(f, "alphanumeric"),
      Self::Print => write!(f, "printable"),
      Self::Symbol => write!(f, "sym"),
      Self::Char(c) => write!(f, "'{c}'"),
      Self::Any => write!(f, "any"),
      Self::Not(inner) => write!(f, "~{inner}"),
      Self::Either(a, b) => write!(f, "({a} | {b})"),
    }
  }
}

/// Does the character take up a column when displayed?
pub(crate) fn is_printable(c: char) -> bool {
  !c.is_control()
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn spaces() {
    assert!(Predicate::Space.matches(' '));
    assert!(Predicate::Space.matches('\n'));
    assert!(Predicate::InlineSpace.matches('\t'));
    assert!(!Predicate::InlineSpace.matches('\n'));
    assert!(!Predicate::InlineSpace.matches('\r'));
  }

  #[test]
  fn character_classes() {
    assert!(Predicate::Digit.matches('7'));
    assert!(!Predicate::Digit.matches('a'));
    assert!(Predicate::Upper.matches('Q'));
    assert!(Predicate::Lower.matches('q'));
    assert!(Predicate::Alpha.matches('é'));
    assert!(Predicate::Alnum.matches('3'));
    assert!(Predicate::Print.matches('}'));
    assert!(!Predicate::Print.matches('\t'));
    assert!(Predicate::Any.matches('\0'));
  }

  #[test]
  fn names_are_composable() {
    assert_eq!(Predicate::Char('(').name(), "'('");
    assert_eq!(Predicate::Not(&Predicate::Digit).name(), "~digit");
    assert_eq!(NAME.name(), "(alphanumeric | sym)");
    assert_eq!(
      Predicate::Not(&Predicate::Either(&Predicate::Space, &MINUS)).name(),
      "~(space | '-')"
    );
  }

  #[test]
  fn composites() {
    assert!(NAME.matches('+'));
    assert!(NAME.matches('x'));
    assert!(!NAME.matches('.'));
    assert!(!NAME.matches('('));
    assert!(PACKAGE.matches('_'));
    assert!(!PACKAGE.matches('-'));
    assert!(Predicate::Not(&Predicate::Char('"')).matches('a'));
    assert!(!Predicate::Not(&Predicate::Char('"')).matches('"'));
  }
}
