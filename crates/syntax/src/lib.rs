//! # Syntax
//! Parse Ark source code into an Abstract Syntax Tree
//!
//! A recursive descent parser with ordered choice. Each form is tried in turn from
//! the same checkpoint, and the cursor backtracks to the checkpoint when a form
//! doesn't match. There is no memoization, so a form may be parsed several times.
//!
//! Once a form has matched its keyword it is committed, so a malformed form is an
//! error rather than falling through to the next alternative. The first error stops
//! the parse.

pub mod ast;
mod config;
mod context;
mod cursor;
mod error;
mod parser;
pub mod predicate;


/// Parses a source code string into a program.
///
/// # Errors
/// On the first syntax error in the source
///
/// # Examples
/// ```
/// use ark_syntax::parse;
/// let program = parse("(let x 1)").unwrap();
///
/// assert_eq!(program.node_count(), 1);
/// ```
pub fn parse(source: &str) -> Result<Program, ParseError> {
  parse_with_config(source, &Config::default())
}

/// Parses a source code string into a program, with the given settings.
///
/// # Errors
/// On the first syntax error in the source
///
/// # Examples
/// ```
/// use ark_syntax::{Config, LineTracking, parse_with_config};
///
/// let config = Config { line_tracking: LineTracking::Rescan, ..Config::default() };
/// let program = parse_with_config("(print [1 2 3])", &config).unwrap();
///
/// assert!(program.backtrack_count() > 0);
/// ```
pub fn parse_with_config(source: &str, config: &Config) -> Result<Program, ParseError> {
  parser::Parser::new(source, config)?.parse()
}

pub use ast::{Keyword, Node, NodeKind, ParseStats, Program};
pub use config::{Config, LineTracking};
pub use context::{ErrorContext, render_context};
pub use cursor::{Cursor, Position};
pub use error::{ErrorKind, ParseError};
pub use parser::Parser;
pub use predicate::Predicate;
