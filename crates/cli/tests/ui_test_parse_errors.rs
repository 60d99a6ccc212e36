//! # UI Tests for Parse Errors
#![cfg(not(miri))]

use assert_cmd::Command;
use indoc::indoc;

fn run_stderr(file: &str) -> String {
  let output = Command::cargo_bin(env!("CARGO_PKG_NAME"))
    .unwrap()
    .args(["check", "-"])
    .write_stdin(file)
    .output()
    .unwrap();

  assert_eq!(output.status.code(), Some(1));
  assert!(output.stdout.is_empty());
  String::from_utf8(output.stderr).unwrap()
}

#[test]
fn missing_closing_bracket() {
  let output = run_stderr("(let x 1 2)");
  let expected = indoc! {"
    ✕ Error: Missing Closing Delimiter
    Missing ')' after let
    At 2 @ 1:9

        1 | (let x 1 2)
          |          ^^
  "};
  assert_eq!(output, expected);
}

#[test]
fn context_surrounds_error() {
  let output = run_stderr("(let a 1)\n(if)\n(print a)");
  let expected = indoc! {"
    ✕ Error: Missing Condition
    If need a valid condition
    At ) @ 2:3

        1 | (let a 1)
        2 | (if)
          |    ^
        3 | (print a)
  "};
  assert_eq!(output, expected);
}

#[test]
fn unterminated_string() {
  let output = run_stderr("(print \"abc");
  let expected = indoc! {r#"
    ✕ Error: Unterminated String
    Missing closing quote for string
    At EOF @ 1:11

        1 | (print "abc
          |            ^
  "#};
  assert_eq!(output, expected);
}

#[test]
fn capture_before_parameter() {
  let output = run_stderr("(let f\n  (fun (&c a) a))\n");
  let expected = indoc! {"
    ✕ Error: Invalid Argument List
    Captured variables should be at the end of the argument list
    At a @ 2:11

        1 | (let f
        2 |   (fun (&c a) a))
          |            ^
        3 |
  "};
  assert_eq!(output, expected);
}

#[test]
fn unexpected_token() {
  let output = run_stderr("(print 1)\n  x y");
  let expected = indoc! {"
    ✕ Error: Unexpected Token
    Unexpected token, expected a form
    At x @ 2:2

        1 | (print 1)
        2 |   x y
          |   ^
  "};
  assert_eq!(output, expected);
}

#[test]
fn empty_source() {
  let output = run_stderr("");
  let expected = indoc! {"
    ✕ Error: Empty Source
    Expected symbol, got empty string
    At EOF @ 1:0

        1 |
          | ^
  "};
  assert_eq!(output, expected);
}

#[test]
fn missing_file() {
  let output = Command::cargo_bin(env!("CARGO_PKG_NAME"))
    .unwrap()
    .args(["check", "missing.ark"])
    .output()
    .unwrap();

  assert_eq!(output.status.code(), Some(2));
  let output = String::from_utf8(output.stderr).unwrap();
  assert_eq!(output, "✕ Error: File not found `missing.ark`\n\n");
}

#[test]
fn recursion_limit() {
  let output = Command::cargo_bin(env!("CARGO_PKG_NAME"))
    .unwrap()
    .args(["check", "-", "--max-depth", "2"])
    .write_stdin("[[[1]]]")
    .output()
    .unwrap();

  assert_eq!(output.status.code(), Some(1));
  let output = String::from_utf8(output.stderr).unwrap();
  let expected = indoc! {"
    ✕ Error: Recursion Limit
    Forms are nested deeper than 2 levels
    At [ @ 1:2

        1 | [[[1]]]
          |   ^^^^^
  "};
  assert_eq!(output, expected);
}
