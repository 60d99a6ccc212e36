use super::ParseOptions;
use super::diagnostics::{CodeFrame, Message};

use ark_syntax::{Config, ParseError, Program};

use anstream::{eprint, eprintln, print, println};
use owo_colors::OwoColorize;
use std::fs;

pub enum CommandStatus {
  /// Command was successful, the source has no errors
  Success,
  /// Command ran, but the source has a syntax error
  Failure,
}

fn read_file(filename: &str) -> Result<String, ()> {
  if filename == "-" {
    return read_stdin();
  }

  match fs::read_to_string(filename) {
    Ok(file) if file.is_empty() => {
      eprintln!("{}", Message::warning(format!("Empty file `{filename}`")));
      Err(())
    }
    Ok(file) => Ok(file),
    Err(_) => {
      eprintln!("{}", Message::error(format!("File not found `{filename}`")));
      Err(())
    }
  }
}

fn read_stdin() -> Result<String, ()> {
  use std::io::{self, Read};

  let mut buffer = String::new();
  let mut stdin = io::stdin().lock();

  match stdin.read_to_string(&mut buffer) {
    Ok(_) => Ok(buffer),
    Err(_) => {
      eprintln!("{}", Message::error("Problem Reading from STDIN".into()));
      Err(())
    }
  }
}

fn display_name(filename: &str) -> &str {
  if filename == "-" { "STDIN" } else { filename }
}

fn report(source: &str, error: &ParseError) {
  eprintln!("{}", Message::from(error));
  eprint!("{}", CodeFrame::new(source, error));
}

fn parse(source: &str, config: &Config) -> Option<Program> {
  match ark_syntax::parse_with_config(source, config) {
    Ok(program) => Some(program),
    Err(error) => {
      report(source, &error);
      None
    }
  }
}

pub fn check(options: &ParseOptions) -> Result<CommandStatus, ()> {
  let source = read_file(&options.file)?;
  let Some(program) = parse(&source, &options.config()) else {
    return Ok(CommandStatus::Failure);
  };

  println!(
    "{} {}: {} forms, {} backtracks",
    "✓".green().bold(),
    display_name(&options.file),
    program.node_count(),
    program.backtrack_count()
  );

  Ok(CommandStatus::Success)
}

pub fn print_ast(options: &ParseOptions) -> Result<CommandStatus, ()> {
  let source = read_file(&options.file)?;
  let Some(program) = parse(&source, &options.config()) else {
    return Ok(CommandStatus::Failure);
  };

  println!(
    "╭─[Abstract Syntax Tree: {}]",
    display_name(&options.file)
  );
  print!("{program}");
  println!("╯");

  Ok(CommandStatus::Success)
}

pub fn print_nodes(options: &ParseOptions) -> Result<CommandStatus, ()> {
  let source = read_file(&options.file)?;
  let Some(program) = parse(&source, &options.config()) else {
    return Ok(CommandStatus::Failure);
  };

  for node in &program.nodes {
    println!("{node}");
  }

  Ok(CommandStatus::Success)
}

mod repl;
pub use repl::repl;
