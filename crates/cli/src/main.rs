//! # Ark
//! A parser for Ark, a small Lisp-like language.
//!
//! Checks source files for syntax errors, and prints the parsed tree.

#![allow(clippy::print_stdout)]

mod commands;
mod diagnostics;

use ark_syntax::{Config, LineTracking};
use clap::builder::styling::{AnsiColor, Style, Styles};
use clap::{ArgAction, Args, Parser, Subcommand};
use commands::CommandStatus;
use owo_colors::*;
use std::process;

const STYLES: Styles = Styles::styled()
  .usage(Style::new().italic())
  .header(AnsiColor::BrightYellow.on_default().bold());

fn coloured_header() -> String {
  format!(
    "{} {}",
    "Ark".fg::<owo_colors::colors::css::Orange>().bold(),
    concat!("(v", env!("CARGO_PKG_VERSION"), ")").italic().dimmed()
  )
}

fn about() -> String {
  format!(
    "{}\nParse Ark programs, and inspect their syntax trees.",
    coloured_header()
  )
}

#[derive(Parser)]
#[clap(
  name = "ark",
  version,
  about = about(),
  styles = STYLES,
  disable_help_subcommand = true,
)]
struct Cli {
  #[command(subcommand)]
  command: App,

  /// Log what the parser is doing. Repeat for more detail
  #[clap(short, long, action = ArgAction::Count, global = true)]
  verbose: u8,
}

#[derive(Subcommand)]
enum App {
  /// Checks a file for syntax errors
  Check(ParseOptions),

  /// Start an interactive Read-Eval-Print Loop (REPL), printing the tree of each line
  Repl,

  /// Prints debugging information
  Print {
    #[command(subcommand)]
    command: PrintCommand,
  },
}

#[derive(Subcommand)]
enum PrintCommand {
  /// Displays the Abstract Syntax Tree
  Ast(ParseOptions),
  /// Displays each top level form on a line
  Nodes(ParseOptions),
}

#[derive(Args)]
struct ParseOptions {
  /// The file to parse. Use `-` to read from STDIN
  file: String,

  /// How deeply forms can be nested
  #[clap(long, default_value_t = Config::default().max_depth, help_heading = "Parser Config")]
  max_depth: usize,
  /// Recalculate line and column by rescanning the source on each backtrack
  #[clap(long, help_heading = "Parser Config")]
  rescan: bool,
}
impl ParseOptions {
  fn config(&self) -> Config {
    Config {
      max_depth: self.max_depth,
      line_tracking: if self.rescan {
        LineTracking::Rescan
      } else {
        LineTracking::Incremental
      },
    }
  }
}

fn main() -> process::ExitCode {
  let args = Cli::parse();
  diagnostics::init_logger(args.verbose);

  let result = match args.command {
    App::Check(options) => commands::check(&options),
    App::Repl => commands::repl(),
    App::Print { command } => match command {
      PrintCommand::Ast(options) => commands::print_ast(&options),
      PrintCommand::Nodes(options) => commands::print_nodes(&options),
    },
  };

  match result {
    Ok(CommandStatus::Success) => process::ExitCode::from(0),
    Ok(CommandStatus::Failure) => process::ExitCode::from(1),
    Err(()) => process::ExitCode::from(2),
  }
}
