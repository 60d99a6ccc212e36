use super::{CommandStatus, parse};
use crate::diagnostics::Message;

use ark_syntax::Config;

use anstream::{eprintln, print, println};
use owo_colors::OwoColorize;

pub fn repl() -> Result<CommandStatus, ()> {
  println!("{}", crate::coloured_header());
  println!("{}", "exit using ctrl+d, or ctrl+c".dimmed());

  let Ok(mut rl) = rustyline::DefaultEditor::new() else {
    eprintln!("{}", Message::error("Could not start the REPL".into()));
    return Err(());
  };

  let config = Config::default();
  while let Ok(line) = rl.readline(">> ") {
    if line.trim().is_empty() {
      continue;
    }
    _ = rl.add_history_entry(line.as_str());

    // errors are reported by `parse`, the REPL carries on
    if let Some(program) = parse(&line, &config) {
      print!("{program}");
    }
  }

  Ok(CommandStatus::Success)
}
