use ark_syntax::{ErrorContext, ParseError};
use log::{Level, LevelFilter, Log, Metadata, Record};
use owo_colors::{OwoColorize, Style};
use std::fmt;

#[derive(Debug)]
pub enum Severity {
  Error,
  Warning,
}
pub struct Message {
  pub title: String,
  pub body: String,
  pub severity: Severity,
}
impl Message {
  pub fn error(message: String) -> Self {
    Self {
      title: message,
      body: String::new(),
      severity: Severity::Error,
    }
  }
  pub fn warning(message: String) -> Self {
    Self {
      title: message,
      body: String::new(),
      severity: Severity::Warning,
    }
  }
}
impl fmt::Display for Message {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.severity {
      Severity::Error => write!(f, "{}", "✕ Error".bold().red()),
      Severity::Warning => write!(f, "{}", "⚠ Warning".bold().yellow()),
    }?;
    writeln!(f, "{} {}", ":".bold(), &self.title.bold())?;

    if !self.body.is_empty() {
      writeln!(f, "{}", &self.body)?;
    }

    Ok(())
  }
}
impl From<&ParseError> for Message {
  fn from(error: &ParseError) -> Self {
    Self {
      title: error.title().into(),
      body: format!("{}\nAt {}", error.message(), error.location()),
      severity: Severity::Error,
    }
  }
}

/// The source lines around an error, with the line numbers dimmed
pub struct CodeFrame<'a> {
  context: ErrorContext<'a>,
}
impl<'a> CodeFrame<'a> {
  pub fn new(source: &'a str, error: &ParseError) -> Self {
    Self {
      context: ErrorContext::from_error(source, error),
    }
  }
}
impl fmt::Display for CodeFrame<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for line in self.context.to_string().lines() {
      match line.split_once(" |") {
        Some((number, text)) if number.trim().is_empty() => {
          writeln!(f, "{number}{}{}", " |".dimmed(), text.red().bold())?;
        }
        Some((number, text)) => writeln!(f, "{}{text}", format!("{number} |").dimmed())?,
        None => writeln!(f, "{line}")?,
      }
    }

    Ok(())
  }
}

/// Writes log records to STDERR
struct Logger;
impl Log for Logger {
  fn enabled(&self, metadata: &Metadata) -> bool {
    metadata.level() <= log::max_level()
  }

  fn log(&self, record: &Record) {
    if !self.enabled(record.metadata()) {
      return;
    }

    let style = match record.level() {
      Level::Error => Style::new().red().bold(),
      Level::Warn => Style::new().yellow().bold(),
      Level::Info => Style::new().green(),
      Level::Debug => Style::new().blue(),
      Level::Trace => Style::new().dimmed(),
    };
    let level = format!("{:<5}", record.level());

    anstream::eprintln!("{} {}", level.style(style), record.args());
  }

  fn flush(&self) {}
}

static LOGGER: Logger = Logger;

/// Install the logger, showing debug messages at verbosity 1 and trace messages above
pub fn init_logger(verbosity: u8) {
  let level = match verbosity {
    0 => LevelFilter::Off,
    1 => LevelFilter::Debug,
    _ => LevelFilter::Trace,
  };

  if log::set_logger(&LOGGER).is_ok() {
    log::set_max_level(level);
  }
}
