//! Pretty-print the AST into a human readable format.
//!
//! Based upon this [blog post](https://www.georgevreilly.com/blog/2023/01/24/TreeInRust2PrintingTrees.html)

use super::{Node, Program};
use std::fmt;

impl fmt::Display for Program {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    for node in &self.nodes {
      node.pretty(f, "", false)?;
    }

    Ok(())
  }
}

const OTHER_CHILD: &str = "│  ";
const OTHER_ENTRY: &str = "├─ ";
const FINAL_CHILD: &str = "   ";
const FINAL_ENTRY: &str = "╰─ ";

impl Node {
  /// Write the node as a tree, with each child on its own line
  fn pretty(&self, f: &mut fmt::Formatter, prefix: &str, last: bool) -> fmt::Result {
    let connector = if last { FINAL_ENTRY } else { OTHER_ENTRY };

    match self {
      Self::Symbol(name) => writeln!(f, "{prefix}{connector}Symbol ({name})"),
      Self::Capture(name) => writeln!(f, "{prefix}{connector}Capture ({name})"),
      Self::Field(chain) => {
        let chain: Vec<&str> = chain.iter().map(|name| name.as_str()).collect();
        writeln!(f, "{prefix}{connector}Field ({})", chain.join("."))
      }
      Self::Keyword(keyword) => writeln!(f, "{prefix}{connector}Keyword ({keyword})"),
      Self::String(text) => writeln!(f, "{prefix}{connector}String {text:?}"),
      Self::Number(value) => writeln!(f, "{prefix}{connector}Number ({value})"),
      Self::Spread(name) => writeln!(f, "{prefix}{connector}Spread ({name})"),
      Self::Unused(_) => writeln!(f, "{prefix}{connector}Unused"),
      Self::List(children) => {
        writeln!(f, "{prefix}{connector}List")?;

        let prefix = format!("{prefix}{}", if last { FINAL_CHILD } else { OTHER_CHILD });
        if let Some((last_child, children)) = children.split_last() {
          for child in children {
            child.pretty(f, &prefix, false)?;
          }
          last_child.pretty(f, &prefix, true)?;
        }

        Ok(())
      }
    }
  }
}
