//! # AST
//!
//! The definition of the Abstract Syntax Tree (AST)
//!
//! Every form is represented as a [`Node`]. Special forms are lists headed by a
//! [`Keyword`], so `(if x 1 2)` becomes `List[Keyword(if), Symbol(x), Number(1), Number(2)]`.

use std::{fmt, str};
use thin_vec::ThinVec;

mod prettyprint;

/// The text of an identifier
pub type Name = smartstring::alias::String;

/// A keyword which starts a special form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
  /// `let`, an immutable binding
  Let,
  /// `mut`, a mutable binding
  Mut,
  /// `set`, assign to an existing binding
  Set,
  /// `if`, a condition
  If,
  /// `while`, a loop
  While,
  /// `import`, import from a package
  Import,
  /// `fun`, a function
  Fun,
  /// `macro`, a macro definition
  Macro,
  /// `del`, remove a binding
  Del,
  /// `begin`, a block of forms
  Begin,
}
impl Keyword {
  /// The source text of the keyword
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Let => "let",
      Self::Mut => "mut",
      Self::Set => "set",
      Self::If => "if",
      Self::While => "while",
      Self::Import => "import",
      Self::Fun => "fun",
      Self::Macro => "macro",
      Self::Del => "del",
      Self::Begin => "begin",
    }
  }
}
impl str::FromStr for Keyword {
  type Err = ();

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "let" => Ok(Self::Let),
      "mut" => Ok(Self::Mut),
      "set" => Ok(Self::Set),
      "if" => Ok(Self::If),
      "while" => Ok(Self::While),
      "import" => Ok(Self::Import),
      "fun" => Ok(Self::Fun),
      "macro" => Ok(Self::Macro),
      "del" => Ok(Self::Del),
      "begin" => Ok(Self::Begin),
      _ => Err(()),
    }
  }
}
impl fmt::Display for Keyword {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// A node of the tree
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
  /// A name, e.g. `x`, `true`, `+`
  Symbol(Name),
  /// A captured variable in a function's arguments, e.g. `&x`
  Capture(Name),
  /// Accessing a field, e.g. `a.b.c`
  Field(ThinVec<Name>),
  /// The keyword of a special form
  Keyword(Keyword),
  /// A string literal, with escapes resolved
  String(String),
  /// A number literal
  Number(f64),
  /// A list of nodes, either a form or a list literal
  List(ThinVec<Node>),
  /// A variadic macro argument, e.g. `...args`
  Spread(Name),
  /// Reserved, never produced by the parser
  Unused(String),
}

/// The kind of a [`Node`], without its contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
  /// [`Node::Symbol`]
  Symbol,
  /// [`Node::Capture`]
  Capture,
  /// [`Node::Field`]
  Field,
  /// [`Node::Keyword`]
  Keyword,
  /// [`Node::String`]
  String,
  /// [`Node::Number`]
  Number,
  /// [`Node::List`]
  List,
  /// [`Node::Spread`]
  Spread,
  /// [`Node::Unused`]
  Unused,
}

impl Node {
  /// Create a symbol node
  pub fn symbol(name: &str) -> Self {
    Self::Symbol(name.into())
  }

  /// The kind of the node
  #[must_use]
  pub fn kind(&self) -> NodeKind {
    match self {
      Self::Symbol(_) => NodeKind::Symbol,
      Self::Capture(_) => NodeKind::Capture,
      Self::Field(_) => NodeKind::Field,
      Self::Keyword(_) => NodeKind::Keyword,
      Self::String(_) => NodeKind::String,
      Self::Number(_) => NodeKind::Number,
      Self::List(_) => NodeKind::List,
      Self::Spread(_) => NodeKind::Spread,
      Self::Unused(_) => NodeKind::Unused,
    }
  }

  /// The children of a list, or `None` for any other node
  #[must_use]
  pub fn as_list(&self) -> Option<&[Node]> {
    match self {
      Self::List(children) => Some(children),
      _ => None,
    }
  }

  /// The text of an identifier, keyword or string node
  #[must_use]
  pub fn as_str(&self) -> Option<&str> {
    match self {
      Self::Symbol(name) | Self::Capture(name) | Self::Spread(name) => Some(name.as_str()),
      Self::String(text) | Self::Unused(text) => Some(text.as_str()),
      Self::Keyword(keyword) => Some(keyword.as_str()),
      Self::Field(_) | Self::Number(_) | Self::List(_) => None,
    }
  }
}

/// Displays the node in a compact debug format, e.g. `( Keyword:let Symbol:x Number:1 )`
impl fmt::Display for Node {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Symbol(name) => write!(f, "Symbol:{name}"),
      Self::Capture(name) => write!(f, "Capture:{name}"),
      Self::Field(chain) => {
        write!(f, "Field:")?;
        for (index, name) in chain.iter().enumerate() {
          if index > 0 {
            write!(f, ".")?;
          }
          write!(f, "{name}")?;
        }
        Ok(())
      }
      Self::Keyword(keyword) => write!(f, "Keyword:{keyword}"),
      Self::String(text) => write!(f, "String:{text}"),
      Self::Number(value) => write!(f, "Number:{value}"),
      Self::List(children) => {
        write!(f, "( ")?;
        for child in children {
          write!(f, "{child} ")?;
        }
        write!(f, ")")
      }
      Self::Spread(name) => write!(f, "Spread:{name}"),
      Self::Unused(text) => write!(f, "Unused:{text}"),
    }
  }
}

/// Counters collected whilst parsing
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParseStats {
  /// How many times the parser backtracked
  pub backtracks: usize,
}

/// A parsed program, the forms at the top level of the source
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
  /// The top level forms, in source order
  pub nodes: Vec<Node>,
  /// Counters from the parse
  pub stats: ParseStats,
}
impl Program {
  /// How many forms are at the top level
  #[must_use]
  pub fn node_count(&self) -> usize {
    self.nodes.len()
  }

  /// How many times the parser backtracked
  #[must_use]
  pub fn backtrack_count(&self) -> usize {
    self.stats.backtracks
  }

  /// The program as a single list node
  pub fn into_node(self) -> Node {
    Node::List(self.nodes.into_iter().collect())
  }
}
