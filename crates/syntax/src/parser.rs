use crate::{
  ast::{Keyword, Name, Node, NodeKind, ParseStats, Program},
  config::Config,
  cursor::Cursor,
  error::{ErrorKind, ParseError},
  predicate::Predicate,
};
use log::{debug, trace};
use thin_vec::{ThinVec, thin_vec};

/// The result of a grammar rule
///
/// `Ok(None)` if the rule didn't match, so another alternative can be tried.
/// An `Err` stops the whole parse.
type Production = Result<Option<Node>, ParseError>;

/// The forms which [`Parser::node`] tries, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Form {
  Binding,
  Function,
  Condition,
  Loop,
  Import,
  Block,
  Macro,
  Del,
  FunctionCall,
  List,
}
impl Form {
  const ORDER: [Self; 10] = [
    Self::Binding,
    Self::Function,
    Self::Condition,
    Self::Loop,
    Self::Import,
    Self::Block,
    Self::Macro,
    Self::Del,
    Self::FunctionCall,
    Self::List,
  ];

  fn name(self) -> &'static str {
    match self {
      Self::Binding => "binding",
      Self::Function => "function",
      Self::Condition => "condition",
      Self::Loop => "loop",
      Self::Import => "import",
      Self::Block => "block",
      Self::Macro => "macro",
      Self::Del => "del",
      Self::FunctionCall => "function call",
      Self::List => "list",
    }
  }
}

/// The values which [`Parser::atom`] tries, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Atom {
  Number,
  String,
  Field,
  Symbol,
}
impl Atom {
  const ORDER: [Self; 4] = [Self::Number, Self::String, Self::Field, Self::Symbol];
}

/// A recursive descent parser, trying each alternative in order and
/// backtracking when it doesn't match.
pub struct Parser<'source> {
  cursor: Cursor<'source>,
  config: Config,

  /// How many forms deep the parser currently is
  depth: usize,
}
impl<'source> Parser<'source> {
  /// Create a parser for the source
  ///
  /// # Errors
  /// If the source is empty
  pub fn new(source: &'source str, config: &Config) -> Result<Self, ParseError> {
    Ok(Self {
      cursor: Cursor::new(source, config.line_tracking)?,
      config: *config,
      depth: 0,
    })
  }

  /// Parse the whole source into a program
  ///
  /// # Errors
  /// On the first syntax error found
  pub fn parse(mut self) -> Result<Program, ParseError> {
    debug!("parsing {} bytes", self.cursor.source().len());

    let mut nodes = Vec::new();
    while !self.cursor.at_end() {
      self.cursor.newline_or_comment();
      if self.cursor.at_end() {
        break;
      }

      match self.node()? {
        Some(node) => nodes.push(node),
        None => return Err(self.error_with_next_token(ErrorKind::UnexpectedToken)),
      }
    }

    let stats = ParseStats {
      backtracks: self.cursor.backtrack_count(),
    };
    debug!(
      "parsed {} nodes with {} backtracks",
      nodes.len(),
      stats.backtracks
    );

    Ok(Program { nodes, stats })
  }

  /// Scan the next token, and create an error at its start
  fn error_with_next_token(&mut self, kind: ErrorKind) -> ParseError {
    let start = self.cursor.position();
    let token = self.cursor.any_until(&Predicate::Space).unwrap_or_default();

    self.cursor.error_at(start, kind, token)
  }

  /// A name which is one of the allowed keywords
  fn keyword<const N: usize>(&mut self, allowed: [Keyword; N]) -> Option<Keyword> {
    let word = self.cursor.one_of(&allowed.map(Keyword::as_str))?;
    word.parse().ok()
  }

  fn node(&mut self) -> Production {
    if self.depth >= self.config.max_depth {
      // every form starts with an opening bracket
      if !matches!(self.cursor.current(), Some('(' | '[' | '{')) {
        return Ok(None);
      }

      let kind = ErrorKind::RecursionLimit(self.config.max_depth);
      return Err(self.error_with_next_token(kind));
    }

    self.depth += 1;
    let result = self.node_alternatives();
    self.depth -= 1;

    result
  }

  fn node_alternatives(&mut self) -> Production {
    let start = self.cursor.position();

    for form in Form::ORDER {
      if let Some(node) = self.form(form)? {
        return Ok(Some(node));
      }

      trace!(
        "{} didn't match at {}:{}",
        form.name(),
        start.line() + 1,
        start.column()
      );
      self.cursor.backtrack(start);
    }

    Ok(None)
  }

  fn form(&mut self, form: Form) -> Production {
    match form {
      Form::Binding => self.wrapped(form, Self::binding),
      Form::Function => self.wrapped(form, Self::function),
      Form::Condition => self.wrapped(form, Self::condition),
      Form::Loop => self.wrapped(form, Self::loop_),
      Form::Import => self.import(),
      Form::Block => self.block(),
      Form::Macro => self.wrapped(form, Self::macro_),
      Form::Del => self.wrapped(form, Self::del),
      Form::FunctionCall => self.function_call(),
      Form::List => self.list(),
    }
  }

  /// Parse a form surrounded by brackets
  ///
  /// If the inner form doesn't match, neither does the wrapped form.
  fn wrapped(&mut self, form: Form, inner: fn(&mut Self) -> Production) -> Production {
    if !self.cursor.prefix('(') {
      return Ok(None);
    }

    let Some(node) = inner(self)? else {
      return Ok(None);
    };

    if self.cursor.suffix(')') {
      return Ok(Some(node));
    }
    self.cursor.newline_or_comment();

    let construct = match node.as_list().and_then(<[Node]>::first) {
      Some(Node::Keyword(keyword)) => keyword.as_str(),
      _ => form.name(),
    };
    Err(self.error_with_next_token(ErrorKind::MissingClosingDelimiter {
      delimiter: ')',
      construct,
    }))
  }

  fn node_or_value(&mut self) -> Production {
    if let Some(atom) = self.atom()? {
      return Ok(Some(atom));
    }

    self.node()
  }

  fn required_value(&mut self, kind: ErrorKind) -> Result<Node, ParseError> {
    match self.node_or_value()? {
      Some(node) => Ok(node),
      None => Err(self.error_with_next_token(kind)),
    }
  }

  /// Zero or more values, each followed by any whitespace or comments
  fn values_into(&mut self, children: &mut ThinVec<Node>) -> Result<(), ParseError> {
    while let Some(value) = self.node_or_value()? {
      children.push(value);
      self.cursor.newline_or_comment();
    }

    Ok(())
  }
}
// Forms
impl Parser<'_> {
  fn binding(&mut self) -> Production {
    let Some(keyword) = self.keyword([Keyword::Let, Keyword::Mut, Keyword::Set]) else {
      return Ok(None);
    };
    self.cursor.newline_or_comment();

    let Some(symbol) = self.cursor.name() else {
      return Err(self.error_with_next_token(ErrorKind::MissingSymbol(keyword)));
    };
    self.cursor.newline_or_comment();

    let value = self.required_value(ErrorKind::ExpectedValue)?;

    Ok(Some(Node::List(thin_vec![
      Node::Keyword(keyword),
      Node::symbol(symbol),
      value
    ])))
  }

  fn function(&mut self) -> Production {
    let Some(keyword) = self.keyword([Keyword::Fun]) else {
      return Ok(None);
    };
    self.cursor.newline_or_comment();

    self.cursor.expect(&Predicate::Char('('))?;
    self.cursor.newline_or_comment();

    let mut arguments = ThinVec::new();
    let mut has_captures = false;
    loop {
      if self.cursor.accept(&Predicate::Char('&')) {
        has_captures = true;

        let Some(capture) = self.cursor.name() else {
          break;
        };
        arguments.push(Node::Capture(capture.into()));
      } else {
        let start = self.cursor.position();
        let Some(symbol) = self.cursor.name() else {
          break;
        };

        if has_captures {
          self.cursor.backtrack(start);
          return Err(self.cursor.error(ErrorKind::CaptureBeforeParameter, symbol));
        }
        arguments.push(Node::symbol(symbol));
      }

      self.cursor.newline_or_comment();
    }

    self.cursor.expect(&Predicate::Char(')'))?;
    self.cursor.newline_or_comment();

    let body = self.required_value(ErrorKind::ExpectedValue)?;

    Ok(Some(Node::List(thin_vec![
      Node::Keyword(keyword),
      Node::List(arguments),
      body
    ])))
  }

  fn condition(&mut self) -> Production {
    let Some(keyword) = self.keyword([Keyword::If]) else {
      return Ok(None);
    };
    self.cursor.newline_or_comment();

    let condition = self.required_value(ErrorKind::MissingCondition(keyword))?;
    self.cursor.newline_or_comment();

    let then = self.required_value(ErrorKind::ExpectedValue)?;
    self.cursor.newline_or_comment();

    let mut children = thin_vec![Node::Keyword(keyword), condition, then];
    if let Some(otherwise) = self.node_or_value()? {
      children.push(otherwise);
    }

    Ok(Some(Node::List(children)))
  }

  fn loop_(&mut self) -> Production {
    let Some(keyword) = self.keyword([Keyword::While]) else {
      return Ok(None);
    };
    self.cursor.newline_or_comment();

    let condition = self.required_value(ErrorKind::MissingCondition(keyword))?;
    self.cursor.newline_or_comment();

    let body = self.required_value(ErrorKind::ExpectedValue)?;

    Ok(Some(Node::List(thin_vec![
      Node::Keyword(keyword),
      condition,
      body
    ])))
  }

  /// `(import a)`, `(import a.b:*)`, or `(import a.b.c :d :e)`
  fn import(&mut self) -> Production {
    if !self.cursor.prefix('(') {
      return Ok(None);
    }
    let Some(keyword) = self.keyword([Keyword::Import]) else {
      return Ok(None);
    };
    self.cursor.newline_or_comment();

    let Some(package) = self.cursor.package_name() else {
      return Err(self.error_with_next_token(ErrorKind::MissingPackageName));
    };
    let mut path = thin_vec![Node::String(package.into())];

    loop {
      if self.cursor.accept(&Predicate::Char('.')) {
        let Some(segment) = self.cursor.package_name() else {
          return Err(self.error_with_next_token(ErrorKind::MissingPackageSegment));
        };
        path.push(Node::String(segment.into()));
      } else if self.star() {
        return self.close_import(keyword, path, Node::symbol("*"));
      } else {
        break;
      }
    }

    let mut symbols = ThinVec::new();
    if self.cursor.newline_or_comment() {
      loop {
        let selector = self.cursor.position();
        if self.cursor.accept(&Predicate::Char(':')) {
          let start = self.cursor.position();
          let Some(symbol) = self.cursor.name() else {
            return Err(self.error_with_next_token(ErrorKind::MissingImportSymbol));
          };

          if symbol == "*" {
            if symbols.is_empty() {
              return self.close_import(keyword, path, Node::symbol("*"));
            }
            return Err(self.cursor.error_at(selector, ErrorKind::StarAfterSymbol, ":*"));
          }

          if let Some(name) = symbol.strip_suffix(":*") {
            self.cursor.backtrack(start);
            for _ in name.chars() {
              self.cursor.advance();
            }
            return Err(self.cursor.error(ErrorKind::StarAfterSymbol, ":*"));
          }

          symbols.push(Node::symbol(symbol));
        }

        if !self.cursor.newline_or_comment() {
          break;
        }
      }
    }

    self.close_import(keyword, path, Node::List(symbols))
  }

  /// A `:*` directly after a package path
  fn star(&mut self) -> bool {
    let start = self.cursor.position();
    if !self.cursor.accept(&Predicate::Char(':')) {
      return false;
    }
    if self.cursor.accept(&Predicate::Char('*')) {
      return true;
    }

    self.cursor.restore(start);
    false
  }

  fn close_import(&mut self, keyword: Keyword, path: ThinVec<Node>, symbols: Node) -> Production {
    self.cursor.newline_or_comment();
    self.cursor.expect(&Predicate::Char(')'))?;

    Ok(Some(Node::List(thin_vec![
      Node::Keyword(keyword),
      Node::List(path),
      symbols
    ])))
  }

  /// `(begin ...)` or `{ ... }`
  fn block(&mut self) -> Production {
    let closing = if self.cursor.prefix('(') {
      if self.keyword([Keyword::Begin]).is_none() {
        return Ok(None);
      }
      ')'
    } else if self.cursor.accept(&Predicate::Char('{')) {
      '}'
    } else {
      return Ok(None);
    };
    self.cursor.newline_or_comment();

    let mut children = thin_vec![Node::Keyword(Keyword::Begin)];
    self.values_into(&mut children)?;

    self.cursor.newline_or_comment();
    self.cursor.expect(&Predicate::Char(closing))?;

    Ok(Some(Node::List(children)))
  }

  fn macro_(&mut self) -> Production {
    let Some(keyword) = self.keyword([Keyword::Macro]) else {
      return Ok(None);
    };
    self.cursor.newline_or_comment();

    let Some(symbol) = self.cursor.name() else {
      return Err(self.error_with_next_token(ErrorKind::MissingSymbol(keyword)));
    };
    self.cursor.newline_or_comment();

    let mut children = thin_vec![Node::Keyword(keyword), Node::symbol(symbol)];

    if self.cursor.prefix('(') {
      let mut arguments = ThinVec::new();

      loop {
        if let Some(argument) = self.cursor.name() {
          arguments.push(Node::symbol(argument));
        } else if self.cursor.accept(&Predicate::Char('.')) {
          self.cursor.expect(&Predicate::Char('.'))?;
          self.cursor.expect(&Predicate::Char('.'))?;

          let Some(spread) = self.cursor.name() else {
            return Err(self.error_with_next_token(ErrorKind::MissingSpreadName));
          };
          arguments.push(Node::Spread(spread.into()));
          self.cursor.newline_or_comment();
          break;
        } else {
          break;
        }

        self.cursor.newline_or_comment();
      }

      self.cursor.expect(&Predicate::Char(')'))?;
      self.cursor.newline_or_comment();

      children.push(Node::List(arguments));
    }

    let body = self.required_value(ErrorKind::ExpectedValue)?;
    children.push(body);

    Ok(Some(Node::List(children)))
  }

  fn del(&mut self) -> Production {
    let Some(keyword) = self.keyword([Keyword::Del]) else {
      return Ok(None);
    };
    self.cursor.newline_or_comment();

    let Some(symbol) = self.cursor.name() else {
      return Err(self.error_with_next_token(ErrorKind::MissingSymbol(keyword)));
    };

    Ok(Some(Node::List(thin_vec![
      Node::Keyword(keyword),
      Node::symbol(symbol)
    ])))
  }

  fn function_call(&mut self) -> Production {
    if !self.cursor.prefix('(') {
      return Ok(None);
    }

    let callee = if let Some(atom) = self.any_atom_of(&[NodeKind::Symbol, NodeKind::Field])? {
      atom
    } else if let Some(node) = self.node()? {
      node
    } else {
      return Ok(None);
    };
    self.cursor.newline_or_comment();

    let mut children = thin_vec![callee];
    self.values_into(&mut children)?;

    self.cursor.newline_or_comment();
    self.cursor.expect(&Predicate::Char(')'))?;

    Ok(Some(Node::List(children)))
  }

  fn list(&mut self) -> Production {
    if !self.cursor.prefix('[') {
      return Ok(None);
    }

    let mut children = thin_vec![Node::symbol("list")];
    self.values_into(&mut children)?;

    self.cursor.newline_or_comment();
    self.cursor.expect(&Predicate::Char(']'))?;

    Ok(Some(Node::List(children)))
  }
}
// Atoms
impl Parser<'_> {
  fn atom(&mut self) -> Production {
    let start = self.cursor.position();

    for atom in Atom::ORDER {
      let result = match atom {
        Atom::Number => self.number()?,
        Atom::String => self.string()?,
        Atom::Field => self.field()?,
        Atom::Symbol => self.symbol(),
      };

      if result.is_some() {
        return Ok(result);
      }
      self.cursor.backtrack(start);
    }

    Ok(None)
  }

  /// An atom, only if it is one of the given kinds
  fn any_atom_of(&mut self, kinds: &[NodeKind]) -> Production {
    let start = self.cursor.position();

    match self.atom()? {
      Some(atom) if kinds.contains(&atom.kind()) => Ok(Some(atom)),
      Some(_) => {
        self.cursor.restore(start);
        Ok(None)
      }
      None => Ok(None),
    }
  }

  fn number(&mut self) -> Production {
    let start = self.cursor.position();
    if self.cursor.signed_number().is_none() {
      return Ok(None);
    }

    let integer = self.cursor.position();
    let has_fraction = self.cursor.accept(&Predicate::Char('.')) && self.cursor.number().is_some();
    if !has_fraction && self.cursor.position() != integer {
      self.cursor.restore(integer);
    }

    Ok(self.cursor.text_since(start).parse().ok().map(Node::Number))
  }

  fn string(&mut self) -> Production {
    if !self.cursor.accept(&Predicate::Char('"')) {
      return Ok(None);
    }

    let mut text = String::new();
    loop {
      match self.cursor.current() {
        None => return Err(self.cursor.error(ErrorKind::UnterminatedString, "")),
        Some('"') => break,
        Some('\\') => {
          let escape = self.cursor.position();
          self.cursor.advance();

          let resolved = match self.cursor.current() {
            None => return Err(self.cursor.error(ErrorKind::UnterminatedString, "")),
            Some('\\') => '\\',
            Some('"') => '"',
            Some('n') => '\n',
            Some('t') => '\t',
            Some('v') => '\u{0B}',
            Some('r') => '\r',
            Some('a') => '\u{07}',
            Some('b') => '\u{08}',
            Some('0') => '\0',
            Some(other) => {
              let kind = ErrorKind::InvalidEscape(other);
              return Err(self.cursor.error_at(escape, kind, format!("\\{other}")));
            }
          };
          text.push(resolved);
        }
        Some(c) => text.push(c),
      }

      self.cursor.advance();
    }
    self.cursor.advance();

    Ok(Some(Node::String(text)))
  }

  /// A chain of at least two names separated by dots, e.g. `a.b.c`
  fn field(&mut self) -> Production {
    let Some(first) = self.cursor.name() else {
      return Ok(None);
    };

    let mut chain: ThinVec<Name> = thin_vec![first.into()];
    while self.cursor.accept(&Predicate::Char('.')) {
      let Some(field) = self.cursor.name() else {
        return Err(self.error_with_next_token(ErrorKind::MissingFieldName));
      };
      chain.push(field.into());
    }

    if chain.len() < 2 {
      return Ok(None);
    }
    Ok(Some(Node::Field(chain)))
  }

  fn symbol(&mut self) -> Option<Node> {
    self.cursor.name().map(Node::symbol)
  }
}
