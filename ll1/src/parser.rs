//! Table-driven predictive parser.

use std::collections::VecDeque;
use grammar::{
  Grammar, GrammarError, GrammarErrorKind, LexError, SymbolId, SymbolTable, Tokens,
};
use crate::{Map, Table};

pub const DEFAULT_HISTORY_LEN: usize = 5;

/// Pull-based supplier of terminals.
///
/// `Ok(None)` means the input is exhausted and is read as the end-marker. A
/// source may also yield the end-marker itself, in which case it is pulled
/// once more on acceptance and anything it still yields is trailing input.
pub trait TokenSource {
  type Error;

  fn next_token(&mut self) -> Result<Option<SymbolId>, Self::Error>;
}

impl<'lexer, 'input> TokenSource for Tokens<'lexer, 'input> {
  type Error = LexError;

  fn next_token(&mut self) -> Result<Option<SymbolId>, LexError> {
    self.next()
      .transpose()
      .map(|token| token.map(|token| token.kind))
  }
}

/// Token source over terminal names, e.g. `["id", "PLUS", "id", "$"]`.
pub struct Names<'a, I> {
  symbols: &'a SymbolTable,
  iter: I,
}

impl<'a, I> Names<'a, I> {
  pub fn new<T>(symbols: &'a SymbolTable, names: T) -> Self
    where T: IntoIterator<IntoIter=I>
  {
    Names {
      symbols,
      iter: names.into_iter(),
    }
  }
}

impl<'a, I> TokenSource for Names<'a, I>
  where I: Iterator,
        I::Item: AsRef<str>,
{
  type Error = GrammarError;

  fn next_token(&mut self) -> Result<Option<SymbolId>, GrammarError> {
    let name = match self.iter.next() {
      Some(name) => name,
      None => return Ok(None),
    };
    let name = name.as_ref();
    let id = self.symbols.resolve(name)?;

    if self.symbols.is_terminal_id(id) && id != SymbolId::EPSILON {
      Ok(Some(id))
    } else {
      Err(GrammarErrorKind::NotTerminal(name.to_owned()).into())
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
  Running,
  Accepted,
  Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
  /// terminal on the stack differs from the lookahead
  Mismatch {
    expected: String,
    found: String,
  },
  /// empty table cell and no epsilon production to fall back on
  NoProduction {
    nonterminal: String,
    lookahead: String,
  },
  /// stack emptied before the input
  TrailingInput {
    found: String,
  },
  /// a non-terminal was about to derive itself without consuming input
  Cycle {
    nonterminal: String,
  },
  /// the grammar has no usable start symbol
  MissingAxiom,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutcome {
  pub accepted: bool,
  pub rejection: Option<Rejection>,
  /// remaining stack, top first
  pub stack: Vec<String>,
  /// last consumed terminals, oldest first
  pub history: Vec<String>,
}

pub struct Parser<'a, S> {
  grammar: &'a Grammar,
  table: &'a Table,
  source: S,
  state: State,
  stack: Vec<SymbolId>,
  lookahead: Option<SymbolId>,
  source_done: bool,
  history: VecDeque<SymbolId>,
  history_len: usize,
  /// non-terminals expanded since the last consumed terminal, with the stack
  /// depth beneath them when they were popped
  expanding: Map<SymbolId, usize>,
  rejection: Option<Rejection>,
}

impl<'a, S: TokenSource> Parser<'a, S> {
  /// Starts with the axiom on the stack. Without a valid axiom the parser is
  /// rejected before reading anything.
  pub fn new(grammar: &'a Grammar, table: &'a Table, source: S) -> Self {
    let (state, stack, rejection) = match grammar.axiom() {
      Ok(axiom) => (State::Running, vec![axiom], None),
      Err(_) => (State::Rejected, vec![], Some(Rejection::MissingAxiom)),
    };

    Parser {
      grammar,
      table,
      source,
      state,
      stack,
      lookahead: None,
      source_done: false,
      history: VecDeque::new(),
      history_len: DEFAULT_HISTORY_LEN,
      expanding: Map::new(),
      rejection,
    }
  }

  /// How many consumed terminals to keep for diagnostics.
  pub fn history_len(mut self, len: usize) -> Self {
    self.history_len = len;
    self
  }

  pub fn state(&self) -> State {
    self.state
  }

  pub fn rejection(&self) -> Option<&Rejection> {
    self.rejection.as_ref()
  }

  /// Remaining stack, top first.
  pub fn stack(&self) -> Vec<&'a str> {
    let grammar = self.grammar;
    self.stack.iter().rev().map(|&sym| grammar.symbols.name(sym)).collect()
  }

  /// Last consumed terminals, oldest first.
  pub fn history(&self) -> Vec<&'a str> {
    let grammar = self.grammar;
    self.history.iter().map(|&sym| grammar.symbols.name(sym)).collect()
  }

  /// Runs to completion.
  pub fn parse(mut self) -> Result<ParseOutcome, S::Error> {
    while self.step()? == State::Running {}

    Ok(ParseOutcome {
      accepted: self.state == State::Accepted,
      rejection: self.rejection.clone(),
      stack: self.stack().into_iter().map(str::to_owned).collect(),
      history: self.history().into_iter().map(str::to_owned).collect(),
    })
  }

  fn lookahead(&mut self) -> Result<SymbolId, S::Error> {
    if let Some(lookahead) = self.lookahead {
      return Ok(lookahead);
    }

    let lookahead = if self.source_done {
      SymbolId::END_MARKER
    } else {
      match self.source.next_token()? {
        Some(token) => token,
        None => {
          self.source_done = true;
          SymbolId::END_MARKER
        }
      }
    };

    self.lookahead = Some(lookahead);
    Ok(lookahead)
  }

  fn name(&self, sym: SymbolId) -> String {
    self.grammar.symbols.name(sym).to_owned()
  }

  fn reject(&mut self, rejection: Rejection) -> State {
    log::trace!("reject: {:?}", rejection);
    self.rejection = Some(rejection);
    self.state = State::Rejected;
    self.state
  }

  /// Performs one transition: pops the stack top and matches, expands, or
  /// discards it.
  pub fn step(&mut self) -> Result<State, S::Error> {
    if self.state != State::Running {
      return Ok(self.state);
    }

    let lookahead = self.lookahead()?;

    let top = match self.stack.pop() {
      Some(top) => top,
      None if lookahead == SymbolId::END_MARKER => {
        // an explicit end-marker must close the input
        if !self.source_done {
          self.source_done = true;
          if let Some(token) = self.source.next_token()? {
            let found = self.name(token);
            return Ok(self.reject(Rejection::TrailingInput { found }));
          }
        }
        log::trace!("accept");
        self.state = State::Accepted;
        return Ok(self.state);
      }
      None => {
        let found = self.name(lookahead);
        return Ok(self.reject(Rejection::TrailingInput { found }));
      }
    };

    let depth = self.stack.len();
    self.expanding.retain(|_, below| *below <= depth);

    log::trace!("pop {} lookahead {}",
      self.grammar.symbols.name(top),
      self.grammar.symbols.name(lookahead));

    if top == SymbolId::EPSILON {
      return Ok(self.state);
    }

    if self.grammar.symbols.is_terminal_id(top) {
      if top != lookahead {
        self.stack.push(top);
        let rejection = Rejection::Mismatch {
          expected: self.name(top),
          found: self.name(lookahead),
        };
        return Ok(self.reject(rejection));
      }

      self.history.push_back(lookahead);
      while self.history.len() > self.history_len {
        self.history.pop_front();
      }
      self.lookahead = None;
      self.expanding.clear();

      return Ok(self.state);
    }

    if self.expanding.contains_key(&top) {
      self.stack.push(top);
      let nonterminal = self.name(top);
      return Ok(self.reject(Rejection::Cycle { nonterminal }));
    }
    self.expanding.insert(top, depth);

    match self.table.get(top, lookahead) {
      Some(prod_ix) => {
        log::trace!("expand {}", self.grammar.display_production(prod_ix));
        self.stack.extend(self.grammar.prods[prod_ix].symbols.iter().rev());
      }
      None if self.grammar.has_empty_production(top) => {
        log::trace!("{} derives EPSILON", self.grammar.symbols.name(top));
      }
      None => {
        self.stack.push(top);
        let rejection = Rejection::NoProduction {
          nonterminal: self.name(top),
          lookahead: self.name(lookahead),
        };
        return Ok(self.reject(rejection));
      }
    }

    Ok(self.state)
  }
}

/// Parses the terminals of `source` with `table`, keeping the default history
/// length.
pub fn parse<S: TokenSource>(
  grammar: &Grammar,
  table: &Table,
  source: S,
) -> Result<ParseOutcome, S::Error> {
  Parser::new(grammar, table, source).parse()
}
