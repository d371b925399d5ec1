//! LL(1) grammar compiler and predictive parser driver.
//!
//! A session reads a grammar, builds its LL(1) table and runs the table
//! against streams of terminals:
//!
//! ```ignore
//! let grammar = ll1gen::load_grammar(text)?;
//! let table = ll1gen::build_table(&grammar)?;
//! let outcome = ll1gen::lex_and_parse(&grammar, &table, "a + b", 5)?;
//! ```

use thiserror::Error;
use grammar::{LexError, Lexer, LexerError};
use ll1::Parser;

pub use grammar::{Grammar, GrammarError, GrammarErrorKind};
pub use ll1::{Conflict, ConflictError, ParseOutcome, Rejection, Table, TokenSource};

pub mod report;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{} error(s) in grammar", .0.len())]
  Grammar(Vec<GrammarError>),
  #[error(transparent)]
  Conflict(#[from] ConflictError),
  #[error(transparent)]
  Lexer(#[from] LexerError),
  #[error(transparent)]
  Lex(#[from] LexError),
}

impl From<Vec<GrammarError>> for Error {
  fn from(errors: Vec<GrammarError>) -> Self {
    Error::Grammar(errors)
  }
}

impl From<GrammarError> for Error {
  fn from(error: GrammarError) -> Self {
    Error::Grammar(vec![error])
  }
}

impl From<ll1::Error> for Error {
  fn from(error: ll1::Error) -> Self {
    match error {
      ll1::Error::Grammar(error) => error.into(),
      ll1::Error::Conflict(error) => error.into(),
    }
  }
}

/// Reads a grammar file, collecting every declaration and rule error.
pub fn load_grammar(input: &str) -> Result<Grammar, Error> {
  Ok(grammar::build(input)?)
}

pub fn build_table(grammar: &Grammar) -> Result<Table, Error> {
  Ok(ll1::build_table(grammar)?)
}

/// Runs the predictive parser over any token source.
pub fn parse<S: TokenSource>(
  grammar: &Grammar,
  table: &Table,
  source: S,
) -> Result<ParseOutcome, S::Error> {
  ll1::parse(grammar, table, source)
}

/// Lexes `input` with the grammar's terminal patterns and parses the result,
/// keeping the last `history_len` consumed terminals.
pub fn lex_and_parse(
  grammar: &Grammar,
  table: &Table,
  input: &str,
  history_len: usize,
) -> Result<ParseOutcome, Error> {
  let lexer = Lexer::new(&grammar.symbols)?;
  let outcome = Parser::new(grammar, table, lexer.lex(input))
    .history_len(history_len)
    .parse()?;
  Ok(outcome)
}
