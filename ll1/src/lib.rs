use thiserror::Error;
use grammar::GrammarError;

pub mod ffn;
pub mod table;
pub mod parser;

pub use ffn::Ffn;
pub use table::{Table, build_table};
pub use parser::{Parser, ParseOutcome, Rejection, State, TokenSource, Names, parse};

pub(crate) use grammar::Map;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Grammar(#[from] GrammarError),
  #[error(transparent)]
  Conflict(#[from] ConflictError),
}

/// Every cell claimed by more than one production.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("grammar is not LL(1): {} conflicting cell(s)", .conflicts.len())]
pub struct ConflictError {
  pub conflicts: Vec<Conflict>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
  pub nonterminal: String,
  pub lookahead: String,
  /// the production already in the cell
  pub prod1: String,
  pub prod2: String,
}
