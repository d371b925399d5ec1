use thiserror::Error;

pub mod symbol;
pub mod grammar;
pub mod reader;
pub mod lexer;

pub use self::symbol::*;
pub use self::grammar::*;
pub use lexer::{Lexer, LexerError, LexError, Token, Tokens};
pub use reader::{build, load, parse};

pub type Map<K, V> = indexmap::IndexMap<K, V>;
pub type Set<K> = indexmap::IndexSet<K>;
pub type BiMap<K, V> = bimap::BiHashMap<K, V>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct GrammarError {
  pub kind: GrammarErrorKind,
  /// byte range of the offending declaration, when read from text.
  pub span: Option<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarErrorKind {
  #[error("symbol `{0}` is already declared")]
  DuplicateSymbol(String),
  #[error("symbol `{0}` is not declared")]
  UnknownSymbol(String),
  #[error("`{0}` is not a terminal")]
  NotTerminal(String),
  #[error("`{0}` is not a non-terminal")]
  NotNonterminal(String),
  #[error("cannot split `{text}`: `{residue}` is not a known symbol")]
  Split {
    text: String,
    residue: String,
  },
  #[error("left recursion in `{antecedent} -> {production}`")]
  LeftRecursion {
    antecedent: String,
    production: String,
  },
  #[error("missing start symbol")]
  MissingAxiom,
  #[error("start symbol `{0}` has no production")]
  AxiomWithoutProduction(String),
  #[error("{0}")]
  Syntax(String),
}

impl GrammarError {
  pub fn new(kind: GrammarErrorKind) -> Self {
    Self {
      kind,
      span: None,
    }
  }

  pub fn with_span(mut self, span: (usize, usize)) -> Self {
    self.span = Some(span);
    self
  }
}

impl From<GrammarErrorKind> for GrammarError {
  fn from(kind: GrammarErrorKind) -> Self {
    Self::new(kind)
  }
}
