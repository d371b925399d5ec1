use regex_automata::dfa::{dense, Automaton, StartKind};
use regex_automata::{Anchored, Input, MatchKind};
use thiserror::Error;
use super::{SymbolId, SymbolKind, SymbolTable};

pub use tokens::{Tokens, LexError};

pub mod tokens;

/// Longest-match scanner built from the terminal patterns of a symbol table.
#[derive(Debug)]
pub struct Lexer {
  /// anchored longest-match DFAs, in terminal registration order
  rules: Vec<(SymbolId, dense::DFA<Vec<u32>>)>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Token<'input> {
  pub kind: SymbolId,
  pub text: &'input str,
  pub start: usize,
  pub end: usize,
}

#[derive(Debug, Error)]
pub enum LexerError {
  #[error("invalid pattern for terminal `{name}`: {source}")]
  Regex {
    name: String,
    #[source]
    source: dense::BuildError,
  },
}

impl Lexer {
  pub fn new(symbols: &SymbolTable) -> Result<Self, LexerError> {
    let mut rules = vec![];

    for (id, name, kind) in symbols.iter() {
      let pattern = match kind {
        SymbolKind::Terminal { pattern } if id != SymbolId::EPSILON => pattern,
        _ => continue,
      };

      let dfa = dense::Builder::new()
        .configure(dense::Config::new()
          .match_kind(MatchKind::All)
          .start_kind(StartKind::Anchored))
        .build(pattern)
        .map_err(|source| LexerError::Regex {
          name: name.to_owned(),
          source,
        })?;
      rules.push((id, dfa));
    }

    Ok(Self { rules })
  }

  pub fn lex<'lexer, 'input>(
    &'lexer self,
    input: &'input str
  ) -> Tokens<'lexer, 'input> {
    Tokens::new(self, input)
  }

  /// The terminal with the longest non-empty match at the start of `input`.
  /// Each pattern matches as far as it can, and ties between terminals go
  /// to the one registered first.
  fn longest_match(&self, input: &str) -> Option<(SymbolId, usize)> {
    let mut best: Option<(SymbolId, usize)> = None;
    let search = Input::new(input).anchored(Anchored::Yes);

    for (id, dfa) in &self.rules {
      if let Ok(Some(m)) = dfa.try_search_fwd(&search) {
        let len = m.offset();
        if len > 0 && best.map_or(true, |(_, best_len)| len > best_len) {
          best = Some((*id, len));
        }
      }
    }

    best
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  fn kinds(symbols: &SymbolTable, input: &str) -> Vec<String> {
    let lexer = Lexer::new(symbols).unwrap();
    lexer.lex(input)
      .map(|t| match t {
        Ok(t) => format!("{} {:?}", symbols.name(t.kind), t.text),
        Err(err) => format!("error {}", err),
      })
      .collect()
  }

  #[test]
  fn lex_expr() {
    let mut symbols = SymbolTable::new();
    symbols.register_terminal("PLUS", r"\+").unwrap();
    symbols.register_terminal("NUMBER", r"\d+(\.\d*)?").unwrap();
    symbols.register_terminal("IDENT", r"[a-zA-Z][\w_]*").unwrap();

    assert_eq!(kinds(&symbols, " 3.2 +\n Foo_1 $ "), vec![
      r#"NUMBER "3.2""#,
      r#"PLUS "+""#,
      r#"IDENT "Foo_1""#,
      r#"$ "$""#,
    ]);
  }

  #[test]
  fn match_longest() {
    let mut symbols = SymbolTable::new();
    symbols.register_terminal("IN", "in").unwrap();
    symbols.register_terminal("INTEGER", "integer").unwrap();
    symbols.register_terminal("TEGE", "tege").unwrap();
    symbols.register_terminal("WORD", "[a-z]+").unwrap();

    assert_eq!(kinds(&symbols, "in integer integ"), vec![
      r#"IN "in""#,
      r#"INTEGER "integer""#,
      r#"WORD "integ""#,
    ]);
  }

  #[test]
  fn longest_alternative() {
    let mut symbols = SymbolTable::new();
    symbols.register_terminal("OP", "=|==").unwrap();
    symbols.register_terminal("NUM", r"\d+|\d+\.\d+").unwrap();

    assert_eq!(kinds(&symbols, "== = 1.5"), vec![
      r#"OP "==""#,
      r#"OP "=""#,
      r#"NUM "1.5""#,
    ]);
  }

  #[test]
  fn first_declared_wins_ties() {
    let mut symbols = SymbolTable::new();
    symbols.register_terminal("IF", "if").unwrap();
    symbols.register_terminal("ID", "[a-z]+").unwrap();

    assert_eq!(kinds(&symbols, "if iff"), vec![r#"IF "if""#, r#"ID "iff""#]);
  }

  #[test]
  fn invalid_char() {
    let mut symbols = SymbolTable::new();
    symbols.register_terminal("a", "a").unwrap();

    let lexer = Lexer::new(&symbols).unwrap();
    let tokens = lexer.lex("a ?a").collect::<Vec<_>>();

    assert_eq!(tokens, vec![
      Ok(Token { kind: symbols.id("a").unwrap(), text: "a", start: 0, end: 1 }),
      Err(LexError { char: '?', start: 2, end: 3 }),
      Ok(Token { kind: symbols.id("a").unwrap(), text: "a", start: 3, end: 4 }),
    ]);
  }

  #[test]
  fn bad_pattern() {
    let mut symbols = SymbolTable::new();
    symbols.register_terminal("LP", "(").unwrap();

    let err = Lexer::new(&symbols).unwrap_err();
    assert!(err.to_string().starts_with("invalid pattern for terminal `LP`"));
  }
}
