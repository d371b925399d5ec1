use grammar::{Grammar, GrammarError, LexError};
use itertools::Itertools;
use ll1::{ConflictError, ParseOutcome, Rejection, Table};
use std::fmt::Write;
use std::path::Path;
use crate::Error;

/// Renders an error from loading `input` (read from `path`).
pub fn report(
  path: impl AsRef<Path>,
  input: impl AsRef<str>,
  err: &Error,
) -> String {
  match err {
    Error::Grammar(errors) => report_grammar_errors(path, input, errors),
    Error::Conflict(err) => report_conflicts(err),
    Error::Lexer(err) => format!("{}\n", err),
    Error::Lex(err) => report_lex_error(path, input, err),
  }
}

/// 1-based line and column of the byte `offset` in `input`.
fn position(input: &str, offset: usize) -> (usize, usize) {
  let prefix = input.get(..offset).unwrap_or(input);
  let line = prefix.matches('\n').count() + 1;
  let col = prefix.rsplit('\n').next().map_or(0, |last| last.chars().count()) + 1;
  (line, col)
}

pub fn report_grammar_errors(
  path: impl AsRef<Path>,
  input: impl AsRef<str>,
  errors: &[GrammarError],
) -> String {
  let path = path.as_ref();
  let input = input.as_ref();
  let mut buf = String::new();

  for err in errors {
    match err.span {
      Some((start, _)) => {
        let (line, col) = position(input, start);
        writeln!(&mut buf,
          "error at {}:{}:{}: {}",
          path.display(),
          line,
          col,
          err,
        ).unwrap();
      }
      None => {
        writeln!(&mut buf,
          "error in {}: {}", path.display(), err,
        ).unwrap();
      }
    }
  }

  buf
}

pub fn report_conflicts(err: &ConflictError) -> String {
  let mut buf = String::new();

  for conflict in &err.conflicts {
    writeln!(&mut buf,
      "conflict at TABLE[{}, {}]:\n\n  {}\n\nor:\n\n  {}\n",
      conflict.nonterminal,
      conflict.lookahead,
      conflict.prod1,
      conflict.prod2,
    ).unwrap();
  }

  writeln!(&mut buf, "{}", err).unwrap();

  buf
}

fn report_lex_error(
  path: impl AsRef<Path>,
  input: impl AsRef<str>,
  err: &LexError,
) -> String {
  let (line, col) = position(input.as_ref(), err.start);
  format!("invalid character {:?} at {}:{}:{}\n",
    err.char,
    path.as_ref().display(),
    line,
    col)
}

fn describe(rejection: &Rejection) -> String {
  match rejection {
    Rejection::Mismatch { expected, found } =>
      format!("expected {}, found {}", expected, found),
    Rejection::NoProduction { nonterminal, lookahead } =>
      format!("no production of {} starts with {}", nonterminal, lookahead),
    Rejection::TrailingInput { found } =>
      format!("unexpected {} after a complete derivation", found),
    Rejection::Cycle { nonterminal } =>
      format!("{} derives itself without consuming input", nonterminal),
    Rejection::MissingAxiom =>
      "missing start symbol".to_owned(),
  }
}

fn list(symbols: &[String]) -> String {
  if symbols.is_empty() {
    "[ ]".to_owned()
  } else {
    format!("[ {} ]", symbols.iter().join(" "))
  }
}

/// Diagnostics of a parse: why it stopped, what was left on the stack and the
/// terminals consumed last.
pub fn report_rejection(outcome: &ParseOutcome) -> String {
  let mut buf = String::new();

  if let Some(rejection) = &outcome.rejection {
    writeln!(&mut buf, "{}", describe(rejection)).unwrap();
  }
  writeln!(&mut buf,
    "Parser stack trace : {}", list(&outcome.stack),
  ).unwrap();
  writeln!(&mut buf,
    "Last {} processed symbols : {}",
    outcome.history.len(),
    list(&outcome.history),
  ).unwrap();

  buf
}

/// One line per filled cell, rows in non-terminal order.
pub fn dump_table(grammar: &Grammar, table: &Table) -> String {
  let mut buf = String::new();

  for (nt, row) in table.rows() {
    for (&terminal, &prod_ix) in row {
      writeln!(&mut buf,
        "TABLE[{}, {}] = {}",
        grammar.symbols.name(nt),
        grammar.symbols.name(terminal),
        grammar.display_production(prod_ix),
      ).unwrap();
    }
  }

  buf
}

#[cfg(test)]
mod tests {
  use super::*;
  use insta::assert_snapshot;
  use pretty_assertions::assert_eq;

  const EXPR: &str = r"terminal PLUS \+;
terminal id [a-z]+;
start with E;
;
E -> TX;
X -> PLUSTX;
X -> EPSILON;
T -> id;
;
";

  #[test]
  fn positions() {
    assert_eq!(position("ab\ncd", 0), (1, 1));
    assert_eq!(position("ab\ncd", 4), (2, 2));
    assert_eq!(position("ab\ncd", 3), (2, 1));
  }

  #[test]
  fn grammar_errors() {
    let input = "terminal a a;\nterminal a b;\nstart with S;\n;\nS -> ab;\n";
    let errors = grammar::build(input).unwrap_err();

    assert_snapshot!(report_grammar_errors("g.ll1", input, &errors), @r###"
    error at g.ll1:2:1: symbol `a` is already declared
    error at g.ll1:5:1: cannot split `ab`: `b` is not a known symbol
    "###);
  }

  #[test]
  fn conflicts() {
    let grammar = grammar::build("terminal t t;\nterminal u u;\nstart with S;\n;\nS -> tu;\nS -> t;\n")
      .unwrap();
    let err = match crate::build_table(&grammar) {
      Err(Error::Conflict(err)) => err,
      other => panic!("expected a conflict, got {:?}", other),
    };

    assert_snapshot!(report_conflicts(&err), @r###"
    conflict at TABLE[S, t]:

      S -> t u

    or:

      S -> t

    grammar is not LL(1): 1 conflicting cell(s)
    "###);
  }

  #[test]
  fn rejection() {
    let grammar = grammar::build(EXPR).unwrap();
    let table = crate::build_table(&grammar).unwrap();
    let outcome = crate::lex_and_parse(&grammar, &table, "a + $", 5).unwrap();

    assert_snapshot!(report_rejection(&outcome), @r###"
    no production of T starts with $
    Parser stack trace : [ T X ]
    Last 2 processed symbols : [ id PLUS ]
    "###);
  }

  #[test]
  fn lex_error() {
    let grammar = grammar::build(EXPR).unwrap();
    let table = crate::build_table(&grammar).unwrap();
    let input = "a +\n b ? c";
    let err = crate::lex_and_parse(&grammar, &table, input, 5).unwrap_err();

    assert_eq!(report("input.txt", input, &err), "invalid character '?' at input.txt:2:4\n");
  }

  #[test]
  fn table() {
    let grammar = grammar::build(EXPR).unwrap();
    let table = crate::build_table(&grammar).unwrap();

    assert_snapshot!(dump_table(&grammar, &table), @r###"
    TABLE[E, id] = E -> T X
    TABLE[X, PLUS] = X -> PLUS T X
    TABLE[X, $] = X -> EPSILON
    TABLE[T, id] = T -> id
    "###);
  }
}
