//! Recover symbol names from an unseparated right-hand side.

use crate::{GrammarError, GrammarErrorKind, SymbolId, SymbolTable, EPSILON};

/// Splits `text` into registered symbols, taking the longest registered name
/// at every position (`A1` wins over `A` when both exist).
///
/// Both the literal `EPSILON` and the empty string split to `[EPSILON]`.
pub fn split(
  symbols: &SymbolTable,
  text: &str,
) -> Result<Vec<SymbolId>, GrammarError> {
  if text.is_empty() || text == EPSILON {
    return Ok(vec![SymbolId::EPSILON]);
  }

  let mut splitted = vec![];
  let mut start = 0;

  while start < text.len() {
    let rest = &text[start..];
    let longest = rest.char_indices()
      .map(|(i, c)| i + c.len_utf8())
      .filter_map(|end| symbols.id(&rest[..end]).map(|id| (end, id)))
      .last();

    match longest {
      Some((len, id)) => {
        splitted.push(id);
        start += len;
      }
      None => {
        return Err(GrammarErrorKind::Split {
          text: text.to_owned(),
          residue: rest.to_owned(),
        }.into());
      }
    }
  }

  Ok(splitted)
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  fn table(terminals: &[&str], nonterminals: &[&str]) -> SymbolTable {
    let mut table = SymbolTable::new();
    for t in terminals {
      table.register_terminal(*t, *t).unwrap();
    }
    for nt in nonterminals {
      table.register_nonterminal(*nt).unwrap();
    }
    table
  }

  fn names(table: &SymbolTable, ids: Vec<SymbolId>) -> Vec<&str> {
    ids.into_iter().map(|id| table.name(id)).collect()
  }

  #[test]
  fn unseparated() {
    let table = table(&["PLUS", "id"], &["EXPR", "TERM"]);
    let ids = split(&table, "EXPRPLUSTERM").unwrap();

    assert_eq!(names(&table, ids), vec!["EXPR", "PLUS", "TERM"]);
  }

  #[test]
  fn longest_match() {
    let table = table(&["a"], &["A", "A1", "A12"]);

    assert_eq!(names(&table, split(&table, "A1A").unwrap()), vec!["A1", "A"]);
    assert_eq!(names(&table, split(&table, "A12a").unwrap()), vec!["A12", "a"]);
    assert_eq!(
      names(&table, split(&table, "AA1A12").unwrap()),
      vec!["A", "A1", "A12"]);
  }

  #[test]
  fn longer_name_past_a_gap() {
    // `AB` and `ABCD` are names but `ABC` is not
    let table = table(&["C", "D"], &["AB", "ABCD"]);

    assert_eq!(names(&table, split(&table, "ABCDC").unwrap()), vec!["ABCD", "C"]);
  }

  #[test]
  fn epsilon() {
    let table = table(&[], &["S"]);

    assert_eq!(split(&table, "EPSILON").unwrap(), vec![SymbolId::EPSILON]);
    assert_eq!(split(&table, "").unwrap(), vec![SymbolId::EPSILON]);
  }

  #[test]
  fn end_marker_in_production() {
    let table = table(&["x"], &["S"]);

    assert_eq!(names(&table, split(&table, "Sx$").unwrap()), vec!["S", "x", "$"]);
  }

  #[test]
  fn residue() {
    let table = table(&["PLUS"], &["E"]);

    assert_eq!(
      split(&table, "EPLUSF").unwrap_err().kind,
      GrammarErrorKind::Split {
        text: "EPLUSF".to_owned(),
        residue: "F".to_owned(),
      });
    assert_eq!(
      split(&table, "EMINUSE").unwrap_err().kind,
      GrammarErrorKind::Split {
        text: "EMINUSE".to_owned(),
        residue: "MINUSE".to_owned(),
      });
  }

  #[test]
  fn join_round_trip() {
    let table = table(&["id", "PLUS", "LP", "RP"], &["E", "T", "X"]);
    let seq = ["LP", "E", "PLUS", "T", "RP", "X", "id"];
    let ids = split(&table, &seq.concat()).unwrap();

    assert_eq!(names(&table, ids), seq.to_vec());
  }
}
