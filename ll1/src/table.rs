use bit_set::BitSet;
use grammar::{Grammar, SymbolId};
use crate::{Conflict, ConflictError, Error, Map};
use crate::ffn::{self, Ffn};

/// The LL(1) table: `TABLE[nt][terminal]` is the index of the production to
/// expand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
  pub(crate) cells: Map<SymbolId, Map<SymbolId, usize>>,
}

impl Table {
  pub fn get(&self, nt: SymbolId, terminal: SymbolId) -> Option<usize> {
    self.cells.get(&nt)?.get(&terminal).copied()
  }

  /// Rows in non-terminal registration order, cells in insertion order.
  pub fn rows(&self) -> impl Iterator<Item=(SymbolId, &Map<SymbolId, usize>)> {
    self.cells.iter().map(|(&nt, row)| (nt, row))
  }

  /// Number of filled cells.
  pub fn len(&self) -> usize {
    self.cells.values().map(|row| row.len()).sum()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

/// Director symbols of a production: its FIRST set, plus the FOLLOW set of
/// its non-terminal when the production is nullable.
pub fn predict(grammar: &Grammar, ffn: &Ffn, prod_ix: usize) -> BitSet {
  let prod = &grammar.prods[prod_ix];
  let mut symbols = ffn.first_of(grammar, &prod.symbols);

  if symbols.remove(SymbolId::EPSILON.index()) {
    symbols.union_with(&ffn.follow(prod.nt));
  }

  symbols
}

/// Fills the table from precomputed FIRST and FOLLOW sets.
///
/// The first production to claim a cell keeps it. Every later claim is
/// recorded, and building goes on so that all conflicts are reported at once.
pub fn build(grammar: &Grammar, ffn: &Ffn) -> Result<Table, ConflictError> {
  let mut table = Table::default();
  let mut conflicts = vec![];

  for nt in grammar.symbols.nonterminals() {
    let row = table.cells.entry(nt).or_default();

    for (prod_ix, _) in grammar.productions_of(nt) {
      for lookahead in predict(grammar, ffn, prod_ix).iter() {
        let lookahead = SymbolId::from_index(lookahead);

        match row.get(&lookahead) {
          Some(&old) if old != prod_ix => {
            conflicts.push(Conflict {
              nonterminal: grammar.symbols.name(nt).to_owned(),
              lookahead: grammar.symbols.name(lookahead).to_owned(),
              prod1: grammar.display_production(old),
              prod2: grammar.display_production(prod_ix),
            });
          }
          Some(_) => {}
          None => {
            row.insert(lookahead, prod_ix);
          }
        }
      }
    }
  }

  log::debug!("LL(1) table: {} cells, {} conflicts", table.len(), conflicts.len());

  if conflicts.is_empty() {
    Ok(table)
  } else {
    Err(ConflictError { conflicts })
  }
}

/// Computes FIRST and FOLLOW, then builds the table.
pub fn build_table(grammar: &Grammar) -> Result<Table, Error> {
  let ffn = ffn::compute(grammar)?;
  Ok(build(grammar, &ffn)?)
}
