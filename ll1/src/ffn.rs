//! compute FIRST and FOLLOW sets.
//!
//! Sets hold terminal ids, so `EPSILON` and the end-marker are plain bits.

use bit_set::BitSet;
use grammar::{Grammar, GrammarError, SymbolId};
use crate::Map;

#[derive(Default, Debug, Clone, PartialEq)]
pub struct Ffn {
  pub first: Map<SymbolId, BitSet>,
  pub follow: Map<SymbolId, BitSet>,
}

pub fn compute(grammar: &Grammar) -> Result<Ffn, GrammarError> {
  let mut ffn = Ffn::default();
  ffn.compute_first_sets(grammar);
  ffn.compute_follow_sets(grammar)?;
  Ok(ffn)
}

impl Ffn {
  /// FIRST of a symbol sequence, from the cached non-terminal sets.
  pub fn first_of(&self, grammar: &Grammar, symbols: &[SymbolId]) -> BitSet {
    let mut result = BitSet::new();

    for &sym in symbols {
      if sym == SymbolId::EPSILON {
        continue;
      }

      if grammar.symbols.is_terminal_id(sym) {
        result.insert(sym.index());
        return result;
      }

      match self.first.get(&sym) {
        Some(sym_first) => {
          result.union_with(sym_first);
          result.remove(SymbolId::EPSILON.index());
          if !sym_first.contains(SymbolId::EPSILON.index()) {
            return result;
          }
        }
        None => return result,
      }
    }

    result.insert(SymbolId::EPSILON.index());
    result
  }

  pub fn first(&self, nt: SymbolId) -> BitSet {
    self.first.get(&nt).cloned().unwrap_or_default()
  }

  pub fn follow(&self, nt: SymbolId) -> BitSet {
    self.follow.get(&nt).cloned().unwrap_or_default()
  }

  pub fn compute_first_sets(&mut self, grammar: &Grammar) {
    self.first = grammar.symbols.nonterminals()
      .map(|nt| (nt, BitSet::new()))
      .collect();

    let mut passes = 0;
    loop {
      let mut changed = false;
      passes += 1;

      for prod in &grammar.prods {
        let prod_first = self.first_of(grammar, &prod.symbols);
        let nt_first = self.first.entry(prod.nt).or_default();
        let old_len = nt_first.len();
        nt_first.union_with(&prod_first);
        if nt_first.len() != old_len {
          changed = true;
        }
      }

      if !changed {
        break;
      }
    }

    log::debug!("FIRST sets stable after {} passes", passes);
  }

  /// Requires FIRST sets. Fails if the grammar has no valid axiom.
  pub fn compute_follow_sets(
    &mut self,
    grammar: &Grammar,
  ) -> Result<(), GrammarError> {
    let axiom = grammar.axiom()?;

    self.follow = grammar.symbols.nonterminals()
      .map(|nt| (nt, BitSet::new()))
      .collect();
    self.follow.entry(axiom).or_default().insert(SymbolId::END_MARKER.index());

    let mut passes = 0;
    loop {
      let mut changed = false;
      passes += 1;

      for prod in &grammar.prods {
        for (i, &sym) in prod.symbols.iter().enumerate() {
          if grammar.symbols.is_terminal_id(sym) {
            continue;
          }

          let rest_first = self.first_of(grammar, &prod.symbols[i + 1..]);
          let mut sym_follow = rest_first.clone();
          sym_follow.remove(SymbolId::EPSILON.index());
          if rest_first.contains(SymbolId::EPSILON.index()) {
            if let Some(nt_follow) = self.follow.get(&prod.nt) {
              sym_follow.union_with(nt_follow);
            }
          }

          let set = self.follow.entry(sym).or_default();
          let old_len = set.len();
          set.union_with(&sym_follow);
          if set.len() != old_len {
            changed = true;
          }
        }
      }

      if !changed {
        break;
      }
    }

    log::debug!("FOLLOW sets stable after {} passes", passes);

    Ok(())
  }
}

/// Names of the symbols in `set`, in id order.
pub fn names<'g>(grammar: &'g Grammar, set: &BitSet) -> Vec<&'g str> {
  set.iter()
    .map(|ix| grammar.symbols.name(SymbolId::from_index(ix)))
    .collect()
}
