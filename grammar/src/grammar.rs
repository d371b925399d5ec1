use std::fmt::Write;
use itertools::Itertools;
use super::{Map, GrammarError, GrammarErrorKind, SymbolId, SymbolTable};

pub use split::split;

mod split;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
  pub nt: SymbolId,
  /// never empty; an empty derivation is `[EPSILON]`.
  pub symbols: Vec<SymbolId>,
}

impl Production {
  pub fn is_epsilon(&self) -> bool {
    self.symbols == [SymbolId::EPSILON]
  }
}

#[derive(Debug, Clone, Default)]
pub struct Grammar {
  pub symbols: SymbolTable,
  pub prods: Vec<Production>,
  /// non-terminal -> indices into `prods`, in insertion order
  pub rules: Map<SymbolId, Vec<usize>>,
  axiom: Option<String>,
}

impl Grammar {
  pub fn new(symbols: SymbolTable) -> Self {
    Grammar {
      symbols,
      prods: vec![],
      rules: Map::new(),
      axiom: None,
    }
  }

  /// Splits `consequent` and appends it as a production of `antecedent`,
  /// returning the index of the new production.
  pub fn add_rule(
    &mut self,
    antecedent: &str,
    consequent: &str,
  ) -> Result<usize, GrammarError> {
    let nt = self.symbols.resolve(antecedent)?;
    if self.symbols.is_terminal_id(nt) {
      return Err(GrammarErrorKind::NotNonterminal(antecedent.to_owned()).into());
    }

    let symbols = split(&self.symbols, consequent)?;
    if symbols[0] == nt {
      return Err(GrammarErrorKind::LeftRecursion {
        antecedent: antecedent.to_owned(),
        production: self.display_symbols(&symbols),
      }.into());
    }

    let ix = self.prods.len();
    self.prods.push(Production {
      nt,
      symbols,
    });
    self.rules.entry(nt).or_default().push(ix);

    Ok(ix)
  }

  /// Records the start symbol. It is checked by [`Grammar::axiom`].
  pub fn set_axiom(&mut self, name: impl Into<String>) {
    self.axiom = Some(name.into());
  }

  pub fn axiom_name(&self) -> Option<&str> {
    self.axiom.as_deref()
  }

  pub fn axiom(&self) -> Result<SymbolId, GrammarError> {
    let name = self.axiom_name().ok_or(GrammarErrorKind::MissingAxiom)?;
    let nt = self.symbols.resolve(name)?;

    if self.symbols.is_terminal_id(nt) {
      Err(GrammarErrorKind::NotNonterminal(name.to_owned()).into())
    } else if self.productions_of(nt).next().is_none() {
      Err(GrammarErrorKind::AxiomWithoutProduction(name.to_owned()).into())
    } else {
      Ok(nt)
    }
  }

  pub fn productions_of(
    &self,
    nt: SymbolId,
  ) -> impl Iterator<Item=(usize, &Production)> + '_ {
    self.rules.get(&nt)
      .into_iter()
      .flatten()
      .map(move |&ix| (ix, &self.prods[ix]))
  }

  pub fn has_empty_production(&self, nt: SymbolId) -> bool {
    self.productions_of(nt).any(|(_, prod)| prod.is_epsilon())
  }

  /// Productions whose right-hand side mentions `symbol`.
  pub fn productions_containing(
    &self,
    symbol: SymbolId,
  ) -> impl Iterator<Item=(usize, &Production)> + '_ {
    self.prods.iter()
      .enumerate()
      .filter(move |(_, prod)| prod.symbols.contains(&symbol))
  }

  pub fn display_symbols(&self, symbols: &[SymbolId]) -> String {
    symbols.iter().map(|&sym| self.symbols.name(sym)).join(" ")
  }

  pub fn display_production(&self, ix: usize) -> String {
    let prod = &self.prods[ix];
    let mut buf = String::new();
    write!(&mut buf, "{} -> {}",
      self.symbols.name(prod.nt),
      self.display_symbols(&prod.symbols),
    ).unwrap();
    buf
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  fn expr_symbols() -> SymbolTable {
    let mut symbols = SymbolTable::new();
    symbols.register_terminal("PLUS", r"\+").unwrap();
    symbols.register_terminal("id", "[a-z]+").unwrap();
    for nt in &["E", "X", "T"] {
      symbols.register_nonterminal(*nt).unwrap();
    }
    symbols
  }

  #[test]
  fn add_rules() {
    let mut grammar = Grammar::new(expr_symbols());
    grammar.add_rule("E", "TX").unwrap();
    grammar.add_rule("X", "PLUSTX").unwrap();
    grammar.add_rule("X", "EPSILON").unwrap();
    grammar.add_rule("T", "id").unwrap();
    grammar.set_axiom("E");

    let rendered = (0..grammar.prods.len())
      .map(|ix| grammar.display_production(ix))
      .collect::<Vec<_>>();
    assert_eq!(rendered, vec![
      "E -> T X",
      "X -> PLUS T X",
      "X -> EPSILON",
      "T -> id",
    ]);

    let x = grammar.symbols.id("X").unwrap();
    let t = grammar.symbols.id("T").unwrap();
    assert_eq!(grammar.rules[&x], vec![1, 2]);
    assert!(grammar.has_empty_production(x));
    assert!(!grammar.has_empty_production(t));
    assert_eq!(
      grammar.productions_containing(t).map(|(ix, _)| ix).collect::<Vec<_>>(),
      vec![0, 1]);
    assert_eq!(grammar.axiom(), Ok(grammar.symbols.id("E").unwrap()));
  }

  #[test]
  fn left_recursion() {
    let mut symbols = expr_symbols();
    symbols.register_nonterminal("A").unwrap();
    symbols.register_nonterminal("B").unwrap();
    let mut grammar = Grammar::new(symbols);

    assert_eq!(
      grammar.add_rule("A", "APLUSB").unwrap_err().kind,
      GrammarErrorKind::LeftRecursion {
        antecedent: "A".to_owned(),
        production: "A PLUS B".to_owned(),
      });
    assert_eq!(
      grammar.add_rule("A", "A").unwrap_err().kind,
      GrammarErrorKind::LeftRecursion {
        antecedent: "A".to_owned(),
        production: "A".to_owned(),
      });
    assert!(grammar.prods.is_empty());
  }

  #[test]
  fn bad_antecedent() {
    let mut grammar = Grammar::new(expr_symbols());

    assert_eq!(
      grammar.add_rule("Y", "id").unwrap_err().kind,
      GrammarErrorKind::UnknownSymbol("Y".to_owned()));
    assert_eq!(
      grammar.add_rule("id", "T").unwrap_err().kind,
      GrammarErrorKind::NotNonterminal("id".to_owned()));
  }

  #[test]
  fn axiom_is_checked_lazily() {
    let mut grammar = Grammar::new(expr_symbols());
    assert_eq!(grammar.axiom_name(), None);
    assert_eq!(grammar.axiom().unwrap_err().kind, GrammarErrorKind::MissingAxiom);

    grammar.set_axiom("S");
    assert_eq!(
      grammar.axiom().unwrap_err().kind,
      GrammarErrorKind::UnknownSymbol("S".to_owned()));

    grammar.set_axiom("PLUS");
    assert_eq!(
      grammar.axiom().unwrap_err().kind,
      GrammarErrorKind::NotNonterminal("PLUS".to_owned()));

    grammar.set_axiom("E");
    assert_eq!(
      grammar.axiom().unwrap_err().kind,
      GrammarErrorKind::AxiomWithoutProduction("E".to_owned()));
    assert_eq!(grammar.axiom_name(), Some("E"));
  }
}
