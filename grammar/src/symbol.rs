//! Registry of terminal and non-terminal names.

use super::{BiMap, GrammarError, GrammarErrorKind};

pub const DEFAULT_END_MARKER: &str = "$";
pub const EPSILON: &str = "EPSILON";

#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct SymbolId(u32);

impl SymbolId {
  pub const END_MARKER: SymbolId = SymbolId(0);
  pub const EPSILON: SymbolId = SymbolId(1);

  pub fn id(&self) -> u32 {
    self.0
  }

  pub fn index(&self) -> usize {
    self.0 as usize
  }

  /// Inverse of [`SymbolId::index`], for ids stored as set bits.
  pub fn from_index(index: usize) -> Self {
    SymbolId(index as u32)
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolKind {
  Terminal {
    /// opaque to the grammar, only the lexer reads it.
    pattern: String,
  },
  Nonterminal,
}

#[derive(Debug, Clone)]
pub struct SymbolTable {
  names: BiMap<SymbolId, String>,
  /// indexed by `SymbolId`, so this is also the registration order.
  kinds: Vec<SymbolKind>,
}

impl Default for SymbolTable {
  fn default() -> Self {
    Self::new()
  }
}

impl SymbolTable {
  pub fn new() -> Self {
    let mut table = SymbolTable {
      names: BiMap::new(),
      kinds: vec![],
    };

    table.insert(
      DEFAULT_END_MARKER.to_owned(),
      SymbolKind::Terminal { pattern: regex::escape(DEFAULT_END_MARKER) });
    table.insert(
      EPSILON.to_owned(),
      SymbolKind::Terminal { pattern: EPSILON.to_owned() });

    table
  }

  fn insert(&mut self, name: String, kind: SymbolKind) -> SymbolId {
    let id = SymbolId(self.kinds.len() as u32);
    self.names.insert(id, name);
    self.kinds.push(kind);
    id
  }

  fn check_unique(&self, name: &str) -> Result<(), GrammarError> {
    if self.contains(name) {
      Err(GrammarErrorKind::DuplicateSymbol(name.to_owned()).into())
    } else {
      Ok(())
    }
  }

  pub fn register_terminal(
    &mut self,
    name: impl Into<String>,
    pattern: impl Into<String>,
  ) -> Result<SymbolId, GrammarError> {
    let name = name.into();
    self.check_unique(&name)?;
    let id = self.insert(name, SymbolKind::Terminal { pattern: pattern.into() });
    log::debug!("terminal {} = {}", self.name(id), id.id());
    Ok(id)
  }

  pub fn register_nonterminal(
    &mut self,
    name: impl Into<String>,
  ) -> Result<SymbolId, GrammarError> {
    let name = name.into();
    self.check_unique(&name)?;
    let id = self.insert(name, SymbolKind::Nonterminal);
    log::debug!("non-terminal {} = {}", self.name(id), id.id());
    Ok(id)
  }

  /// Renames the end-marker. Productions split before this call keep
  /// referring to the same symbol, but only the new name splits from now on.
  pub fn set_end_marker(
    &mut self,
    value: impl Into<String>,
  ) -> Result<(), GrammarError> {
    let value = value.into();
    if self.name(SymbolId::END_MARKER) == value {
      return Ok(());
    }
    self.check_unique(&value)?;

    self.names.remove_by_left(&SymbolId::END_MARKER);
    self.kinds[SymbolId::END_MARKER.index()] = SymbolKind::Terminal {
      pattern: regex::escape(&value),
    };
    self.names.insert(SymbolId::END_MARKER, value);

    Ok(())
  }

  pub fn contains(&self, name: &str) -> bool {
    self.names.contains_right(name)
  }

  pub fn id(&self, name: &str) -> Option<SymbolId> {
    self.names.get_by_right(name).copied()
  }

  pub fn resolve(&self, name: &str) -> Result<SymbolId, GrammarError> {
    self.id(name)
      .ok_or_else(|| GrammarErrorKind::UnknownSymbol(name.to_owned()).into())
  }

  pub fn is_terminal(&self, name: &str) -> Result<bool, GrammarError> {
    let id = self.resolve(name)?;
    Ok(self.is_terminal_id(id))
  }

  pub fn is_terminal_id(&self, id: SymbolId) -> bool {
    matches!(self.kind(id), SymbolKind::Terminal { .. })
  }

  pub fn pattern_of(&self, name: &str) -> Result<&str, GrammarError> {
    let id = self.resolve(name)?;
    match self.kind(id) {
      SymbolKind::Terminal { pattern } => Ok(pattern),
      SymbolKind::Nonterminal => {
        Err(GrammarErrorKind::NotTerminal(name.to_owned()).into())
      }
    }
  }

  /// # Panics
  ///
  /// Panics if `id` was not issued by this table.
  pub fn name(&self, id: SymbolId) -> &str {
    self.names.get_by_left(&id).expect("symbol id from this table")
  }

  pub fn kind(&self, id: SymbolId) -> &SymbolKind {
    &self.kinds[id.index()]
  }

  pub fn end_marker(&self) -> SymbolId {
    SymbolId::END_MARKER
  }

  pub fn epsilon(&self) -> SymbolId {
    SymbolId::EPSILON
  }

  pub fn len(&self) -> usize {
    self.kinds.len()
  }

  pub fn is_empty(&self) -> bool {
    self.kinds.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item=(SymbolId, &str, &SymbolKind)> + '_ {
    self.kinds.iter().enumerate().map(move |(i, kind)| {
      let id = SymbolId(i as u32);
      (id, self.name(id), kind)
    })
  }

  pub fn terminals(&self) -> impl Iterator<Item=SymbolId> + '_ {
    self.iter()
      .filter(|(_, _, kind)| matches!(kind, SymbolKind::Terminal { .. }))
      .map(|(id, _, _)| id)
  }

  pub fn nonterminals(&self) -> impl Iterator<Item=SymbolId> + '_ {
    self.iter()
      .filter(|(_, _, kind)| matches!(kind, SymbolKind::Nonterminal))
      .map(|(id, _, _)| id)
  }
}
