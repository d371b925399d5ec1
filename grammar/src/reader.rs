//! Line-oriented reader for grammar files.
//!
//! A grammar file has two sections, each closed by a line holding only `;`
//! (or by the end of the file):
//!
//! ```text
//! terminal PLUS \+;
//! terminal id [a-z]+;
//! no terminal T;
//! start with E;
//! set EOL char $;
//! ;
//! E -> T X;
//! X -> PLUS T X;
//! X ->;
//! T -> id;
//! ;
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use crate::{Grammar, GrammarError, GrammarErrorKind, SymbolTable};

pub type Document = Vec<Spanned<Decl>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned<T>(pub (usize, usize), pub T);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
  Terminal {
    name: String,
    pattern: String,
  },
  Nonterminal {
    name: String,
  },
  Start {
    name: String,
  },
  EndMarker {
    value: String,
  },
  Rule {
    antecedent: String,
    /// whitespace removed; empty for `A ->;`
    consequent: String,
  },
}

macro_rules! name {
  () => { r"[a-zA-Z_'][a-zA-Z_0-9']*" };
}

static RX_TERMINAL: Lazy<Regex> = Lazy::new(|| {
  Regex::new(concat!(r"^\s*terminal\s+(", name!(), r")\s+(\S.*);\s*$")).unwrap()
});
static RX_NONTERMINAL: Lazy<Regex> = Lazy::new(|| {
  Regex::new(concat!(r"^\s*no\s+terminal\s+(", name!(), r")\s*;\s*$")).unwrap()
});
static RX_START: Lazy<Regex> = Lazy::new(|| {
  Regex::new(concat!(r"^\s*start\s+with\s+(", name!(), r")\s*;\s*$")).unwrap()
});
static RX_EOL: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"^\s*set\s+EOL\s+char\s+(\S.*);\s*$").unwrap()
});
static RX_EMPTY_PRODUCTION: Lazy<Regex> = Lazy::new(|| {
  Regex::new(concat!(r"^\s*(", name!(), r")\s*->\s*;\s*$")).unwrap()
});
static RX_PRODUCTION: Lazy<Regex> = Lazy::new(|| {
  Regex::new(concat!(r"^\s*(", name!(), r")\s*->\s*([^;]+);\s*$")).unwrap()
});

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
  Symbols,
  Rules,
  Done,
}

/// Reads every declaration of `input`. All malformed lines are reported, not
/// only the first one.
pub fn parse(input: &str) -> Result<Document, Vec<GrammarError>> {
  let mut document = vec![];
  let mut errors = vec![];
  let mut section = Section::Symbols;
  let mut offset = 0;

  for raw_line in input.split('\n') {
    let start = offset;
    offset += raw_line.len() + 1;
    let line = raw_line.trim_end_matches('\r');
    let span = (start, start + line.len());

    if line.trim().is_empty() {
      continue;
    }

    if section == Section::Done {
      log::warn!("ignoring text after the end of the grammar: {:?}", line);
      break;
    }

    if line.trim() == ";" {
      section = match section {
        Section::Symbols => Section::Rules,
        _ => Section::Done,
      };
      continue;
    }

    let decl = match section {
      Section::Symbols => parse_symbol_decl(line),
      _ => parse_rule_decl(line),
    };

    match decl {
      Some(decl) => document.push(Spanned(span, decl)),
      None => {
        let message = match section {
          Section::Symbols => format!("invalid symbol declaration `{}`", line.trim()),
          _ => format!("invalid production `{}`", line.trim()),
        };
        errors.push(GrammarError::new(GrammarErrorKind::Syntax(message))
          .with_span(span));
      }
    }
  }

  if errors.is_empty() {
    Ok(document)
  } else {
    Err(errors)
  }
}

fn parse_symbol_decl(line: &str) -> Option<Decl> {
  if let Some(caps) = RX_TERMINAL.captures(line) {
    Some(Decl::Terminal {
      name: caps[1].to_owned(),
      pattern: caps[2].trim_end().to_owned(),
    })
  } else if let Some(caps) = RX_NONTERMINAL.captures(line) {
    Some(Decl::Nonterminal {
      name: caps[1].to_owned(),
    })
  } else if let Some(caps) = RX_START.captures(line) {
    Some(Decl::Start {
      name: caps[1].to_owned(),
    })
  } else if let Some(caps) = RX_EOL.captures(line) {
    Some(Decl::EndMarker {
      value: caps[1].trim_end().to_owned(),
    })
  } else {
    None
  }
}

fn parse_rule_decl(line: &str) -> Option<Decl> {
  if let Some(caps) = RX_EMPTY_PRODUCTION.captures(line) {
    Some(Decl::Rule {
      antecedent: caps[1].to_owned(),
      consequent: String::new(),
    })
  } else if let Some(caps) = RX_PRODUCTION.captures(line) {
    Some(Decl::Rule {
      antecedent: caps[1].to_owned(),
      consequent: caps[2].chars().filter(|c| !c.is_whitespace()).collect(),
    })
  } else {
    None
  }
}

/// Builds a [`Grammar`] from declarations.
///
/// Symbols are registered in declaration order, then every rule antecedent not
/// yet declared becomes a non-terminal, then rules are added. Errors from all
/// three steps are collected.
pub fn load(document: &[Spanned<Decl>]) -> Result<Grammar, Vec<GrammarError>> {
  let mut symbols = SymbolTable::new();
  let mut axiom = None;
  let mut errors = vec![];

  for Spanned(span, decl) in document {
    let result = match decl {
      Decl::Terminal { name, pattern } => {
        symbols.register_terminal(name.as_str(), pattern.as_str()).map(drop)
      }
      Decl::Nonterminal { name } => {
        symbols.register_nonterminal(name.as_str()).map(drop)
      }
      Decl::Start { name } => {
        axiom = Some(name.clone());
        Ok(())
      }
      Decl::EndMarker { value } => symbols.set_end_marker(value.as_str()),
      Decl::Rule { .. } => Ok(()),
    };

    if let Err(err) = result {
      errors.push(err.with_span(*span));
    }
  }

  for Spanned(span, decl) in document {
    if let Decl::Rule { antecedent, .. } = decl {
      if !symbols.contains(antecedent) {
        if let Err(err) = symbols.register_nonterminal(antecedent.as_str()) {
          errors.push(err.with_span(*span));
        }
      }
    }
  }

  let mut grammar = Grammar::new(symbols);
  if let Some(axiom) = axiom {
    grammar.set_axiom(axiom);
  }

  for Spanned(span, decl) in document {
    if let Decl::Rule { antecedent, consequent } = decl {
      if let Err(err) = grammar.add_rule(antecedent, consequent) {
        errors.push(err.with_span(*span));
      }
    }
  }

  log::debug!("loaded {} symbols, {} productions",
    grammar.symbols.len(), grammar.prods.len());

  if errors.is_empty() {
    Ok(grammar)
  } else {
    Err(errors)
  }
}

pub fn build(input: &str) -> Result<Grammar, Vec<GrammarError>> {
  load(&parse(input)?)
}
