use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use super::{Lexer, Token};

static SKIP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[ \t\r\n]+").unwrap());

pub struct Tokens<'lexer, 'input> {
  lexer: &'lexer Lexer,
  input: &'input str,
  pos: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid character {char:?} at {start}")]
pub struct LexError {
  pub char: char,
  pub start: usize,
  pub end: usize,
}

impl<'lexer, 'input> Tokens<'lexer, 'input> {
  pub(super) fn new(lexer: &'lexer Lexer, input: &'input str) -> Self {
    Self {
      lexer,
      input,
      pos: 0,
    }
  }

  fn skip(&mut self) {
    if let Some(m) = SKIP.find(&self.input[self.pos..]) {
      self.pos += m.end();
    }
  }
}

impl<'lexer, 'input> Iterator for Tokens<'lexer, 'input> {
  type Item = Result<Token<'input>, LexError>;

  fn next(&mut self) -> Option<Self::Item> {
    self.skip();

    let rest = &self.input[self.pos..];
    let char = rest.chars().next()?;
    let start = self.pos;

    match self.lexer.longest_match(rest) {
      Some((kind, len)) => {
        self.pos += len;
        Some(Ok(Token {
          kind,
          text: &self.input[start..self.pos],
          start,
          end: self.pos,
        }))
      }
      None => {
        self.pos += char.len_utf8();
        Some(Err(LexError {
          char,
          start,
          end: self.pos,
        }))
      }
    }
  }
}
