use grammar::{Grammar, Lexer};
use ll1::{ParseOutcome, Parser, Table};

/// Lexes `input` with the grammar's own patterns and parses it, returning the
/// outcome rendered one fact per line.
pub fn parse(
  grammar: &Grammar,
  table: &Table,
  input: &str,
) -> Vec<String> {
  let _ = env_logger::builder().is_test(true).try_init();

  let lexer = Lexer::new(&grammar.symbols).unwrap();
  let outcome = Parser::new(grammar, table, lexer.lex(input))
    .parse()
    .unwrap();

  render(&outcome)
}

pub fn render(outcome: &ParseOutcome) -> Vec<String> {
  let mut lines = vec![];

  if outcome.accepted {
    lines.push("accept".to_owned());
  } else {
    lines.push(format!("reject {:?}", outcome.rejection));
  }
  lines.push(format!("stack [{}]", outcome.stack.join(" ")));
  lines.push(format!("history [{}]", outcome.history.join(" ")));

  lines
}
