
fn statements() {
  let input = include_str!("fixtures/statements.ll1");
  let grammar = grammar::build(input).unwrap();
  let _table = ll1::build_table(&grammar).unwrap();
}

fn statements_parse(grammar: &grammar::Grammar, table: &ll1::Table) {
  let lexer = grammar::Lexer::new(&grammar.symbols).unwrap();
  let input = "x := 1; while x < 100 do x := x * (2 + -y) / 3; print x, y; end";
  let outcome = ll1::parse(grammar, table, lexer.lex(input)).unwrap();
  assert!(outcome.accepted);
}

use criterion::{criterion_group, criterion_main, Criterion};

fn table_benchmark(c: &mut Criterion) {
  c.bench_function("statements table", |b| b.iter(|| statements()));

  let grammar = grammar::build(include_str!("fixtures/statements.ll1")).unwrap();
  let table = ll1::build_table(&grammar).unwrap();
  c.bench_function("statements parse", |b| b.iter(|| statements_parse(&grammar, &table)));
}

criterion_group!{
  name = benches;
  config = Criterion::default().significance_level(0.1).sample_size(10);
  targets = table_benchmark
}
criterion_main!(benches);
