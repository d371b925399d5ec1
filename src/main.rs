use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use getopts::Options;
use ll1::parser::DEFAULT_HISTORY_LEN;
use ll1gen::report;

const RULE: &str = "-----------------------------------------------";

fn main() {
  env_logger::init();

  let args = env::args().collect::<Vec<_>>();
  let prog = args[0].clone();
  let mut opts = Options::new();
  opts.optflag("v", "verbose", "Print the LL(1) table and the input");
  opts.optopt("n", "history",
    &format!("Number of processed symbols to show when parsing fails. \
      Defaults to {}", DEFAULT_HISTORY_LEN),
    "N");
  opts.optflag("h", "help", "Print this message");

  let matches = match opts.parse(&args[1..]) {
    Ok(m) => m,
    Err(err) => {
      eprintln!("{}", err);
      process::exit(1);
    }
  };

  if matches.opt_present("h") {
    print_usage(prog, opts);
    return;
  }

  let verbose = matches.opt_present("v");
  let history_len = match matches.opt_str("n") {
    None => DEFAULT_HISTORY_LEN,
    Some(n) => match n.parse::<usize>() {
      Ok(n) => n,
      Err(_) => {
        eprintln!("ll1gen: invalid history length `{}`", n);
        process::exit(1);
      }
    },
  };

  let (grammar_path, input_path) = match matches.free.len() {
    1 => (matches.free[0].clone(), None),
    2 => (matches.free[0].clone(), Some(matches.free[1].clone())),
    _ => {
      print_usage(prog, opts);
      process::exit(1);
    }
  };

  let (grammar_path, grammar_text) = read(&grammar_path, "grammar file");
  log::info!("reading grammar from {}", grammar_path.display());

  let grammar = match ll1gen::load_grammar(&grammar_text) {
    Ok(grammar) => grammar,
    Err(err) => fail(&report::report(&grammar_path, &grammar_text, &err)),
  };
  let table = match ll1gen::build_table(&grammar) {
    Ok(table) => table,
    Err(err) => fail(&report::report(&grammar_path, &grammar_text, &err)),
  };

  println!("Grammar is LL(1)");

  if verbose {
    println!("{}", RULE);
    println!("LL1 Table (Verbose Mode):");
    print!("{}", report::dump_table(&grammar, &table));
    println!("{}", RULE);
  }

  let input_path = match input_path {
    Some(path) => path,
    None => return,
  };
  let (input_path, input) = read(&input_path, "input file");

  if verbose {
    println!("Input (Verbose Mode):");
    print!("{}", input);
    println!("{}", RULE);
  }

  let outcome = match ll1gen::lex_and_parse(&grammar, &table, &input, history_len) {
    Ok(outcome) => outcome,
    Err(err) => fail(&report::report(&input_path, &input, &err)),
  };

  if outcome.accepted {
    println!("Parsing was successful.");
    if verbose {
      print!("{}", report::report_rejection(&outcome));
    }
  } else {
    eprintln!("Parsing encountered an error.");
    fail(&report::report_rejection(&outcome));
  }
}

/// Reads a non-empty file, exiting on failure. The returned path is
/// canonicalized for display when possible.
fn read(path: &str, what: &str) -> (PathBuf, String) {
  let path = Path::new(path);
  let text = match fs::read_to_string(path) {
    Ok(text) => text,
    Err(err) => {
      eprintln!("ll1gen: cannot read {} '{}': {}", what, path.display(), err);
      process::exit(1);
    }
  };

  if text.trim().is_empty() {
    eprintln!("ll1gen: {} '{}' is empty", what, path.display());
    process::exit(1);
  }

  let path = dunce::canonicalize(path).unwrap_or_else(|_| path.to_owned());
  (path, text)
}

fn fail(report: &str) -> ! {
  eprint!("{}", report);
  process::exit(1);
}

fn print_usage(prog: String, opts: Options) {
  let brief = format!("Usage: {} [options] GRAMMAR [INPUT]", prog);
  print!("{}", opts.usage(&brief));
}
