//! Drives the scanner → parser → resolver → evaluator pipeline, either once
//! over a file or repeatedly over stdin lines. Grounded on the teacher's own
//! `runner.rs`, reworked for the added resolver stage and for §6's exit-code
//! contract (the teacher exits 66 on a missing file; we use 64, per spec).

use std::fs;
use std::io::{self, Write};

use diagnostic::{diagnostic::Diagnostic, diagnostic_code::DiagnosticCode, DiagnosticEngine};
use logger::Logger;
use parser::Parser;
use scanner::Scanner;
use semantic_analysis::Resolver;

use crate::interpreter::Interpreter;
use crate::value::LoxValue;

pub struct Runner {
  interpreter: Interpreter,
}

impl Default for Runner {
  fn default() -> Self {
    Self::new()
  }
}

impl Runner {
  pub fn new() -> Self {
    Self {
      interpreter: Interpreter::new(),
    }
  }

  pub fn interpreter_mut(&mut self) -> &mut Interpreter {
    &mut self.interpreter
  }

  /// Reads lines from stdin until `exit` or EOF. Each line gets a fresh
  /// `DiagnosticEngine` pass and a fresh resolver (it's its own top-level
  /// Program scope, §4.3), but the global environment and interpreter
  /// persist across lines so earlier `let`s stay visible.
  pub fn run_interactive_mode(&mut self, engine: &mut DiagnosticEngine, logger: &Logger) {
    println!("Welcome to DuckLang 🦆");
    println!("Type `exit` to quit.\n");

    loop {
      engine.clear();

      print!("> ");
      io::stdout().flush().unwrap();

      let mut line = String::new();
      let bytes_read = io::stdin().read_line(&mut line).unwrap();

      // EOF (Ctrl+D on Linux/macOS, Ctrl+Z on Windows)
      if bytes_read == 0 {
        println!("\nGoodbye!");
        break;
      }

      let input = line.trim();
      if input.is_empty() {
        continue;
      }
      if input == "exit" {
        println!("Exiting...");
        break;
      }

      if let Some(value) = self.interpret_line(input, engine, logger) {
        match value {
          LoxValue::Null => {},
          other => println!("{other}"),
        }
      }
    }
  }

  fn interpret_line(&mut self, input: &str, engine: &mut DiagnosticEngine, logger: &Logger) -> Option<LoxValue> {
    logger.phase("scanning");
    let mut scanner = Scanner::new(input);
    let tokens = scanner.scan(engine).to_vec();
    if engine.has_errors() {
      engine.print_all(input);
      return None;
    }

    logger.phase("parsing");
    let mut parser = Parser::new(tokens);
    let program = parser.parse_program(engine);
    if engine.has_errors() {
      engine.print_all(input);
      return None;
    }

    logger.phase("resolving");
    let locals = Resolver::new().resolve(&program, engine);
    if engine.has_errors() {
      engine.print_all(input);
      return None;
    }

    logger.phase("evaluating");
    let value = self.interpreter.run(&program, locals);
    if let LoxValue::Error(err) = &value {
      engine.emit(Diagnostic::new(err.code, err.message.clone()));
      engine.print_all(input);
      return None;
    }
    Some(value)
  }

  /// Runs a whole file through the pipeline once. Returns the process exit
  /// code per SPEC_FULL.md §6: 64 for a file that can't be opened, 65 for a
  /// script with scan/parse/resolution errors, 70 for one that runs but
  /// raises a runtime error, 0 on success.
  pub fn run_file(&mut self, path: &str, engine: &mut DiagnosticEngine, logger: &Logger) -> i32 {
    let source = match fs::read_to_string(path) {
      Ok(content) => content,
      Err(err) => {
        let diagnostic =
          Diagnostic::new(DiagnosticCode::FileNotFound, format!("could not read file: {path}")).with_help(format!("reason: {err}"));
        engine.emit(diagnostic);
        engine.print_all("");
        return 64;
      },
    };
    self.interpret(&source, engine, logger)
  }

  fn interpret(&mut self, source: &str, engine: &mut DiagnosticEngine, logger: &Logger) -> i32 {
    logger.phase("scanning");
    let mut scanner = Scanner::new(source);
    let tokens = scanner.scan(engine).to_vec();
    if engine.has_errors() {
      engine.print_all(source);
      return 65;
    }

    logger.phase("parsing");
    let mut parser = Parser::new(tokens);
    let program = parser.parse_program(engine);
    if engine.has_errors() {
      engine.print_all(source);
      return 65;
    }

    logger.phase("resolving");
    let locals = Resolver::new().resolve(&program, engine);
    if engine.has_errors() {
      engine.print_all(source);
      return 65;
    }

    logger.phase("evaluating");
    match self.interpreter.run(&program, locals) {
      LoxValue::Error(err) => {
        engine.emit(Diagnostic::new(err.code, err.message.clone()));
        engine.print_all(source);
        70
      },
      _ => {
        logger.info("run complete");
        0
      },
    }
  }
}
