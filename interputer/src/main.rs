use colored::*;
use diagnostic::{diagnostic::Diagnostic, diagnostic_code::DiagnosticCode, DiagnosticEngine};
use interputer::function::native;
use interputer::Runner;
use logger::Logger;

fn main() {
  let args: Vec<String> = std::env::args().collect();

  let mut engine = DiagnosticEngine::new();
  let logger = match std::env::var("DUCKLANG_LOG_FILE") {
    Ok(path) if !path.is_empty() => Logger::with_file(path),
    _ => Logger::new(),
  };
  let mut runner = Runner::new();
  native::register_defaults(runner.interpreter_mut());

  let exit_code = match args.len() {
    1 => {
      println!("{}", "Running the interactive mode".cyan().bold());
      runner.run_interactive_mode(&mut engine, &logger);
      0
    },
    2 => {
      println!("{}", format!("Running file: {}", args[1]).cyan().bold());
      runner.run_file(&args[1], &mut engine, &logger)
    },
    _ => {
      let error = Diagnostic::new(DiagnosticCode::InvalidArguments, "invalid number of arguments").with_help("Usage: ducklang [script]");
      engine.emit(error);
      engine.print_all("");
      64
    },
  };

  std::process::exit(exit_code);
}
