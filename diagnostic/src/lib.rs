pub mod diagnostic;
pub mod diagnostic_code;
pub mod formatter;

pub use diagnostic::{Diagnostic, Label, LabelStyle, Span};
pub use diagnostic_code::{DiagnosticCode, Severity};
pub use formatter::DiagnosticFormatter;

/// Collects diagnostics raised while running a source file through the
/// lexer/parser/resolver/evaluator pipeline, and renders them at the end.
#[derive(Debug, Default)]
pub struct DiagnosticEngine {
  diagnostics: Vec<Diagnostic>,
  error_count: usize,
  warning_count: usize,
}

impl DiagnosticEngine {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn emit(&mut self, diagnostic: Diagnostic) {
    match diagnostic.severity {
      Severity::Error => self.error_count += 1,
      Severity::Warning => self.warning_count += 1,
      Severity::Note => {}
    }
    self.diagnostics.push(diagnostic);
  }

  pub fn has_errors(&self) -> bool {
    self.error_count > 0
  }

  pub fn error_count(&self) -> usize {
    self.error_count
  }

  pub fn warning_count(&self) -> usize {
    self.warning_count
  }

  pub fn get_diagnostics(&self) -> &[Diagnostic] {
    &self.diagnostics
  }

  /// Resets the engine to a clean slate. The REPL calls this between lines
  /// so that one line's diagnostics never bleed into the next.
  pub fn clear(&mut self) {
    self.diagnostics.clear();
    self.error_count = 0;
    self.warning_count = 0;
  }

  pub fn print_all(&self, source_code: &str) {
    for diagnostic in &self.diagnostics {
      let formatter = DiagnosticFormatter::new(diagnostic, source_code);
      eprintln!("{}", formatter.format());
    }
    self.print_summary();
  }

  pub fn format_all_plain(&self, source_code: &str) -> String {
    let mut output = String::new();
    for diagnostic in &self.diagnostics {
      let formatter = DiagnosticFormatter::new(diagnostic, source_code);
      output.push_str(&formatter.format_plain());
      output.push('\n');
    }
    output.push_str(&self.format_summary_plain());
    output
  }

  pub fn print_summary(&self) {
    use colored::*;

    if self.error_count > 0 {
      eprintln!(
        "{}: aborting due to {} previous error{}",
        "error".red().bold(),
        self.error_count,
        if self.error_count == 1 { "" } else { "s" }
      );
    }
    if self.warning_count > 0 {
      eprintln!(
        "{}: {} warning{} emitted",
        "warning".yellow().bold(),
        self.warning_count,
        if self.warning_count == 1 { "" } else { "s" }
      );
    }
  }

  pub fn format_summary_plain(&self) -> String {
    let mut out = String::new();
    if self.error_count > 0 {
      out.push_str(&format!(
        "error: aborting due to {} previous error{}\n",
        self.error_count,
        if self.error_count == 1 { "" } else { "s" }
      ));
    }
    if self.warning_count > 0 {
      out.push_str(&format!(
        "warning: {} warning{} emitted\n",
        self.warning_count,
        if self.warning_count == 1 { "" } else { "s" }
      ));
    }
    out
  }
}
