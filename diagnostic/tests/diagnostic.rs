use diagnostic::diagnostic::{Diagnostic, Label, Span};
use diagnostic::diagnostic_code::DiagnosticCode;
use diagnostic::DiagnosticEngine;

#[test]
fn emits_and_counts_errors() {
  let mut engine = DiagnosticEngine::new();

  let error = Diagnostic::new(DiagnosticCode::UnterminatedString, "unterminated string literal")
    .with_label(Label::primary(
      Span::new("input", 1, 18, 1),
      Some("string starts here".to_string()),
    ))
    .with_help("close the string with a matching \"");

  engine.emit(error);

  assert!(engine.has_errors());
  assert_eq!(engine.error_count(), 1);
  assert_eq!(engine.warning_count(), 0);
  assert_eq!(engine.get_diagnostics().len(), 1);
}

#[test]
fn formats_plain_output_with_source_line() {
  let source = "let b = \"asdfasdf";
  let mut engine = DiagnosticEngine::new();

  engine.emit(
    Diagnostic::new(DiagnosticCode::UnterminatedString, "unterminated string literal").with_label(
      Label::primary(Span::new("input", 1, 8, 10), Some("missing closing quote".to_string())),
    ),
  );

  let plain = engine.format_all_plain(source);

  assert!(plain.contains("E0002") == false);
  assert!(plain.contains("L0002"));
  assert!(plain.contains("input:1:8"));
  assert!(plain.contains("aborting due to 1 previous error"));
}

#[test]
fn summary_is_silent_with_no_diagnostics() {
  let engine = DiagnosticEngine::new();
  assert!(!engine.has_errors());
  assert_eq!(engine.format_summary_plain(), "");
}

#[test]
fn clear_resets_counts_and_diagnostics() {
  let mut engine = DiagnosticEngine::new();
  engine.emit(Diagnostic::new(DiagnosticCode::IllegalCharacter, "illegal character '@'"));
  assert!(engine.has_errors());

  engine.clear();

  assert!(!engine.has_errors());
  assert_eq!(engine.error_count(), 0);
  assert_eq!(engine.get_diagnostics().len(), 0);
}
