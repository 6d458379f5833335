//! End-to-end scenarios driving the whole scanner → parser → resolver →
//! evaluator pipeline, mirroring how a real `.duck` script is processed.

use diagnostic::diagnostic_code::DiagnosticCode;
use diagnostic::DiagnosticEngine;
use interputer::{Interpreter, LoxValue};
use parser::Parser;
use scanner::Scanner;
use semantic_analysis::Resolver;

/// Runs `source` through the full pipeline and returns the final value. Only
/// evaluator-stage scenarios use this — callers that need to see
/// scan/parse/resolve-time diagnostics use `pipeline_errors` instead.
fn run(source: &str) -> LoxValue {
  let mut engine = DiagnosticEngine::new();
  let mut scanner = Scanner::new(source);
  let tokens = scanner.scan(&mut engine).to_vec();
  let mut parser = Parser::new(tokens);
  let program = parser.parse_program(&mut engine);
  let locals = Resolver::new().resolve(&program, &mut engine);
  assert!(!engine.has_errors(), "pipeline errors: {:?}", engine.get_diagnostics());
  Interpreter::new().run(&program, locals)
}

/// Runs `source` through scan/parse/resolve only, returning whatever
/// diagnostic codes were raised (without evaluating).
fn pipeline_errors(source: &str) -> Vec<DiagnosticCode> {
  let mut engine = DiagnosticEngine::new();
  let mut scanner = Scanner::new(source);
  let tokens = scanner.scan(&mut engine).to_vec();
  let mut parser = Parser::new(tokens);
  let program = parser.parse_program(&mut engine);
  Resolver::new().resolve(&program, &mut engine);
  engine.get_diagnostics().iter().map(|d| d.code).collect()
}

#[test]
fn scenario_1_arithmetic_with_precedence() {
  assert!(matches!(run("let a = 5; let b = 10; return a + b * 2;"), LoxValue::Integer(25)));
}

#[test]
fn scenario_2_nested_closures_capture_by_reference() {
  let value = run("let make = fn(x) { fn(y) { x + y } }; let add3 = make(3); add3(4) + add3(5);");
  assert!(matches!(value, LoxValue::Integer(15)));
}

#[test]
fn scenario_3_inheritance_and_super_dispatch() {
  let value = run(
    "class A { fn init(n) { this.x = n; } fn get() { this.x; } } \
     class B < A { fn get() { super.get() * 2; } } \
     B(7).get();",
  );
  assert!(matches!(value, LoxValue::Integer(14)));
}

#[test]
fn scenario_4_right_associative_assignment() {
  let value = run("let a = 1; let b = 2; let c = 3; a = b = c; a;");
  assert!(matches!(value, LoxValue::Integer(3)));
}

#[test]
fn scenario_5_zero_and_empty_string_are_truthy() {
  let value = run("if (0) { \"t\" } else { \"f\" };");
  assert!(matches!(value, LoxValue::String(s) if &*s == "t"));

  let value = run("if (\"\") { \"t\" } else { \"f\" };");
  assert!(matches!(value, LoxValue::String(s) if &*s == "t"));
}

#[test]
fn scenario_6_negative_array_index() {
  let value = run("let arr = [10, 20, 30]; arr[-1] + arr[0];");
  assert!(matches!(value, LoxValue::Integer(40)));
}

#[test]
fn scenario_7_hash_literal_with_mixed_key_types() {
  let value = run("let h = {| \"k\": 1, 2: \"v\" |}; h;");
  match value {
    LoxValue::Hash(hash) => assert_eq!(hash.pairs.len(), 2),
    other => panic!("expected a hash, got {other:?}"),
  }

  let value = run("{| [1, 2]: 1 |};");
  match value {
    LoxValue::Error(err) => {
      assert_eq!(err.code, DiagnosticCode::NotHashableKey);
      assert_eq!(err.message, "unusable as hash key: ARRAY");
    },
    other => panic!("expected a not-hashable-key error, got {other:?}"),
  }
}

#[test]
fn scenario_8_bound_method_observes_mutation_through_shared_instance() {
  let value = run(
    "class Counter { fn init(n) { this.x = n; } fn doubleX() { this.x * 2; } } \
     let obj = Counter(5); let d = obj.doubleX; obj.x = 10; d();",
  );
  assert!(matches!(value, LoxValue::Integer(20)));
}

#[test]
fn error_scenario_unknown_operator_on_prefix_minus() {
  match run("-true;") {
    LoxValue::Error(err) => assert_eq!(err.message, "unknown operator: -BOOLEAN"),
    other => panic!("expected an error, got {other:?}"),
  }
}

#[test]
fn error_scenario_type_mismatch_on_infix_plus() {
  match run("1 + true;") {
    LoxValue::Error(err) => assert_eq!(err.message, "type mismatch: INTEGER + BOOLEAN"),
    other => panic!("expected an error, got {other:?}"),
  }
}

#[test]
fn error_scenario_identifier_not_found() {
  match run("x;") {
    LoxValue::Error(err) => assert_eq!(err.message, "identifier not found: 'x'"),
    other => panic!("expected an error, got {other:?}"),
  }
}

#[test]
fn error_scenario_read_in_own_initializer_is_caught_by_the_resolver() {
  let codes = pipeline_errors("let x = x;");
  assert!(codes.contains(&DiagnosticCode::ReadInOwnInitializer));
}

#[test]
fn error_scenario_inherit_from_self_is_caught_by_the_resolver() {
  let codes = pipeline_errors("class A < A {}");
  assert!(codes.contains(&DiagnosticCode::InheritFromSelf));
}

#[test]
fn error_scenario_this_outside_class_is_caught_by_the_resolver() {
  let codes = pipeline_errors("this;");
  assert!(codes.contains(&DiagnosticCode::ThisOutsideClass));
}
