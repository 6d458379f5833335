use diagnostic::diagnostic_code::DiagnosticCode;

use crate::function::Builtin;
use crate::interpreter::Interpreter;
use crate::value::LoxValue;

/// `len(x)` — element count for an `Array`, byte length for a `String`.
pub fn register(interpreter: &mut Interpreter) {
  interpreter.register_builtin(Builtin::new("len", Some(1), |args| match &args[0] {
    LoxValue::Array(elements) => LoxValue::Integer(elements.len() as i64),
    LoxValue::String(s) => LoxValue::Integer(s.len() as i64),
    other => LoxValue::error(
      DiagnosticCode::TypeMismatch,
      format!("type mismatch: len() expects ARRAY or STRING, got {}", other.type_name()),
    ),
  }));
}
