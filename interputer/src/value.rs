//! Runtime value model. Tagged variants, per SPEC_FULL.md §3 — no
//! inheritance hierarchy, one closed `enum` every evaluator match site must
//! handle exhaustively.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use diagnostic::diagnostic_code::DiagnosticCode;

use crate::class::{LoxClass, LoxInstance};
use crate::function::{Builtin, LoxFunction};

/// A runtime error. Carried as a `LoxValue::Error` so it can flow through
/// ordinary evaluation slots; converted to a `Diagnostic` only at the CLI
/// boundary (§7).
#[derive(Debug, Clone)]
pub struct LoxError {
  pub code: DiagnosticCode,
  pub message: String,
}

impl LoxError {
  pub fn new(code: DiagnosticCode, message: impl Into<String>) -> Self {
    Self {
      code,
      message: message.into(),
    }
  }
}

/// The subset of values with a well-defined identity as a hash key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HashKey {
  Integer(i64),
  Boolean(bool),
  String(Rc<str>),
}

impl HashKey {
  pub fn from_value(value: &LoxValue) -> Option<HashKey> {
    match value {
      LoxValue::Integer(i) => Some(HashKey::Integer(*i)),
      LoxValue::Boolean(b) => Some(HashKey::Boolean(*b)),
      LoxValue::String(s) => Some(HashKey::String(s.clone())),
      _ => None,
    }
  }
}

/// A hash literal's backing store: key identity plus the original key value
/// (so iteration/printing can show what the user actually wrote, not just
/// its hashed identity) and the mapped value.
#[derive(Debug, Default)]
pub struct LoxHash {
  pub pairs: HashMap<HashKey, (LoxValue, LoxValue)>,
}

#[derive(Clone)]
pub enum LoxValue {
  Integer(i64),
  Boolean(bool),
  String(Rc<str>),
  Null,
  Array(Rc<Vec<LoxValue>>),
  Hash(Rc<LoxHash>),
  Function(Rc<LoxFunction>),
  Class(Rc<LoxClass>),
  Instance(Rc<RefCell<LoxInstance>>),
  Builtin(Rc<Builtin>),
  /// Internal control-flow value produced by `ReturnStmt`; never observed by
  /// user code — the evaluator unwraps it at the function-call boundary.
  ReturnSignal(Box<LoxValue>),
  Error(Rc<LoxError>),
}

impl LoxValue {
  pub fn string(s: impl Into<Rc<str>>) -> Self {
    LoxValue::String(s.into())
  }

  pub fn error(code: DiagnosticCode, message: impl Into<String>) -> Self {
    LoxValue::Error(Rc::new(LoxError::new(code, message)))
  }

  /// `Null` and `Boolean(false)` are the only falsy values; everything else,
  /// including `Integer(0)` and the empty string, is truthy.
  pub fn is_truthy(&self) -> bool {
    !matches!(self, LoxValue::Null | LoxValue::Boolean(false))
  }

  pub fn is_error(&self) -> bool {
    matches!(self, LoxValue::Error(_))
  }

  /// Uppercase type tag used in diagnostic messages ("type mismatch:
  /// INTEGER + BOOLEAN").
  pub fn type_name(&self) -> &'static str {
    match self {
      LoxValue::Integer(_) => "INTEGER",
      LoxValue::Boolean(_) => "BOOLEAN",
      LoxValue::String(_) => "STRING",
      LoxValue::Null => "NULL",
      LoxValue::Array(_) => "ARRAY",
      LoxValue::Hash(_) => "HASH",
      LoxValue::Function(_) => "FUNCTION",
      LoxValue::Class(_) => "CLASS",
      LoxValue::Instance(_) => "INSTANCE",
      LoxValue::Builtin(_) => "BUILTIN",
      LoxValue::ReturnSignal(_) => "RETURN_SIGNAL",
      LoxValue::Error(_) => "ERROR",
    }
  }

  /// `==`/`!=` semantics per SPEC_FULL.md §3: Integer/String compare by
  /// value, everything else (including the Boolean/Null singletons) by
  /// identity. Values of different variants are always unequal.
  pub fn runtime_eq(&self, other: &LoxValue) -> bool {
    match (self, other) {
      (LoxValue::Integer(a), LoxValue::Integer(b)) => a == b,
      (LoxValue::String(a), LoxValue::String(b)) => a == b,
      (LoxValue::Boolean(a), LoxValue::Boolean(b)) => a == b,
      (LoxValue::Null, LoxValue::Null) => true,
      (LoxValue::Array(a), LoxValue::Array(b)) => Rc::ptr_eq(a, b),
      (LoxValue::Hash(a), LoxValue::Hash(b)) => Rc::ptr_eq(a, b),
      (LoxValue::Function(a), LoxValue::Function(b)) => Rc::ptr_eq(a, b),
      (LoxValue::Class(a), LoxValue::Class(b)) => Rc::ptr_eq(a, b),
      (LoxValue::Instance(a), LoxValue::Instance(b)) => Rc::ptr_eq(a, b),
      (LoxValue::Builtin(a), LoxValue::Builtin(b)) => Rc::ptr_eq(a, b),
      _ => false,
    }
  }
}

impl fmt::Debug for LoxValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self)
  }
}

impl fmt::Display for LoxValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      LoxValue::Integer(n) => write!(f, "{n}"),
      LoxValue::Boolean(b) => write!(f, "{b}"),
      LoxValue::String(s) => write!(f, "{s}"),
      LoxValue::Null => write!(f, "null"),
      LoxValue::Array(elements) => {
        write!(f, "[")?;
        for (i, element) in elements.iter().enumerate() {
          if i > 0 {
            write!(f, ", ")?;
          }
          write!(f, "{element}")?;
        }
        write!(f, "]")
      },
      LoxValue::Hash(hash) => {
        write!(f, "{{|")?;
        for (i, (key, value)) in hash.pairs.values().enumerate() {
          if i > 0 {
            write!(f, ", ")?;
          }
          write!(f, "{key}: {value}")?;
        }
        write!(f, "|}}")
      },
      LoxValue::Function(func) => match &func.name {
        Some(name) => write!(f, "<fn {name}>"),
        None => write!(f, "<fn>"),
      },
      LoxValue::Class(class) => write!(f, "<class {}>", class.name),
      LoxValue::Instance(instance) => write!(f, "<{} instance>", instance.borrow().class.name),
      LoxValue::Builtin(builtin) => write!(f, "<builtin {}>", builtin.name),
      LoxValue::ReturnSignal(value) => write!(f, "{value}"),
      LoxValue::Error(err) => write!(f, "Error: {}", err.message),
    }
  }
}
