//! Closures and native functions. `LoxFunction` is the evaluator's view of a
//! `FunctionExpr`: parameter names plus a captured closure frame. `Builtin`
//! is the other half of §6's registration interface — a name the evaluator
//! consults only on read, backed by a native Rust closure.

use std::rc::Rc;

use parser::stmt::Stmt;

use crate::class::LoxInstance;
use crate::env::{Env, EnvRef};
use crate::value::LoxValue;

pub mod native;

pub struct LoxFunction {
  pub name: Option<String>,
  pub params: Vec<String>,
  /// The function's block body, shared rather than deep-cloned per call —
  /// `FunctionExpr{ body }` is an AST reference per SPEC_FULL.md §3.
  pub body: Rc<Stmt>,
  pub closure: EnvRef,
  pub is_initializer: bool,
}

impl LoxFunction {
  /// Produces a new `Function` whose closure is a one-slot frame binding
  /// `this` to `instance`, enclosing the method's original closure. The
  /// bound method keeps seeing the instance even after its fields mutate,
  /// since it holds the same `Rc<RefCell<LoxInstance>>`, not a snapshot.
  pub fn bind(&self, instance: Rc<std::cell::RefCell<LoxInstance>>) -> Rc<LoxFunction> {
    let env = Env::new_enclosed(&self.closure);
    env.borrow_mut().set("this", LoxValue::Instance(instance));
    Rc::new(LoxFunction {
      name: self.name.clone(),
      params: self.params.clone(),
      body: self.body.clone(),
      closure: env,
      is_initializer: self.is_initializer,
    })
  }
}

/// A native function reachable only by name (§6: "a read-only mapping name
/// → Builtin"), never through the environment chain.
pub struct Builtin {
  pub name: String,
  pub arity: Option<usize>,
  pub func: Box<dyn Fn(&[LoxValue]) -> LoxValue>,
}

impl Builtin {
  pub fn new(name: impl Into<String>, arity: Option<usize>, func: impl Fn(&[LoxValue]) -> LoxValue + 'static) -> Self {
    Self {
      name: name.into(),
      arity,
      func: Box::new(func),
    }
  }
}
