//! Classes and instances. Single inheritance only: a `LoxClass` points at
//! most one `superclass`, and method lookup walks that chain.

use std::collections::HashMap;
use std::rc::Rc;

use crate::function::LoxFunction;
use crate::value::LoxValue;

pub struct LoxClass {
  pub name: String,
  pub superclass: Option<Rc<LoxClass>>,
  pub methods: HashMap<String, Rc<LoxFunction>>,
}

impl LoxClass {
  /// Walks the class, then its superclass chain, returning the first match
  /// (own methods shadow inherited ones).
  pub fn find_method(&self, name: &str) -> Option<Rc<LoxFunction>> {
    if let Some(method) = self.methods.get(name) {
      return Some(method.clone());
    }
    self.superclass.as_ref().and_then(|parent| parent.find_method(name))
  }

  pub fn arity(&self) -> usize {
    self.find_method("init").map(|init| init.params.len()).unwrap_or(0)
  }
}

pub struct LoxInstance {
  pub class: Rc<LoxClass>,
  pub fields: HashMap<String, LoxValue>,
}

impl LoxInstance {
  pub fn new(class: Rc<LoxClass>) -> Self {
    Self {
      class,
      fields: HashMap::new(),
    }
  }
}
