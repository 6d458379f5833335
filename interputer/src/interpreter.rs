//! The tree-walking evaluator, per SPEC_FULL.md §4.4. Takes `(node, env)`
//! and produces a [`LoxValue`] that may itself be the `Error` variant.
//!
//! Internally, control flow (`return`, runtime errors) is modeled as
//! `Result<LoxValue, Unwind>` so the evaluator can use `?` the way the
//! teacher's own `interpreter.rs` threads its `InterpreterError` — `Unwind`
//! is that same idea, just carrying enough payload to rebuild a
//! `LoxValue::Error` or the returned value at the boundary that needs it
//! (`run`, function calls). Every public entry point still hands back a
//! plain `LoxValue`, matching §4.4's "evaluator returns a value that may be
//! a runtime error" contract.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use diagnostic::diagnostic_code::DiagnosticCode;
use parser::expr::{Expr, InfixOp, PrefixOp};
use parser::node_id::NodeId;
use parser::stmt::Stmt;

use crate::class::{LoxClass, LoxInstance};
use crate::env::{Env, EnvRef};
use crate::function::{Builtin, LoxFunction};
use crate::value::{HashKey, LoxError, LoxHash, LoxValue};

enum Unwind {
  Return(LoxValue),
  Error(Rc<LoxError>),
}

type EvalResult = Result<LoxValue, Unwind>;

fn rt_err(code: DiagnosticCode, message: impl Into<String>) -> EvalResult {
  Err(Unwind::Error(Rc::new(LoxError::new(code, message))))
}

fn type_mismatch(left: &LoxValue, symbol: &str, right: &LoxValue) -> EvalResult {
  rt_err(
    DiagnosticCode::TypeMismatch,
    format!("type mismatch: {} {symbol} {}", left.type_name(), right.type_name()),
  )
}

fn unknown_infix(left: &LoxValue, symbol: &str, right: &LoxValue) -> EvalResult {
  rt_err(
    DiagnosticCode::UnknownOperator,
    format!("unknown operator: {} {symbol} {}", left.type_name(), right.type_name()),
  )
}

fn infix_symbol(op: InfixOp) -> &'static str {
  match op {
    InfixOp::Plus => "+",
    InfixOp::Minus => "-",
    InfixOp::Star => "*",
    InfixOp::Divide => "/",
    InfixOp::Less => "<",
    InfixOp::Greater => ">",
    InfixOp::LessEqual => "<=",
    InfixOp::GreaterEqual => ">=",
    InfixOp::Equal => "==",
    InfixOp::NotEqual => "!=",
    InfixOp::And => "&&",
    InfixOp::Or => "||",
  }
}

/// Tree-walking evaluator. One `Interpreter` owns the global frame for the
/// lifetime of a script run (file mode) or a whole REPL session (so
/// top-level `let` bindings persist across lines); [`Interpreter::run`]
/// replaces `locals` on every call since each REPL line gets its own
/// resolver pass (§4.3).
pub struct Interpreter {
  pub globals: EnvRef,
  locals: HashMap<NodeId, usize>,
  builtins: HashMap<String, LoxValue>,
}

impl Default for Interpreter {
  fn default() -> Self {
    Self::new()
  }
}

impl Interpreter {
  pub fn new() -> Self {
    Self {
      globals: Env::new_global(),
      locals: HashMap::new(),
      builtins: HashMap::new(),
    }
  }

  pub fn register_builtin(&mut self, builtin: Builtin) {
    self.builtins.insert(builtin.name.clone(), LoxValue::Builtin(Rc::new(builtin)));
  }

  /// Evaluates `program` against the persistent global frame. `locals` is
  /// the resolver's depth side-table for exactly this program/line.
  pub fn run(&mut self, program: &[Stmt], locals: HashMap<NodeId, usize>) -> LoxValue {
    self.locals = locals;
    let env = self.globals.clone();
    match self.eval_stmt_list(program, &env) {
      Ok(value) => value,
      Err(Unwind::Return(value)) => value,
      Err(Unwind::Error(err)) => LoxValue::Error(err),
    }
  }

  fn eval_stmt_list(&mut self, statements: &[Stmt], env: &EnvRef) -> EvalResult {
    let mut result = LoxValue::Null;
    for stmt in statements {
      result = self.eval_stmt(stmt, env)?;
    }
    Ok(result)
  }

  fn eval_stmt(&mut self, stmt: &Stmt, env: &EnvRef) -> EvalResult {
    match stmt {
      Stmt::Let { name, value, .. } => {
        let value = match value {
          Some(expr) => self.eval_expr(expr, env)?,
          None => LoxValue::Null,
        };
        env.borrow_mut().set(name.clone(), value.clone());
        Ok(value)
      },
      Stmt::Return { value, .. } => {
        let value = match value {
          Some(expr) => self.eval_expr(expr, env)?,
          None => LoxValue::Null,
        };
        Err(Unwind::Return(value))
      },
      Stmt::Expression { expr, .. } => self.eval_expr(expr, env),
      Stmt::Block { statements, .. } => {
        let block_env = Env::new_enclosed(env);
        self.eval_stmt_list(statements, &block_env)
      },
      Stmt::Class {
        name,
        superclass,
        methods,
        ..
      } => self.eval_class(name, superclass.as_ref().map(|(name, id)| (name.as_str(), *id)), methods, env),
    }
  }

  fn eval_class(&mut self, name: &str, superclass: Option<(&str, NodeId)>, methods: &[Stmt], env: &EnvRef) -> EvalResult {
    let super_class = match superclass {
      Some((super_name, id)) => match self.lookup(id, super_name, env)? {
        LoxValue::Class(class) => Some(class),
        other => {
          return rt_err(
            DiagnosticCode::SuperclassNotClass,
            format!("superclass must be a class, got {}", other.type_name()),
          )
        },
      },
      None => None,
    };

    // Methods capture a frame binding `super` enclosing `env` when there is
    // a superclass, so `super.m` resolves one scope above `this` (§4.3/§4.4).
    let class_env = match &super_class {
      Some(parent) => {
        let frame = Env::new_enclosed(env);
        frame.borrow_mut().set("super", LoxValue::Class(parent.clone()));
        frame
      },
      None => env.clone(),
    };

    let mut methods_map = HashMap::new();
    for method in methods {
      if let Stmt::Let {
        name: method_name,
        value: Some(Expr::Function { params, body, .. }),
        ..
      } = method
      {
        let function = LoxFunction {
          name: Some(method_name.clone()),
          params: params.clone(),
          body: Rc::new((**body).clone()),
          closure: class_env.clone(),
          is_initializer: method_name == "init",
        };
        methods_map.insert(method_name.clone(), Rc::new(function));
      }
    }

    let class = Rc::new(LoxClass {
      name: name.to_string(),
      superclass: super_class,
      methods: methods_map,
    });
    env.borrow_mut().set(name.to_string(), LoxValue::Class(class));
    Ok(LoxValue::Null)
  }

  fn eval_expr(&mut self, expr: &Expr, env: &EnvRef) -> EvalResult {
    match expr {
      Expr::Identifier { name, id, .. } => self.lookup(*id, name, env),
      Expr::IntLiteral { value, .. } => Ok(LoxValue::Integer(*value)),
      Expr::BoolLiteral { value, .. } => Ok(LoxValue::Boolean(*value)),
      Expr::StringLiteral { value, .. } => Ok(LoxValue::string(value.as_str())),
      Expr::Null { .. } => Ok(LoxValue::Null),
      Expr::ArrayLiteral { elements, .. } => {
        let mut values = Vec::with_capacity(elements.len());
        for element in elements {
          values.push(self.eval_expr(element, env)?);
        }
        Ok(LoxValue::Array(Rc::new(values)))
      },
      Expr::HashLiteral { pairs, .. } => self.eval_hash_literal(pairs, env),
      Expr::Prefix { operator, right, .. } => self.eval_prefix(*operator, right, env),
      Expr::Infix {
        left, operator, right, ..
      } => self.eval_infix_expr(*operator, left, right, env),
      Expr::Assign { target, value, .. } => {
        let value = self.eval_expr(value, env)?;
        match target.as_ref() {
          Expr::Identifier { name, id, .. } => self.assign(*id, name, value, env),
          _ => rt_err(DiagnosticCode::InternalResolverError, "assignment target was not an identifier"),
        }
      },
      Expr::Get { receiver, field, .. } => self.eval_get(receiver, field, env),
      Expr::Set {
        receiver, field, value, ..
      } => self.eval_set(receiver, field, value, env),
      Expr::Index { left, index, .. } => self.eval_index(left, index, env),
      Expr::Call { callee, args, .. } => self.eval_call(callee, args, env),
      Expr::If {
        condition,
        then_branch,
        else_branch,
        ..
      } => {
        let condition = self.eval_expr(condition, env)?;
        if condition.is_truthy() {
          self.eval_stmt(then_branch, env)
        } else if let Some(else_branch) = else_branch {
          self.eval_stmt(else_branch, env)
        } else {
          Ok(LoxValue::Null)
        }
      },
      Expr::Function { params, body, .. } => Ok(LoxValue::Function(Rc::new(LoxFunction {
        name: None,
        params: params.clone(),
        body: Rc::new((**body).clone()),
        closure: env.clone(),
        is_initializer: false,
      }))),
      Expr::This { id, .. } => self.lookup(*id, "this", env),
      Expr::Super { id, method, .. } => self.eval_super(*id, method, env),
    }
  }

  fn eval_hash_literal(&mut self, pairs: &[(Expr, Expr)], env: &EnvRef) -> EvalResult {
    let mut hash = LoxHash::default();
    for (key_expr, value_expr) in pairs {
      let key = self.eval_expr(key_expr, env)?;
      let value = self.eval_expr(value_expr, env)?;
      match HashKey::from_value(&key) {
        Some(hash_key) => {
          hash.pairs.insert(hash_key, (key, value));
        },
        None => return rt_err(DiagnosticCode::NotHashableKey, format!("unusable as hash key: {}", key.type_name())),
      }
    }
    Ok(LoxValue::Hash(Rc::new(hash)))
  }

  fn eval_prefix(&mut self, operator: PrefixOp, right: &Expr, env: &EnvRef) -> EvalResult {
    let right = self.eval_expr(right, env)?;
    match operator {
      PrefixOp::Bang => Ok(LoxValue::Boolean(!right.is_truthy())),
      PrefixOp::Minus => match right {
        LoxValue::Integer(n) => Ok(LoxValue::Integer(n.wrapping_neg())),
        other => rt_err(DiagnosticCode::UnknownOperator, format!("unknown operator: -{}", other.type_name())),
      },
    }
  }

  fn eval_infix_expr(&mut self, operator: InfixOp, left: &Expr, right: &Expr, env: &EnvRef) -> EvalResult {
    // `&&`/`||` short-circuit: the right operand is only evaluated when the
    // left doesn't already decide the result.
    if matches!(operator, InfixOp::And | InfixOp::Or) {
      let left = self.eval_expr(left, env)?;
      return match operator {
        InfixOp::And if !left.is_truthy() => Ok(left),
        InfixOp::And => self.eval_expr(right, env),
        InfixOp::Or if left.is_truthy() => Ok(left),
        InfixOp::Or => self.eval_expr(right, env),
        _ => unreachable!(),
      };
    }

    let left = self.eval_expr(left, env)?;
    let right = self.eval_expr(right, env)?;
    eval_infix(operator, left, right)
  }

  fn eval_get(&mut self, receiver: &Expr, field: &str, env: &EnvRef) -> EvalResult {
    let receiver = self.eval_expr(receiver, env)?;
    match receiver {
      LoxValue::Instance(instance) => {
        if let Some(value) = instance.borrow().fields.get(field) {
          return Ok(value.clone());
        }
        let method = instance.borrow().class.find_method(field);
        match method {
          Some(method) => Ok(LoxValue::Function(method.bind(instance))),
          None => rt_err(DiagnosticCode::UndefinedProperty, format!("undefined property: '{field}'")),
        }
      },
      other => rt_err(
        DiagnosticCode::WrongGetTarget,
        format!("only instances have properties, got {}", other.type_name()),
      ),
    }
  }

  fn eval_set(&mut self, receiver: &Expr, field: &str, value: &Expr, env: &EnvRef) -> EvalResult {
    let receiver = self.eval_expr(receiver, env)?;
    match receiver {
      LoxValue::Instance(instance) => {
        let value = self.eval_expr(value, env)?;
        instance.borrow_mut().fields.insert(field.to_string(), value.clone());
        Ok(value)
      },
      other => rt_err(
        DiagnosticCode::WrongSetTarget,
        format!("only instances have settable fields, got {}", other.type_name()),
      ),
    }
  }

  fn eval_index(&mut self, left: &Expr, index: &Expr, env: &EnvRef) -> EvalResult {
    let left = self.eval_expr(left, env)?;
    let index = self.eval_expr(index, env)?;

    let elements = match left {
      LoxValue::Array(elements) => elements,
      other => {
        return rt_err(
          DiagnosticCode::TypeMismatch,
          format!("type mismatch: expected ARRAY for indexing, got {}", other.type_name()),
        )
      },
    };
    let i = match index {
      LoxValue::Integer(i) => i,
      other => {
        return rt_err(
          DiagnosticCode::TypeMismatch,
          format!("type mismatch: array index must be INTEGER, got {}", other.type_name()),
        )
      },
    };

    let len = elements.len() as i64;
    let resolved = if i < 0 { len + i } else { i };
    if resolved < 0 || resolved >= len {
      return rt_err(DiagnosticCode::OutOfBounds, format!("index {i} out of bounds for array of length {len}"));
    }
    Ok(elements[resolved as usize].clone())
  }

  fn eval_call(&mut self, callee: &Expr, arg_exprs: &[Expr], env: &EnvRef) -> EvalResult {
    let callee = self.eval_expr(callee, env)?;
    let mut args = Vec::with_capacity(arg_exprs.len());
    for arg in arg_exprs {
      args.push(self.eval_expr(arg, env)?);
    }

    match callee {
      LoxValue::Function(function) => self.call_function(function, args),
      LoxValue::Builtin(builtin) => {
        if let Some(expected) = builtin.arity {
          if expected != args.len() {
            return rt_err(
              DiagnosticCode::WrongArgumentCount,
              format!("wrong number of arguments: '{}' expects {expected}, got {}", builtin.name, args.len()),
            );
          }
        }
        match (builtin.func)(&args) {
          LoxValue::Error(err) => Err(Unwind::Error(err)),
          value => Ok(value),
        }
      },
      LoxValue::Class(class) => self.call_class(class, args),
      other => rt_err(DiagnosticCode::NotAFunction, format!("not a function: {}", other.type_name())),
    }
  }

  fn call_function(&mut self, function: Rc<LoxFunction>, args: Vec<LoxValue>) -> EvalResult {
    if args.len() != function.params.len() {
      return rt_err(
        DiagnosticCode::WrongArgumentCount,
        format!(
          "wrong number of arguments: expected {}, got {}",
          function.params.len(),
          args.len()
        ),
      );
    }

    let call_env = Env::new_enclosed(&function.closure);
    for (param, arg) in function.params.iter().zip(args) {
      call_env.borrow_mut().set(param.clone(), arg);
    }

    let statements = match function.body.as_ref() {
      Stmt::Block { statements, .. } => statements,
      // Every `FunctionExpr` the parser builds has a block body (§6 grammar).
      _ => unreachable!("function body is always a block"),
    };

    let result = self.eval_stmt_list(statements, &call_env);
    if function.is_initializer {
      return match result {
        Ok(_) | Err(Unwind::Return(_)) => self.this_from_closure(&function.closure),
        Err(err @ Unwind::Error(_)) => Err(err),
      };
    }

    match result {
      Ok(value) => Ok(value),
      Err(Unwind::Return(value)) => Ok(value),
      Err(err @ Unwind::Error(_)) => Err(err),
    }
  }

  fn this_from_closure(&self, closure: &EnvRef) -> EvalResult {
    match closure.borrow().get_at(0, "this") {
      Some(value) => Ok(value),
      None => rt_err(DiagnosticCode::InternalResolverError, "initializer closure is missing 'this'"),
    }
  }

  fn call_class(&mut self, class: Rc<LoxClass>, args: Vec<LoxValue>) -> EvalResult {
    let init = class.find_method("init");
    let expected = init.as_ref().map(|init| init.params.len()).unwrap_or(0);
    if args.len() != expected {
      return rt_err(
        DiagnosticCode::WrongArgumentCount,
        format!("wrong number of arguments: '{}' expects {expected}, got {}", class.name, args.len()),
      );
    }

    let instance = Rc::new(RefCell::new(LoxInstance::new(class)));
    if let Some(init) = init {
      let bound = init.bind(instance.clone());
      self.call_function(bound, args)?;
    }
    Ok(LoxValue::Instance(instance))
  }

  fn eval_super(&mut self, id: NodeId, method: &str, env: &EnvRef) -> EvalResult {
    let depth = match self.locals.get(&id) {
      Some(depth) => *depth,
      None => return rt_err(DiagnosticCode::InternalResolverError, "'super' used without a resolved depth"),
    };

    let superclass = match env.borrow().get_at(depth, "super") {
      Some(LoxValue::Class(class)) => class,
      _ => return rt_err(DiagnosticCode::InternalResolverError, "'super' did not resolve to a class"),
    };
    let instance = match env.borrow().get_at(depth - 1, "this") {
      Some(LoxValue::Instance(instance)) => instance,
      _ => return rt_err(DiagnosticCode::InternalResolverError, "'this' did not resolve to an instance"),
    };

    match superclass.find_method(method) {
      Some(found) => Ok(LoxValue::Function(found.bind(instance))),
      None => rt_err(DiagnosticCode::UndefinedProperty, format!("undefined property: '{method}'")),
    }
  }

  fn lookup(&self, id: NodeId, name: &str, env: &EnvRef) -> EvalResult {
    if let Some(&depth) = self.locals.get(&id) {
      return match env.borrow().get_at(depth, name) {
        Some(value) => Ok(value),
        None => rt_err(
          DiagnosticCode::InternalResolverError,
          format!("internal error: resolved '{name}' not found at depth {depth}"),
        ),
      };
    }
    if let Some(value) = env.borrow().get_global(name) {
      return Ok(value);
    }
    if let Some(value) = self.builtins.get(name) {
      return Ok(value.clone());
    }
    rt_err(DiagnosticCode::IdentifierNotFound, format!("identifier not found: '{name}'"))
  }

  fn assign(&mut self, id: NodeId, name: &str, value: LoxValue, env: &EnvRef) -> EvalResult {
    match self.locals.get(&id) {
      Some(&depth) => {
        if env.borrow_mut().assign_at(depth, name, value.clone()) {
          Ok(value)
        } else {
          rt_err(
            DiagnosticCode::InternalResolverError,
            format!("internal error: resolved '{name}' was not bound at depth {depth}"),
          )
        }
      },
      // No implicit globals: an unresolved name on the left of `=` is an
      // error, not a fresh binding. Only `let` introduces names (§4.4/§12).
      None => rt_err(DiagnosticCode::IdentifierNotFound, format!("identifier not found: '{name}'")),
    }
  }
}

fn eval_infix(operator: InfixOp, left: LoxValue, right: LoxValue) -> EvalResult {
  use InfixOp::*;
  let symbol = infix_symbol(operator);

  match operator {
    Plus => match (&left, &right) {
      (LoxValue::Integer(a), LoxValue::Integer(b)) => Ok(LoxValue::Integer(a.wrapping_add(*b))),
      (LoxValue::String(a), LoxValue::String(b)) => Ok(LoxValue::string(format!("{a}{b}"))),
      _ if left.type_name() != right.type_name() => type_mismatch(&left, symbol, &right),
      _ => unknown_infix(&left, symbol, &right),
    },
    Minus => match (&left, &right) {
      (LoxValue::Integer(a), LoxValue::Integer(b)) => Ok(LoxValue::Integer(a.wrapping_sub(*b))),
      _ if left.type_name() != right.type_name() => type_mismatch(&left, symbol, &right),
      _ => unknown_infix(&left, symbol, &right),
    },
    Star => match (&left, &right) {
      (LoxValue::Integer(a), LoxValue::Integer(b)) => Ok(LoxValue::Integer(a.wrapping_mul(*b))),
      _ if left.type_name() != right.type_name() => type_mismatch(&left, symbol, &right),
      _ => unknown_infix(&left, symbol, &right),
    },
    Divide => match (&left, &right) {
      (LoxValue::Integer(_), LoxValue::Integer(0)) => rt_err(DiagnosticCode::DivisionByZero, "division by zero"),
      (LoxValue::Integer(a), LoxValue::Integer(b)) => Ok(LoxValue::Integer(a.wrapping_div(*b))),
      _ if left.type_name() != right.type_name() => type_mismatch(&left, symbol, &right),
      _ => unknown_infix(&left, symbol, &right),
    },
    Less => match (&left, &right) {
      (LoxValue::Integer(a), LoxValue::Integer(b)) => Ok(LoxValue::Boolean(a < b)),
      _ if left.type_name() != right.type_name() => type_mismatch(&left, symbol, &right),
      _ => unknown_infix(&left, symbol, &right),
    },
    Greater => match (&left, &right) {
      (LoxValue::Integer(a), LoxValue::Integer(b)) => Ok(LoxValue::Boolean(a > b)),
      _ if left.type_name() != right.type_name() => type_mismatch(&left, symbol, &right),
      _ => unknown_infix(&left, symbol, &right),
    },
    LessEqual => match (&left, &right) {
      (LoxValue::Integer(a), LoxValue::Integer(b)) => Ok(LoxValue::Boolean(a <= b)),
      _ if left.type_name() != right.type_name() => type_mismatch(&left, symbol, &right),
      _ => unknown_infix(&left, symbol, &right),
    },
    GreaterEqual => match (&left, &right) {
      (LoxValue::Integer(a), LoxValue::Integer(b)) => Ok(LoxValue::Boolean(a >= b)),
      _ if left.type_name() != right.type_name() => type_mismatch(&left, symbol, &right),
      _ => unknown_infix(&left, symbol, &right),
    },
    Equal => Ok(LoxValue::Boolean(left.runtime_eq(&right))),
    NotEqual => Ok(LoxValue::Boolean(!left.runtime_eq(&right))),
    And | Or => unreachable!("&&/|| are handled by eval_infix_expr before reaching here"),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use diagnostic::DiagnosticEngine;
  use parser::Parser;
  use scanner::Scanner;
  use semantic_analysis::Resolver;

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

  #[test]
  fn arithmetic_precedence() {
    let value = run("let a = 5; let b = 10; return a + b * 2;");
    assert!(matches!(value, LoxValue::Integer(25)));
  }

  #[test]
  fn closures_capture_the_defining_environment() {
    let value = run("let make = fn(x) { fn(y) { x + y } }; let add3 = make(3); add3(4) + add3(5);");
    assert!(matches!(value, LoxValue::Integer(15)));
  }

  #[test]
  fn single_inheritance_with_super_dispatch() {
    let value = run(
      "class A { fn init(n) { this.x = n; } fn get() { this.x; } } \
       class B < A { fn get() { super.get() * 2; } } \
       B(7).get();",
    );
    assert!(matches!(value, LoxValue::Integer(14)));
  }

  #[test]
  fn assignment_is_right_associative() {
    let value = run("let a = 1; let b = 2; let c = 3; a = b = c; a;");
    assert!(matches!(value, LoxValue::Integer(3)));
  }

  #[test]
  fn zero_is_truthy() {
    let value = run("if (0) { \"t\" } else { \"f\" };");
    assert!(matches!(value, LoxValue::String(s) if &*s == "t"));
  }

  #[test]
  fn negative_array_index_counts_from_the_end() {
    let value = run("let arr = [10, 20, 30]; arr[-1] + arr[0];");
    assert!(matches!(value, LoxValue::Integer(40)));
  }

  #[test]
  fn hash_literal_with_array_key_is_an_error() {
    let value = run("{| [1,2]: 1 |};");
    match value {
      LoxValue::Error(err) => assert_eq!(err.code, DiagnosticCode::NotHashableKey),
      other => panic!("expected a hash-key error, got {other:?}"),
    }
  }

  #[test]
  fn bound_method_observes_later_mutation_through_the_shared_instance() {
    let value = run(
      "class Counter { fn init(n) { this.x = n; } fn doubleX() { this.x * 2; } } \
       let obj = Counter(5); let d = obj.doubleX; obj.x = 10; d();",
    );
    assert!(matches!(value, LoxValue::Integer(20)));
  }

  #[test]
  fn prefix_minus_on_boolean_is_unknown_operator() {
    let value = run("-true;");
    match value {
      LoxValue::Error(err) => {
        assert_eq!(err.code, DiagnosticCode::UnknownOperator);
        assert_eq!(err.message, "unknown operator: -BOOLEAN");
      },
      other => panic!("expected an error, got {other:?}"),
    }
  }

  #[test]
  fn mixed_type_infix_plus_is_type_mismatch() {
    let value = run("1 + true;");
    match value {
      LoxValue::Error(err) => {
        assert_eq!(err.code, DiagnosticCode::TypeMismatch);
        assert_eq!(err.message, "type mismatch: INTEGER + BOOLEAN");
      },
      other => panic!("expected an error, got {other:?}"),
    }
  }

  #[test]
  fn undeclared_identifier_is_an_error() {
    let value = run("x;");
    match value {
      LoxValue::Error(err) => assert_eq!(err.code, DiagnosticCode::IdentifierNotFound),
      other => panic!("expected an error, got {other:?}"),
    }
  }

  #[test]
  fn out_of_bounds_index_is_an_error() {
    let value = run("let arr = [1, 2]; arr[-3];");
    match value {
      LoxValue::Error(err) => assert_eq!(err.code, DiagnosticCode::OutOfBounds),
      other => panic!("expected an error, got {other:?}"),
    }
  }

  #[test]
  fn division_by_zero_is_an_error() {
    let value = run("1 / 0;");
    match value {
      LoxValue::Error(err) => assert_eq!(err.code, DiagnosticCode::DivisionByZero),
      other => panic!("expected an error, got {other:?}"),
    }
  }

  #[test]
  fn string_concatenation_and_equality() {
    let value = run("\"foo\" + \"bar\" == \"foobar\";");
    assert!(matches!(value, LoxValue::Boolean(true)));
  }

  #[test]
  fn cross_type_equality_is_false_by_identity() {
    let value = run("1 == true;");
    assert!(matches!(value, LoxValue::Boolean(false)));
  }
}
