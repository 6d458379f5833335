use std::collections::HashMap;

use diagnostic::{
  diagnostic::{Diagnostic, Label, Span},
  diagnostic_code::DiagnosticCode,
  DiagnosticEngine,
};
use parser::expr::Expr;
use parser::node_id::NodeId;
use parser::stmt::Stmt;
use scanner::token::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FunctionType {
  None,
  Function,
  Method,
  Initializer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClassType {
  None,
  Class,
  Subclass,
}

/// `name → has its initializer finished resolving yet?`. `false` between
/// `declare` and `define`, so a use seen in that window is "read in its own
/// initializer".
type Scope = HashMap<String, bool>;

/// Static pre-pass over the AST that binds every variable/`this`/`super` use
/// to the exact lexical depth of the scope that declares it, and reports
/// every declaration-time error up front rather than at first use.
///
/// One `Resolver` resolves one top-level statement list. The REPL creates a
/// fresh `Resolver` per input line (each line pushes its own Program scope,
/// §4.3), so a name declared on an earlier line is, from this pass's point
/// of view, *not* in any local scope — it resolves with no depth and the
/// evaluator falls back to `Environment::get_global`.
pub struct Resolver {
  scopes: Vec<Scope>,
  locals: HashMap<NodeId, usize>,
  current_function: FunctionType,
  current_class: ClassType,
}

impl Default for Resolver {
  fn default() -> Self {
    Self::new()
  }
}

impl Resolver {
  pub fn new() -> Self {
    Self {
      scopes: Vec::new(),
      locals: HashMap::new(),
      current_function: FunctionType::None,
      current_class: ClassType::None,
    }
  }

  /// Resolves a full program (or one REPL line) and returns the depth
  /// side-table. Diagnostics are accumulated in `engine`; the side-table is
  /// still produced on a best-effort basis even if errors occurred.
  pub fn resolve(mut self, program: &[Stmt], engine: &mut DiagnosticEngine) -> HashMap<NodeId, usize> {
    self.begin_scope();
    for stmt in program {
      self.resolve_stmt(stmt, engine);
    }
    self.end_scope();
    self.locals
  }

  fn resolve_stmt(&mut self, stmt: &Stmt, engine: &mut DiagnosticEngine) {
    match stmt {
      Stmt::Let { name, value, token } => {
        self.declare(name, token, engine);
        match value {
          Some(func @ Expr::Function { .. }) => {
            // Define before resolving so the function can refer to itself.
            self.define(name);
            self.resolve_expr(func, engine);
          },
          Some(value) => {
            self.resolve_expr(value, engine);
            self.define(name);
          },
          None => self.define(name),
        }
      },
      Stmt::Return { value, token } => {
        if let Some(value) = value {
          if self.current_function == FunctionType::Initializer {
            engine.emit(
              Diagnostic::new(
                DiagnosticCode::ReturnValueInInitializer,
                "cannot return a value from an initializer",
              )
              .with_label(Label::primary(token_span(token), None)),
            );
          }
          self.resolve_expr(value, engine);
        }
      },
      Stmt::Expression { expr, .. } => self.resolve_expr(expr, engine),
      Stmt::Block { statements, .. } => {
        self.begin_scope();
        for stmt in statements {
          self.resolve_stmt(stmt, engine);
        }
        self.end_scope();
      },
      Stmt::Class {
        name,
        superclass,
        methods,
        token,
      } => self.resolve_class(name, superclass.as_ref().map(|(name, id)| (name.as_str(), *id)), methods, token, engine),
    }
  }

  fn resolve_class(
    &mut self,
    name: &str,
    superclass: Option<(&str, NodeId)>,
    methods: &[Stmt],
    token: &Token,
    engine: &mut DiagnosticEngine,
  ) {
    let enclosing_class = self.current_class;
    self.declare_define_name(name);

    let mut has_superclass_scope = false;
    if let Some((superclass, superclass_id)) = superclass {
      if superclass == name {
        engine.emit(
          Diagnostic::new(DiagnosticCode::InheritFromSelf, "a class cannot inherit from itself")
            .with_label(Label::primary(token_span(token), None)),
        );
        self.current_class = ClassType::Class;
      } else {
        self.current_class = ClassType::Subclass;
        self.resolve_local(superclass_id, superclass);
        self.begin_scope();
        self.scopes.last_mut().unwrap().insert("super".to_string(), true);
        has_superclass_scope = true;
      }
    } else {
      self.current_class = ClassType::Class;
    }

    self.begin_scope();
    self.scopes.last_mut().unwrap().insert("this".to_string(), true);

    for method in methods {
      if let Stmt::Let {
        name: method_name,
        value: Some(Expr::Function { params, body, .. }),
        ..
      } = method
      {
        let function_type = if method_name == "init" {
          FunctionType::Initializer
        } else {
          FunctionType::Method
        };
        self.resolve_function(params, body, function_type, engine);
      }
    }

    self.end_scope();
    if has_superclass_scope {
      self.end_scope();
    }

    self.current_class = enclosing_class;
  }

  fn resolve_expr(&mut self, expr: &Expr, engine: &mut DiagnosticEngine) {
    match expr {
      Expr::Identifier { name, token, id } => {
        if let Some(scope) = self.scopes.last() {
          if let Some(false) = scope.get(name) {
            engine.emit(
              Diagnostic::new(
                DiagnosticCode::ReadInOwnInitializer,
                format!("cannot read variable '{name}' in its own initializer"),
              )
              .with_label(Label::primary(token_span(token), None)),
            );
          }
        }
        self.resolve_local(*id, name);
      },
      Expr::IntLiteral { .. }
      | Expr::BoolLiteral { .. }
      | Expr::StringLiteral { .. }
      | Expr::Null { .. } => {},
      Expr::ArrayLiteral { elements, .. } => {
        for element in elements {
          self.resolve_expr(element, engine);
        }
      },
      Expr::HashLiteral { pairs, .. } => {
        for (key, value) in pairs {
          self.resolve_expr(key, engine);
          self.resolve_expr(value, engine);
        }
      },
      Expr::Prefix { right, .. } => self.resolve_expr(right, engine),
      Expr::Infix { left, right, .. } => {
        self.resolve_expr(left, engine);
        self.resolve_expr(right, engine);
      },
      Expr::Assign { target, value, .. } => {
        self.resolve_expr(value, engine);
        if let Expr::Identifier { name, id, .. } = target.as_ref() {
          self.resolve_local(*id, name);
        }
      },
      Expr::Get { receiver, .. } => self.resolve_expr(receiver, engine),
      Expr::Set { receiver, value, .. } => {
        self.resolve_expr(value, engine);
        self.resolve_expr(receiver, engine);
      },
      Expr::Index { left, index, .. } => {
        self.resolve_expr(left, engine);
        self.resolve_expr(index, engine);
      },
      Expr::Call { callee, args, .. } => {
        self.resolve_expr(callee, engine);
        for arg in args {
          self.resolve_expr(arg, engine);
        }
      },
      Expr::If {
        condition,
        then_branch,
        else_branch,
        ..
      } => {
        self.resolve_expr(condition, engine);
        self.resolve_stmt(then_branch, engine);
        if let Some(else_branch) = else_branch {
          self.resolve_stmt(else_branch, engine);
        }
      },
      Expr::Function { params, body, .. } => {
        self.resolve_function(params, body, FunctionType::Function, engine);
      },
      Expr::This { token, id } => {
        if self.current_class == ClassType::None {
          engine.emit(
            Diagnostic::new(DiagnosticCode::ThisOutsideClass, "cannot use 'this' outside of a class")
              .with_label(Label::primary(token_span(token), None)),
          );
          return;
        }
        self.resolve_local(*id, "this");
      },
      Expr::Super { token, id, .. } => {
        match self.current_class {
          ClassType::None => {
            engine.emit(
              Diagnostic::new(DiagnosticCode::SuperOutsideClass, "cannot use 'super' outside of a class")
                .with_label(Label::primary(token_span(token), None)),
            );
            return;
          },
          ClassType::Class => {
            engine.emit(
              Diagnostic::new(
                DiagnosticCode::SuperWithoutSuperclass,
                "cannot use 'super' in a class with no superclass",
              )
              .with_label(Label::primary(token_span(token), None)),
            );
            return;
          },
          ClassType::Subclass => {},
        }
        self.resolve_local(*id, "super");
      },
    }
  }

  fn resolve_function(&mut self, params: &[String], body: &Stmt, function_type: FunctionType, engine: &mut DiagnosticEngine) {
    let enclosing_function = self.current_function;
    self.current_function = function_type;

    self.begin_scope();
    for param in params {
      self.declare_define_name(param);
    }

    if let Stmt::Block { statements, .. } = body {
      for stmt in statements {
        self.resolve_stmt(stmt, engine);
      }
    } else {
      self.resolve_stmt(body, engine);
    }

    self.end_scope();
    self.current_function = enclosing_function;
  }

  /// Walks scopes innermost-to-outermost looking for `name`, recording the
  /// depth (by `NodeId`) the first time it is found.
  fn resolve_local(&mut self, id: NodeId, name: &str) {
    let depth = self.scopes.iter().rev().position(|scope| scope.contains_key(name));
    if let Some(depth) = depth {
      self.locals.insert(id, depth);
    }
    // Not found in any scope: left unresolved, evaluator falls back to
    // Environment::get_global then the builtins table.
  }

  fn declare(&mut self, name: &str, token: &Token, engine: &mut DiagnosticEngine) {
    if let Some(scope) = self.scopes.last_mut() {
      if scope.contains_key(name) {
        engine.emit(
          Diagnostic::new(
            DiagnosticCode::AlreadyDeclared,
            format!("'{name}' is already declared in this scope"),
          )
          .with_label(Label::primary(token_span(token), None)),
        );
        return;
      }
      scope.insert(name.to_string(), false);
    }
  }

  fn define(&mut self, name: &str) {
    if let Some(scope) = self.scopes.last_mut() {
      scope.insert(name.to_string(), true);
    }
  }

  fn declare_define_name(&mut self, name: &str) {
    if let Some(scope) = self.scopes.last_mut() {
      scope.insert(name.to_string(), true);
    }
  }

  fn begin_scope(&mut self) {
    self.scopes.push(HashMap::new());
  }

  fn end_scope(&mut self) {
    self.scopes.pop();
  }
}

fn token_span(token: &Token) -> Span {
  Span::new("input", token.line(), token.column(), token.lexeme.len().max(1))
}

#[cfg(test)]
mod tests {
  use super::*;
  use parser::Parser;
  use scanner::Scanner;

  fn resolve(source: &str) -> (HashMap<NodeId, usize>, DiagnosticEngine) {
    let mut engine = DiagnosticEngine::new();
    let mut scanner = Scanner::new(source);
    let tokens = scanner.scan(&mut engine).to_vec();
    let mut parser = Parser::new(tokens);
    let program = parser.parse_program(&mut engine);
    let locals = Resolver::new().resolve(&program, &mut engine);
    (locals, engine)
  }

  #[test]
  fn resolves_closure_variable_one_scope_up() {
    let (locals, engine) = resolve("let a = 5; let f = fn(x) { return a + x; }; f(1);");
    assert!(!engine.has_errors());
    // `a` is read once, inside the function body: one scope between the
    // function's own scope and the Program scope that declares `a`.
    assert_eq!(locals.values().filter(|depth| **depth == 1).count(), 1);
  }

  #[test]
  fn top_level_use_resolves_at_depth_zero() {
    let (locals, engine) = resolve("let a = 5; a;");
    assert!(!engine.has_errors());
    assert_eq!(locals.values().copied().collect::<Vec<_>>(), vec![0]);
  }

  #[test]
  fn reading_own_initializer_is_an_error() {
    let (_, engine) = resolve("{ let x = x; }");
    assert!(engine.has_errors());
  }

  #[test]
  fn redeclaring_in_the_same_scope_is_an_error() {
    let (_, engine) = resolve("{ let x = 1; let x = 2; }");
    assert!(engine.has_errors());
  }

  #[test]
  fn class_inheriting_from_itself_is_an_error() {
    let (_, engine) = resolve("class A < A {}");
    assert!(engine.has_errors());
  }

  #[test]
  fn returning_a_value_from_init_is_an_error() {
    let (_, engine) = resolve("class A { fn init() { return 1; } }");
    assert!(engine.has_errors());
  }

  #[test]
  fn this_outside_a_class_is_an_error() {
    let (_, engine) = resolve("this;");
    assert!(engine.has_errors());
  }

  #[test]
  fn super_without_a_superclass_is_an_error() {
    let (_, engine) = resolve("class A { fn get() { super.get(); } }");
    assert!(engine.has_errors());
  }

  #[test]
  fn super_inside_a_subclass_resolves_cleanly() {
    let (_, engine) = resolve("class A { fn get() { return 1; } } class B < A { fn get() { return super.get(); } }");
    assert!(!engine.has_errors());
  }

  #[test]
  fn this_resolves_inside_a_method() {
    let (_, engine) = resolve("class A { fn set(n) { this.x = n; } }");
    assert!(!engine.has_errors());
  }

  #[test]
  fn superclass_identifier_gets_a_resolved_depth() {
    let (locals, engine) = resolve("class A {} class B < A {}");
    assert!(!engine.has_errors());
    // `A` is read once, at the top level: same scope as both class
    // declarations, so depth 0 — same rule as any other identifier use.
    assert_eq!(locals.values().copied().collect::<Vec<_>>(), vec![0]);
  }
}
