use std::fmt;

use scanner::token::Token;

use crate::expr::Expr;
use crate::node_id::NodeId;

#[derive(Debug, Clone)]
pub enum Stmt {
  Let {
    token: Token,
    name: String,
    value: Option<Expr>,
  },
  Return {
    token: Token,
    value: Option<Expr>,
  },
  Expression {
    token: Token,
    expr: Expr,
  },
  Block {
    token: Token,
    statements: Vec<Stmt>,
  },
  Class {
    token: Token,
    name: String,
    /// The superclass name plus the `NodeId` the resolver binds a depth to,
    /// the same way every other identifier use carries one (compare
    /// `Expr::Identifier`).
    superclass: Option<(String, NodeId)>,
    /// Each method is a `Stmt::Let` whose `value` is `Some(Expr::Function { .. })`.
    methods: Vec<Stmt>,
  },
}

impl Stmt {
  pub fn token(&self) -> &Token {
    match self {
      Stmt::Let { token, .. }
      | Stmt::Return { token, .. }
      | Stmt::Expression { token, .. }
      | Stmt::Block { token, .. }
      | Stmt::Class { token, .. } => token,
    }
  }
}

impl fmt::Display for Stmt {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Stmt::Let { name, value: Some(v), .. } => write!(f, "let {} = {};", name, v),
      Stmt::Let { name, value: None, .. } => write!(f, "let {};", name),
      Stmt::Return { value: Some(v), .. } => write!(f, "return {};", v),
      Stmt::Return { value: None, .. } => write!(f, "return;"),
      Stmt::Expression { expr, .. } => write!(f, "{};", expr),
      Stmt::Block { statements, .. } => {
        write!(f, "{{ ")?;
        for stmt in statements {
          write!(f, "{} ", stmt)?;
        }
        write!(f, "}}")
      },
      Stmt::Class {
        name, superclass, methods, ..
      } => {
        match superclass {
          Some((parent, _)) => write!(f, "class {} < {} {{ ", name, parent)?,
          None => write!(f, "class {} {{ ", name)?,
        }
        for method in methods {
          write!(f, "{} ", method)?;
        }
        write!(f, "}}")
      },
    }
  }
}
