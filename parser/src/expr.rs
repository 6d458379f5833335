use std::fmt;

use scanner::token::Token;

use crate::node_id::NodeId;
use crate::stmt::Stmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOp {
  Bang,
  Minus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOp {
  Plus,
  Minus,
  Star,
  Divide,
  Less,
  Greater,
  LessEqual,
  GreaterEqual,
  Equal,
  NotEqual,
  And,
  Or,
}

#[derive(Debug, Clone)]
pub enum Expr {
  Identifier {
    token: Token,
    name: String,
    id: NodeId,
  },
  IntLiteral {
    token: Token,
    value: i64,
  },
  BoolLiteral {
    token: Token,
    value: bool,
  },
  StringLiteral {
    token: Token,
    value: String,
  },
  Null {
    token: Token,
  },
  ArrayLiteral {
    token: Token,
    elements: Vec<Expr>,
  },
  HashLiteral {
    token: Token,
    pairs: Vec<(Expr, Expr)>,
  },
  Prefix {
    token: Token,
    operator: PrefixOp,
    right: Box<Expr>,
  },
  Infix {
    token: Token,
    left: Box<Expr>,
    operator: InfixOp,
    right: Box<Expr>,
  },
  Assign {
    token: Token,
    target: Box<Expr>,
    value: Box<Expr>,
  },
  Get {
    token: Token,
    receiver: Box<Expr>,
    field: String,
  },
  Set {
    token: Token,
    receiver: Box<Expr>,
    field: String,
    value: Box<Expr>,
  },
  Index {
    token: Token,
    left: Box<Expr>,
    index: Box<Expr>,
  },
  Call {
    token: Token,
    callee: Box<Expr>,
    args: Vec<Expr>,
  },
  If {
    token: Token,
    condition: Box<Expr>,
    then_branch: Box<Stmt>,
    else_branch: Option<Box<Stmt>>,
  },
  Function {
    token: Token,
    params: Vec<String>,
    body: Box<Stmt>,
  },
  This {
    token: Token,
    id: NodeId,
  },
  Super {
    token: Token,
    method: String,
    id: NodeId,
  },
}

impl Expr {
  /// The token that introduced this node, for diagnostics and printing.
  pub fn token(&self) -> &Token {
    match self {
      Expr::Identifier { token, .. }
      | Expr::IntLiteral { token, .. }
      | Expr::BoolLiteral { token, .. }
      | Expr::StringLiteral { token, .. }
      | Expr::Null { token }
      | Expr::ArrayLiteral { token, .. }
      | Expr::HashLiteral { token, .. }
      | Expr::Prefix { token, .. }
      | Expr::Infix { token, .. }
      | Expr::Assign { token, .. }
      | Expr::Get { token, .. }
      | Expr::Set { token, .. }
      | Expr::Index { token, .. }
      | Expr::Call { token, .. }
      | Expr::If { token, .. }
      | Expr::Function { token, .. }
      | Expr::This { token, .. }
      | Expr::Super { token, .. } => token,
    }
  }

  /// The node identity the resolver keys its depth side-table by, for the
  /// variants that actually resolve a name at runtime.
  pub fn node_id(&self) -> Option<NodeId> {
    match self {
      Expr::Identifier { id, .. } | Expr::This { id, .. } | Expr::Super { id, .. } => Some(*id),
      _ => None,
    }
  }

  pub fn is_valid_assignment_target(&self) -> bool {
    matches!(self, Expr::Identifier { .. } | Expr::Get { .. })
  }
}

impl fmt::Display for Expr {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Expr::Identifier { name, .. } => write!(f, "{}", name),
      Expr::IntLiteral { value, .. } => write!(f, "{}", value),
      Expr::BoolLiteral { value, .. } => write!(f, "{}", value),
      Expr::StringLiteral { value, .. } => write!(f, "{:?}", value),
      Expr::Null { .. } => write!(f, "null"),
      Expr::ArrayLiteral { elements, .. } => {
        let items = elements.iter().map(|e| e.to_string()).collect::<Vec<_>>().join(", ");
        write!(f, "[{}]", items)
      },
      Expr::HashLiteral { pairs, .. } => {
        let items = pairs
          .iter()
          .map(|(k, v)| format!("{}: {}", k, v))
          .collect::<Vec<_>>()
          .join(", ");
        write!(f, "{{|{}|}}", items)
      },
      Expr::Prefix { operator, right, .. } => {
        let op = match operator {
          PrefixOp::Bang => "!",
          PrefixOp::Minus => "-",
        };
        write!(f, "({}{})", op, right)
      },
      Expr::Infix {
        left, operator, right, ..
      } => {
        let op = infix_symbol(*operator);
        write!(f, "({} {} {})", left, op, right)
      },
      Expr::Assign { target, value, .. } => write!(f, "({} = {})", target, value),
      Expr::Get { receiver, field, .. } => write!(f, "({}.{})", receiver, field),
      Expr::Set {
        receiver, field, value, ..
      } => write!(f, "({}.{} = {})", receiver, field, value),
      Expr::Index { left, index, .. } => write!(f, "({}[{}])", left, index),
      Expr::Call { callee, args, .. } => {
        let items = args.iter().map(|a| a.to_string()).collect::<Vec<_>>().join(", ");
        write!(f, "{}({})", callee, items)
      },
      Expr::If {
        condition,
        then_branch,
        else_branch,
        ..
      } => match else_branch {
        Some(else_branch) => write!(f, "(if {} {} else {})", condition, then_branch, else_branch),
        None => write!(f, "(if {} {})", condition, then_branch),
      },
      Expr::Function { params, .. } => write!(f, "fn({})", params.join(", ")),
      Expr::This { .. } => write!(f, "this"),
      Expr::Super { method, .. } => write!(f, "super.{}", method),
    }
  }
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
