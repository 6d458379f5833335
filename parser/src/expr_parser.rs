use diagnostic::{
  diagnostic::{Diagnostic, Label},
  diagnostic_code::DiagnosticCode,
  DiagnosticEngine,
};
use scanner::token::types::{Literal, TokenType};
use scanner::token::Token;

use crate::expr::{Expr, InfixOp, PrefixOp};
use crate::node_id::NodeId;
use crate::precedence::{infix_precedence, Precedence};
use crate::Parser;

impl Parser {
  /// `parseExpression(minPrec)`: parse a prefix expression, then keep
  /// consuming infix/postfix operators whose precedence exceeds `min_prec`.
  pub(crate) fn parse_expression(&mut self, min_prec: Precedence, engine: &mut DiagnosticEngine) -> Option<Expr> {
    let mut left = self.parse_prefix(engine)?;

    while !self.is_at_end() && min_prec < infix_precedence(&self.peek_type()) {
      left = match self.peek_type() {
        TokenType::Equal => self.parse_assign(left, engine)?,
        TokenType::LeftParen => self.parse_call(left, engine)?,
        TokenType::LeftBracket => self.parse_index(left, engine)?,
        TokenType::Dot => self.parse_get(left, engine)?,
        TokenType::And | TokenType::Or => self.parse_logical(left, engine)?,
        _ => self.parse_infix(left, engine)?,
      };
    }

    Some(left)
  }

  fn parse_prefix(&mut self, engine: &mut DiagnosticEngine) -> Option<Expr> {
    match self.peek_type() {
      TokenType::Identifier => Some(self.parse_identifier()),
      TokenType::Int => self.parse_int_literal(engine),
      TokenType::String => Some(self.parse_string_literal()),
      TokenType::True | TokenType::False => Some(self.parse_bool_literal()),
      TokenType::Null => Some(self.parse_null_literal()),
      TokenType::Bang | TokenType::Minus => self.parse_prefix_expr(engine),
      TokenType::LeftParen => self.parse_grouping(engine),
      TokenType::LeftBracket => self.parse_array_literal(engine),
      TokenType::HashOpen => self.parse_hash_literal(engine),
      TokenType::Fn => self.parse_function_literal(engine),
      TokenType::This => Some(self.parse_this()),
      TokenType::Super => self.parse_super(engine),
      TokenType::If => self.parse_if_expr(engine),
      _ => {
        let token = self.peek().clone();
        engine.emit(
          Diagnostic::new(
            DiagnosticCode::NoPrefixParslet,
            format!("no prefix parser for {:?}", token.token_type),
          )
          .with_label(Label::primary(self.span_at_current(), None)),
        );
        None
      },
    }
  }

  fn parse_identifier(&mut self) -> Expr {
    let token = self.advance().clone();
    Expr::Identifier {
      name: token.lexeme.clone(),
      token,
      id: NodeId::new(),
    }
  }

  fn parse_int_literal(&mut self, engine: &mut DiagnosticEngine) -> Option<Expr> {
    let token = self.advance().clone();
    match token.lexeme.parse::<i64>() {
      Ok(value) => Some(Expr::IntLiteral { token, value }),
      Err(_) => {
        engine.emit(
          Diagnostic::new(
            DiagnosticCode::IntegerOverflow,
            format!("integer literal does not fit in 64 bits: {}", token.lexeme),
          )
          .with_label(Label::primary(self.span_at_token(&token), None)),
        );
        None
      },
    }
  }

  fn parse_string_literal(&mut self) -> Expr {
    let token = self.advance().clone();
    let value = token.lexeme.clone();
    Expr::StringLiteral { token, value }
  }

  fn parse_bool_literal(&mut self) -> Expr {
    let token = self.advance().clone();
    let value = matches!(token.literal, Literal::Boolean(true));
    Expr::BoolLiteral { token, value }
  }

  fn parse_null_literal(&mut self) -> Expr {
    let token = self.advance().clone();
    Expr::Null { token }
  }

  fn parse_this(&mut self) -> Expr {
    let token = self.advance().clone();
    Expr::This { token, id: NodeId::new() }
  }

  fn parse_super(&mut self, engine: &mut DiagnosticEngine) -> Option<Expr> {
    let token = self.advance().clone();
    self.expect(TokenType::Dot, DiagnosticCode::UnexpectedToken, engine)?;
    let method = self
      .expect(TokenType::Identifier, DiagnosticCode::MissingIdentifier, engine)?
      .lexeme;
    Some(Expr::Super {
      token,
      method,
      id: NodeId::new(),
    })
  }

  fn parse_prefix_expr(&mut self, engine: &mut DiagnosticEngine) -> Option<Expr> {
    let token = self.advance().clone();
    let operator = match token.token_type {
      TokenType::Bang => PrefixOp::Bang,
      TokenType::Minus => PrefixOp::Minus,
      _ => unreachable!("parse_prefix only dispatches here for Bang/Minus"),
    };
    let right = self.parse_expression(Precedence::Prefix, engine)?;
    Some(Expr::Prefix {
      token,
      operator,
      right: Box::new(right),
    })
  }

  fn parse_grouping(&mut self, engine: &mut DiagnosticEngine) -> Option<Expr> {
    self.advance(); // consume '('
    let expr = self.parse_expression(Precedence::Lowest, engine)?;
    self.expect(TokenType::RightParen, DiagnosticCode::MissingParen, engine)?;
    Some(expr)
  }

  fn parse_array_literal(&mut self, engine: &mut DiagnosticEngine) -> Option<Expr> {
    let token = self.advance().clone(); // consume '['
    let mut elements = Vec::new();

    if !self.check(TokenType::RightBracket) {
      elements.push(self.parse_expression(Precedence::Lowest, engine)?);
      while self.check(TokenType::Comma) {
        self.advance();
        elements.push(self.parse_expression(Precedence::Lowest, engine)?);
      }
    }

    self.expect(TokenType::RightBracket, DiagnosticCode::MissingBracket, engine)?;
    Some(Expr::ArrayLiteral { token, elements })
  }

  fn parse_hash_literal(&mut self, engine: &mut DiagnosticEngine) -> Option<Expr> {
    let token = self.advance().clone(); // consume '{|'
    let mut pairs = Vec::new();

    if !self.check(TokenType::HashClose) {
      loop {
        let key = self.parse_expression(Precedence::Lowest, engine)?;
        self.expect(TokenType::Colon, DiagnosticCode::UnexpectedToken, engine)?;
        let value = self.parse_expression(Precedence::Lowest, engine)?;
        pairs.push((key, value));

        if self.check(TokenType::Comma) {
          self.advance();
        } else {
          break;
        }
      }
    }

    self.expect(TokenType::HashClose, DiagnosticCode::MissingBrace, engine)?;
    Some(Expr::HashLiteral { token, pairs })
  }

  fn parse_function_literal(&mut self, engine: &mut DiagnosticEngine) -> Option<Expr> {
    let token = self.advance().clone(); // consume 'fn'
    self.parse_function_tail(token, engine)
  }

  /// Shared by `fn NAME(...) {...}` (desugared at the statement level) and
  /// the bare `fn(...) {...}` function literal: both parse the same
  /// parameter list + body once the leading `fn` (and any name) is consumed.
  pub(crate) fn parse_function_tail(&mut self, token: Token, engine: &mut DiagnosticEngine) -> Option<Expr> {
    self.expect(TokenType::LeftParen, DiagnosticCode::MissingParen, engine)?;

    let mut params = Vec::new();
    if !self.check(TokenType::RightParen) {
      params.push(
        self
          .expect(TokenType::Identifier, DiagnosticCode::MissingIdentifier, engine)?
          .lexeme,
      );
      while self.check(TokenType::Comma) {
        self.advance();
        params.push(
          self
            .expect(TokenType::Identifier, DiagnosticCode::MissingIdentifier, engine)?
            .lexeme,
        );
      }
    }
    self.expect(TokenType::RightParen, DiagnosticCode::MissingParen, engine)?;

    if !self.check(TokenType::LeftBrace) {
      engine.emit(
        Diagnostic::new(DiagnosticCode::MissingBrace, "expected '{' to start function body")
          .with_label(Label::primary(self.span_at_current(), None)),
      );
      return None;
    }
    let body = self.parse_block_statement(engine)?;

    Some(Expr::Function {
      token,
      params,
      body: Box::new(body),
    })
  }

  fn parse_if_expr(&mut self, engine: &mut DiagnosticEngine) -> Option<Expr> {
    let token = self.advance().clone(); // consume 'if'
    self.expect(TokenType::LeftParen, DiagnosticCode::MissingParen, engine)?;
    let condition = self.parse_expression(Precedence::Lowest, engine)?;
    self.expect(TokenType::RightParen, DiagnosticCode::MissingParen, engine)?;

    if !self.check(TokenType::LeftBrace) {
      engine.emit(
        Diagnostic::new(DiagnosticCode::MissingBrace, "expected '{' to start if-branch")
          .with_label(Label::primary(self.span_at_current(), None)),
      );
      return None;
    }
    let then_branch = self.parse_block_statement(engine)?;

    let else_branch = if self.check(TokenType::Else) {
      self.advance();
      if !self.check(TokenType::LeftBrace) {
        engine.emit(
          Diagnostic::new(DiagnosticCode::MissingBrace, "expected '{' to start else-branch")
            .with_label(Label::primary(self.span_at_current(), None)),
        );
        return None;
      }
      Some(Box::new(self.parse_block_statement(engine)?))
    } else {
      None
    };

    Some(Expr::If {
      token,
      condition: Box::new(condition),
      then_branch: Box::new(then_branch),
      else_branch,
    })
  }

  fn parse_assign(&mut self, left: Expr, engine: &mut DiagnosticEngine) -> Option<Expr> {
    let token = self.advance().clone(); // consume '='
    if !left.is_valid_assignment_target() {
      engine.emit(
        Diagnostic::new(DiagnosticCode::WrongAssignmentTarget, "invalid assignment target")
          .with_label(Label::primary(self.span_at_token(left.token()), None)),
      );
      return None;
    }

    // Right-associative: parse the value at Lowest so `a = b = c` nests as
    // `a = (b = c)` without any special-casing here.
    let value = self.parse_expression(Precedence::Lowest, engine)?;

    if let Expr::Get { receiver, field, .. } = left {
      return Some(Expr::Set {
        token,
        receiver,
        field,
        value: Box::new(value),
      });
    }

    Some(Expr::Assign {
      token,
      target: Box::new(left),
      value: Box::new(value),
    })
  }

  fn parse_call(&mut self, callee: Expr, engine: &mut DiagnosticEngine) -> Option<Expr> {
    let token = self.advance().clone(); // consume '('
    let mut args = Vec::new();

    if !self.check(TokenType::RightParen) {
      args.push(self.parse_expression(Precedence::Lowest, engine)?);
      while self.check(TokenType::Comma) {
        self.advance();
        args.push(self.parse_expression(Precedence::Lowest, engine)?);
      }
    }

    self.expect(TokenType::RightParen, DiagnosticCode::MissingParen, engine)?;
    Some(Expr::Call {
      token,
      callee: Box::new(callee),
      args,
    })
  }

  fn parse_index(&mut self, left: Expr, engine: &mut DiagnosticEngine) -> Option<Expr> {
    let token = self.advance().clone(); // consume '['
    let index = self.parse_expression(Precedence::Lowest, engine)?;
    self.expect(TokenType::RightBracket, DiagnosticCode::MissingBracket, engine)?;
    Some(Expr::Index {
      token,
      left: Box::new(left),
      index: Box::new(index),
    })
  }

  fn parse_get(&mut self, receiver: Expr, engine: &mut DiagnosticEngine) -> Option<Expr> {
    let token = self.advance().clone(); // consume '.'
    let field = self
      .expect(TokenType::Identifier, DiagnosticCode::MissingIdentifier, engine)?
      .lexeme;
    Some(Expr::Get {
      token,
      receiver: Box::new(receiver),
      field,
    })
  }

  fn parse_logical(&mut self, left: Expr, engine: &mut DiagnosticEngine) -> Option<Expr> {
    let token = self.advance().clone();
    let operator = match token.token_type {
      TokenType::And => InfixOp::And,
      TokenType::Or => InfixOp::Or,
      _ => unreachable!("parse_logical only dispatches here for And/Or"),
    };
    let prec = infix_precedence(&token.token_type);
    let right = self.parse_expression(prec, engine)?;
    Some(Expr::Infix {
      token,
      left: Box::new(left),
      operator,
      right: Box::new(right),
    })
  }

  fn parse_infix(&mut self, left: Expr, engine: &mut DiagnosticEngine) -> Option<Expr> {
    let token = self.advance().clone();
    let operator = match token.token_type {
      TokenType::Plus => InfixOp::Plus,
      TokenType::Minus => InfixOp::Minus,
      TokenType::Star => InfixOp::Star,
      TokenType::Divide => InfixOp::Divide,
      TokenType::Less => InfixOp::Less,
      TokenType::Greater => InfixOp::Greater,
      TokenType::LessEqual => InfixOp::LessEqual,
      TokenType::GreaterEqual => InfixOp::GreaterEqual,
      TokenType::EqualEqual => InfixOp::Equal,
      TokenType::BangEqual => InfixOp::NotEqual,
      _ => {
        engine.emit(Diagnostic::new(
          DiagnosticCode::UnexpectedToken,
          format!("unexpected infix token {:?}", token.token_type),
        ));
        return None;
      },
    };

    let prec = infix_precedence(&token.token_type);
    let right = self.parse_expression(prec, engine)?;
    Some(Expr::Infix {
      token,
      left: Box::new(left),
      operator,
      right: Box::new(right),
    })
  }

  fn span_at_token(&self, token: &Token) -> diagnostic::diagnostic::Span {
    diagnostic::diagnostic::Span::new("input", token.line(), token.column(), token.lexeme.len().max(1))
  }
}
