//! Recursive-descent parser with a Pratt-style expression parser (see
//! [`crate::precedence`]), turning a token stream from `scanner` into the
//! `Stmt`/`Expr` AST defined in [`stmt`] and [`expr`].
//!
//! The parser never panics. Every error is accumulated into the caller's
//! `DiagnosticEngine`; on error the parser discards tokens until it finds a
//! safe place to resume (`synchronize`), so a single file can report many
//! unrelated mistakes in one pass.

use diagnostic::{
  diagnostic::{Diagnostic, Label, Span},
  diagnostic_code::DiagnosticCode,
  DiagnosticEngine,
};
use scanner::token::{types::TokenType, Token};

use crate::expr::Expr;
use crate::node_id::NodeId;
use crate::stmt::Stmt;

pub mod expr;
mod expr_parser;
pub mod node_id;
pub mod precedence;
pub mod stmt;

pub struct Parser {
  tokens: Vec<Token>,
  current: usize,
}

impl Parser {
  pub fn new(tokens: Vec<Token>) -> Self {
    Self { tokens, current: 0 }
  }

  /// Parses the whole token stream into a program (a list of top-level
  /// statements). Always returns a tree, even one riddled with holes, so the
  /// resolver/evaluator never have to special-case "parsing failed".
  pub fn parse_program(&mut self, engine: &mut DiagnosticEngine) -> Vec<Stmt> {
    let mut statements = Vec::new();
    while !self.is_at_end() {
      match self.parse_statement(engine) {
        Some(stmt) => statements.push(stmt),
        None => self.synchronize(),
      }
    }
    statements
  }

  fn parse_statement(&mut self, engine: &mut DiagnosticEngine) -> Option<Stmt> {
    match self.peek_type() {
      TokenType::Let => self.parse_let_statement(engine),
      TokenType::Return => self.parse_return_statement(engine),
      TokenType::LeftBrace => self.parse_block_statement(engine),
      TokenType::Class => self.parse_class_statement(engine),
      TokenType::Fn => self.parse_fn_statement(engine),
      _ => self.parse_expression_statement(engine),
    }
  }

  fn parse_let_statement(&mut self, engine: &mut DiagnosticEngine) -> Option<Stmt> {
    let token = self.advance().clone(); // consume 'let'
    let name_token = self.expect(TokenType::Identifier, DiagnosticCode::MissingIdentifier, engine)?;
    let name = name_token.lexeme.clone();

    let value = if self.check(TokenType::Equal) {
      self.advance();
      Some(self.parse_expression(precedence::Precedence::Lowest, engine)?)
    } else {
      None
    };

    self.expect(TokenType::SemiColon, DiagnosticCode::MissingSemicolon, engine)?;
    Some(Stmt::Let { token, name, value })
  }

  fn parse_return_statement(&mut self, engine: &mut DiagnosticEngine) -> Option<Stmt> {
    let token = self.advance().clone(); // consume 'return'
    let value = if self.check(TokenType::SemiColon) {
      None
    } else {
      Some(self.parse_expression(precedence::Precedence::Lowest, engine)?)
    };
    self.expect(TokenType::SemiColon, DiagnosticCode::MissingSemicolon, engine)?;
    Some(Stmt::Return { token, value })
  }

  pub(crate) fn parse_block_statement(&mut self, engine: &mut DiagnosticEngine) -> Option<Stmt> {
    let token = self.advance().clone(); // consume '{'
    let mut statements = Vec::new();
    while !self.check(TokenType::RightBrace) && !self.is_at_end() {
      match self.parse_statement(engine) {
        Some(stmt) => statements.push(stmt),
        None => self.synchronize(),
      }
    }
    self.expect(TokenType::RightBrace, DiagnosticCode::MissingBrace, engine)?;
    Some(Stmt::Block { token, statements })
  }

  fn parse_class_statement(&mut self, engine: &mut DiagnosticEngine) -> Option<Stmt> {
    let token = self.advance().clone(); // consume 'class'
    let name = self
      .expect(TokenType::Identifier, DiagnosticCode::MissingIdentifier, engine)?
      .lexeme
      .clone();

    let superclass = if self.check(TokenType::Less) {
      self.advance();
      let name = self
        .expect(TokenType::Identifier, DiagnosticCode::MissingIdentifier, engine)?
        .lexeme
        .clone();
      Some((name, NodeId::new()))
    } else {
      None
    };

    self.expect(TokenType::LeftBrace, DiagnosticCode::MissingBrace, engine)?;

    let mut methods = Vec::new();
    while !self.check(TokenType::RightBrace) && !self.is_at_end() {
      let method = match self.peek_type() {
        TokenType::Fn => self.parse_fn_statement(engine),
        TokenType::Let => self.parse_let_statement(engine).filter(|stmt| {
          let is_function = matches!(stmt, Stmt::Let { value: Some(Expr::Function { .. }), .. });
          if !is_function {
            engine.emit(Diagnostic::new(
              DiagnosticCode::WrongClassMember,
              "class members must be method definitions",
            ));
          }
          is_function
        }),
        _ => {
          engine.emit(
            Diagnostic::new(DiagnosticCode::WrongClassMember, "expected a method definition").with_label(
              Label::primary(self.span_at_current(), None),
            ),
          );
          self.advance();
          None
        },
      };

      match method {
        Some(method) => methods.push(method),
        None => self.synchronize(),
      }
    }

    self.expect(TokenType::RightBrace, DiagnosticCode::MissingBrace, engine)?;
    Some(Stmt::Class {
      token,
      name,
      superclass,
      methods,
    })
  }

  /// `fn NAME(...) { ... }` desugars to `let NAME = fn(...) { ... };`.
  fn parse_fn_statement(&mut self, engine: &mut DiagnosticEngine) -> Option<Stmt> {
    let token = self.advance().clone(); // consume 'fn'
    let name = self
      .expect(TokenType::Identifier, DiagnosticCode::MissingIdentifier, engine)?
      .lexeme
      .clone();

    let function = self.parse_function_tail(token.clone(), engine)?;
    self.expect(TokenType::SemiColon, DiagnosticCode::MissingSemicolon, engine)?;

    Some(Stmt::Let {
      token,
      name,
      value: Some(function),
    })
  }

  fn parse_expression_statement(&mut self, engine: &mut DiagnosticEngine) -> Option<Stmt> {
    let token = self.peek().clone();
    let expr = self.parse_expression(precedence::Precedence::Lowest, engine)?;
    if self.check(TokenType::SemiColon) {
      self.advance();
    }
    Some(Stmt::Expression { token, expr })
  }

  /// Discards tokens until a safe statement boundary, per panic-mode
  /// synchronization: stop at a `;` (consumed) or before one of the
  /// statement-starting keywords.
  fn synchronize(&mut self) {
    while !self.is_at_end() {
      if self.peek_type() == TokenType::SemiColon {
        self.advance();
        return;
      }
      if matches!(
        self.peek_type(),
        TokenType::Let | TokenType::Fn | TokenType::Return | TokenType::If | TokenType::Class
      ) {
        return;
      }
      self.advance();
    }
  }

  // --- token stream helpers ---

  pub(crate) fn peek(&self) -> &Token {
    &self.tokens[self.current]
  }

  pub(crate) fn peek_type(&self) -> TokenType {
    self.tokens[self.current].token_type
  }

  pub(crate) fn check(&self, token_type: TokenType) -> bool {
    self.peek_type() == token_type
  }

  pub(crate) fn advance(&mut self) -> &Token {
    if !self.is_at_end() {
      self.current += 1;
    }
    &self.tokens[self.current - 1]
  }

  pub(crate) fn is_at_end(&self) -> bool {
    self.peek_type() == TokenType::Eof
  }

  pub(crate) fn expect(&mut self, token_type: TokenType, code: DiagnosticCode, engine: &mut DiagnosticEngine) -> Option<Token> {
    if self.check(token_type) {
      return Some(self.advance().clone());
    }

    engine.emit(
      Diagnostic::new(
        code,
        format!("expected {:?}, found {:?}", token_type, self.peek_type()),
      )
      .with_label(Label::primary(self.span_at_current(), None)),
    );
    None
  }

  pub(crate) fn span_at_current(&self) -> Span {
    let token = self.peek();
    Span::new("input", token.line(), token.column(), token.lexeme.len().max(1))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use scanner::Scanner;

  fn parse(source: &str) -> (Vec<Stmt>, DiagnosticEngine) {
    let mut engine = DiagnosticEngine::new();
    let mut scanner = Scanner::new(source);
    let tokens = scanner.scan(&mut engine).to_vec();
    let mut parser = Parser::new(tokens);
    let program = parser.parse_program(&mut engine);
    (program, engine)
  }

  #[test]
  fn parses_let_with_arithmetic_initializer() {
    let (program, engine) = parse("let a = 5 + 10 * 2;");
    assert!(!engine.has_errors());
    assert_eq!(program.len(), 1);
    assert_eq!(program[0].to_string(), "let a = (5 + (10 * 2));");
  }

  #[test]
  fn assignment_is_right_associative() {
    let (program, engine) = parse("a = b = c;");
    assert!(!engine.has_errors());
    assert_eq!(program[0].to_string(), "(a = (b = c));");
  }

  #[test]
  fn parses_class_with_superclass_and_methods() {
    let (program, engine) = parse(
      "class A { fn init(n) { this.x = n; } } class B < A { fn get() { super.get(); } }",
    );
    assert!(!engine.has_errors());
    assert_eq!(program.len(), 2);
    match &program[1] {
      Stmt::Class {
        name, superclass, methods, ..
      } => {
        assert_eq!(name, "B");
        assert_eq!(superclass.as_ref().map(|(name, _)| name.as_str()), Some("A"));
        assert_eq!(methods.len(), 1);
      },
      other => panic!("expected a class statement, got {:?}", other),
    }
  }

  #[test]
  fn non_identifier_assignment_target_is_an_error() {
    let (_, engine) = parse("5 = 10;");
    assert!(engine.has_errors());
  }

  #[test]
  fn recovers_after_a_missing_semicolon() {
    let (program, engine) = parse("let a = 1 let b = 2;");
    assert!(engine.has_errors());
    assert!(program.iter().any(|stmt| matches!(stmt, Stmt::Let { name, .. } if name == "b")));
  }

  #[test]
  fn array_and_hash_literals_round_trip_through_display() {
    let (program, engine) = parse("[1, 2, 3];");
    assert!(!engine.has_errors());
    assert_eq!(program[0].to_string(), "[1, 2, 3];");

    let (program, engine) = parse("{| \"k\": 1 |};");
    assert!(!engine.has_errors());
    assert_eq!(program[0].to_string(), "{|\"k\": 1|};");
  }

  #[test]
  fn negative_array_index_parses_as_prefix_minus() {
    let (program, engine) = parse("arr[-1];");
    assert!(!engine.has_errors());
    assert_eq!(program[0].to_string(), "(arr[(-1)]);");
  }
}
