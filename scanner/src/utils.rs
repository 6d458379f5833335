use diagnostic::{
  diagnostic::{Diagnostic, Label, Span},
  diagnostic_code::DiagnosticCode,
  DiagnosticEngine,
};

use crate::token::types::{Literal, TokenType};
use crate::token::Token;
use crate::Scanner;

impl Scanner {
  pub(crate) fn get_tokens(&mut self, engine: &mut DiagnosticEngine) {
    while !self.is_at_end() {
      self.start = self.current;
      self.start_column = self.column;
      let c = self.advance();

      let token_type = match c {
        '(' => Some(TokenType::LeftParen),
        ')' => Some(TokenType::RightParen),
        '{' => {
          if self.match_char('|') {
            self.advance();
            Some(TokenType::HashOpen)
          } else {
            Some(TokenType::LeftBrace)
          }
        },
        '}' => Some(TokenType::RightBrace),
        '[' => Some(TokenType::LeftBracket),
        ']' => Some(TokenType::RightBracket),
        ',' => Some(TokenType::Comma),
        '.' => Some(TokenType::Dot),
        ':' => Some(TokenType::Colon),
        ';' => Some(TokenType::SemiColon),
        '+' => Some(TokenType::Plus),
        '-' => Some(TokenType::Minus),
        '*' => Some(TokenType::Star),

        '/' => {
          if self.match_char('/') {
            self.advance();
            self.skip_line_comment();
            None
          } else {
            Some(TokenType::Divide)
          }
        },

        '!' => {
          if self.match_char('=') {
            self.advance();
            Some(TokenType::BangEqual)
          } else {
            Some(TokenType::Bang)
          }
        },
        '=' => {
          if self.match_char('=') {
            self.advance();
            Some(TokenType::EqualEqual)
          } else {
            Some(TokenType::Equal)
          }
        },
        '>' => {
          if self.match_char('=') {
            self.advance();
            Some(TokenType::GreaterEqual)
          } else {
            Some(TokenType::Greater)
          }
        },
        '<' => {
          if self.match_char('=') {
            self.advance();
            Some(TokenType::LessEqual)
          } else {
            Some(TokenType::Less)
          }
        },

        '&' => {
          if self.match_char('&') {
            self.advance();
            Some(TokenType::And)
          } else {
            Some(self.illegal(engine, "stray '&': did you mean '&&'?"))
          }
        },
        '|' => {
          if self.match_char('|') {
            self.advance();
            Some(TokenType::Or)
          } else if self.match_char('}') {
            self.advance();
            Some(TokenType::HashClose)
          } else {
            Some(self.illegal(engine, "stray '|': did you mean '||' or '|}'?"))
          }
        },

        '"' => Some(self.tokenize_string(engine)),

        ' ' | '\t' | '\r' => None,
        '\n' => {
          self.line += 1;
          self.column = 0;
          None
        },

        c if c.is_ascii_digit() => Some(self.tokenize_number()),
        c if c.is_ascii_alphabetic() || c == '_' => Some(self.tokenize_identifier()),

        other => Some(self.illegal(engine, &format!("unexpected character: {:?}", other))),
      };

      if let Some(token_type) = token_type {
        self.add_token(token_type);
      }
    }

    self.tokens.push(Token::new(
      TokenType::Eof,
      String::new(),
      Literal::None,
      (self.line, self.column),
    ));
  }

  fn illegal(&self, engine: &mut DiagnosticEngine, message: &str) -> TokenType {
    engine.emit(
      Diagnostic::new(DiagnosticCode::IllegalCharacter, message).with_label(Label::primary(
        Span::new("input", self.line, self.start_column, 1),
        None,
      )),
    );
    TokenType::Illegal
  }

  fn skip_line_comment(&mut self) {
    while let Some(c) = self.peek() {
      if c == '\n' {
        break;
      }
      self.advance();
    }
  }

  fn tokenize_string(&mut self, engine: &mut DiagnosticEngine) -> TokenType {
    let mut terminated = false;
    while let Some(c) = self.peek() {
      if c == '"' {
        self.advance();
        terminated = true;
        break;
      }
      if c == '\n' {
        break;
      }
      self.advance();
    }

    if !terminated {
      engine.emit(
        Diagnostic::new(DiagnosticCode::UnterminatedString, "unterminated string literal")
          .with_label(Label::primary(
            Span::new("input", self.line, self.start_column, self.current - self.start),
            Some("string starts here".to_string()),
          ))
          .with_help("close the string with a matching '\"'"),
      );
    }

    TokenType::String
  }

  fn tokenize_number(&mut self) -> TokenType {
    while let Some(c) = self.peek() {
      if !c.is_ascii_digit() {
        break;
      }
      self.advance();
    }

    // Overflow is a parser concern (P0010), not the lexer's: the raw digit
    // text survives untouched in the token's lexeme either way.
    TokenType::Int
  }

  fn tokenize_identifier(&mut self) -> TokenType {
    while let Some(c) = self.peek() {
      if !c.is_ascii_alphanumeric() && c != '_' {
        break;
      }
      self.advance();
    }

    match self.current_lexeme().as_str() {
      "let" => TokenType::Let,
      "fn" => TokenType::Fn,
      "return" => TokenType::Return,
      "if" => TokenType::If,
      "else" => TokenType::Else,
      "true" => TokenType::True,
      "false" => TokenType::False,
      "null" => TokenType::Null,
      "class" => TokenType::Class,
      "this" => TokenType::This,
      "super" => TokenType::Super,
      _ => TokenType::Identifier,
    }
  }

  fn add_token(&mut self, token_type: TokenType) {
    let raw = self.current_lexeme();

    let lexeme = match token_type {
      TokenType::String if raw.len() >= 2 => raw[1..raw.len() - 1].to_string(),
      TokenType::String => String::new(),
      _ => raw,
    };

    let literal = match token_type {
      TokenType::String => Literal::String(lexeme.clone()),
      TokenType::Int => Literal::Int(lexeme.parse::<i64>().unwrap_or(0)),
      TokenType::True => Literal::Boolean(true),
      TokenType::False => Literal::Boolean(false),
      _ => Literal::None,
    };

    self
      .tokens
      .push(Token::new(token_type, lexeme, literal, (self.line, self.start_column)));
  }

  fn is_at_end(&self) -> bool {
    self.current >= self.source.len()
  }

  fn advance(&mut self) -> char {
    let c = self.source[self.current];
    self.current += 1;
    self.column += 1;
    c
  }

  fn peek(&self) -> Option<char> {
    self.source.get(self.current).copied()
  }

  fn match_char(&self, expected: char) -> bool {
    self.peek() == Some(expected)
  }

  fn current_lexeme(&self) -> String {
    self.source[self.start..self.current].iter().collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn scan(source: &str) -> (Vec<TokenType>, DiagnosticEngine) {
    let mut scanner = Scanner::new(source);
    let mut engine = DiagnosticEngine::new();
    scanner.scan(&mut engine);
    (scanner.tokens.iter().map(|t| t.token_type).collect(), engine)
  }

  #[test]
  fn scans_let_statement() {
    let (kinds, engine) = scan("let a = 5;");
    assert!(!engine.has_errors());
    assert_eq!(
      kinds,
      vec![
        TokenType::Let,
        TokenType::Identifier,
        TokenType::Equal,
        TokenType::Int,
        TokenType::SemiColon,
        TokenType::Eof,
      ]
    );
  }

  #[test]
  fn scans_two_char_operators() {
    let (kinds, engine) = scan("a == b != c && d || e <= f >= g;");
    assert!(!engine.has_errors());
    assert!(kinds.contains(&TokenType::EqualEqual));
    assert!(kinds.contains(&TokenType::BangEqual));
    assert!(kinds.contains(&TokenType::And));
    assert!(kinds.contains(&TokenType::Or));
    assert!(kinds.contains(&TokenType::LessEqual));
    assert!(kinds.contains(&TokenType::GreaterEqual));
  }

  #[test]
  fn scans_hash_literal_delimiters() {
    let (kinds, engine) = scan("{| \"k\": 1 |}");
    assert!(!engine.has_errors());
    assert_eq!(kinds[0], TokenType::HashOpen);
    assert_eq!(*kinds.last().unwrap(), TokenType::Eof);
    assert!(kinds.contains(&TokenType::HashClose));
  }

  #[test]
  fn single_ampersand_is_illegal() {
    let (_, engine) = scan("a & b;");
    assert!(engine.has_errors());
  }

  #[test]
  fn unterminated_string_is_flagged() {
    let (_, engine) = scan("let a = \"abc;");
    assert!(engine.has_errors());
  }

  #[test]
  fn skips_line_comments() {
    let (kinds, engine) = scan("// a comment\nlet a = 1;");
    assert!(!engine.has_errors());
    assert_eq!(kinds[0], TokenType::Let);
  }
}
