/// The kind of lexeme a [`super::Token`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
  // Single-character tokens.
  LeftParen,
  RightParen,
  LeftBrace,
  RightBrace,
  LeftBracket,
  RightBracket,
  Comma,
  Dot,
  Minus,
  Plus,
  Divide,
  Star,
  SemiColon,
  Colon,

  // One or two character tokens.
  Bang,
  BangEqual,
  Equal,
  EqualEqual,
  Greater,
  GreaterEqual,
  Less,
  LessEqual,
  And,
  Or,
  HashOpen,
  HashClose,

  // Literals.
  Identifier,
  String,
  Int,

  // Keywords.
  Let,
  Fn,
  Return,
  If,
  Else,
  True,
  False,
  Null,
  Class,
  This,
  Super,

  Eof,
  Illegal,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
  Int(i64),
  String(String),
  Boolean(bool),
  None,
}

impl std::fmt::Display for Literal {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Literal::Int(n) => write!(f, "{}", n),
      Literal::String(s) => write!(f, "{}", s),
      Literal::Boolean(b) => write!(f, "{}", b),
      Literal::None => write!(f, "none"),
    }
  }
}
