/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
  Error,
  Warning,
  Note,
}

/// Unique identifier for each kind of diagnostic the pipeline can emit.
///
/// Codes are grouped by the layer that produces them: lexer (L0xxx),
/// parser (P0xxx), resolver (R0xxx), evaluator (E0xxx).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
  // Lexer
  IllegalCharacter,
  UnterminatedString,

  // Parser
  NoPrefixParslet,
  UnexpectedToken,
  MissingIdentifier,
  MissingSemicolon,
  MissingBrace,
  MissingParen,
  MissingBracket,
  WrongAssignmentTarget,
  WrongClassMember,
  IntegerOverflow,

  // Resolver
  ReadInOwnInitializer,
  AlreadyDeclared,
  InheritFromSelf,
  ReturnValueInInitializer,
  ThisOutsideClass,
  SuperOutsideClass,
  SuperWithoutSuperclass,

  // Evaluator / runtime
  UnknownOperator,
  TypeMismatch,
  IdentifierNotFound,
  NotAFunction,
  WrongArgumentCount,
  WrongGetTarget,
  WrongSetTarget,
  UndefinedProperty,
  SuperclassNotClass,
  OutOfBounds,
  NotHashableKey,
  DivisionByZero,
  InternalResolverError,

  // CLI
  FileNotFound,
  InvalidArguments,
}

impl DiagnosticCode {
  pub fn code(&self) -> &'static str {
    match self {
      Self::IllegalCharacter => "L0001",
      Self::UnterminatedString => "L0002",

      Self::NoPrefixParslet => "P0001",
      Self::UnexpectedToken => "P0002",
      Self::MissingIdentifier => "P0003",
      Self::MissingSemicolon => "P0004",
      Self::MissingBrace => "P0005",
      Self::MissingParen => "P0006",
      Self::MissingBracket => "P0007",
      Self::WrongAssignmentTarget => "P0008",
      Self::WrongClassMember => "P0009",
      Self::IntegerOverflow => "P0010",

      Self::ReadInOwnInitializer => "R0001",
      Self::AlreadyDeclared => "R0002",
      Self::InheritFromSelf => "R0003",
      Self::ReturnValueInInitializer => "R0004",
      Self::ThisOutsideClass => "R0005",
      Self::SuperOutsideClass => "R0006",
      Self::SuperWithoutSuperclass => "R0007",

      Self::UnknownOperator => "E0001",
      Self::TypeMismatch => "E0002",
      Self::IdentifierNotFound => "E0003",
      Self::NotAFunction => "E0004",
      Self::WrongArgumentCount => "E0005",
      Self::WrongGetTarget => "E0006",
      Self::WrongSetTarget => "E0007",
      Self::UndefinedProperty => "E0008",
      Self::SuperclassNotClass => "E0009",
      Self::OutOfBounds => "E0010",
      Self::NotHashableKey => "E0011",
      Self::DivisionByZero => "E0012",
      Self::InternalResolverError => "E0099",

      Self::FileNotFound => "C0001",
      Self::InvalidArguments => "C0002",
    }
  }

  pub fn severity(&self) -> Severity {
    Severity::Error
  }
}
