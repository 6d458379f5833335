//! Static scope-resolution pass that runs between parsing and evaluation.
//!
//! [`Resolver`] walks the AST once, matching every variable/`this`/`super`
//! use to the lexical scope that declares it and recording the distance
//! (in scopes) between use and declaration. The evaluator consults this
//! table (`HashMap<NodeId, usize>`) instead of re-deriving scope depth at
//! every lookup.

pub mod resolver;

pub use resolver::Resolver;
