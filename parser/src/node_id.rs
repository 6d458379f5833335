use uuid::Uuid;

/// Opaque identity for a variable-using AST node (`IdentifierExpr`, the
/// target of an `AssignExpr`, `ThisExpr`, `SuperExpr`). Minted once at
/// construction time and never recomputed; the resolver keys its depth
/// side-table by this rather than by name, since two identifiers named
/// the same thing at different call sites must not collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Uuid);

impl NodeId {
  pub fn new() -> Self {
    Self(Uuid::now_v7())
  }
}

impl Default for NodeId {
  fn default() -> Self {
    Self::new()
  }
}
