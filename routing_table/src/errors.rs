use thiserror::Error;

/// Tree-shape invariant violations. Spec marks these as internal bugs —
/// callers are expected to let them propagate rather than handle them.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum BinaryTreeError {
    #[error("cannot split a node that is already a branch")]
    AlreadyBranch,
}
