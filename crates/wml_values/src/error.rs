//! Value refinement errors.

use wml_ast::NodeId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    #[error("node {0:?} is not a key")]
    NotAKey(NodeId),
    #[error("empty value")]
    Empty,
    #[error("'{0}' is not a direction")]
    InvalidDirection(String),
    #[error("'{0}' is not a progressive segment")]
    InvalidProgressive(String),
    #[error("'{0}' is not an image path")]
    InvalidPath(String),
}
