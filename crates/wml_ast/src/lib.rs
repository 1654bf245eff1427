//! wml_ast: Document model for WML.
//!
//! This module defines the SyntaxKind enum, token and node flags, the
//! arena-backed document tree and a visitor over it.

pub mod node;
pub mod syntax_kind;
pub mod types;
pub mod visitor;

// Re-export key types
pub use node::*;
pub use syntax_kind::SyntaxKind;
pub use types::*;
