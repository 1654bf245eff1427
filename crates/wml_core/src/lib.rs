//! wml_core: Core utilities shared by the WML scanner, parser and tools.
//!
//! Provides text spans and line maps, string interning, the index arena
//! that backs every document tree, and small collection helpers.

pub mod arena;
pub mod collections;
pub mod intern;
pub mod text;

// Re-export commonly used types
pub use arena::Arena;
pub use intern::{InternedString, StringInterner};
pub use text::{LineAndColumn, LineMap, TextRange, TextSpan};
