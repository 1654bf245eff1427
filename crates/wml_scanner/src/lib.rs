//! wml_scanner: Tokenizer for WML source text.
//!
//! Produces a flat token sequence with support for:
//! - Line-oriented preprocessor directives and comments
//! - String literals with backslash escapes
//! - Verbatim `<<...>>` Lua blocks (shortest match)
//! - A catch-all token so no input is ever rejected outright

mod char_codes;
mod scanner;
mod token;

pub use scanner::{Scanner, ScannerState};
pub use token::TokenInfo;
