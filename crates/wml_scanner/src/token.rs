//! Token information produced by the scanner.

use wml_ast::syntax_kind::SyntaxKind;
use wml_ast::types::TokenFlags;
use wml_core::text::TextRange;

/// Information about a scanned token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    /// The kind of token.
    pub kind: SyntaxKind,
    /// Start position in the source text.
    pub pos: u32,
    /// End position in the source text (exclusive).
    pub end: u32,
    /// The token value: identifier text, decoded string contents, Lua code,
    /// directive argument, comment text without terminator, or punctuation.
    pub text: String,
    pub flags: TokenFlags,
}

impl TokenInfo {
    /// The length of this token in bytes.
    pub fn len(&self) -> u32 {
        self.end - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos == self.end
    }

    pub fn range(&self) -> TextRange {
        TextRange::new(self.pos, self.end)
    }

    pub fn has_preceding_line_break(&self) -> bool {
        self.flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }

    pub fn has_preceding_whitespace(&self) -> bool {
        self.flags.contains(TokenFlags::PRECEDING_WHITESPACE)
    }
}
