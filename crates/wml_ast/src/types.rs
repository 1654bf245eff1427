//! Flag types and ids shared by tokens and nodes.

use std::fmt;

bitflags::bitflags! {
    /// Flags attached to scanned tokens.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TokenFlags: u8 {
        const NONE                  = 0;
        /// Horizontal whitespace directly precedes the token.
        const PRECEDING_WHITESPACE  = 1 << 0;
        /// The token is the first on its line.
        const PRECEDING_LINE_BREAK  = 1 << 1;
        /// String literal or Lua block that reached end of input.
        const UNTERMINATED          = 1 << 2;
        /// Synthetic end of stream emitted after a lexical error.
        const SYNTHETIC             = 1 << 3;
    }
}

bitflags::bitflags! {
    /// Flags attached to document nodes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u8 {
        const NONE              = 0;
        /// The node was closed implicitly (missing `[/tag]`, `#enddef`,
        /// `#endif` or `}`).
        const UNTERMINATED      = 1 << 0;
        /// The closing name differs from the opening name.
        const MISMATCHED_CLOSE  = 1 << 1;
        /// A string value that was preceded by `_` (translatable).
        const TRANSLATABLE      = 1 << 2;
    }
}

/// Index of a node in a document's arena.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The four conditional directive flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreprocKind {
    IfDef,
    IfNDef,
    IfHave,
    IfNHave,
}

impl PreprocKind {
    pub fn from_syntax_kind(kind: crate::SyntaxKind) -> Option<Self> {
        use crate::SyntaxKind;
        Some(match kind {
            SyntaxKind::IfDefDirective => PreprocKind::IfDef,
            SyntaxKind::IfNDefDirective => PreprocKind::IfNDef,
            SyntaxKind::IfHaveDirective => PreprocKind::IfHave,
            SyntaxKind::IfNHaveDirective => PreprocKind::IfNHave,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PreprocKind::IfDef => "#ifdef",
            PreprocKind::IfNDef => "#ifndef",
            PreprocKind::IfHave => "#ifhave",
            PreprocKind::IfNHave => "#ifnhave",
        }
    }
}

impl fmt::Display for PreprocKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
