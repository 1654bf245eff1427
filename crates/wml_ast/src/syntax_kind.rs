//! SyntaxKind enum - all token and node kinds of the WML grammar.

/// The kind of a syntax token or node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum SyntaxKind {
    // ========================================================================
    // Tokens
    // ========================================================================
    Unknown,
    EndOfFileToken,

    // Trivia and line structure
    WhitespaceTrivia,
    NewLineToken,
    /// `#` to end of line, terminator included.
    CommentToken,

    // Line-oriented preprocessor directives, terminator included
    IfDefDirective,
    IfNDefDirective,
    IfHaveDirective,
    IfNHaveDirective,
    ElseDirective,
    EndIfDirective,
    DefineDirective,
    EndDefDirective,
    TextDomainDirective,

    // Literals
    Identifier,
    StringLiteral,
    /// `<<` ... `>>`
    LuaCodeBlock,

    // Two-character punctuation
    OpenBracketSlashToken,
    DotSlashToken,

    // Single-character punctuation
    OpenBracketToken,
    CloseBracketToken,
    EqualsToken,
    OpenBraceToken,
    CloseBraceToken,
    PlusToken,
    TildeToken,
    UnderscoreToken,
    DotToken,
    DollarToken,
    SlashToken,
    OpenParenToken,
    CloseParenToken,
    /// Any character no other token claims.
    AnyOtherChar,

    // ========================================================================
    // Nodes
    // ========================================================================
    Document,
    Tag,
    Key,
    Value,
    MacroCall,
    MacroToken,
    MacroDefine,
    PreprocIf,
    Textdomain,
    LuaCode,
    ArrayCall,
}

impl SyntaxKind {
    pub fn is_trivia(self) -> bool {
        self == SyntaxKind::WhitespaceTrivia
    }

    /// End of line or a single-line comment (which owns its terminator).
    pub fn is_end_of_line(self) -> bool {
        matches!(self, SyntaxKind::NewLineToken | SyntaxKind::CommentToken)
    }

    pub fn is_directive(self) -> bool {
        matches!(
            self,
            SyntaxKind::IfDefDirective
                | SyntaxKind::IfNDefDirective
                | SyntaxKind::IfHaveDirective
                | SyntaxKind::IfNHaveDirective
                | SyntaxKind::ElseDirective
                | SyntaxKind::EndIfDirective
                | SyntaxKind::DefineDirective
                | SyntaxKind::EndDefDirective
                | SyntaxKind::TextDomainDirective
        )
    }

    /// `#ifdef`, `#ifndef`, `#ifhave` or `#ifnhave`.
    pub fn is_conditional_directive(self) -> bool {
        matches!(
            self,
            SyntaxKind::IfDefDirective
                | SyntaxKind::IfNDefDirective
                | SyntaxKind::IfHaveDirective
                | SyntaxKind::IfNHaveDirective
        )
    }

    /// Tokens that may form a plain value.
    pub fn is_value_token(self) -> bool {
        matches!(
            self,
            SyntaxKind::Identifier
                | SyntaxKind::StringLiteral
                | SyntaxKind::UnderscoreToken
                | SyntaxKind::TildeToken
                | SyntaxKind::DotToken
                | SyntaxKind::DotSlashToken
                | SyntaxKind::DollarToken
                | SyntaxKind::SlashToken
                | SyntaxKind::OpenParenToken
                | SyntaxKind::CloseParenToken
                | SyntaxKind::AnyOtherChar
        )
    }

    pub fn is_node(self) -> bool {
        self >= SyntaxKind::Document
    }

    /// The directive keyword for a directive kind, including the `#`.
    pub fn directive_text(self) -> Option<&'static str> {
        Some(match self {
            SyntaxKind::IfDefDirective => "#ifdef",
            SyntaxKind::IfNDefDirective => "#ifndef",
            SyntaxKind::IfHaveDirective => "#ifhave",
            SyntaxKind::IfNHaveDirective => "#ifnhave",
            SyntaxKind::ElseDirective => "#else",
            SyntaxKind::EndIfDirective => "#endif",
            SyntaxKind::DefineDirective => "#define",
            SyntaxKind::EndDefDirective => "#enddef",
            SyntaxKind::TextDomainDirective => "#textdomain",
            _ => return None,
        })
    }

    /// Map a directive word (without `#`) to its kind.
    pub fn from_directive(word: &str) -> Option<SyntaxKind> {
        Some(match word {
            "ifdef" => SyntaxKind::IfDefDirective,
            "ifndef" => SyntaxKind::IfNDefDirective,
            "ifhave" => SyntaxKind::IfHaveDirective,
            "ifnhave" => SyntaxKind::IfNHaveDirective,
            "else" => SyntaxKind::ElseDirective,
            "endif" => SyntaxKind::EndIfDirective,
            "define" => SyntaxKind::DefineDirective,
            "enddef" => SyntaxKind::EndDefDirective,
            "textdomain" => SyntaxKind::TextDomainDirective,
            _ => return None,
        })
    }

    pub fn punctuation_text(self) -> Option<&'static str> {
        Some(match self {
            SyntaxKind::OpenBracketSlashToken => "[/",
            SyntaxKind::DotSlashToken => "./",
            SyntaxKind::OpenBracketToken => "[",
            SyntaxKind::CloseBracketToken => "]",
            SyntaxKind::EqualsToken => "=",
            SyntaxKind::OpenBraceToken => "{",
            SyntaxKind::CloseBraceToken => "}",
            SyntaxKind::PlusToken => "+",
            SyntaxKind::TildeToken => "~",
            SyntaxKind::UnderscoreToken => "_",
            SyntaxKind::DotToken => ".",
            SyntaxKind::DollarToken => "$",
            SyntaxKind::SlashToken => "/",
            SyntaxKind::OpenParenToken => "(",
            SyntaxKind::CloseParenToken => ")",
            _ => return None,
        })
    }

    /// Human readable description used in diagnostics.
    pub fn describe(self) -> String {
        if let Some(text) = self.punctuation_text().or_else(|| self.directive_text()) {
            return format!("'{}'", text);
        }
        match self {
            SyntaxKind::EndOfFileToken => "end of file",
            SyntaxKind::NewLineToken => "end of line",
            SyntaxKind::CommentToken => "comment",
            SyntaxKind::WhitespaceTrivia => "whitespace",
            SyntaxKind::Identifier => "identifier",
            SyntaxKind::StringLiteral => "string literal",
            SyntaxKind::LuaCodeBlock => "Lua block",
            SyntaxKind::AnyOtherChar => "character",
            _ => "token",
        }
        .to_string()
    }
}

impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_round_trip() {
        for word in ["ifdef", "ifndef", "ifhave", "ifnhave", "else", "endif", "define", "enddef", "textdomain"] {
            let kind = SyntaxKind::from_directive(word).unwrap();
            assert!(kind.is_directive());
            assert_eq!(kind.directive_text(), Some(format!("#{}", word).as_str()));
        }
        assert_eq!(SyntaxKind::from_directive("undef"), None);
    }

    #[test]
    fn test_describe() {
        assert_eq!(SyntaxKind::CloseBracketToken.describe(), "']'");
        assert_eq!(SyntaxKind::EndIfDirective.describe(), "'#endif'");
        assert_eq!(SyntaxKind::NewLineToken.describe(), "end of line");
    }

    #[test]
    fn test_node_kinds_follow_tokens() {
        assert!(SyntaxKind::Tag.is_node());
        assert!(!SyntaxKind::AnyOtherChar.is_node());
    }
}
