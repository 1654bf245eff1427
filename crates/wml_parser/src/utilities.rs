//! Parser utility functions.

use wml_ast::syntax_kind::SyntaxKind;

/// Check if a token kind can start a key value segment.
pub fn is_key_value_start(kind: SyntaxKind) -> bool {
    kind.is_value_token()
        || matches!(
            kind,
            SyntaxKind::OpenBraceToken | SyntaxKind::LuaCodeBlock | SyntaxKind::OpenBracketToken
        )
}

/// Tokens passed through a macro call as raw macro tokens.
pub fn is_macro_token(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::EqualsToken
            | SyntaxKind::PlusToken
            | SyntaxKind::OpenBracketToken
            | SyntaxKind::CloseBracketToken
            | SyntaxKind::OpenBracketSlashToken
    )
}

/// `#else`, `#endif` and `#enddef`: directives that close a construct.
pub fn is_closing_directive(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::ElseDirective | SyntaxKind::EndIfDirective | SyntaxKind::EndDefDirective
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_value_start() {
        assert!(is_key_value_start(SyntaxKind::StringLiteral));
        assert!(is_key_value_start(SyntaxKind::OpenBraceToken));
        assert!(is_key_value_start(SyntaxKind::OpenBracketToken));
        assert!(!is_key_value_start(SyntaxKind::PlusToken));
        assert!(!is_key_value_start(SyntaxKind::NewLineToken));
    }
}
