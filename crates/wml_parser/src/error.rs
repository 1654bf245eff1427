//! Errors raised inside grammar productions.

use wml_ast::syntax_kind::SyntaxKind;
use wml_core::text::TextRange;

/// A failed production. Never escapes the parser: the expression list that
/// called the production turns it into a diagnostic and resynchronises.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected {}", .found.describe())]
    Unexpected {
        found: SyntaxKind,
        range: TextRange,
        /// Token kinds that would have been accepted; empty when any
        /// expression start would do.
        expected: Vec<SyntaxKind>,
        /// The offending token is the end of file synthesised after a
        /// lexical error.
        synthetic: bool,
    },
    #[error("maximum nesting depth of {limit} exceeded")]
    TooDeep { limit: u32, range: TextRange },
}

impl ParseError {
    pub fn range(&self) -> TextRange {
        match self {
            ParseError::Unexpected { range, .. } | ParseError::TooDeep { range, .. } => *range,
        }
    }
}

pub type PResult<T> = Result<T, ParseError>;

/// `'a' or 'b'` style description of a set of token kinds.
pub fn describe_expected(expected: &[SyntaxKind]) -> String {
    let parts: Vec<String> = expected.iter().map(|kind| kind.describe()).collect();
    match parts.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} or {}", rest.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_expected() {
        assert_eq!(describe_expected(&[SyntaxKind::Identifier]), "identifier");
        assert_eq!(
            describe_expected(&[SyntaxKind::Identifier, SyntaxKind::PlusToken, SyntaxKind::CloseBracketToken]),
            "identifier, '+' or ']'"
        );
    }

    #[test]
    fn test_display() {
        let err = ParseError::TooDeep { limit: 3, range: TextRange::new(0, 1) };
        assert_eq!(err.to_string(), "maximum nesting depth of 3 exceeded");
    }
}
