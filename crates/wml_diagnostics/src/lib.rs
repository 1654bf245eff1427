//! wml_diagnostics: Diagnostic messages and error reporting infrastructure.
//!
//! Every problem found while scanning or parsing a WML document is reported
//! as a [`Diagnostic`] rather than aborting the parse. Diagnostics carry the
//! offending source span, a resolved message, a stable `WMLnnnn` code, a
//! severity ([`DiagnosticCategory`]) and the taxonomy bucket it belongs to
//! ([`DiagnosticKind`]).

use wml_core::text::TextSpan;
use std::fmt;

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Warning,
    Error,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Error => write!(f, "error"),
        }
    }
}

/// Which stage of the pipeline a diagnostic comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Unterminated string literal or Lua block.
    Lex,
    /// Unexpected or missing tokens, unclosed constructs.
    Syntax,
    /// Well-formed but suspicious structure, e.g. a mismatched closing tag.
    Structural,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::Lex => write!(f, "lex"),
            DiagnosticKind::Syntax => write!(f, "syntax"),
            DiagnosticKind::Structural => write!(f, "structural"),
        }
    }
}

/// A diagnostic message template with a code, category and kind.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    /// The diagnostic code (e.g., 1001, 2004).
    pub code: u32,
    pub category: DiagnosticCategory,
    pub kind: DiagnosticKind,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The source name this diagnostic refers to, if any.
    pub file: Option<String>,
    /// The source text span where this diagnostic occurred, if any.
    pub span: Option<TextSpan>,
    pub message_text: String,
    pub code: u32,
    pub category: DiagnosticCategory,
    pub kind: DiagnosticKind,
    /// Related diagnostics, e.g. the opening tag of a mismatched close.
    pub related_information: Vec<Diagnostic>,
}

impl Diagnostic {
    /// Create a new diagnostic without location info.
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            file: None,
            span: None,
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
            kind: message.kind,
            related_information: Vec::new(),
        }
    }

    /// Create a new diagnostic with file and span info.
    pub fn with_location(
        file: impl Into<String>,
        span: TextSpan,
        message: &DiagnosticMessage,
        args: &[&str],
    ) -> Self {
        Self {
            file: Some(file.into()),
            span: Some(span),
            ..Self::new(message, args)
        }
    }

    /// Add related diagnostic information.
    pub fn with_related(mut self, related: Diagnostic) -> Self {
        self.related_information.push(related);
        self
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }

    /// Byte offset of the diagnostic, 0 when it has no location.
    pub fn offset(&self) -> u32 {
        self.span.map(|s| s.start).unwrap_or(0)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref file) = self.file {
            write!(f, "{}", file)?;
            if let Some(span) = self.span {
                write!(f, "({})", span.start)?;
            }
            write!(f, ": ")?;
        }
        write!(f, "{} WML{}: {}", self.category, self.code, self.message_text)
    }
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// A collection of diagnostics accumulated while processing a document.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.len() - self.error_count()
    }

    /// Number of diagnostics of the given kind.
    pub fn count_of(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn extend(&mut self, other: DiagnosticCollection) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// Sort diagnostics by file and position. The sort is stable, so
    /// diagnostics at the same offset keep the order they were reported in.
    pub fn sort(&mut self) {
        self.diagnostics.sort_by(|a, b| {
            a.file
                .cmp(&b.file)
                .then_with(|| a.offset().cmp(&b.offset()))
        });
    }
}

impl<'a> IntoIterator for &'a DiagnosticCollection {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $kind:ident, $msg:expr) => {
            DiagnosticMessage {
                code: $code,
                category: DiagnosticCategory::Error,
                kind: DiagnosticKind::$kind,
                message: $msg,
            }
        };
        ($code:expr, Warning, $kind:ident, $msg:expr) => {
            DiagnosticMessage {
                code: $code,
                category: DiagnosticCategory::Warning,
                kind: DiagnosticKind::$kind,
                message: $msg,
            }
        };
    }

    // ========================================================================
    // Scanner errors (1000-1999)
    // ========================================================================
    pub const UNTERMINATED_STRING_LITERAL: DiagnosticMessage = diag!(1001, Error, Lex, "Unterminated string literal.");
    pub const UNTERMINATED_LUA_BLOCK: DiagnosticMessage = diag!(1002, Error, Lex, "Unterminated Lua block, '>>' expected.");

    // ========================================================================
    // Grammar errors (2000-2999)
    // ========================================================================
    pub const UNEXPECTED_0: DiagnosticMessage = diag!(2001, Error, Syntax, "Unexpected {0}.");
    pub const _0_EXPECTED: DiagnosticMessage = diag!(2002, Error, Syntax, "{0} expected.");
    pub const EXPECTED_0_BUT_FOUND_1: DiagnosticMessage = diag!(2003, Error, Syntax, "Expected {0} but found {1}.");
    pub const TAG_0_IS_NOT_CLOSED: DiagnosticMessage = diag!(2004, Error, Syntax, "Tag '[{0}]' is not closed, '[/{0}]' expected.");
    pub const CLOSING_TAG_0_HAS_NO_OPENING_TAG: DiagnosticMessage = diag!(2005, Error, Syntax, "Closing tag '[/{0}]' has no matching opening tag.");
    pub const KEY_0_OUTSIDE_OF_TAG: DiagnosticMessage = diag!(2006, Error, Syntax, "Key '{0}' must appear inside a tag.");
    pub const ENDDEF_EXPECTED_FOR_0: DiagnosticMessage = diag!(2007, Error, Syntax, "'#enddef' expected to close the definition of '{0}'.");
    pub const ENDIF_EXPECTED_FOR_0: DiagnosticMessage = diag!(2008, Error, Syntax, "'#endif' expected to close '{0}'.");
    pub const ELSE_REQUIRES_A_BODY: DiagnosticMessage = diag!(2009, Error, Syntax, "'#else' must be followed by at least one expression.");
    pub const MAXIMUM_NESTING_DEPTH_0_EXCEEDED: DiagnosticMessage = diag!(2010, Error, Syntax, "Maximum nesting depth of {0} exceeded.");
    pub const DIRECTIVE_0_HAS_NO_OPENING_DIRECTIVE: DiagnosticMessage = diag!(2011, Error, Syntax, "'{0}' has no matching opening directive.");
    pub const CLOSE_BRACE_EXPECTED_FOR_MACRO_0: DiagnosticMessage = diag!(2012, Error, Syntax, "'}' expected to close the call of macro '{0}'.");

    // ========================================================================
    // Structural warnings (3000-3999)
    // ========================================================================
    pub const CLOSING_TAG_1_DOES_NOT_MATCH_0: DiagnosticMessage = diag!(3001, Warning, Structural, "Closing tag '[/{1}]' does not match opening tag '[{0}]'.");
    pub const OPENING_TAG_0_IS_HERE: DiagnosticMessage = diag!(3002, Warning, Structural, "Tag '[{0}]' is opened here.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message() {
        let msg = format_message("Closing tag '[/{1}]' does not match opening tag '[{0}]'.", &["foo", "bar"]);
        assert_eq!(msg, "Closing tag '[/bar]' does not match opening tag '[foo]'.");
    }

    #[test]
    fn test_format_message_no_args() {
        let msg = format_message("Unterminated string literal.", &[]);
        assert_eq!(msg, "Unterminated string literal.");
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::with_location(
            "units.cfg",
            TextSpan::new(10, 5),
            &messages::TAG_0_IS_NOT_CLOSED,
            &["unit"],
        );
        assert_eq!(
            diag.to_string(),
            "units.cfg(10): error WML2004: Tag '[unit]' is not closed, '[/unit]' expected."
        );
    }

    #[test]
    fn test_diagnostic_without_location() {
        let diag = Diagnostic::new(&messages::UNTERMINATED_LUA_BLOCK, &[]);
        assert!(diag.file.is_none());
        assert!(diag.span.is_none());
        assert_eq!(diag.code, 1002);
        assert_eq!(diag.kind, DiagnosticKind::Lex);
        assert!(diag.is_error());
    }

    #[test]
    fn test_diagnostic_collection_counts() {
        let mut collection = DiagnosticCollection::new();
        assert!(collection.is_empty());

        collection.add(Diagnostic::new(&messages::UNEXPECTED_0, &["']'"]));
        collection.add(Diagnostic::new(&messages::CLOSING_TAG_1_DOES_NOT_MATCH_0, &["a", "b"]));
        assert!(collection.has_errors());
        assert_eq!(collection.error_count(), 1);
        assert_eq!(collection.warning_count(), 1);
        assert_eq!(collection.count_of(DiagnosticKind::Structural), 1);
    }

    #[test]
    fn test_diagnostic_collection_sort_is_stable() {
        let mut collection = DiagnosticCollection::new();
        collection.add(Diagnostic::with_location("a.cfg", TextSpan::new(10, 1), &messages::UNEXPECTED_0, &["x"]));
        collection.add(Diagnostic::with_location("a.cfg", TextSpan::new(5, 1), &messages::UNEXPECTED_0, &["y"]));
        collection.add(Diagnostic::with_location("a.cfg", TextSpan::new(5, 1), &messages::UNEXPECTED_0, &["z"]));
        collection.sort();
        let texts: Vec<_> = collection.iter().map(|d| d.message_text.as_str()).collect();
        assert_eq!(texts, vec!["Unexpected y.", "Unexpected z.", "Unexpected x."]);
    }

    #[test]
    fn test_diagnostic_with_related() {
        let primary = Diagnostic::new(&messages::CLOSING_TAG_1_DOES_NOT_MATCH_0, &["foo", "bar"]);
        let related = Diagnostic::new(&messages::OPENING_TAG_0_IS_HERE, &["foo"]);
        let combined = primary.with_related(related);
        assert_eq!(combined.related_information.len(), 1);
    }
}
