//! Buffered token access for the grammar engine.
//!
//! Wraps the scanner, hides horizontal whitespace from the grammar and gives
//! arbitrary lookahead plus mark/rewind without re-scanning characters.

use wml_ast::node::Token;
use wml_ast::syntax_kind::SyntaxKind;
use wml_diagnostics::DiagnosticCollection;
use wml_scanner::{Scanner, TokenInfo};

/// Consumed tokens are dropped in batches of at least this size.
const COMPACT_THRESHOLD: usize = 256;

/// A saved stream position. Must be handed back to [`TokenStream::rewind`]
/// or [`TokenStream::release`].
#[derive(Debug)]
#[must_use]
pub struct Mark {
    position: usize,
}

pub struct TokenStream<'a> {
    scanner: Scanner<'a>,
    /// Structural tokens, starting at absolute index `base`.
    buffer: Vec<TokenInfo>,
    /// Index of the current token in `buffer`.
    index: usize,
    base: usize,
    open_marks: usize,
    /// End of the last consumed token.
    last_end: u32,
    trivia: Vec<Token>,
    collect_trivia: bool,
}

impl<'a> TokenStream<'a> {
    pub fn new(scanner: Scanner<'a>) -> Self {
        Self {
            scanner,
            buffer: Vec::new(),
            index: 0,
            base: 0,
            open_marks: 0,
            last_end: 0,
            trivia: Vec::new(),
            collect_trivia: true,
        }
    }

    pub fn set_collect_trivia(&mut self, collect: bool) {
        self.collect_trivia = collect;
    }

    /// Make sure `buffer[index + k]` exists, or the stream is exhausted.
    fn fill(&mut self, k: usize) {
        while self.buffer.len() <= self.index + k {
            let Some(token) = self.scanner.next() else {
                return;
            };
            if token.kind.is_trivia() {
                if self.collect_trivia {
                    self.trivia.push(Token::new(token.kind, token.range()));
                }
                continue;
            }
            self.buffer.push(token);
        }
    }

    /// The `k`-th unconsumed token. Past the end this is the end of file token.
    pub fn peek(&mut self, k: usize) -> &TokenInfo {
        self.fill(k);
        // The scanner always ends with an end of file token, which is never
        // consumed, so the buffer is not empty here.
        let i = (self.index + k).min(self.buffer.len() - 1);
        &self.buffer[i]
    }

    #[inline]
    pub fn current(&mut self) -> SyntaxKind {
        self.peek(0).kind
    }

    #[inline]
    pub fn nth(&mut self, k: usize) -> SyntaxKind {
        self.peek(k).kind
    }

    #[inline]
    pub fn at(&mut self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    /// Consume the current token. The end of file token is never consumed.
    pub fn bump(&mut self) -> TokenInfo {
        let token = self.peek(0).clone();
        if token.kind != SyntaxKind::EndOfFileToken {
            self.index += 1;
            self.last_end = token.end;
            self.compact();
        }
        token
    }

    pub fn eat(&mut self, kind: SyntaxKind) -> Option<TokenInfo> {
        if self.at(kind) {
            Some(self.bump())
        } else {
            None
        }
    }

    /// Absolute index of the current token; increases with every bump.
    pub fn position(&self) -> usize {
        self.base + self.index
    }

    pub fn last_end(&self) -> u32 {
        self.last_end
    }

    pub fn mark(&mut self) -> Mark {
        self.open_marks += 1;
        Mark {
            position: self.position(),
        }
    }

    /// Return to `mark`, releasing it.
    pub fn rewind(&mut self, mark: Mark) {
        self.index = mark.position - self.base;
        self.last_end = match self.index {
            0 => 0,
            i => self.buffer[i - 1].end,
        };
        self.release(mark);
    }

    /// Commit to everything consumed since `mark`.
    pub fn release(&mut self, mark: Mark) {
        debug_assert!(mark.position >= self.base);
        self.open_marks -= 1;
        self.compact();
    }

    /// Run `f` and restore the stream position afterwards.
    pub fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let mark = self.mark();
        let result = f(self);
        self.rewind(mark);
        result
    }

    fn compact(&mut self) {
        // Keep one consumed token so `rewind` can restore `last_end`.
        if self.open_marks == 0 && self.index > COMPACT_THRESHOLD {
            let drop = self.index - 1;
            self.buffer.drain(..drop);
            self.base += drop;
            self.index -= drop;
        }
    }

    pub fn take_trivia(&mut self) -> Vec<Token> {
        std::mem::take(&mut self.trivia)
    }

    pub fn take_diagnostics(&mut self) -> DiagnosticCollection {
        self.scanner.take_diagnostics()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(source: &str) -> TokenStream<'_> {
        TokenStream::new(Scanner::new("test.cfg", source))
    }

    #[test]
    fn test_whitespace_is_hidden() {
        let mut tokens = stream("a = b");
        assert_eq!(tokens.nth(0), SyntaxKind::Identifier);
        assert_eq!(tokens.nth(1), SyntaxKind::EqualsToken);
        assert_eq!(tokens.nth(2), SyntaxKind::Identifier);
        assert_eq!(tokens.nth(3), SyntaxKind::EndOfFileToken);
        assert_eq!(tokens.nth(10), SyntaxKind::EndOfFileToken);
        while tokens.current() != SyntaxKind::EndOfFileToken {
            tokens.bump();
        }
        assert_eq!(tokens.take_trivia().len(), 2);
    }

    #[test]
    fn test_bump_stops_at_end_of_file() {
        let mut tokens = stream("x");
        tokens.bump();
        let position = tokens.position();
        assert_eq!(tokens.bump().kind, SyntaxKind::EndOfFileToken);
        assert_eq!(tokens.position(), position);
        assert_eq!(tokens.last_end(), 1);
    }

    #[test]
    fn test_mark_and_rewind() {
        let mut tokens = stream("a\n+ b");
        let mark = tokens.mark();
        tokens.bump();
        tokens.bump();
        assert_eq!(tokens.current(), SyntaxKind::PlusToken);
        tokens.rewind(mark);
        assert_eq!(tokens.current(), SyntaxKind::Identifier);
        assert_eq!(tokens.position(), 0);
    }

    #[test]
    fn test_look_ahead_restores_position() {
        let mut tokens = stream("a\n+ b");
        let after_line = tokens.look_ahead(|t| {
            t.bump();
            t.bump();
            t.current()
        });
        assert_eq!(after_line, SyntaxKind::PlusToken);
        assert_eq!(tokens.current(), SyntaxKind::Identifier);
    }

    #[test]
    fn test_compaction_keeps_positions() {
        let source = "a ".repeat(1000);
        let mut tokens = stream(&source);
        for _ in 0..600 {
            tokens.bump();
        }
        assert_eq!(tokens.position(), 600);
        let mark = tokens.mark();
        for _ in 0..300 {
            tokens.bump();
        }
        tokens.rewind(mark);
        assert_eq!(tokens.position(), 600);
        assert_eq!(tokens.peek(0).pos, 1200);
        assert_eq!(tokens.last_end(), 1199);
    }
}
