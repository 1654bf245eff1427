//! The WML scanner.
//!
//! Converts source text into a stream of tokens that the parser consumes.
//! Every byte of the input belongs to exactly one token: whitespace, line
//! breaks and comments are tokens too, and the parser decides which of them
//! are significant.

use crate::char_codes::*;
use crate::token::TokenInfo;
use wml_ast::syntax_kind::SyntaxKind;
use wml_ast::types::TokenFlags;
use wml_core::text::TextSpan;
use wml_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage};

/// Saved scanner state for lookahead.
#[derive(Debug, Clone)]
pub struct ScannerState {
    pub pos: usize,
    pub token_start: usize,
    pub token: SyntaxKind,
    pub token_value: String,
    pub token_flags: TokenFlags,
    pub finished: bool,
}

/// The scanner converts WML source text into tokens.
pub struct Scanner<'a> {
    file_name: String,
    /// The source text being scanned.
    text: &'a str,
    bytes: &'a [u8],
    /// Current position in the text.
    pos: usize,
    /// Start of the current token.
    token_start: usize,
    /// The current token kind.
    token: SyntaxKind,
    /// The value of the current token.
    token_value: String,
    token_flags: TokenFlags,
    /// Set once an end of file token has been handed out by the iterator.
    finished: bool,
    diagnostics: DiagnosticCollection,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given source text.
    pub fn new(file_name: impl Into<String>, text: &'a str) -> Self {
        Self {
            file_name: file_name.into(),
            text,
            bytes: text.as_bytes(),
            pos: 0,
            token_start: 0,
            token: SyntaxKind::Unknown,
            token_value: String::new(),
            token_flags: TokenFlags::NONE,
            finished: false,
            diagnostics: DiagnosticCollection::new(),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Look ahead: save position, call f, restore position and return result.
    pub fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let state = self.save_state();
        let result = f(self);
        self.restore_state(state);
        result
    }

    /// Get the current token kind.
    #[inline]
    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    /// Get the current token's value.
    #[inline]
    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    #[inline]
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    /// Get the current position (end of current token).
    #[inline]
    pub fn token_end(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn token_flags(&self) -> TokenFlags {
        self.token_flags
    }

    pub fn diagnostics(&self) -> &DiagnosticCollection {
        &self.diagnostics
    }

    /// Take the accumulated diagnostics, leaving an empty collection.
    pub fn take_diagnostics(&mut self) -> DiagnosticCollection {
        std::mem::take(&mut self.diagnostics)
    }

    /// Get a TokenInfo for the current token.
    pub fn token_info(&self) -> TokenInfo {
        TokenInfo {
            kind: self.token,
            pos: self.token_start as u32,
            end: self.pos as u32,
            text: self.token_value.clone(),
            flags: self.token_flags,
        }
    }

    pub fn save_state(&self) -> ScannerState {
        ScannerState {
            pos: self.pos,
            token_start: self.token_start,
            token: self.token,
            token_value: self.token_value.clone(),
            token_flags: self.token_flags,
            finished: self.finished,
        }
    }

    pub fn restore_state(&mut self, state: ScannerState) {
        self.pos = state.pos;
        self.token_start = state.token_start;
        self.token = state.token;
        self.token_value = state.token_value;
        self.token_flags = state.token_flags;
        self.finished = state.finished;
    }

    /// Restart scanning at `pos`. Positions past the end clamp to the end.
    pub fn reset(&mut self, pos: usize) {
        let mut pos = pos.min(self.bytes.len());
        while !self.text.is_char_boundary(pos) {
            pos -= 1;
        }
        self.pos = pos;
        self.token_start = pos;
        self.token = SyntaxKind::Unknown;
        self.token_value.clear();
        self.token_flags = TokenFlags::NONE;
        self.finished = false;
    }

    // ========================================================================
    // Character access
    // ========================================================================

    #[inline]
    fn byte_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    #[inline]
    fn is_eof(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    #[inline]
    fn slice(&self, start: usize, end: usize) -> &'a str {
        self.text.get(start..end).unwrap_or_default()
    }

    /// Flags derived from the bytes directly before `start`.
    fn preceding_flags(&self, start: usize) -> TokenFlags {
        let mut flags = TokenFlags::NONE;
        let mut i = start;
        while i > 0 && is_horizontal_space(self.bytes[i - 1]) {
            i -= 1;
        }
        if i < start {
            flags |= TokenFlags::PRECEDING_WHITESPACE;
        }
        if i == 0 || is_line_break(self.bytes[i - 1]) {
            flags |= TokenFlags::PRECEDING_LINE_BREAK;
        }
        flags
    }

    /// Length of the line terminator at `pos`, 0 if there is none.
    fn line_break_len(&self, pos: usize) -> usize {
        match self.bytes.get(pos) {
            Some(&CARRIAGE_RETURN) if self.bytes.get(pos + 1) == Some(&LINE_FEED) => 2,
            Some(&b) if is_line_break(b) => 1,
            _ => 0,
        }
    }

    fn report(&mut self, start: usize, length: usize, message: &DiagnosticMessage) {
        let span = TextSpan::new(start as u32, length as u32);
        // A reset may rescan an erroneous token; report it once.
        if self
            .diagnostics
            .iter()
            .any(|d| d.code == message.code && d.span == Some(span))
        {
            return;
        }
        self.diagnostics
            .add(Diagnostic::with_location(self.file_name.clone(), span, message, &[]));
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    /// Scan the next token and return its kind.
    pub fn scan(&mut self) -> SyntaxKind {
        self.token_value.clear();
        self.token_start = self.pos;
        self.token_flags = self.preceding_flags(self.pos);

        if self.is_eof() {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        }

        let ch = self.bytes[self.pos];
        self.token = match ch {
            b'[' if self.byte_at(1) == Some(b'/') => self.scan_punctuation(2, SyntaxKind::OpenBracketSlashToken),
            b'.' if self.byte_at(1) == Some(b'/') => self.scan_punctuation(2, SyntaxKind::DotSlashToken),
            b'<' if self.byte_at(1) == Some(b'<') => self.scan_lua_block(),
            HASH => self.scan_hash(),
            DOUBLE_QUOTE => self.scan_string_literal(),
            c if is_identifier_char(c) => self.scan_identifier(),
            c if is_line_break(c) => {
                let len = self.line_break_len(self.pos);
                self.pos += len;
                SyntaxKind::NewLineToken
            }
            c if is_horizontal_space(c) => {
                while !self.is_eof() && is_horizontal_space(self.bytes[self.pos]) {
                    self.pos += 1;
                }
                SyntaxKind::WhitespaceTrivia
            }
            b'[' => self.scan_punctuation(1, SyntaxKind::OpenBracketToken),
            b']' => self.scan_punctuation(1, SyntaxKind::CloseBracketToken),
            b'=' => self.scan_punctuation(1, SyntaxKind::EqualsToken),
            b'{' => self.scan_punctuation(1, SyntaxKind::OpenBraceToken),
            b'}' => self.scan_punctuation(1, SyntaxKind::CloseBraceToken),
            b'+' => self.scan_punctuation(1, SyntaxKind::PlusToken),
            b'~' => self.scan_punctuation(1, SyntaxKind::TildeToken),
            b'.' => self.scan_punctuation(1, SyntaxKind::DotToken),
            b'$' => self.scan_punctuation(1, SyntaxKind::DollarToken),
            b'/' => self.scan_punctuation(1, SyntaxKind::SlashToken),
            b'(' => self.scan_punctuation(1, SyntaxKind::OpenParenToken),
            b')' => self.scan_punctuation(1, SyntaxKind::CloseParenToken),
            _ => {
                let width = utf8_width(ch).min(self.bytes.len() - self.pos);
                self.pos += width;
                self.token_value.push_str(self.slice(self.token_start, self.pos));
                SyntaxKind::AnyOtherChar
            }
        };

        self.token
    }

    // ========================================================================
    // Token-specific scanning methods
    // ========================================================================

    fn scan_punctuation(&mut self, len: usize, kind: SyntaxKind) -> SyntaxKind {
        self.pos += len;
        self.token_value.push_str(self.slice(self.token_start, self.pos));
        kind
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        while !self.is_eof() && is_identifier_char(self.bytes[self.pos]) {
            self.pos += 1;
        }
        let text = self.slice(self.token_start, self.pos);
        self.token_value.push_str(text);
        if text == "_" {
            SyntaxKind::UnderscoreToken
        } else {
            SyntaxKind::Identifier
        }
    }

    /// `#` starts a directive or a comment; both run to the end of the line
    /// and include its terminator. Directives must open their line, so a
    /// `#word` after other tokens is a comment.
    fn scan_hash(&mut self) -> SyntaxKind {
        let word_start = self.pos + 1;
        let mut word_end = word_start;
        while word_end < self.bytes.len() && is_identifier_char(self.bytes[word_end]) {
            word_end += 1;
        }
        let kind = if self.token_flags.contains(TokenFlags::PRECEDING_LINE_BREAK) {
            SyntaxKind::from_directive(self.slice(word_start, word_end)).unwrap_or(SyntaxKind::CommentToken)
        } else {
            SyntaxKind::CommentToken
        };

        let line_end = memchr::memchr2(LINE_FEED, CARRIAGE_RETURN, &self.bytes[self.pos..])
            .map_or(self.bytes.len(), |i| self.pos + i);
        self.pos = line_end + self.line_break_len(line_end);

        if kind == SyntaxKind::CommentToken {
            self.token_value.push_str(self.slice(self.token_start, line_end));
        } else {
            self.token_value.push_str(self.slice(word_end, line_end).trim());
        }
        kind
    }

    fn scan_string_literal(&mut self) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        let mut result = String::new();
        loop {
            let Some(i) = memchr::memchr2(DOUBLE_QUOTE, BACKSLASH, &self.bytes[self.pos..]) else {
                return self.unterminated(start, 1, &messages::UNTERMINATED_STRING_LITERAL);
            };
            result.push_str(self.slice(self.pos, self.pos + i));
            self.pos += i;
            if self.bytes[self.pos] == DOUBLE_QUOTE {
                self.pos += 1;
                break;
            }
            // Backslash escape.
            match self.byte_at(1) {
                Some(b) => match escape_value(b) {
                    Some(c) => {
                        result.push(c);
                        self.pos += 2;
                    }
                    None => {
                        // Unknown escapes are kept verbatim.
                        result.push('\\');
                        self.pos += 1;
                    }
                },
                None => {
                    return self.unterminated(start, 1, &messages::UNTERMINATED_STRING_LITERAL);
                }
            }
        }
        self.token_value = result;
        SyntaxKind::StringLiteral
    }

    /// `<<` ... `>>`, closed by the nearest `>>`.
    fn scan_lua_block(&mut self) -> SyntaxKind {
        let start = self.pos;
        let body = start + 2;
        match memchr::memmem::find(&self.bytes[body..], b">>") {
            Some(i) => {
                self.token_value.push_str(self.slice(body, body + i));
                self.pos = body + i + 2;
                SyntaxKind::LuaCodeBlock
            }
            None => self.unterminated(start, 2, &messages::UNTERMINATED_LUA_BLOCK),
        }
    }

    /// Report a lexical error at `start` and end the stream: the synthetic
    /// end of file token covers the rest of the input.
    fn unterminated(&mut self, start: usize, length: usize, message: &DiagnosticMessage) -> SyntaxKind {
        tracing::trace!(file = %self.file_name, offset = start, code = message.code, "unterminated token");
        self.report(start, length, message);
        self.token_value.clear();
        self.token_flags |= TokenFlags::UNTERMINATED | TokenFlags::SYNTHETIC;
        self.pos = self.bytes.len();
        SyntaxKind::EndOfFileToken
    }
}

/// Yields every token in order, ending after the first end of file token.
impl Iterator for Scanner<'_> {
    type Item = TokenInfo;

    fn next(&mut self) -> Option<TokenInfo> {
        if self.finished {
            return None;
        }
        if self.scan() == SyntaxKind::EndOfFileToken {
            self.finished = true;
        }
        Some(self.token_info())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first(source: &str) -> TokenInfo {
        let mut scanner = Scanner::new("test.cfg", source);
        Scanner::scan(&mut scanner);
        scanner.token_info()
    }

    #[test]
    fn test_preceding_flags() {
        let tokens: Vec<_> = Scanner::new("t.cfg", "a \n  b").collect();
        assert!(tokens[0].has_preceding_line_break());
        assert!(!tokens[0].has_preceding_whitespace());
        let b = tokens.iter().find(|t| t.text == "b").unwrap();
        assert!(b.has_preceding_line_break());
        assert!(b.has_preceding_whitespace());
    }

    #[test]
    fn test_directive_value_is_trimmed_argument() {
        let token = first("#define  UNIT TYPE \r\nx");
        assert_eq!(token.kind, SyntaxKind::DefineDirective);
        assert_eq!(token.text, "UNIT TYPE");
        assert_eq!(token.end, 21);
    }

    #[test]
    fn test_directive_word_mid_line_is_comment() {
        let kinds: Vec<_> = Scanner::new("t.cfg", "x = 1 #ifdef Y\n  #ifdef Z\n")
            .map(|t| t.kind)
            .filter(|k| !matches!(k, SyntaxKind::WhitespaceTrivia))
            .collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::Identifier,
                SyntaxKind::EqualsToken,
                SyntaxKind::Identifier,
                SyntaxKind::CommentToken,
                SyntaxKind::IfDefDirective,
                SyntaxKind::EndOfFileToken,
            ]
        );
    }

    #[test]
    fn test_reset_rescans_from_position() {
        let mut scanner = Scanner::new("t.cfg", "abc def");
        assert_eq!(Scanner::scan(&mut scanner), SyntaxKind::Identifier);
        scanner.reset(4);
        assert_eq!(Scanner::scan(&mut scanner), SyntaxKind::Identifier);
        assert_eq!(scanner.token_value(), "def");
        assert!(scanner.token_flags().contains(TokenFlags::PRECEDING_WHITESPACE));
    }

    #[test]
    fn test_reset_does_not_duplicate_lex_errors() {
        let mut scanner = Scanner::new("t.cfg", "\"open");
        Scanner::scan(&mut scanner);
        scanner.reset(0);
        Scanner::scan(&mut scanner);
        assert_eq!(scanner.diagnostics().len(), 1);
    }

    #[test]
    fn test_look_ahead_restores_state() {
        let mut scanner = Scanner::new("t.cfg", "a = b");
        Scanner::scan(&mut scanner);
        let next = scanner.look_ahead(|s| {
            s.scan();
            s.scan()
        });
        assert_eq!(next, SyntaxKind::EqualsToken);
        assert_eq!(scanner.token(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_end(), 1);
    }
}
