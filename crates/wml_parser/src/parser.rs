//! The WML parser implementation.
//!
//! A recursive descent parser over the buffered token stream. Every decision
//! point needs at most two tokens of lookahead. Productions return
//! [`PResult`]; failures are reported and skipped at the enclosing
//! expression list, so one malformed expression never hides the rest of the
//! document.

use tracing::{debug, trace};
use wml_ast::node::*;
use wml_ast::syntax_kind::SyntaxKind;
use wml_ast::types::*;
use wml_core::text::TextRange;
use wml_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage};
use wml_options::ParserOptions;
use wml_scanner::{Scanner, TokenInfo};

use crate::error::{describe_expected, PResult, ParseError};
use crate::token_stream::TokenStream;
use crate::utilities::*;

/// What a body accepts besides the structural expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    /// Root or tag body.
    Expressions,
    /// Macro definition or conditional body: bare values are allowed too.
    Valued,
}

/// Constructs open around the current position. They decide which closing
/// tokens end a body instead of being reported as strays.
#[derive(Debug, Clone, Copy, Default)]
struct OpenConstructs {
    tags: u32,
    conditionals: u32,
    defines: u32,
}

/// The result of parsing one document.
#[derive(Debug)]
pub struct ParseResult {
    pub document: Document,
    /// Lexical, syntax and structural diagnostics sorted by offset.
    pub diagnostics: DiagnosticCollection,
}

impl ParseResult {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }
}

/// Parse `source_text` with default options.
pub fn parse_document(file_name: &str, source_text: &str) -> ParseResult {
    Parser::new(file_name, source_text).parse()
}

/// The parser produces a Document from WML source text.
pub struct Parser<'a> {
    tokens: TokenStream<'a>,
    builder: DocumentBuilder,
    file_name: String,
    options: ParserOptions,
    diagnostics: DiagnosticCollection,
    open: OpenConstructs,
    /// Current nesting depth of tags, macro calls, definitions, conditionals
    /// and arrays.
    depth: u32,
    depth_reported: bool,
}

impl<'a> Parser<'a> {
    pub fn new(file_name: &str, source_text: &'a str) -> Self {
        Self {
            tokens: TokenStream::new(Scanner::new(file_name, source_text)),
            builder: DocumentBuilder::new(file_name, source_text),
            file_name: file_name.to_string(),
            options: ParserOptions::default(),
            diagnostics: DiagnosticCollection::new(),
            open: OpenConstructs::default(),
            depth: 0,
            depth_reported: false,
        }
    }

    pub fn with_options(mut self, options: ParserOptions) -> Self {
        self.tokens.set_collect_trivia(options.collect_trivia);
        self.options = options;
        self
    }

    pub fn parse(mut self) -> ParseResult {
        debug!(file = %self.file_name, bytes = self.builder.text().len(), "parsing document");

        let root = self.parse_body(BodyKind::Expressions);
        let trivia = self.tokens.take_trivia();
        let mut diagnostics = self.tokens.take_diagnostics();
        diagnostics.extend(self.diagnostics);
        diagnostics.sort();
        let document = self.builder.finish(root, trivia);

        debug!(
            file = %self.file_name,
            nodes = document.node_count(),
            diagnostics = diagnostics.len(),
            "parsed document"
        );
        ParseResult { document, diagnostics }
    }

    // ========================================================================
    // Token management
    // ========================================================================

    #[inline]
    fn current(&mut self) -> SyntaxKind {
        self.tokens.current()
    }

    #[inline]
    fn nth(&mut self, k: usize) -> SyntaxKind {
        self.tokens.nth(k)
    }

    #[inline]
    fn bump(&mut self) -> TokenInfo {
        self.tokens.bump()
    }

    /// From `pos` to the end of the last consumed token.
    fn range_from(&self, pos: u32) -> TextRange {
        TextRange::new(pos, self.tokens.last_end().max(pos))
    }

    /// An error for the current token.
    fn unexpected(&mut self, expected: &[SyntaxKind]) -> ParseError {
        let token = self.tokens.peek(0);
        ParseError::Unexpected {
            found: token.kind,
            range: token.range(),
            expected: expected.to_vec(),
            synthetic: token.flags.contains(TokenFlags::SYNTHETIC),
        }
    }

    /// The input was cut short by a lexical error, which is already reported.
    fn at_synthetic_end(&mut self) -> bool {
        self.tokens.peek(0).flags.contains(TokenFlags::SYNTHETIC)
    }

    /// Consume `kind` or report it missing and carry on.
    fn expect_soft(&mut self, kind: SyntaxKind) -> Option<TokenInfo> {
        if let Some(token) = self.tokens.eat(kind) {
            return Some(token);
        }
        let err = self.unexpected(&[kind]);
        self.report(err);
        None
    }

    fn error_at(&mut self, range: TextRange, message: &DiagnosticMessage, args: &[&str]) {
        self.diagnostics.add(Diagnostic::with_location(
            self.file_name.clone(),
            range.to_span(),
            message,
            args,
        ));
    }

    fn report(&mut self, err: ParseError) {
        match err {
            // The lexer already reported why the input ended.
            ParseError::Unexpected { synthetic: true, .. } => {}
            ParseError::Unexpected { found, range, expected, .. } => {
                let found_text = found.describe();
                if expected.is_empty() {
                    self.error_at(range, &messages::UNEXPECTED_0, &[&found_text]);
                } else if found == SyntaxKind::EndOfFileToken {
                    self.error_at(range, &messages::_0_EXPECTED, &[&describe_expected(&expected)]);
                } else {
                    self.error_at(
                        range,
                        &messages::EXPECTED_0_BUT_FOUND_1,
                        &[&describe_expected(&expected), &found_text],
                    );
                }
            }
            ParseError::TooDeep { limit, range } => {
                if !self.depth_reported {
                    self.depth_reported = true;
                    self.error_at(range, &messages::MAXIMUM_NESTING_DEPTH_0_EXCEEDED, &[&limit.to_string()]);
                }
            }
        }
    }

    /// Run a nested production, failing with `TooDeep` past the limit.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        if self.depth >= self.options.max_depth {
            let range = self.tokens.peek(0).range();
            return Err(ParseError::TooDeep {
                limit: self.options.max_depth,
                range,
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    // ========================================================================
    // Error recovery
    // ========================================================================

    /// Whether `kind` closes one of the open constructs.
    fn is_terminator(&self, kind: SyntaxKind) -> bool {
        match kind {
            SyntaxKind::EndOfFileToken => true,
            SyntaxKind::OpenBracketSlashToken => self.open.tags > 0,
            SyntaxKind::ElseDirective | SyntaxKind::EndIfDirective => self.open.conditionals > 0,
            SyntaxKind::EndDefDirective => self.open.defines > 0,
            _ => false,
        }
    }

    fn is_sync_boundary(&self, kind: SyntaxKind) -> bool {
        kind == SyntaxKind::EndOfFileToken
            || kind == SyntaxKind::OpenBracketSlashToken
            || kind.is_directive()
            || self.is_terminator(kind)
    }

    /// Skip to the end of the current expression: past the next end of line
    /// or `]`, or up to a closing tag, directive or end of file.
    fn synchronize(&mut self) {
        let mut skipped = 0usize;
        loop {
            let kind = self.current();
            if self.is_sync_boundary(kind) {
                break;
            }
            self.bump();
            skipped += 1;
            if kind.is_end_of_line() || kind == SyntaxKind::CloseBracketToken {
                break;
            }
        }
        trace!(file = %self.file_name, skipped, pos = self.tokens.last_end(), "resynchronized");
    }

    /// Skip the rest of a line, returning its terminator if one was reached.
    fn skip_rest_of_line(&mut self) -> Option<TokenInfo> {
        loop {
            let kind = self.current();
            if self.is_sync_boundary(kind) {
                return None;
            }
            let token = self.bump();
            if kind.is_end_of_line() {
                return Some(token);
            }
        }
    }

    // ========================================================================
    // Expression lists
    // ========================================================================

    fn parse_body(&mut self, body: BodyKind) -> Vec<NodeId> {
        let mut items = Vec::new();
        loop {
            let kind = self.current();
            if self.is_terminator(kind) {
                break;
            }
            let start = self.tokens.position();
            match self.parse_expression(kind, body, &items) {
                Ok(Some(id)) => items.push(id),
                Ok(None) => {}
                Err(err) => {
                    self.report(err);
                    self.synchronize();
                }
            }
            // Error recovery: if the parser hasn't advanced, skip the
            // offending token to avoid looping.
            if self.tokens.position() == start {
                self.bump();
            }
        }
        items
    }

    fn parse_expression(
        &mut self,
        kind: SyntaxKind,
        body: BodyKind,
        previous: &[NodeId],
    ) -> PResult<Option<NodeId>> {
        match kind {
            SyntaxKind::NewLineToken | SyntaxKind::CommentToken => {
                self.bump();
                Ok(None)
            }
            SyntaxKind::OpenBracketToken => match self.nth(1) {
                SyntaxKind::Identifier | SyntaxKind::PlusToken => self.parse_tag().map(Some),
                _ => {
                    self.bump();
                    Err(self.unexpected(&[SyntaxKind::Identifier, SyntaxKind::PlusToken]))
                }
            },
            SyntaxKind::OpenBracketSlashToken => {
                self.parse_stray_close();
                Ok(None)
            }
            SyntaxKind::OpenBraceToken => self.parse_macro_call().map(Some),
            // Definitions do not nest.
            SyntaxKind::DefineDirective if self.open.defines > 0 => Err(self.unexpected(&[])),
            SyntaxKind::DefineDirective => self.parse_macro_define().map(Some),
            SyntaxKind::TextDomainDirective => Ok(Some(self.parse_textdomain())),
            k if k.is_conditional_directive() => self.parse_preproc_if().map(Some),
            k if is_closing_directive(k) => {
                let token = self.bump();
                let text = k.directive_text().unwrap_or("#");
                self.error_at(token.range(), &messages::DIRECTIVE_0_HAS_NO_OPENING_DIRECTIVE, &[text]);
                Ok(None)
            }
            SyntaxKind::Identifier if body == BodyKind::Expressions || self.nth(1) == SyntaxKind::EqualsToken => {
                self.parse_key().map(Some)
            }
            SyntaxKind::LuaCodeBlock if body == BodyKind::Valued => Ok(Some(self.parse_lua_code())),
            k if k.is_value_token() && body == BodyKind::Valued => {
                let translatable = self.follows_underscore(previous);
                Ok(Some(self.parse_value(translatable)))
            }
            _ => Err(self.unexpected(&[])),
        }
    }

    // ========================================================================
    // Tags
    // ========================================================================

    fn parse_tag(&mut self) -> PResult<NodeId> {
        self.nested(Self::parse_tag_worker)
    }

    fn parse_tag_worker(&mut self) -> PResult<NodeId> {
        let open = self.bump();
        let plus = self.tokens.eat(SyntaxKind::PlusToken).is_some();
        let name = self.parse_name()?;
        self.expect_soft(SyntaxKind::CloseBracketToken);

        self.open.tags += 1;
        let children = self.parse_body(BodyKind::Expressions);
        self.open.tags -= 1;

        let mut flags = NodeFlags::NONE;
        let end_name = if self.current() == SyntaxKind::OpenBracketSlashToken {
            self.parse_close_tag(name, &mut flags)
        } else {
            if !self.at_synthetic_end() {
                let tag_name = self.builder.resolve(name.text).to_string();
                self.error_at(name.range, &messages::TAG_0_IS_NOT_CLOSED, &[&tag_name]);
            }
            flags |= NodeFlags::UNTERMINATED;
            None
        };

        let data = NodeData::new(SyntaxKind::Tag, self.range_from(open.pos)).with_flags(flags);
        Ok(self.builder.alloc(Node::Tag(Tag {
            data,
            name,
            plus,
            children,
            end_name,
        })))
    }

    /// `[/name]` closing the tag opened as `open`. A different name is a
    /// warning; the opening name stays authoritative.
    fn parse_close_tag(&mut self, open: Name, flags: &mut NodeFlags) -> Option<Name> {
        self.bump();
        let end_name = if self.current() == SyntaxKind::Identifier {
            let token = self.bump();
            Some(Name {
                text: self.builder.intern(&token.text),
                range: token.range(),
            })
        } else {
            let err = self.unexpected(&[SyntaxKind::Identifier]);
            self.report(err);
            None
        };
        self.expect_soft(SyntaxKind::CloseBracketToken);

        if let Some(end) = end_name.filter(|end| end.text != open.text) {
            let open_text = self.builder.resolve(open.text).to_string();
            let close_text = self.builder.resolve(end.text).to_string();
            let related = Diagnostic::with_location(
                self.file_name.clone(),
                open.range.to_span(),
                &messages::OPENING_TAG_0_IS_HERE,
                &[&open_text],
            );
            self.diagnostics.add(
                Diagnostic::with_location(
                    self.file_name.clone(),
                    end.range.to_span(),
                    &messages::CLOSING_TAG_1_DOES_NOT_MATCH_0,
                    &[&open_text, &close_text],
                )
                .with_related(related),
            );
            *flags |= NodeFlags::MISMATCHED_CLOSE;
        }
        end_name
    }

    /// `[/name]` with no open tag.
    fn parse_stray_close(&mut self) {
        let open = self.bump();
        let name = match self.current() {
            SyntaxKind::Identifier => self.bump().text,
            _ => String::new(),
        };
        self.tokens.eat(SyntaxKind::CloseBracketToken);
        let range = self.range_from(open.pos);
        self.error_at(range, &messages::CLOSING_TAG_0_HAS_NO_OPENING_TAG, &[&name]);
    }

    fn parse_name(&mut self) -> PResult<Name> {
        if self.current() != SyntaxKind::Identifier {
            return Err(self.unexpected(&[SyntaxKind::Identifier]));
        }
        let token = self.bump();
        Ok(Name {
            text: self.builder.intern(&token.text),
            range: token.range(),
        })
    }

    // ========================================================================
    // Keys and values
    // ========================================================================

    fn parse_key(&mut self) -> PResult<NodeId> {
        let name = self.parse_name()?;
        if self.current() != SyntaxKind::EqualsToken {
            return Err(self.unexpected(&[SyntaxKind::EqualsToken]));
        }
        self.bump();

        let mut values = Vec::new();
        let mut joins = Vec::new();
        loop {
            while is_key_value_start(self.current()) {
                let translatable = self.follows_underscore(&values);
                let id = self.parse_key_value(translatable)?;
                values.push(id);
            }
            if self.current().is_end_of_line() && self.at_line_continuation() {
                self.bump();
            }
            if self.current() != SyntaxKind::PlusToken {
                break;
            }
            joins.push(self.bump().range());
            if self.current().is_end_of_line() {
                self.bump();
            }
            if !is_key_value_start(self.current()) {
                let err = self.unexpected(&[SyntaxKind::Identifier, SyntaxKind::StringLiteral]);
                self.report(err);
                break;
            }
        }

        let eol = match self.current() {
            kind if kind.is_end_of_line() => Some(self.bump()),
            kind => {
                let err = self.unexpected(&[SyntaxKind::NewLineToken]);
                self.report(err);
                if kind == SyntaxKind::EndOfFileToken {
                    None
                } else {
                    self.skip_rest_of_line()
                }
            }
        }
        .map(|token| Token::new(token.kind, token.range()));

        if self.open.tags == 0 && self.open.defines == 0 {
            let key_name = self.builder.resolve(name.text).to_string();
            self.error_at(name.range, &messages::KEY_0_OUTSIDE_OF_TAG, &[&key_name]);
        }

        let data = NodeData::new(SyntaxKind::Key, self.range_from(name.range.pos));
        Ok(self.builder.alloc(Node::Key(Key {
            data,
            name,
            values,
            joins,
            eol,
        })))
    }

    /// An end of line directly followed by `+` continues the key.
    fn at_line_continuation(&mut self) -> bool {
        self.tokens.look_ahead(|tokens| {
            tokens.bump();
            tokens.at(SyntaxKind::PlusToken)
        })
    }

    fn parse_key_value(&mut self, translatable: bool) -> PResult<NodeId> {
        match self.current() {
            SyntaxKind::OpenBraceToken => self.parse_macro_call(),
            SyntaxKind::LuaCodeBlock => Ok(self.parse_lua_code()),
            SyntaxKind::OpenBracketToken => self.parse_array_call(),
            _ => Ok(self.parse_value(translatable)),
        }
    }

    /// A string directly after a `_` value is translatable.
    fn follows_underscore(&mut self, previous: &[NodeId]) -> bool {
        self.current() == SyntaxKind::StringLiteral
            && previous.last().is_some_and(|&id| {
                matches!(self.builder.node(id), Node::Value(v) if v.token == SyntaxKind::UnderscoreToken)
            })
    }

    fn parse_value(&mut self, translatable: bool) -> NodeId {
        let token = self.bump();
        let mut data = NodeData::new(SyntaxKind::Value, token.range());
        if translatable {
            data.flags |= NodeFlags::TRANSLATABLE;
        }
        self.builder.alloc(Node::Value(Value {
            data,
            token: token.kind,
            text: token.text,
        }))
    }

    fn parse_lua_code(&mut self) -> NodeId {
        let token = self.bump();
        self.builder.alloc(Node::LuaCode(LuaCode {
            data: NodeData::new(SyntaxKind::LuaCode, token.range()),
            code: token.text,
        }))
    }

    fn parse_array_call(&mut self) -> PResult<NodeId> {
        self.nested(|p| Ok(p.parse_array_call_worker()))
    }

    fn parse_array_call_worker(&mut self) -> NodeId {
        let open = self.bump();
        let mut values = Vec::new();
        while self.current().is_value_token() {
            let translatable = self.follows_underscore(&values);
            values.push(self.parse_value(translatable));
        }
        if values.is_empty() {
            let err = self.unexpected(&[SyntaxKind::Identifier, SyntaxKind::StringLiteral]);
            self.report(err);
        }
        let mut flags = NodeFlags::NONE;
        if self.expect_soft(SyntaxKind::CloseBracketToken).is_none() {
            flags |= NodeFlags::UNTERMINATED;
        }
        let data = NodeData::new(SyntaxKind::ArrayCall, self.range_from(open.pos)).with_flags(flags);
        self.builder.alloc(Node::ArrayCall(ArrayCall { data, values }))
    }

    // ========================================================================
    // Macro calls
    // ========================================================================

    fn parse_macro_call(&mut self) -> PResult<NodeId> {
        self.nested(Self::parse_macro_call_worker)
    }

    fn parse_macro_call_worker(&mut self) -> PResult<NodeId> {
        let open = self.bump();
        let point = self.tokens.eat(SyntaxKind::DotSlashToken).is_some();
        let relative = self.tokens.eat(SyntaxKind::TildeToken).is_some();
        let name = self.parse_name()?;

        let mut params = Vec::new();
        let mut flags = NodeFlags::NONE;
        loop {
            match self.current() {
                SyntaxKind::CloseBraceToken => {
                    self.bump();
                    break;
                }
                kind if kind.is_end_of_line() => {
                    self.bump();
                }
                SyntaxKind::OpenBraceToken => {
                    let id = self.parse_macro_call()?;
                    params.push(id);
                }
                SyntaxKind::LuaCodeBlock => params.push(self.parse_lua_code()),
                kind if is_macro_token(kind) => {
                    let token = self.bump();
                    params.push(self.builder.alloc(Node::MacroToken(MacroToken {
                        data: NodeData::new(SyntaxKind::MacroToken, token.range()),
                        token: kind,
                    })));
                }
                kind if kind.is_value_token() => {
                    let translatable = self.follows_underscore(&params);
                    params.push(self.parse_value(translatable));
                }
                // End of file or a directive line.
                _ => {
                    if !self.at_synthetic_end() {
                        let macro_name = self.builder.resolve(name.text).to_string();
                        self.error_at(open.range(), &messages::CLOSE_BRACE_EXPECTED_FOR_MACRO_0, &[&macro_name]);
                    }
                    flags |= NodeFlags::UNTERMINATED;
                    break;
                }
            }
        }

        let data = NodeData::new(SyntaxKind::MacroCall, self.range_from(open.pos)).with_flags(flags);
        Ok(self.builder.alloc(Node::MacroCall(MacroCall {
            data,
            point,
            relative,
            name,
            params,
        })))
    }

    // ========================================================================
    // Preprocessor directives
    // ========================================================================

    fn directive(token: &TokenInfo) -> Directive {
        Directive {
            kind: token.kind,
            range: token.range(),
            argument: token.text.clone(),
        }
    }

    /// The first word after the keyword, with its source range.
    fn directive_name(&mut self, token: &TokenInfo) -> Option<Name> {
        let word = token.text.split_whitespace().next()?;
        let keyword_len = token.kind.directive_text()?.len();
        let raw = self.builder.text().get(token.range().to_range())?;
        let offset = keyword_len + raw.get(keyword_len..)?.find(word)?;
        let pos = token.pos + offset as u32;
        Some(Name {
            text: self.builder.intern(word),
            range: TextRange::new(pos, pos + word.len() as u32),
        })
    }

    fn parse_macro_define(&mut self) -> PResult<NodeId> {
        self.nested(|p| Ok(p.parse_macro_define_worker()))
    }

    fn parse_macro_define_worker(&mut self) -> NodeId {
        let token = self.bump();
        let header = Self::directive(&token);
        let name = self.directive_name(&token);
        if name.is_none() {
            self.error_at(header.range, &messages::_0_EXPECTED, &["macro name"]);
        }

        // A definition body stands on its own: tags and conditionals open
        // around it cannot be closed from inside.
        let saved = std::mem::replace(
            &mut self.open,
            OpenConstructs {
                defines: 1,
                ..OpenConstructs::default()
            },
        );
        let body = self.parse_body(BodyKind::Valued);
        self.open = saved;

        let mut flags = NodeFlags::NONE;
        let end = match self.tokens.eat(SyntaxKind::EndDefDirective) {
            Some(token) => Some(Self::directive(&token)),
            None => {
                if !self.at_synthetic_end() {
                    let macro_name = header.words().next().unwrap_or_default().to_string();
                    self.error_at(header.range, &messages::ENDDEF_EXPECTED_FOR_0, &[&macro_name]);
                }
                flags |= NodeFlags::UNTERMINATED;
                None
            }
        };

        let data = NodeData::new(SyntaxKind::MacroDefine, self.range_from(token.pos)).with_flags(flags);
        self.builder.alloc(Node::MacroDefine(MacroDefine {
            data,
            header,
            name,
            body,
            end,
        }))
    }

    fn parse_preproc_if(&mut self) -> PResult<NodeId> {
        let Some(kind) = PreprocKind::from_syntax_kind(self.current()) else {
            return Err(self.unexpected(&[]));
        };
        self.nested(|p| Ok(p.parse_preproc_if_worker(kind)))
    }

    fn parse_preproc_if_worker(&mut self, kind: PreprocKind) -> NodeId {
        let token = self.bump();
        let header = Self::directive(&token);
        if header.argument.is_empty() {
            self.error_at(header.range, &messages::_0_EXPECTED, &["condition"]);
        }

        self.open.conditionals += 1;
        let body = self.parse_body(BodyKind::Valued);
        let mut else_directive = None;
        let mut else_body = Vec::new();
        if let Some(else_token) = self.tokens.eat(SyntaxKind::ElseDirective) {
            let directive = Self::directive(&else_token);
            loop {
                else_body.extend(self.parse_body(BodyKind::Valued));
                match self.tokens.eat(SyntaxKind::ElseDirective) {
                    Some(extra) => {
                        let text = SyntaxKind::ElseDirective.describe();
                        self.error_at(extra.range(), &messages::UNEXPECTED_0, &[&text]);
                    }
                    None => break,
                }
            }
            if else_body.is_empty() {
                self.error_at(directive.range, &messages::ELSE_REQUIRES_A_BODY, &[]);
            }
            else_directive = Some(directive);
        }
        self.open.conditionals -= 1;

        let mut flags = NodeFlags::NONE;
        let end = match self.tokens.eat(SyntaxKind::EndIfDirective) {
            Some(end) => Some(Self::directive(&end)),
            None => {
                if !self.at_synthetic_end() {
                    let opening = format!("{} {}", kind, header.argument);
                    self.error_at(header.range, &messages::ENDIF_EXPECTED_FOR_0, &[opening.trim_end()]);
                }
                flags |= NodeFlags::UNTERMINATED;
                None
            }
        };

        let data = NodeData::new(SyntaxKind::PreprocIf, self.range_from(token.pos)).with_flags(flags);
        self.builder.alloc(Node::PreprocIf(PreprocIf {
            data,
            kind,
            header,
            body,
            else_directive,
            else_body,
            end,
        }))
    }

    fn parse_textdomain(&mut self) -> NodeId {
        let token = self.bump();
        let header = Self::directive(&token);
        if header.argument.is_empty() {
            self.error_at(header.range, &messages::_0_EXPECTED, &["textdomain name"]);
        }
        self.builder.alloc(Node::Textdomain(Textdomain {
            data: NodeData::new(SyntaxKind::Textdomain, token.range()),
            header,
        }))
    }
}
