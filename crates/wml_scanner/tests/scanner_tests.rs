//! Scanner integration tests.
//!
//! Verifies that the scanner correctly tokenizes WML constructs.

use proptest::prelude::*;
use wml_ast::syntax_kind::SyntaxKind;
use wml_ast::types::TokenFlags;
use wml_scanner::{Scanner, TokenInfo};

/// Helper: scan all tokens from source and return as (kind, value) pairs,
/// without the end of file token.
fn scan_all(source: &str) -> Vec<(SyntaxKind, String)> {
    let mut scanner = Scanner::new("test.cfg", source);
    let mut tokens = Vec::new();
    loop {
        let kind = Scanner::scan(&mut scanner);
        if kind == SyntaxKind::EndOfFileToken {
            break;
        }
        tokens.push((kind, scanner.token_value().to_string()));
    }
    tokens
}

/// Helper: scan all token kinds.
fn scan_kinds(source: &str) -> Vec<SyntaxKind> {
    scan_all(source).into_iter().map(|(k, _)| k).collect()
}

/// Helper: scan with the iterator, end of file included.
fn tokens(source: &str) -> Vec<TokenInfo> {
    Scanner::new("test.cfg", source).collect()
}

// ============================================================================
// Basics
// ============================================================================

#[test]
fn test_empty_source() {
    assert!(scan_all("").is_empty());
    let all = tokens("");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].kind, SyntaxKind::EndOfFileToken);
}

#[test]
fn test_whitespace_and_newlines_are_tokens() {
    assert_eq!(
        scan_kinds(" \t\n\r\n\r"),
        vec![
            SyntaxKind::WhitespaceTrivia,
            SyntaxKind::NewLineToken,
            SyntaxKind::NewLineToken,
            SyntaxKind::NewLineToken,
        ]
    );
}

#[test]
fn test_simple_tag_and_key() {
    assert_eq!(
        scan_kinds("[unit]\nname=Elvish Archer\n[/unit]"),
        vec![
            SyntaxKind::OpenBracketToken,
            SyntaxKind::Identifier,
            SyntaxKind::CloseBracketToken,
            SyntaxKind::NewLineToken,
            SyntaxKind::Identifier,
            SyntaxKind::EqualsToken,
            SyntaxKind::Identifier,
            SyntaxKind::WhitespaceTrivia,
            SyntaxKind::Identifier,
            SyntaxKind::NewLineToken,
            SyntaxKind::OpenBracketSlashToken,
            SyntaxKind::Identifier,
            SyntaxKind::CloseBracketToken,
        ]
    );
}

#[test]
fn test_identifier_includes_comma_and_hyphen() {
    let tokens = scan_all("x=1-5,7,-2");
    assert_eq!(tokens[2], (SyntaxKind::Identifier, "1-5,7,-2".to_string()));
}

#[test]
fn test_lone_underscore() {
    assert_eq!(
        scan_kinds("_ \"text\""),
        vec![SyntaxKind::UnderscoreToken, SyntaxKind::WhitespaceTrivia, SyntaxKind::StringLiteral]
    );
    assert_eq!(scan_kinds("_\"text\""), vec![SyntaxKind::UnderscoreToken, SyntaxKind::StringLiteral]);
    assert_eq!(scan_kinds("_a"), vec![SyntaxKind::Identifier]);
    assert_eq!(scan_kinds("__"), vec![SyntaxKind::Identifier]);
}

#[test]
fn test_single_character_punctuation() {
    assert_eq!(
        scan_kinds("[]={}+~.$/()"),
        vec![
            SyntaxKind::OpenBracketToken,
            SyntaxKind::CloseBracketToken,
            SyntaxKind::EqualsToken,
            SyntaxKind::OpenBraceToken,
            SyntaxKind::CloseBraceToken,
            SyntaxKind::PlusToken,
            SyntaxKind::TildeToken,
            SyntaxKind::DotToken,
            SyntaxKind::DollarToken,
            SyntaxKind::SlashToken,
            SyntaxKind::OpenParenToken,
            SyntaxKind::CloseParenToken,
        ]
    );
}

#[test]
fn test_two_character_punctuation() {
    assert_eq!(scan_kinds("[/"), vec![SyntaxKind::OpenBracketSlashToken]);
    assert_eq!(scan_kinds("./"), vec![SyntaxKind::DotSlashToken]);
    assert_eq!(scan_kinds(". /"), vec![SyntaxKind::DotToken, SyntaxKind::WhitespaceTrivia, SyntaxKind::SlashToken]);
}

#[test]
fn test_any_other_char() {
    let tokens = scan_all("a:b;é");
    assert_eq!(
        tokens,
        vec![
            (SyntaxKind::Identifier, "a".to_string()),
            (SyntaxKind::AnyOtherChar, ":".to_string()),
            (SyntaxKind::Identifier, "b".to_string()),
            (SyntaxKind::AnyOtherChar, ";".to_string()),
            (SyntaxKind::AnyOtherChar, "é".to_string()),
        ]
    );
}

#[test]
fn test_single_angle_brackets_are_other_chars() {
    assert_eq!(scan_kinds("<a>"), vec![SyntaxKind::AnyOtherChar, SyntaxKind::Identifier, SyntaxKind::AnyOtherChar]);
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn test_string_escapes() {
    let tokens = scan_all(r#""a\tb\"c\\d\qe""#);
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].0, SyntaxKind::StringLiteral);
    assert_eq!(tokens[0].1, "a\tb\"c\\d\\qe");
}

#[test]
fn test_multi_line_string() {
    let tokens = scan_all("\"line one\nline two\"");
    assert_eq!(tokens, vec![(SyntaxKind::StringLiteral, "line one\nline two".to_string())]);
}

#[test]
fn test_unterminated_string() {
    let mut scanner = Scanner::new("test.cfg", "a=\"open\nmore");
    let mut last = None;
    for token in scanner.by_ref() {
        last = Some(token);
    }
    let last = last.unwrap();
    assert_eq!(last.kind, SyntaxKind::EndOfFileToken);
    assert!(last.flags.contains(TokenFlags::SYNTHETIC));
    assert_eq!(last.pos, 2);
    assert_eq!(last.end, 12);

    let diagnostics = scanner.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    let diagnostic = &diagnostics.diagnostics()[0];
    assert_eq!(diagnostic.code, 1001);
    assert_eq!(diagnostic.offset(), 2);
}

// ============================================================================
// Lua blocks
// ============================================================================

#[test]
fn test_lua_block_verbatim() {
    let tokens = scan_all("<<print(\"x\")>>");
    assert_eq!(tokens, vec![(SyntaxKind::LuaCodeBlock, "print(\"x\")".to_string())]);
}

#[test]
fn test_lua_block_is_non_greedy() {
    let tokens = scan_all("<<a>>b<<c>>");
    assert_eq!(
        tokens,
        vec![
            (SyntaxKind::LuaCodeBlock, "a".to_string()),
            (SyntaxKind::Identifier, "b".to_string()),
            (SyntaxKind::LuaCodeBlock, "c".to_string()),
        ]
    );
}

#[test]
fn test_lua_block_spans_lines() {
    let tokens = scan_all("<<\nlocal x = 1 # not a comment\n>>");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].1, "\nlocal x = 1 # not a comment\n");
}

#[test]
fn test_unterminated_lua_block() {
    let mut scanner = Scanner::new("test.cfg", "x <<code");
    let all: Vec<_> = scanner.by_ref().collect();
    assert_eq!(all.last().unwrap().kind, SyntaxKind::EndOfFileToken);
    assert_eq!(scanner.diagnostics().len(), 1);
    assert_eq!(scanner.diagnostics().diagnostics()[0].code, 1002);
    assert_eq!(scanner.diagnostics().diagnostics()[0].offset(), 2);
}

// ============================================================================
// Directives and comments
// ============================================================================

#[test]
fn test_directives() {
    let cases = [
        ("#ifdef X\n", SyntaxKind::IfDefDirective, "X"),
        ("#ifndef X Y\n", SyntaxKind::IfNDefDirective, "X Y"),
        ("#ifhave path/file.cfg\n", SyntaxKind::IfHaveDirective, "path/file.cfg"),
        ("#ifnhave path\n", SyntaxKind::IfNHaveDirective, "path"),
        ("#else\n", SyntaxKind::ElseDirective, ""),
        ("#endif\n", SyntaxKind::EndIfDirective, ""),
        ("#define M A B\n", SyntaxKind::DefineDirective, "M A B"),
        ("#enddef\n", SyntaxKind::EndDefDirective, ""),
        ("#textdomain wesnoth-units\n", SyntaxKind::TextDomainDirective, "wesnoth-units"),
    ];
    for (source, kind, value) in cases {
        let tokens = scan_all(source);
        assert_eq!(tokens, vec![(kind, value.to_string())], "source: {:?}", source);
    }
}

#[test]
fn test_directive_owns_line_terminator() {
    let all = tokens("#endif\r\nx");
    assert_eq!(all[0].kind, SyntaxKind::EndIfDirective);
    assert_eq!(all[0].end, 8);
    assert_eq!(all[1].kind, SyntaxKind::Identifier);
    assert!(all[1].has_preceding_line_break());
}

#[test]
fn test_directive_word_must_end() {
    assert_eq!(scan_kinds("#ifdefX\n"), vec![SyntaxKind::CommentToken]);
    assert_eq!(scan_kinds("#undef X\n"), vec![SyntaxKind::CommentToken]);
    assert_eq!(scan_kinds("#endif"), vec![SyntaxKind::EndIfDirective]);
}

#[test]
fn test_comment() {
    let tokens = scan_all("key=value # trailing\nnext");
    assert_eq!(tokens[4], (SyntaxKind::CommentToken, "# trailing".to_string()));
    assert_eq!(tokens[5].0, SyntaxKind::Identifier);
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_tokens_tile_input(source in "[ -~\t\n\ré\\[\\]{}#<>\"]{0,80}") {
        let all = tokens(&source);
        let mut pos = 0u32;
        for token in &all {
            prop_assert_eq!(token.pos, pos);
            prop_assert!(token.end >= token.pos);
            pos = token.end;
        }
        prop_assert_eq!(pos as usize, source.len());
        prop_assert_eq!(all.last().map(|t| t.kind), Some(SyntaxKind::EndOfFileToken));
        prop_assert_eq!(all.iter().filter(|t| t.kind == SyntaxKind::EndOfFileToken).count(), 1);
    }

    #[test]
    fn prop_scan_is_deterministic(source in any::<String>()) {
        prop_assert_eq!(tokens(&source), tokens(&source));
    }
}
