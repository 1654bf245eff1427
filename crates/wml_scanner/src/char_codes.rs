//! Byte classes used by the scanner.

pub const LINE_FEED: u8 = b'\n';
pub const CARRIAGE_RETURN: u8 = b'\r';
pub const SPACE: u8 = b' ';
pub const TAB: u8 = b'\t';
pub const HASH: u8 = b'#';
pub const DOUBLE_QUOTE: u8 = b'"';
pub const BACKSLASH: u8 = b'\\';

#[inline]
pub fn is_line_break(b: u8) -> bool {
    b == LINE_FEED || b == CARRIAGE_RETURN
}

/// Horizontal whitespace: space and tab only.
#[inline]
pub fn is_horizontal_space(b: u8) -> bool {
    b == SPACE || b == TAB
}

/// `[A-Za-z0-9_,-]`
#[inline]
pub fn is_identifier_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b',' | b'-')
}

/// Width of the UTF-8 sequence introduced by `lead`.
#[inline]
pub fn utf8_width(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        // Continuation byte; only reachable on malformed input.
        _ => 1,
    }
}

/// The decoded character for a string escape `\c`, if `c` is a known escape.
#[inline]
pub fn escape_value(b: u8) -> Option<char> {
    Some(match b {
        b'b' => '\u{8}',
        b't' => '\t',
        b'n' => '\n',
        b'f' => '\u{c}',
        b'r' => '\r',
        b'"' => '"',
        b'\'' => '\'',
        b'\\' => '\\',
        _ => return None,
    })
}
