use markup_highlight_macros::generate_byte_lookup_table;

generate_byte_lookup_table!(
    STRUCTURAL_BYTES,
    ByteType,
    BACKSLASH => b"\\",
    LBRACE => b"{",
    RBRACE => b"}",
    LSQUARE => b"[",
    RSQUARE => b"]",
    COMMA => b",",
    SPACE => b"\t\n\x0C\r "
);

#[rustfmt::skip]
static UTF8_LENGTH_LOOKUP: [usize; 32] = [
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    0, 0, 0, 0, 0, 0, 0, 0, 2, 2, 2, 2, 3, 3, 4, 0,
];

/// Return the byte length of the complete UTF-8 code point that starts with
/// `byte`. This can be done branchlessly and without computing the entire
/// `char`.
#[inline(always)]
pub(crate) fn char_length_from_byte(byte: u8) -> usize {
    UTF8_LENGTH_LOOKUP[byte as usize >> 3]
}

/// Returns true if the char may begin a directive name.
///
/// Directive names are `-` plus the XID identifier classes, so `\-comment`
/// and similar names lex as a single directive.
#[inline(always)]
pub(crate) fn is_directive_name_start(c: char) -> bool {
    c == '-' || unicode_xid::UnicodeXID::is_xid_start(c)
}

/// Returns true if the char may appear after the start of a directive name.
#[inline(always)]
pub(crate) fn is_directive_name(c: char) -> bool {
    c == '-' || unicode_xid::UnicodeXID::is_xid_continue(c)
}

/// Returns true if the char may appear in the name of a named argument.
#[inline(always)]
pub(crate) fn is_argument_name(c: char) -> bool {
    c == '-' || unicode_xid::UnicodeXID::is_xid_continue(c)
}

/// Returns true if `byte` may follow a backslash to form a two-byte escape
/// sequence: exactly the structural characters `\ { } [ ] ,`. A wider set
/// would shadow directive names that begin with punctuation, like
/// `\-comment`.
#[inline(always)]
pub(crate) fn is_escapable(byte: u8) -> bool {
    !matches!(
        ByteType::of(byte),
        ByteType::PLAIN | ByteType::SPACE | ByteType::UNICODE
    )
}

/// Returns true if `byte` is whitespace within an argument list, using the
/// HTML definition of whitespace.
#[inline(always)]
pub(crate) fn is_html_whitespace(byte: u8) -> bool {
    ByteType::is_space(byte)
}

/// Returns the byte length of the longest prefix of `text` whose code units
/// all satisfy `predicate`.
pub(crate) fn length_while_byte(text: &str, predicate: impl Fn(u8) -> bool) -> usize {
    text.bytes().take_while(|&byte| predicate(byte)).count()
}

/// Returns the byte length of the longest prefix of `text` whose code points
/// all satisfy `predicate`.
pub(crate) fn length_while_char(text: &str, predicate: impl Fn(char) -> bool) -> usize {
    let mut length = 0;
    for c in text.chars() {
        if !predicate(c) {
            break;
        }
        length += c.len_utf8();
    }
    length
}
