//! Stateless recognizers for the markup-directive language.
//!
//! Every matcher takes the current remainder of the source and returns the
//! number of bytes it consumed, reporting what it saw through a [`Consumer`].
//! A matcher that returns a non-zero length always consumed at least one
//! byte; the content matchers additionally guarantee forward progress on any
//! input that does not begin with a terminator of the current context, which
//! is what makes the outer matching loop terminate.

use crate::byte_lookup::{
    is_argument_name, is_directive_name, is_directive_name_start, is_escapable,
    is_html_whitespace, length_while_byte, length_while_char, ByteType,
};
use crate::consumer::Consumer;

/// The kind of content being matched, which determines the characters that
/// terminate a content run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentContext {
    /// Top-level document content. Nothing terminates it but the end of the
    /// input.
    Document,
    /// The value of an argument inside `[...]`. Terminated by `,`, `]`, and
    /// `}`.
    ArgumentValue,
    /// The body of a directive inside `{...}`. Terminated by `}`.
    Block,
}

impl ContentContext {
    /// Returns true if `byte` ends a content sequence in this context.
    pub(crate) fn terminates(self, byte: u8) -> bool {
        match self {
            ContentContext::Document => false,
            ContentContext::ArgumentValue => matches!(byte, b',' | b']' | b'}'),
            ContentContext::Block => byte == b'}',
        }
    }
}

/// Square and brace nesting depth within a single plain-text run. A closing
/// bracket at depth zero terminates the run rather than underflowing.
#[derive(Clone, Copy, Debug, Default)]
struct BracketLevels {
    square: u32,
    brace: u32,
}

/// The shape of a `name =` prefix ahead of an argument value, produced by
/// [`match_named_argument_prefix`]. The prefix is present iff `name_length`
/// is non-zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NamedArgumentPrefix {
    /// Total byte length of the prefix including the `=`.
    pub total_length: usize,
    pub leading_whitespace: usize,
    pub name_length: usize,
    pub trailing_whitespace: usize,
}

impl NamedArgumentPrefix {
    pub fn is_present(&self) -> bool {
        self.name_length > 0
    }
}

/// Match the longest run of argument-list whitespace.
pub fn match_whitespace(text: &str) -> usize {
    length_while_byte(text, is_html_whitespace)
}

/// Match a directive name. Names must not begin with an ASCII digit. The
/// caller is responsible for checking that the first code point is a valid
/// name start (see [`starts_with_escape_or_directive`]).
pub fn match_directive_name(text: &str) -> usize {
    match text.as_bytes().first() {
        None => 0,
        Some(byte) if byte.is_ascii_digit() => 0,
        Some(_) => length_while_char(text, is_directive_name),
    }
}

/// Match the name of a named argument. Names must not begin with an ASCII
/// digit.
pub fn match_argument_name(text: &str) -> usize {
    match text.as_bytes().first() {
        None => 0,
        Some(byte) if byte.is_ascii_digit() => 0,
        Some(_) => length_while_char(text, is_argument_name),
    }
}

/// Returns true if `text` begins with a backslash that starts an escape
/// sequence or a directive.
pub fn starts_with_escape_or_directive(text: &str) -> bool {
    let bytes = text.as_bytes();
    if bytes.first() != Some(&b'\\') {
        return false;
    }
    match bytes.get(1) {
        None => false,
        Some(&byte) if is_escapable(byte) => true,
        // The byte at index 1 is a char boundary because index 0 is ASCII.
        Some(_) => text[1..]
            .chars()
            .next()
            .is_some_and(is_directive_name_start),
    }
}

/// Look ahead for a `[ws] name [ws] =` prefix of an argument. Returns an
/// absent result when there is no name or no `=`. Never emits events.
pub fn match_named_argument_prefix(text: &str) -> NamedArgumentPrefix {
    let leading_whitespace = match_whitespace(text);
    let name_length = match_argument_name(&text[leading_whitespace..]);
    if name_length == 0 {
        return NamedArgumentPrefix::default();
    }
    let trailing_whitespace = match_whitespace(&text[leading_whitespace + name_length..]);
    let equals_at = leading_whitespace + name_length + trailing_whitespace;
    if text.as_bytes().get(equals_at) != Some(&b'=') {
        return NamedArgumentPrefix::default();
    }
    NamedArgumentPrefix {
        total_length: equals_at + 1,
        leading_whitespace,
        name_length,
        trailing_whitespace,
    }
}

/// Match a two-byte escape sequence like `\{`.
pub fn match_escape(out: &mut impl Consumer, text: &str) -> usize {
    let bytes = text.as_bytes();
    if bytes.len() >= 2 && bytes[0] == b'\\' && is_escapable(bytes[1]) {
        out.escape();
        2
    } else {
        0
    }
}

/// Match a whole directive: `\name`, an optional argument list, and an
/// optional block.
pub fn match_directive(out: &mut impl Consumer, text: &str) -> usize {
    if text.as_bytes().first() != Some(&b'\\') {
        return 0;
    }
    let name_length = match_directive_name(&text[1..]);
    if name_length == 0 {
        return 0;
    }

    out.push_directive();
    out.directive_name(1 + name_length);
    let mut length = 1 + name_length;
    length += match_argument_list(out, &text[length..]);
    length += match_block(out, &text[length..]);
    out.pop_directive();
    length
}

/// Match a `[...]` argument list. A `}` before the closing `]` ends the list
/// without being consumed, so the enclosing block matcher can see it.
pub fn match_argument_list(out: &mut impl Consumer, text: &str) -> usize {
    if text.as_bytes().first() != Some(&b'[') {
        return 0;
    }
    out.push_arguments();
    out.opening_square();
    let mut length = 1;
    loop {
        length += match_argument(out, &text[length..]);
        match text.as_bytes().get(length) {
            Some(b',') => {
                out.comma();
                length += 1;
            }
            Some(b']') => {
                out.closing_square();
                out.pop_arguments();
                return length + 1;
            }
            Some(b'}') => {
                out.pop_arguments();
                return length;
            }
            None => {
                out.unexpected_eof();
                return length;
            }
            Some(byte) => unreachable!(
                "argument matching stopped at a non-terminator byte {byte:#04x}"
            ),
        }
    }
}

/// Match a single argument: an optional `name =` prefix followed by a content
/// sequence in argument-value context.
pub fn match_argument(out: &mut impl Consumer, text: &str) -> usize {
    let prefix = match_named_argument_prefix(text);
    let mut length = 0;
    if prefix.is_present() {
        if prefix.leading_whitespace > 0 {
            out.whitespace_in_arguments(prefix.leading_whitespace);
        }
        out.argument_name(prefix.name_length);
        if prefix.trailing_whitespace > 0 {
            out.whitespace_in_arguments(prefix.trailing_whitespace);
        }
        out.equals();
        length = prefix.total_length;
    }
    length + match_content_sequence(out, &text[length..], ContentContext::ArgumentValue)
}

/// Match a `{...}` block. A missing closing brace is reported as
/// `unexpected_eof` and the consumed content is kept.
pub fn match_block(out: &mut impl Consumer, text: &str) -> usize {
    if text.as_bytes().first() != Some(&b'{') {
        return 0;
    }
    out.opening_brace();
    let length = 1 + match_content_sequence(out, &text[1..], ContentContext::Block);
    if text.as_bytes().get(length) == Some(&b'}') {
        out.closing_brace();
        length + 1
    } else {
        out.unexpected_eof();
        length
    }
}

/// Match one piece of content: an escape, a directive, or a plain-text run
/// up to the next significant byte.
pub fn match_content(out: &mut impl Consumer, text: &str, context: ContentContext) -> usize {
    let escape_length = match_escape(out, text);
    if escape_length > 0 {
        return escape_length;
    }
    let directive_length = match_directive(out, text);
    if directive_length > 0 {
        return directive_length;
    }

    let plain_length = match context {
        ContentContext::Document => match_plain_document(text),
        ContentContext::ArgumentValue | ContentContext::Block => {
            match_plain_bracketed(text, context)
        }
    };
    debug_assert!(
        plain_length > 0,
        "plain text matching must make forward progress"
    );
    out.text(plain_length);
    plain_length
}

/// Scan a plain-text run in document context, where only a backslash that
/// starts an escape or directive is significant.
fn match_plain_document(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut plain_length = 0;
    loop {
        match memchr::memchr(b'\\', &bytes[plain_length..]) {
            Some(offset) => {
                plain_length += offset;
                if starts_with_escape_or_directive(&text[plain_length..]) {
                    return plain_length;
                }
                // A lone backslash is literal text.
                plain_length += 1;
            }
            None => return bytes.len(),
        }
    }
}

/// Scan a plain-text run in argument-value or block context, tracking square
/// and brace nesting so that only an unbalanced closing bracket or a
/// top-level comma terminates the run.
fn match_plain_bracketed(text: &str, context: ContentContext) -> usize {
    let bytes = text.as_bytes();
    let in_value = context == ContentContext::ArgumentValue;
    let mut levels = BracketLevels::default();
    let mut plain_length = 0;
    while plain_length < bytes.len() {
        match ByteType::of(bytes[plain_length]) {
            ByteType::BACKSLASH => {
                if starts_with_escape_or_directive(&text[plain_length..]) {
                    break;
                }
            }
            ByteType::LBRACE => levels.brace += 1,
            ByteType::RBRACE => {
                if levels.brace == 0 {
                    break;
                }
                levels.brace -= 1;
            }
            ByteType::COMMA if in_value && levels.brace == 0 && levels.square == 0 => break,
            ByteType::LSQUARE if in_value && levels.brace == 0 => levels.square += 1,
            ByteType::RSQUARE if in_value && levels.brace == 0 => {
                if levels.square == 0 {
                    break;
                }
                levels.square -= 1;
            }
            _ => {}
        }
        plain_length += 1;
    }
    plain_length
}

/// Match content pieces until the context's terminator or the end of the
/// input.
pub fn match_content_sequence(
    out: &mut impl Consumer,
    text: &str,
    context: ContentContext,
) -> usize {
    let mut length = 0;
    while let Some(&byte) = text.as_bytes().get(length) {
        if context.terminates(byte) {
            break;
        }
        let consumed = match_content(out, &text[length..], context);
        debug_assert!(consumed > 0, "content matching must make forward progress");
        length += consumed;
    }
    length
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    /// Records events as readable strings for sequence assertions.
    #[derive(Default)]
    struct RecordingConsumer {
        events: Vec<String>,
    }

    impl Consumer for RecordingConsumer {
        fn text(&mut self, length: usize) {
            self.events.push(format!("text({length})"));
        }
        fn whitespace_in_arguments(&mut self, length: usize) {
            self.events.push(format!("ws({length})"));
        }
        fn opening_square(&mut self) {
            self.events.push("[".into());
        }
        fn closing_square(&mut self) {
            self.events.push("]".into());
        }
        fn comma(&mut self) {
            self.events.push(",".into());
        }
        fn argument_name(&mut self, length: usize) {
            self.events.push(format!("arg({length})"));
        }
        fn equals(&mut self) {
            self.events.push("=".into());
        }
        fn directive_name(&mut self, length: usize) {
            self.events.push(format!("dir({length})"));
        }
        fn opening_brace(&mut self) {
            self.events.push("{".into());
        }
        fn closing_brace(&mut self) {
            self.events.push("}".into());
        }
        fn escape(&mut self) {
            self.events.push("escape".into());
        }
        fn push_directive(&mut self) {
            self.events.push("push_dir".into());
        }
        fn pop_directive(&mut self) {
            self.events.push("pop_dir".into());
        }
        fn push_arguments(&mut self) {
            self.events.push("push_args".into());
        }
        fn pop_arguments(&mut self) {
            self.events.push("pop_args".into());
        }
        fn unexpected_eof(&mut self) {
            self.events.push("eof".into());
        }
    }

    fn events_of(f: impl FnOnce(&mut RecordingConsumer) -> usize) -> (usize, Vec<String>) {
        let mut out = RecordingConsumer::default();
        let length = f(&mut out);
        (length, out.events)
    }

    #[test_case("", 0; "empty")]
    #[test_case("9abc", 0; "leading digit")]
    #[test_case("b", 1; "single letter")]
    #[test_case("-comment rest", 8; "leading dash")]
    #[test_case("abc-def{x}", 7; "stops at brace")]
    #[test_case("héllo", 6; "non-ascii name")]
    fn directive_names(input: &str, expected: usize) {
        assert_eq!(match_directive_name(input), expected);
    }

    #[test_case("\\{", true; "escapable brace")]
    #[test_case("\\,", true; "escapable comma")]
    #[test_case("\\b", true; "directive start")]
    #[test_case("\\-comment", true; "dash directive start")]
    #[test_case("\\ ", false; "space is neither")]
    #[test_case("\\", false; "lone backslash")]
    #[test_case("x", false; "no backslash")]
    fn escape_or_directive_starts(input: &str, expected: bool) {
        assert_eq!(starts_with_escape_or_directive(input), expected);
    }

    #[test]
    fn named_argument_prefix_present() {
        let prefix = match_named_argument_prefix("  key =value");
        assert!(prefix.is_present());
        assert_eq!(
            prefix,
            NamedArgumentPrefix {
                total_length: 8,
                leading_whitespace: 2,
                name_length: 3,
                trailing_whitespace: 1,
            }
        );
    }

    #[test_case("value"; "no equals")]
    #[test_case("a b=c"; "space inside name")]
    #[test_case(""; "empty")]
    fn named_argument_prefix_absent(input: &str) {
        assert!(!match_named_argument_prefix(input).is_present());
    }

    #[test]
    fn named_argument_prefix_requires_name() {
        assert!(!match_named_argument_prefix(" = x").is_present());
        assert!(!match_named_argument_prefix("9k=x").is_present());
    }

    #[test]
    fn escape_consumes_two_bytes() {
        let (length, events) = events_of(|out| match_escape(out, "\\{rest"));
        assert_eq!(length, 2);
        assert_eq!(events, ["escape"]);

        let (length, events) = events_of(|out| match_escape(out, "\\b"));
        assert_eq!(length, 0);
        assert!(events.is_empty());
    }

    #[test]
    fn directive_with_arguments_and_block() {
        let (length, events) = events_of(|out| match_directive(out, "\\b[x=1]{hi}"));
        assert_eq!(length, 11);
        assert_eq!(
            events,
            [
                "push_dir", "dir(2)", "push_args", "[", "arg(1)", "=", "text(1)", "]",
                "pop_args", "{", "text(2)", "}", "pop_dir",
            ]
        );
    }

    #[test]
    fn argument_list_stops_at_brace_without_consuming() {
        // The `}` belongs to the enclosing block; the list ends before it.
        let (length, events) = events_of(|out| match_argument_list(out, "[a}rest"));
        assert_eq!(length, 2);
        assert_eq!(events, ["push_args", "[", "text(1)", "pop_args"]);
    }

    #[test]
    fn argument_list_reports_eof() {
        let (length, events) = events_of(|out| match_argument_list(out, "[a"));
        assert_eq!(length, 2);
        assert_eq!(events, ["push_args", "[", "text(1)", "eof"]);
    }

    #[test]
    fn block_reports_eof() {
        let (length, events) = events_of(|out| match_block(out, "{oops"));
        assert_eq!(length, 5);
        assert_eq!(events, ["{", "text(4)", "eof"]);
    }

    #[test]
    fn content_run_balances_brackets_in_argument_values() {
        // The nested `[...]` keeps the comma and the first `]` inside the
        // run; only the final unbalanced `]` terminates it.
        let mut out = RecordingConsumer::default();
        let length = match_content(&mut out, "a[b,c]d]x", ContentContext::ArgumentValue);
        assert_eq!(length, 7);
        assert_eq!(out.events, ["text(7)"]);
    }

    #[test]
    fn content_run_treats_squares_as_text_in_blocks() {
        let mut out = RecordingConsumer::default();
        let length = match_content(&mut out, "a[b,c]d}x", ContentContext::Block);
        assert_eq!(length, 7);
        assert_eq!(out.events, ["text(7)"]);
    }

    #[test]
    fn content_run_keeps_literal_backslash() {
        let mut out = RecordingConsumer::default();
        let length = match_content(&mut out, "a\\ b", ContentContext::Document);
        assert_eq!(length, 4);
        assert_eq!(out.events, ["text(4)"]);
    }

    #[test]
    fn content_sequence_consumes_whole_document() {
        let source = "pre \\b{in} post";
        let (length, _) = events_of(|out| {
            match_content_sequence(out, source, ContentContext::Document)
        });
        assert_eq!(length, source.len());
    }

    #[test]
    fn content_sequence_stops_at_argument_terminators() {
        for (input, expected) in [("ab,rest", 2), ("ab]rest", 2), ("ab}rest", 2)] {
            let (length, _) = events_of(|out| {
                match_content_sequence(out, input, ContentContext::ArgumentValue)
            });
            assert_eq!(length, expected);
        }
    }
}
