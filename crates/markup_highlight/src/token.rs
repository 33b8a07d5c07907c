use std::fmt;

use serde::{Deserialize, Serialize};

/// The fixed set of highlight categories this tokenizer can emit.
///
/// The snake_case string tags are part of the output contract and must stay
/// stable across releases; downstream themes key off of them directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightCategory {
    /// `[` and `]` bracketing an argument list.
    SymSquare,
    /// `{` and `}` bracketing a directive body.
    SymBrace,
    /// `,` and `=` punctuation inside an argument list.
    SymPunc,
    /// A directive name, including the leading backslash.
    MarkupTag,
    /// The name of a named argument.
    MarkupAttr,
    /// A two-byte escape sequence.
    Escape,
    /// The content of a comment directive.
    Comment,
    /// The delimiters around a comment directive's content.
    CommentDelim,
}

impl HighlightCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            HighlightCategory::SymSquare => "sym_square",
            HighlightCategory::SymBrace => "sym_brace",
            HighlightCategory::SymPunc => "sym_punc",
            HighlightCategory::MarkupTag => "markup_tag",
            HighlightCategory::MarkupAttr => "markup_attr",
            HighlightCategory::Escape => "escape",
            HighlightCategory::Comment => "comment",
            HighlightCategory::CommentDelim => "comment_delim",
        }
    }
}

impl fmt::Display for HighlightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single highlighted span: an absolute byte offset into the source, a
/// positive byte length, and a category. Spans never overlap and are
/// produced in non-decreasing `begin` order; source bytes not covered by any
/// span are unhighlighted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightToken {
    pub begin: usize,
    pub length: usize,
    pub category: HighlightCategory,
}

impl HighlightToken {
    pub fn new(begin: usize, length: usize, category: HighlightCategory) -> Self {
        debug_assert!(length > 0, "highlight tokens must cover at least one byte");
        Self {
            begin,
            length,
            category,
        }
    }

    /// The exclusive end offset of this token.
    pub fn end(&self) -> usize {
        self.begin + self.length
    }
}

/// The output sink for highlight tokens. Sinks are append-only and must not
/// fail; the tokenizer pushes tokens in non-decreasing `begin` order.
pub trait TokenSink {
    fn token(&mut self, token: HighlightToken);
}

impl<S: TokenSink + ?Sized> TokenSink for &mut S {
    fn token(&mut self, token: HighlightToken) {
        (**self).token(token);
    }
}

impl TokenSink for Vec<HighlightToken> {
    fn token(&mut self, token: HighlightToken) {
        debug_assert!(
            self.last().is_none_or(|last| last.begin <= token.begin),
            "tokens must be pushed in non-decreasing begin order"
        );
        self.push(token);
    }
}
