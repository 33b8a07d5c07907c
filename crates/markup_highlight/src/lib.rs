//! A streaming highlight tokenizer for a backslash-directive markup
//! language.
//!
//! The language is built around directives of the form
//! `\name[arg, key=value]{body}`, which may nest arbitrarily inside each
//! other's argument values and bodies. Tokenization is a single synchronous
//! pass: stateless matchers recognize the structure with careful bracket
//! balancing and report it as semantic events to a [`Consumer`], and the
//! consumers turn those events into [`HighlightToken`] spans.
//!
//! Three consumers cover the language's highlighting modes: the normal
//! consumer emits one span per structural element, the comment consumer
//! lumps a `\comment` directive into delimiter and content spans while
//! ignoring its internal structure, and the code-block consumer stages the
//! body of a `\code` directive for a [`NestedHighlighter`]. A dispatching
//! consumer switches between them based on the directive names it observes.
//!
//! ```rust
//! use markup_highlight::{highlight, HighlightOptions};
//!
//! let tokens = highlight("\\b[x=1]{hi}", &HighlightOptions::default());
//! assert_eq!(tokens.len(), 7);
//! ```

pub use consumer::{Consumer, DispatchConsumer, NormalConsumer};
pub use error::HighlightError;
pub use nested::NestedHighlighter;
pub use token::{HighlightCategory, HighlightToken, TokenSink};

mod byte_lookup;
mod consumer;
mod error;
pub mod matcher;
mod nested;
mod token;

/// Options threaded through a highlighting run.
///
/// The tokenizer reads none of these itself; they are forwarded to nested
/// highlighters and to whatever serializes the resulting spans.
#[derive(Clone, Copy, Debug, Default)]
pub struct HighlightOptions {
    /// Ask serializers to merge adjacent spans of the same category. The
    /// tokenizer always emits unmerged spans.
    pub coalescing: bool,
}

/// Tokenize `source` and return its highlight spans.
pub fn highlight(source: &str, options: &HighlightOptions) -> Vec<HighlightToken> {
    let mut tokens = Vec::new();
    highlight_into(source, &mut tokens, options);
    tokens
}

/// Tokenize `source`, pushing highlight spans into `sink`.
pub fn highlight_into<S: TokenSink>(source: &str, sink: &mut S, options: &HighlightOptions) {
    log::trace!("highlighting {} bytes of markup", source.len());
    let mut consumer = DispatchConsumer::new(source, sink, *options);
    run(&mut consumer, source);
}

/// Tokenize `source` with a highlighter for the bodies of code directives.
pub fn highlight_with_nested<S: TokenSink>(
    source: &str,
    sink: &mut S,
    options: &HighlightOptions,
    nested: &mut dyn NestedHighlighter,
) {
    log::trace!("highlighting {} bytes of markup with nesting", source.len());
    let mut consumer = DispatchConsumer::new(source, sink, *options).with_nested(nested);
    run(&mut consumer, source);
}

fn run<S: TokenSink>(consumer: &mut DispatchConsumer<'_, '_, &mut S>, source: &str) {
    let consumed =
        matcher::match_content_sequence(consumer, source, matcher::ContentContext::Document);
    debug_assert_eq!(
        consumed,
        source.len(),
        "document matching must consume the whole source"
    );
}
