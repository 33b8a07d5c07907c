use log::warn;

use super::{CodeBlockConsumer, CommentConsumer, Consumer, NormalConsumer};
use crate::nested::{translate_nested_tokens, NestedHighlighter};
use crate::token::{HighlightCategory, HighlightToken, TokenSink};
use crate::HighlightOptions;

/// Directive names that switch highlighting to the comment consumer.
const COMMENT_DIRECTIVES: [&str; 2] = ["\\comment", "\\-comment"];

/// Directive names whose body is staged for a nested language highlighter.
const CODE_BLOCK_DIRECTIVES: [&str; 2] = ["\\code", "\\codeblock"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Route {
    Normal,
    Comment,
    CodeBlock,
}

/// A façade over the specialized consumers.
///
/// Events are forwarded to the active consumer. The route is chosen by
/// inspecting the source bytes of each `directive_name` event rather than at
/// `push_directive`, so the matchers keep driving all bracket counting
/// generically. When the directive that switched the route ends, the
/// specialized consumer's accumulated spans are flushed into the sink and
/// the route reverts to the normal consumer.
pub struct DispatchConsumer<'src, 'nh, S> {
    source: &'src str,
    /// Absolute source offset of the next event.
    cursor: usize,
    route: Route,
    normal: NormalConsumer<S>,
    comment: CommentConsumer,
    /// Source offset where the active comment directive began.
    comment_start: usize,
    code_block: CodeBlockConsumer<'src>,
    nested: Option<&'nh mut dyn NestedHighlighter>,
    options: HighlightOptions,
}

impl<'src, 'nh, S: TokenSink> DispatchConsumer<'src, 'nh, S> {
    pub fn new(source: &'src str, sink: S, options: HighlightOptions) -> Self {
        Self {
            source,
            cursor: 0,
            route: Route::Normal,
            normal: NormalConsumer::new(sink),
            comment: CommentConsumer::new(),
            comment_start: 0,
            code_block: CodeBlockConsumer::new(source),
            nested: None,
            options,
        }
    }

    /// Attach a highlighter for the bodies of code directives.
    pub fn with_nested(mut self, nested: &'nh mut dyn NestedHighlighter) -> Self {
        self.nested = Some(nested);
        self
    }

    pub fn into_sink(self) -> S {
        self.normal.into_sink()
    }

    /// The consumer currently receiving events.
    fn current(&mut self) -> &mut dyn Consumer {
        match self.route {
            Route::Normal => &mut self.normal,
            Route::Comment => &mut self.comment,
            Route::CodeBlock => &mut self.code_block,
        }
    }

    fn try_flush(&mut self) {
        match self.route {
            Route::Normal => {}
            Route::Comment => {
                if self.comment.done() {
                    self.flush_comment();
                }
            }
            Route::CodeBlock => {
                if self.code_block.done() {
                    self.flush_code_block();
                }
            }
        }
    }

    /// Emit the three lumped comment spans and revert to the normal route.
    fn flush_comment(&mut self) {
        let prefix = self.comment.prefix_length();
        let content = self.comment.content_length();
        let suffix = self.comment.suffix_length();
        debug_assert!(prefix > 0, "a comment directive always has a prefix");

        let mut begin = self.comment_start;
        let sink = self.normal.sink_mut();
        sink.token(HighlightToken::new(
            begin,
            prefix,
            HighlightCategory::CommentDelim,
        ));
        begin += prefix;
        if content > 0 {
            sink.token(HighlightToken::new(begin, content, HighlightCategory::Comment));
            begin += content;
        }
        if suffix > 0 {
            sink.token(HighlightToken::new(
                begin,
                suffix,
                HighlightCategory::CommentDelim,
            ));
        }

        self.comment.reset();
        self.normal.resume_at(self.cursor);
        self.route = Route::Normal;
    }

    /// Hand the staged body to the nested highlighter, then emit the
    /// buffered envelope and the translated nested spans merged in source
    /// order, and revert to the normal route.
    fn flush_code_block(&mut self) {
        let flush = self.code_block.finish();

        let mut nested_tokens = Vec::new();
        if !flush.nested_source.is_empty() {
            if let Some(nested) = self.nested.as_deref_mut() {
                if let Err(error) =
                    nested.highlight(&flush.nested_source, &self.options, &mut nested_tokens)
                {
                    warn!("nested highlighting failed, leaving the body plain: {error}");
                    nested_tokens.clear();
                }
            }
        }
        let translated = translate_nested_tokens(&flush.nested_remap, &nested_tokens);

        let sink = self.normal.sink_mut();
        let mut envelope = flush.envelope.into_iter().peekable();
        let mut nested_spans = translated.into_iter().peekable();
        loop {
            let take_envelope = match (envelope.peek(), nested_spans.peek()) {
                (Some(e), Some(n)) => e.begin <= n.begin,
                (Some(_), None) => true,
                (None, Some(_)) => false,
                (None, None) => break,
            };
            let token = if take_envelope {
                envelope.next()
            } else {
                nested_spans.next()
            };
            sink.token(token.unwrap());
        }

        self.normal.resume_at(self.cursor);
        self.route = Route::Normal;
    }
}

impl<S: TokenSink> Consumer for DispatchConsumer<'_, '_, S> {
    fn text(&mut self, length: usize) {
        debug_assert!(length > 0, "text events must carry at least one byte");
        self.current().text(length);
        self.cursor += length;
    }

    fn whitespace_in_arguments(&mut self, length: usize) {
        debug_assert!(length > 0, "whitespace events must carry at least one byte");
        self.current().whitespace_in_arguments(length);
        self.cursor += length;
    }

    fn opening_square(&mut self) {
        self.current().opening_square();
        self.cursor += 1;
    }

    fn closing_square(&mut self) {
        self.current().closing_square();
        self.cursor += 1;
    }

    fn comma(&mut self) {
        self.current().comma();
        self.cursor += 1;
    }

    fn argument_name(&mut self, length: usize) {
        debug_assert!(length > 0, "argument names carry at least one byte");
        self.current().argument_name(length);
        self.cursor += length;
    }

    fn equals(&mut self) {
        self.current().equals();
        self.cursor += 1;
    }

    fn directive_name(&mut self, length: usize) {
        debug_assert!(length > 0, "directive names carry at least one byte");
        // Routing is decided here, after the matcher announced the name, and
        // only from the normal route: designated directives nested inside an
        // active comment or code block are absorbed by that consumer.
        if self.route == Route::Normal {
            let name = &self.source[self.cursor..self.cursor + length];
            if COMMENT_DIRECTIVES.contains(&name) {
                self.route = Route::Comment;
                self.comment_start = self.cursor;
            } else if CODE_BLOCK_DIRECTIVES.contains(&name) {
                self.route = Route::CodeBlock;
                self.code_block.start_at(self.cursor);
            }
        }
        self.current().directive_name(length);
        self.cursor += length;
    }

    fn opening_brace(&mut self) {
        self.current().opening_brace();
        self.cursor += 1;
    }

    fn closing_brace(&mut self) {
        self.current().closing_brace();
        self.cursor += 1;
    }

    fn escape(&mut self) {
        self.current().escape();
        self.cursor += 2;
    }

    fn push_directive(&mut self) {
        self.current().push_directive();
    }

    fn pop_directive(&mut self) {
        self.current().pop_directive();
        self.try_flush();
    }

    fn push_arguments(&mut self) {
        self.current().push_arguments();
    }

    fn pop_arguments(&mut self) {
        self.current().pop_arguments();
    }

    fn unexpected_eof(&mut self) {
        self.current().unexpected_eof();
        self.try_flush();
    }
}
