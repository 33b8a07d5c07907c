use super::Consumer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CommentPart {
    Prefix,
    Content,
    Suffix,
}

/// Absorbs the events of a single comment directive into three lumped byte
/// counts: the prefix up to and including the opening brace, the body, and
/// the closing brace. The internal structure of the body is deliberately
/// discarded; nested directives only matter for knowing when the outermost
/// braces open and close.
#[derive(Debug)]
pub struct CommentConsumer {
    prefix: usize,
    content: usize,
    suffix: usize,
    active: CommentPart,
    arguments_level: u32,
    brace_level: u32,
    /// Directive nesting depth below the directive that activated this
    /// consumer. The activating directive itself is not counted; its
    /// `pop_directive` arrives at depth zero.
    directive_level: u32,
}

impl Default for CommentConsumer {
    fn default() -> Self {
        Self::new()
    }
}

impl CommentConsumer {
    pub fn new() -> Self {
        Self {
            prefix: 0,
            content: 0,
            suffix: 0,
            active: CommentPart::Prefix,
            arguments_level: 0,
            brace_level: 0,
            directive_level: 0,
        }
    }

    /// True once the directive that activated this consumer has ended, either
    /// by its closing brace, its own pop, or end of input.
    pub(crate) fn done(&self) -> bool {
        self.active == CommentPart::Suffix
    }

    pub(crate) fn prefix_length(&self) -> usize {
        self.prefix
    }

    pub(crate) fn content_length(&self) -> usize {
        self.content
    }

    pub(crate) fn suffix_length(&self) -> usize {
        self.suffix
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::new();
    }

    fn absorb(&mut self, length: usize) {
        match self.active {
            CommentPart::Prefix => self.prefix += length,
            CommentPart::Content => self.content += length,
            CommentPart::Suffix => self.suffix += length,
        }
    }
}

impl Consumer for CommentConsumer {
    fn text(&mut self, length: usize) {
        self.absorb(length);
    }

    fn whitespace_in_arguments(&mut self, length: usize) {
        self.absorb(length);
    }

    fn opening_square(&mut self) {
        self.absorb(1);
    }

    fn closing_square(&mut self) {
        self.absorb(1);
    }

    fn comma(&mut self) {
        self.absorb(1);
    }

    fn argument_name(&mut self, length: usize) {
        self.absorb(length);
    }

    fn equals(&mut self) {
        self.absorb(1);
    }

    fn directive_name(&mut self, length: usize) {
        self.absorb(length);
    }

    fn opening_brace(&mut self) {
        // The outermost opening brace still belongs to the prefix.
        self.absorb(1);
        if self.arguments_level == 0 && self.brace_level == 0 && self.active == CommentPart::Prefix
        {
            self.active = CommentPart::Content;
        }
        self.brace_level += 1;
    }

    fn closing_brace(&mut self) {
        debug_assert!(self.brace_level > 0, "closing brace without an opening");
        self.brace_level -= 1;
        // The outermost closing brace belongs to the suffix.
        if self.arguments_level == 0 && self.brace_level == 0 && self.active == CommentPart::Content
        {
            self.active = CommentPart::Suffix;
        }
        self.absorb(1);
    }

    fn escape(&mut self) {
        self.absorb(2);
    }

    fn push_directive(&mut self) {
        self.directive_level += 1;
    }

    fn pop_directive(&mut self) {
        if self.directive_level == 0 {
            // The directive that activated this consumer is ending.
            self.active = CommentPart::Suffix;
        } else {
            self.directive_level -= 1;
        }
    }

    fn push_arguments(&mut self) {
        self.arguments_level += 1;
    }

    fn pop_arguments(&mut self) {
        debug_assert!(self.arguments_level > 0, "argument list underflow");
        self.arguments_level -= 1;
    }

    fn unexpected_eof(&mut self) {
        self.active = CommentPart::Suffix;
    }
}
