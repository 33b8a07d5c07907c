use super::normal::NormalConsumer;
use super::Consumer;
use crate::token::HighlightToken;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CodeBlockStage {
    BeforeBlock,
    InBlock,
    Done,
}

/// Everything a code directive leaves behind when it is flushed: the staged
/// body, the offset remap for translating nested tokens back to source
/// coordinates, and the envelope spans that were buffered while the
/// directive was active.
pub(crate) struct CodeBlockFlush {
    pub nested_source: String,
    pub nested_remap: Vec<usize>,
    pub envelope: Vec<HighlightToken>,
}

/// Highlights the punctuation envelope of a code directive the way the
/// normal consumer would, while collecting the outermost body text into a
/// staging buffer for a nested language highlighter.
///
/// Envelope spans are buffered in an internal list instead of being emitted
/// directly: nested tokens only become available when the directive ends, so
/// emitting the envelope eagerly would put spans into the sink out of source
/// order whenever the body contains nested structures.
pub struct CodeBlockConsumer<'src> {
    source: &'src str,
    inner: NormalConsumer<Vec<HighlightToken>>,
    stage: CodeBlockStage,
    arguments_level: u32,
    brace_level: u32,
    /// Directive nesting depth below the activating directive, mirroring the
    /// comment consumer's bookkeeping.
    directive_level: u32,
    nested_source: String,
    nested_remap: Vec<usize>,
}

impl<'src> CodeBlockConsumer<'src> {
    pub(crate) fn new(source: &'src str) -> Self {
        Self {
            source,
            inner: NormalConsumer::new(Vec::new()),
            stage: CodeBlockStage::BeforeBlock,
            arguments_level: 0,
            brace_level: 0,
            directive_level: 0,
            nested_source: String::new(),
            nested_remap: Vec::new(),
        }
    }

    /// Prepare for a new code directive whose first event begins at `cursor`.
    pub(crate) fn start_at(&mut self, cursor: usize) {
        self.inner = NormalConsumer::new(Vec::new());
        self.inner.resume_at(cursor);
        self.stage = CodeBlockStage::BeforeBlock;
        self.arguments_level = 0;
        self.brace_level = 0;
        self.directive_level = 0;
        self.nested_source.clear();
        self.nested_remap.clear();
    }

    pub(crate) fn done(&self) -> bool {
        self.stage == CodeBlockStage::Done
    }

    /// Take the staged body and buffered envelope, leaving the consumer
    /// empty for the next directive.
    pub(crate) fn finish(&mut self) -> CodeBlockFlush {
        CodeBlockFlush {
            nested_source: std::mem::take(&mut self.nested_source),
            nested_remap: std::mem::take(&mut self.nested_remap),
            envelope: std::mem::take(self.inner.sink_mut()),
        }
    }

    /// True while text runs belong to the outermost body, as opposed to the
    /// argument list or a nested braced structure.
    fn staging(&self) -> bool {
        self.stage == CodeBlockStage::InBlock && self.arguments_level == 0 && self.brace_level == 1
    }
}

impl Consumer for CodeBlockConsumer<'_> {
    fn text(&mut self, length: usize) {
        if self.staging() {
            let begin = self.inner.position();
            self.nested_source.push_str(&self.source[begin..begin + length]);
            self.nested_remap.extend(begin..begin + length);
        }
        self.inner.text(length);
    }

    fn whitespace_in_arguments(&mut self, length: usize) {
        self.inner.whitespace_in_arguments(length);
    }

    fn opening_square(&mut self) {
        self.inner.opening_square();
    }

    fn closing_square(&mut self) {
        self.inner.closing_square();
    }

    fn comma(&mut self) {
        self.inner.comma();
    }

    fn argument_name(&mut self, length: usize) {
        self.inner.argument_name(length);
    }

    fn equals(&mut self) {
        self.inner.equals();
    }

    fn directive_name(&mut self, length: usize) {
        self.inner.directive_name(length);
    }

    fn opening_brace(&mut self) {
        if self.stage == CodeBlockStage::BeforeBlock
            && self.arguments_level == 0
            && self.brace_level == 0
        {
            self.stage = CodeBlockStage::InBlock;
        }
        self.brace_level += 1;
        self.inner.opening_brace();
    }

    fn closing_brace(&mut self) {
        debug_assert!(self.brace_level > 0, "closing brace without an opening");
        self.brace_level -= 1;
        if self.stage == CodeBlockStage::InBlock
            && self.arguments_level == 0
            && self.brace_level == 0
        {
            self.stage = CodeBlockStage::Done;
        }
        self.inner.closing_brace();
    }

    fn escape(&mut self) {
        self.inner.escape();
    }

    fn push_directive(&mut self) {
        self.directive_level += 1;
    }

    fn pop_directive(&mut self) {
        if self.directive_level == 0 {
            self.stage = CodeBlockStage::Done;
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
        self.stage = CodeBlockStage::Done;
    }
}
