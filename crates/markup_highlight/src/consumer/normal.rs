use super::Consumer;
use crate::token::{HighlightCategory, HighlightToken, TokenSink};

/// The default consumer: emits one highlight span per structural event and
/// advances past literal text without emitting anything. Its only state is a
/// cursor into the source.
pub struct NormalConsumer<S> {
    cursor: usize,
    sink: S,
}

impl<S: TokenSink> NormalConsumer<S> {
    pub fn new(sink: S) -> Self {
        Self { cursor: 0, sink }
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// The absolute source offset of the next event.
    pub(crate) fn position(&self) -> usize {
        self.cursor
    }

    /// Reposition the cursor after a stretch of events was routed to another
    /// consumer.
    pub(crate) fn resume_at(&mut self, cursor: usize) {
        self.cursor = cursor;
    }

    pub(crate) fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    fn advance(&mut self, length: usize) {
        self.cursor += length;
    }

    fn emit(&mut self, length: usize, category: HighlightCategory) {
        self.sink
            .token(HighlightToken::new(self.cursor, length, category));
        self.cursor += length;
    }
}

impl<S: TokenSink> Consumer for NormalConsumer<S> {
    fn text(&mut self, length: usize) {
        self.advance(length);
    }

    fn whitespace_in_arguments(&mut self, length: usize) {
        self.advance(length);
    }

    fn opening_square(&mut self) {
        self.emit(1, HighlightCategory::SymSquare);
    }

    fn closing_square(&mut self) {
        self.emit(1, HighlightCategory::SymSquare);
    }

    fn comma(&mut self) {
        self.emit(1, HighlightCategory::SymPunc);
    }

    fn argument_name(&mut self, length: usize) {
        self.emit(length, HighlightCategory::MarkupAttr);
    }

    fn equals(&mut self) {
        self.emit(1, HighlightCategory::SymPunc);
    }

    fn directive_name(&mut self, length: usize) {
        self.emit(length, HighlightCategory::MarkupTag);
    }

    fn opening_brace(&mut self) {
        self.emit(1, HighlightCategory::SymBrace);
    }

    fn closing_brace(&mut self) {
        self.emit(1, HighlightCategory::SymBrace);
    }

    fn escape(&mut self) {
        self.emit(2, HighlightCategory::Escape);
    }
}
