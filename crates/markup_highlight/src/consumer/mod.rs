mod code_block;
mod comment;
mod dispatch;
mod normal;

pub(crate) use code_block::CodeBlockConsumer;
pub(crate) use comment::CommentConsumer;
pub use dispatch::DispatchConsumer;
pub use normal::NormalConsumer;

/// The sink interface driven by the matchers.
///
/// Matchers announce every semantic element of the source as an event, in
/// source order. Events that carry a byte count describe that many bytes of
/// the current remainder; all other events describe a fixed number of bytes
/// (one for each bracket and punctuation event, two for an escape, zero for
/// the structural bracketing events). A consumer that tracks a cursor must
/// advance it by exactly that many bytes per event to stay aligned with the
/// source.
pub trait Consumer {
    /// A run of literal text. Not highlighted.
    fn text(&mut self, length: usize);

    /// Whitespace inside an argument list.
    fn whitespace_in_arguments(&mut self, length: usize);

    /// `[` opening an argument list.
    fn opening_square(&mut self);

    /// `]` closing an argument list.
    fn closing_square(&mut self);

    /// `,` separating two arguments.
    fn comma(&mut self);

    /// The name of a named argument.
    fn argument_name(&mut self, length: usize);

    /// `=` between a named argument's name and its value.
    fn equals(&mut self);

    /// A directive name, including the leading backslash.
    fn directive_name(&mut self, length: usize);

    /// `{` opening a directive body.
    fn opening_brace(&mut self);

    /// `}` closing a directive body.
    fn closing_brace(&mut self);

    /// A two-byte escape sequence.
    fn escape(&mut self);

    /// Brackets a whole directive. Carries no bytes.
    fn push_directive(&mut self) {}

    /// Ends the directive started by the matching [`Self::push_directive`].
    fn pop_directive(&mut self) {}

    /// Brackets an argument list. Carries no bytes.
    fn push_arguments(&mut self) {}

    /// Ends the argument list started by the matching
    /// [`Self::push_arguments`].
    fn pop_arguments(&mut self) {}

    /// The source ended in the middle of an argument list or block.
    fn unexpected_eof(&mut self) {}
}
