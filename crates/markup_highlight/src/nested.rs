use crate::error::HighlightError;
use crate::token::HighlightToken;
use crate::HighlightOptions;

/// A highlighter for the language embedded in the body of a code directive.
///
/// The tokenizer stages the outermost body text of `\code` and `\codeblock`
/// directives into a contiguous buffer and hands it over here; tokens must be
/// pushed with offsets relative to that buffer, in non-decreasing order. The
/// caller translates them back to absolute source coordinates.
///
/// Returning an error leaves the body unhighlighted; it never aborts the
/// outer tokenization.
pub trait NestedHighlighter {
    fn highlight(
        &mut self,
        source: &str,
        options: &HighlightOptions,
        tokens: &mut Vec<HighlightToken>,
    ) -> Result<(), HighlightError>;
}

/// Translate tokens produced against a staged buffer back to absolute source
/// offsets. `remap[i]` is the source offset of staged byte `i`.
///
/// The staged buffer can be discontiguous in the source, because the body of
/// a code directive may contain nested braced structures whose bytes are not
/// staged. A token is split wherever the remap jumps.
pub(crate) fn translate_nested_tokens(
    remap: &[usize],
    tokens: &[HighlightToken],
) -> Vec<HighlightToken> {
    let mut translated = Vec::with_capacity(tokens.len());
    for token in tokens {
        // Tokens from a misbehaving nested highlighter are clamped to the
        // staged range rather than trusted.
        let end = token.end().min(remap.len());
        let mut offset = token.begin.min(end);
        while offset < end {
            let begin = remap[offset];
            let mut length = 1;
            while offset + length < end && remap[offset + length] == begin + length {
                length += 1;
            }
            translated.push(HighlightToken::new(begin, length, token.category));
            offset += length;
        }
    }
    translated
}
