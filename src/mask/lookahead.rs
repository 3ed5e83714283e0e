//! Forward scan for the next token that accepts an input character.
//!
//! When a typed character does not fit the current token, the evaluator can
//! jump ahead to the first later token that does fit, skipping whatever lies
//! in between. The scan never enters a group: reaching a group token ends
//! the scan and the group itself becomes the landing position.

use super::token::Token;

/// Index of the first token at or after `from` that accepts `ch`, or of the
/// first group token on the way.
pub fn find_lookahead(tokens: &[Token], from: usize, ch: char) -> Option<usize> {
    tokens
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, token)| token.is_group() || token.accepts(ch))
        .map(|(idx, _)| idx)
}
