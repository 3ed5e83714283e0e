//! Single-character validity check against a compiled mask.
//!
//! This answers "could `ch` ever be accepted from here?" without running the
//! evaluator, so a caller can filter keystrokes up front.

use super::token::{Token, TokenKind};

/// Outcome of [`is_valid_character`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    /// Some reachable token accepts the character.
    Accepted,
    /// No reachable token can accept the character.
    Rejected,
    /// Not accepted here, but only because an optional token or the
    /// eat-invalid policy stands in the way.
    DeferredOptional,
}

impl Validity {
    pub fn is_accepted(self) -> bool {
        self == Validity::Accepted
    }

    pub fn is_rejected(self) -> bool {
        self == Validity::Rejected
    }
}

/// Check whether `ch` is valid at token `pos` of `tokens`.
///
/// Literals that do not match are skipped. A class or group that does not
/// match settles the answer unless it may be skipped: when `eat_invalid` is
/// set every deferred token is skipped too.
pub fn is_valid_character(
    ch: char,
    tokens: &[Token],
    pos: usize,
    eat_invalid: bool,
) -> Validity {
    let mut verdict = None;

    for token in tokens.iter().skip(pos) {
        verdict = token_verdict(ch, token, eat_invalid);
        let keep_scanning = match verdict {
            None => true,
            Some(Validity::DeferredOptional) => eat_invalid,
            Some(_) => false,
        };
        if !keep_scanning {
            break;
        }
    }

    verdict.unwrap_or(Validity::DeferredOptional)
}

/// Verdict for a single token; `None` when the token does not decide.
fn token_verdict(ch: char, token: &Token, eat_invalid: bool) -> Option<Validity> {
    match &token.kind {
        TokenKind::Class(class) => Some(if class.matches(ch) {
            Validity::Accepted
        } else if token.quantifier.allows_zero() || eat_invalid {
            Validity::DeferredOptional
        } else {
            Validity::Rejected
        }),
        TokenKind::Group(inner) => {
            let inner_verdict = is_valid_character(ch, inner, 0, eat_invalid);
            Some(if inner_verdict.is_accepted() {
                Validity::Accepted
            } else if token.quantifier.allows_zero() {
                Validity::DeferredOptional
            } else {
                Validity::Rejected
            })
        }
        TokenKind::Literal(lit) => (*lit == ch).then_some(Validity::Accepted),
    }
}
