//! Token types for compiled masks.

use std::ops::Range;

use super::char_class::CharClass;
use super::quantifier::Quantifier;

/// One addressable unit of a mask together with its quantifier.
///
/// A mask like `dd?//dddd` compiles to `Digit`, `Digit?`, `Literal('/')`
/// and four more `Digit`s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub quantifier: Quantifier,
    /// Character offsets of the token, quantifier included, within the
    /// whole mask.
    pub span: Range<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Class(CharClass),
    /// A plain or `/`-escaped literal character.
    Literal(char),
    /// A parenthesised sub-mask.
    Group(Vec<Token>),
}

impl Token {
    /// Number of mask characters this token occupies.
    pub fn width(&self) -> usize {
        self.span.len()
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, TokenKind::Group(_))
    }

    /// True if `ch` is what this token consumes directly.
    ///
    /// Groups never accept a character at this level.
    pub fn accepts(&self, ch: char) -> bool {
        match &self.kind {
            TokenKind::Class(class) => class.matches(ch),
            TokenKind::Literal(lit) => *lit == ch,
            TokenKind::Group(_) => false,
        }
    }
}
