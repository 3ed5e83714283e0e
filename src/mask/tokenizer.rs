//! Tokenizer for mask strings.
//!
//! Masks are read one token at a time: a character class, a literal (plain
//! or `/`-escaped) or a balanced parenthesised group, each optionally
//! followed by a single quantifier character.

use super::char_class::CharClass;
use super::quantifier::{classify, is_operator};
use super::token::{Token, TokenKind};

/// The escape marker. The character after it is always a literal.
pub const ESCAPE: char = '/';

/// Maximum group nesting accepted in a mask.
pub const MAX_NESTING: usize = 32;

/// Errors raised for malformed masks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// The mask ends with the escape marker.
    TrailingEscape,
    UnclosedGroup { start: usize },
    UnknownQuantifier(char),
    /// A quantifier character appears where a token should begin.
    DanglingQuantifier { ch: char, pos: usize },
    NestingTooDeep,
    /// A token was requested past the end of the mask.
    EndOfMask,
}

impl std::fmt::Display for PatternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TrailingEscape => write!(f, "'/' literal escape character cannot terminate a mask"),
            Self::UnclosedGroup { start } => {
                write!(f, "Unclosed group '(' at position {start} in mask")
            }
            Self::UnknownQuantifier(c) => write!(f, "Unknown quantifier: {c:?}"),
            Self::DanglingQuantifier { ch, pos } => {
                write!(f, "Quantifier {ch:?} at position {pos} has nothing to apply to")
            }
            Self::NestingTooDeep => {
                write!(f, "Groups nested more than {MAX_NESTING} levels deep")
            }
            Self::EndOfMask => write!(f, "Unexpected end of mask"),
        }
    }
}

impl std::error::Error for PatternError {}

/// Tokenize a whole mask string, compiling group contents recursively.
pub fn tokenize(mask: &str) -> Result<Vec<Token>, PatternError> {
    let chars: Vec<char> = mask.chars().collect();
    Tokenizer { chars: &chars }.tokenize_range(0, chars.len(), 0)
}

/// Read the single token starting at `pos` in `mask`.
pub fn next_token(mask: &[char], pos: usize) -> Result<Token, PatternError> {
    Tokenizer { chars: mask }.read_token(pos, mask.len(), 0)
}

/// Width of the group starting at the `(` at `pos`, both parentheses
/// included but not any trailing quantifier.
pub fn group_width(mask: &[char], pos: usize) -> Result<usize, PatternError> {
    let mut escaped = false;
    let mut depth = 0usize;
    for (offset, &ch) in mask.iter().enumerate().skip(pos + 1) {
        if !escaped {
            match ch {
                '(' => depth += 1,
                ')' if depth == 0 => return Ok(offset - pos + 1),
                ')' => depth -= 1,
                _ => {}
            }
        }
        escaped = ch == ESCAPE && !escaped;
    }
    Err(PatternError::UnclosedGroup { start: pos })
}

struct Tokenizer<'a> {
    chars: &'a [char],
}

impl Tokenizer<'_> {
    /// Tokenize `chars[start..end]`, the body of a mask at nesting `depth`.
    fn tokenize_range(
        &self,
        start: usize,
        end: usize,
        depth: usize,
    ) -> Result<Vec<Token>, PatternError> {
        let mut tokens = Vec::new();
        let mut pos = start;
        while pos < end {
            let token = self.read_token(pos, end, depth)?;
            pos = token.span.end;
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Read one token at `pos`; `end` bounds the enclosing (sub-)mask.
    fn read_token(&self, pos: usize, end: usize, depth: usize) -> Result<Token, PatternError> {
        let sym = match self.chars.get(pos) {
            Some(&c) if pos < end => c,
            _ => return Err(PatternError::EndOfMask),
        };

        let (kind, body) = match sym {
            '(' => {
                let width = group_width(&self.chars[..end], pos)?;
                if depth >= MAX_NESTING {
                    return Err(PatternError::NestingTooDeep);
                }
                let inner = self.tokenize_range(pos + 1, pos + width - 1, depth + 1)?;
                (TokenKind::Group(inner), width)
            }
            ESCAPE => {
                if pos + 1 >= end {
                    return Err(PatternError::TrailingEscape);
                }
                (TokenKind::Literal(self.chars[pos + 1]), 2)
            }
            'd' => (TokenKind::Class(CharClass::Digit), 1),
            '.' => (TokenKind::Class(CharClass::Any), 1),
            c if is_operator(c) => return Err(PatternError::DanglingQuantifier { ch: c, pos }),
            c => (TokenKind::Literal(c), 1),
        };

        // Slurp a trailing quantifier character, if any.
        let op = self
            .chars
            .get(pos + body)
            .copied()
            .filter(|&c| pos + body < end && is_operator(c));
        let quantifier = classify(op)?;
        let width = body + usize::from(op.is_some());

        Ok(Token {
            kind,
            quantifier,
            span: pos..pos + width,
        })
    }
}
