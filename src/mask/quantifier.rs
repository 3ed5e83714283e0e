//! Occurrence policies attached to mask tokens.

use phf::{Map, phf_map};

use super::tokenizer::PatternError;

/// The trailing quantifier of a token.
///
/// `Once` is the "no operator" default. It is not the same as `Required`:
/// a default literal may be inserted automatically, a required one must be
/// typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    Once,
    Optional,
    ZeroOrMore,
    OneOrMore,
    Required,
}

/// Operator characters recognised after a token.
const QUANTIFIERS: Map<char, Quantifier> = phf_map! {
    '?' => Quantifier::Optional,
    '*' => Quantifier::ZeroOrMore,
    '+' => Quantifier::OneOrMore,
    '!' => Quantifier::Required,
};

/// True if `ch` is one of the quantifier operator characters.
pub fn is_operator(ch: char) -> bool {
    QUANTIFIERS.contains_key(&ch)
}

/// Classify a token's trailing operator character.
///
/// `None` means the token has no operator and yields [`Quantifier::Once`].
pub fn classify(op: Option<char>) -> Result<Quantifier, PatternError> {
    match op {
        None => Ok(Quantifier::Once),
        Some(ch) => QUANTIFIERS
            .get(&ch)
            .copied()
            .ok_or(PatternError::UnknownQuantifier(ch)),
    }
}

impl Quantifier {
    /// The operator character for this quantifier, if any.
    pub fn operator(self) -> Option<char> {
        match self {
            Quantifier::Once => None,
            Quantifier::Optional => Some('?'),
            Quantifier::ZeroOrMore => Some('*'),
            Quantifier::OneOrMore => Some('+'),
            Quantifier::Required => Some('!'),
        }
    }

    /// Minimum and maximum occurrences; `None` for the default sentinel.
    ///
    /// A maximum of `None` is unbounded.
    pub fn bounds(self) -> Option<(usize, Option<usize>)> {
        match self {
            Quantifier::Once => None,
            Quantifier::Optional => Some((0, Some(1))),
            Quantifier::ZeroOrMore => Some((0, None)),
            Quantifier::OneOrMore => Some((1, None)),
            Quantifier::Required => Some((1, Some(1))),
        }
    }

    pub fn is_default(self) -> bool {
        self == Quantifier::Once
    }

    pub fn is_optional(self) -> bool {
        self == Quantifier::Optional
    }

    pub fn is_zero_or_more(self) -> bool {
        self == Quantifier::ZeroOrMore
    }

    pub fn is_one_or_more(self) -> bool {
        self == Quantifier::OneOrMore
    }

    pub fn is_required(self) -> bool {
        self == Quantifier::Required
    }

    /// `?` or `*`: the token may be absent altogether.
    pub fn allows_zero(self) -> bool {
        matches!(self, Quantifier::Optional | Quantifier::ZeroOrMore)
    }

    /// `+` or `*`: the same token is retried after each match.
    pub fn is_repeating(self) -> bool {
        matches!(self, Quantifier::ZeroOrMore | Quantifier::OneOrMore)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, Quantifier::Once, None)]
    #[case(Some('?'), Quantifier::Optional, Some((0, Some(1))))]
    #[case(Some('*'), Quantifier::ZeroOrMore, Some((0, None)))]
    #[case(Some('+'), Quantifier::OneOrMore, Some((1, None)))]
    #[case(Some('!'), Quantifier::Required, Some((1, Some(1))))]
    fn classify_operators(
        #[case] op: Option<char>,
        #[case] expected: Quantifier,
        #[case] bounds: Option<(usize, Option<usize>)>,
    ) {
        let q = classify(op).unwrap();
        assert_eq!(q, expected);
        assert_eq!(q.bounds(), bounds);
        assert_eq!(q.operator(), op);
    }

    #[test]
    fn unknown_operator_is_an_error() {
        assert_eq!(classify(Some('x')), Err(PatternError::UnknownQuantifier('x')));
        assert_eq!(classify(Some('{')), Err(PatternError::UnknownQuantifier('{')));
    }

    #[test]
    fn default_is_distinct_from_required() {
        assert!(Quantifier::Once.is_default());
        assert!(!Quantifier::Required.is_default());
        assert!(Quantifier::Required.is_required());
    }

    #[test]
    fn zero_and_repeat_predicates() {
        assert!(Quantifier::Optional.allows_zero());
        assert!(Quantifier::ZeroOrMore.allows_zero());
        assert!(!Quantifier::OneOrMore.allows_zero());
        assert!(Quantifier::OneOrMore.is_repeating());
        assert!(Quantifier::ZeroOrMore.is_repeating());
        assert!(!Quantifier::Optional.is_repeating());
    }

    #[test]
    fn operator_characters() {
        for ch in ['?', '*', '+', '!'] {
            assert!(is_operator(ch));
        }
        assert!(!is_operator('d'));
        assert!(!is_operator('/'));
    }
}
