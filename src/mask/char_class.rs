//! Character class membership tests for mask tokens.

/// The character classes a mask can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Any,   // .  anything but a newline
    Digit, // d  ASCII digit
}

impl CharClass {
    /// Test whether `ch` is a member of this class.
    pub fn matches(self, ch: char) -> bool {
        match self {
            CharClass::Any => is_any_char(ch),
            CharClass::Digit => is_digit_char(ch),
        }
    }
}

pub fn is_any_char(ch: char) -> bool {
    ch != '\n'
}

pub fn is_digit_char(ch: char) -> bool {
    ch.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_matches_everything_but_newline() {
        for ch in ['a', 'Z', '5', ' ', '\t', '-', '/', 'é'] {
            assert!(CharClass::Any.matches(ch), "expected any-char: {ch:?}");
        }
        assert!(!CharClass::Any.matches('\n'));
    }

    #[test]
    fn digit_matches_ascii_digits_only() {
        for ch in '0'..='9' {
            assert!(CharClass::Digit.matches(ch));
        }
        assert!(!CharClass::Digit.matches('a'));
        assert!(!CharClass::Digit.matches(' '));
        // Arabic-Indic digit five
        assert!(!CharClass::Digit.matches('\u{0665}'));
    }
}
