//! Mask compiler and evaluator.
//!
//! A mask is tokenized once and then evaluated against each value.
//!
//! # Mask syntax
//!
//! | Token     | Meaning                                             |
//! |-----------|-----------------------------------------------------|
//! | `.`       | Any character except a newline                      |
//! | `d`       | One ASCII digit                                     |
//! | `/X`      | Literal `X`, even if it is a metacharacter          |
//! | `X`       | Any other character is a literal                    |
//! | `(…)`     | Capture group; may be nested                        |
//! | `X?`      | Zero or one                                         |
//! | `X*`      | Zero or more                                        |
//! | `X+`      | One or more                                         |
//! | `X!`      | Required literal: must be typed, never inserted     |
//!
//! Literals without a quantifier are inserted when the value skips them.

pub mod char_class;
pub mod evaluator;
pub mod lookahead;
pub mod quantifier;
pub mod token;
pub mod tokenizer;
pub mod validity;

pub use char_class::CharClass;
pub use evaluator::{MaskOptions, evaluate};
pub use quantifier::Quantifier;
pub use token::{Token, TokenKind};
pub use tokenizer::{PatternError, tokenize};
pub use validity::{Validity, is_valid_character};
