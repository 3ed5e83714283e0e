//! Property-based tests for mask processing
//!
//! These check the guarantees callers rely on for every keystroke:
//! - Processing never panics on a well-formed mask, whatever the input
//! - The returned selection always lies within the masked text
//! - A complete result is a fixed point: masking it again changes nothing

use editmask::EditMask;
use proptest::prelude::*;

const MASKS: &[&str] = &[
    "ddd",
    "..",
    "<d d>",
    "x-?x",
    "x-+x",
    "d+-+d+",
    "d*-*d*",
    "/dd",
    "dd?//dd?//dddd",
    "ddd-dd-dddd",
    "/(ddd/) ddd-dddd",
    "(d+)?-",
    "(d-)+x!",
    "(d-)*x",
    "(d-)?x",
    "((d)-d)*",
    "(d(d)?)-d",
];

/// Masks whose complete results must be stable.
const STABLE_MASKS: &[&str] = &[
    "ddd",
    "<d d>",
    "dd?//dd?//dddd",
    "ddd-dd-dddd",
    "/(ddd/) ddd-dddd",
    "x-+x",
    "d*-*d*",
    "(d+)?-",
    "(d-)+x!",
    "(d-)*x",
    "(d-)?x",
    "((d)-d)*",
    "(dd)+",
];

/// Any mask from a list
fn mask_strategy(masks: &'static [&'static str]) -> impl Strategy<Value = &'static str> {
    prop::sample::select(masks)
}

/// Values made of the characters the masks care about
fn typed_value_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        // Digits only
        "[0-9]{0,12}",
        // Digits and separators
        "[0-9/() <>x-]{0,16}",
    ]
}

/// Arbitrary printable text, including non-ASCII
fn any_value_strategy() -> impl Strategy<Value = String> {
    prop_oneof!["\\PC{0,20}", typed_value_strategy()]
}

#[cfg(test)]
mod proptest_tests {
    use super::*;

    proptest! {
        #[test]
        fn test_process_never_panics(
            mask in mask_strategy(MASKS),
            value in any_value_strategy(),
            start in 0usize..30,
            extra in 0usize..5,
        ) {
            let mask = EditMask::new(mask).unwrap();
            let result = mask.process(&value, start, start + extra);
            let len = result.text.chars().count();

            prop_assert!(result.selection_start <= len, "start {} > {}", result.selection_start, len);
            prop_assert!(result.selection_end <= len, "end {} > {}", result.selection_end, len);

            if let Some(rest) = result.truncated_value() {
                prop_assert!(!rest.is_empty());
                prop_assert!(value.ends_with(rest), "{:?} is not a suffix of {:?}", rest, value);
            }
        }

        #[test]
        fn test_append_literals_never_panics(
            mask in mask_strategy(MASKS),
            value in typed_value_strategy(),
            start in 0usize..20,
        ) {
            let options = editmask::MaskOptions {
                append_literals: true,
                ..Default::default()
            };
            let mask = EditMask::with_options(mask, options).unwrap();
            let result = mask.process(&value, start, start);
            prop_assert!(result.selection_start <= result.text.chars().count());
        }

        #[test]
        fn test_complete_result_is_stable(
            mask in mask_strategy(STABLE_MASKS),
            value in typed_value_strategy(),
        ) {
            let mask = EditMask::new(mask).unwrap();
            let first = mask.process(&value, 0, 0);
            if first.complete {
                let second = mask.process(&first.text, 0, 0);
                prop_assert_eq!(&second.text, &first.text);
                prop_assert!(second.complete);
            }
        }
    }
}
