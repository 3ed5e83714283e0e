//! Pattern-driven input masking for text fields.
//!
//! An [`EditMask`] conforms raw input to a compact mask grammar as the user
//! types: literals are inserted, stray characters are dropped, and the caller's
//! cursor is moved to account for both.
//!
//! # Example
//!
//! ```rust
//! use editmask::EditMask;
//!
//! let mask = EditMask::new("dd?//dd?//dddd").unwrap();
//!
//! // Separators are inserted as the digits arrive
//! let result = mask.process("12121990", 0, 0);
//! assert_eq!(result.text, "12/12/1990");
//! assert!(result.complete);
//!
//! // A cursor after an inserted literal moves with it
//! let mask = EditMask::new("/dd").unwrap();
//! let result = mask.process("5", 1, 1);
//! assert_eq!(result.text, "d5");
//! assert_eq!(result.selection_start, 2);
//! ```

mod context;
mod edit_mask;
pub mod mask;
mod mask_result;

pub use context::MaskContext;
pub use edit_mask::{EditMask, PostprocessFn, PreprocessFn};
pub use mask::{MaskOptions, PatternError, Validity};
pub use mask_result::{Capture, MaskResult, Truncated};
