//! The `EditMask` type: a compiled mask plus its options and hooks.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::context::MaskContext;
use crate::mask::evaluator::{MaskOptions, evaluate};
use crate::mask::token::Token;
use crate::mask::tokenizer::{PatternError, tokenize};
use crate::mask::validity::{Validity, is_valid_character};
use crate::mask_result::{MaskResult, Truncated};

/// Runs once before evaluation and returns the value to evaluate.
pub type PreprocessFn = dyn Fn(&str, &mut MaskContext) -> String + Send + Sync;

/// Runs once after evaluation and may rewrite the text and selection.
pub type PostprocessFn = dyn Fn(&mut MaskContext) + Send + Sync;

/// A mask compiled once and reused for every keystroke.
///
/// `EditMask` holds no per-call state: each [`process`](Self::process) call
/// evaluates against a fresh [`MaskContext`], so one mask can be shared
/// freely between threads.
#[derive(Clone)]
pub struct EditMask {
    mask: String,
    tokens: Vec<Token>,
    options: MaskOptions,
    preprocess: Option<Arc<PreprocessFn>>,
    postprocess: Option<Arc<PostprocessFn>>,
}

impl fmt::Debug for EditMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditMask")
            .field("mask", &self.mask)
            .field("options", &self.options)
            .field("preprocess", &self.preprocess.is_some())
            .field("postprocess", &self.postprocess.is_some())
            .finish()
    }
}

// Constructors
impl EditMask {
    /// Compile `mask` with the default options.
    pub fn new(mask: &str) -> Result<Self, PatternError> {
        Self::with_options(mask, MaskOptions::default())
    }

    pub fn with_options(mask: &str, options: MaskOptions) -> Result<Self, PatternError> {
        let tokens = tokenize(mask)?;
        Ok(Self {
            mask: mask.to_string(),
            tokens,
            options,
            preprocess: None,
            postprocess: None,
        })
    }

    /// Install a hook that rewrites the raw value before evaluation.
    pub fn with_preprocess<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str, &mut MaskContext) -> String + Send + Sync + 'static,
    {
        self.preprocess = Some(Arc::new(hook));
        self
    }

    /// Install a hook that adjusts the evaluated context.
    pub fn with_postprocess<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut MaskContext) + Send + Sync + 'static,
    {
        self.postprocess = Some(Arc::new(hook));
        self
    }
}

// Accessors
impl EditMask {
    pub fn mask(&self) -> &str {
        &self.mask
    }

    pub fn options(&self) -> &MaskOptions {
        &self.options
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

// Processing
impl EditMask {
    /// Conform `value` to the mask.
    ///
    /// `selection_start` and `selection_end` are the caller's cursor bounds in
    /// characters; the result carries them adjusted for every character that
    /// was inserted or discarded before them.
    pub fn process(&self, value: &str, selection_start: usize, selection_end: usize) -> MaskResult {
        let mut ctx = MaskContext::new(selection_start, selection_end);

        let value = match &self.preprocess {
            Some(hook) => hook(value, &mut ctx),
            None => value.to_string(),
        };
        let chars: Vec<char> = value.chars().collect();

        evaluate(&self.tokens, &chars, &self.options, &mut ctx);

        if let Some(hook) = &self.postprocess {
            hook(&mut ctx);
        }

        let truncated = chars.get(ctx.value_index()..).filter(|rest| !rest.is_empty()).map(|rest| {
            Truncated {
                value: rest.iter().collect(),
                cursor: clamp_offset(ctx.selection_start(), usize::MAX),
            }
        });

        let text_len = ctx.text_len();
        let result = MaskResult {
            text: ctx.text().to_string(),
            complete: ctx.complete(),
            selection_start: clamp_offset(ctx.selection_start(), text_len),
            selection_end: clamp_offset(ctx.selection_end(), text_len),
            groups: ctx.groups().to_vec(),
            truncated,
        };

        debug!(
            mask = %self.mask,
            value_len = chars.len(),
            complete = result.complete,
            consumed = ctx.value_index(),
            "processed value"
        );
        result
    }

    /// Like [`process`](Self::process), for a value that may be missing.
    ///
    /// A missing value yields [`MaskResult::empty`] without running either
    /// hook.
    pub fn process_optional(
        &self,
        value: Option<&str>,
        selection_start: usize,
        selection_end: usize,
    ) -> MaskResult {
        match value {
            Some(value) => self.process(value, selection_start, selection_end),
            None => MaskResult::empty(),
        }
    }

    /// Could `ch` be accepted as the first character of a value?
    pub fn validate_char(&self, ch: char) -> Validity {
        is_valid_character(ch, &self.tokens, 0, self.options.eat_invalid)
    }
}

/// Clamp a signed in-flight offset into `0..=max`.
fn clamp_offset(offset: isize, max: usize) -> usize {
    usize::try_from(offset).map_or(0, |n| n.min(max))
}
