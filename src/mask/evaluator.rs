//! Mask evaluator: conform a value to a compiled mask.
//!
//! The evaluator walks the token list while consuming the value one
//! character at a time. Matching characters are copied to the output,
//! missing literals are inserted, and characters that fit nowhere are either
//! skipped over with lookahead or discarded. Groups are evaluated by
//! recursing into their sub-mask with the same [`MaskContext`].
//!
//! All positions are **character** (not byte) indices.

use tracing::trace;

use crate::context::MaskContext;
use crate::mask_result::Capture;

use super::char_class::CharClass;
use super::lookahead::find_lookahead;
use super::quantifier::Quantifier;
use super::token::{Token, TokenKind};
use super::validity::is_valid_character;

/// Behaviour switches fixed when a mask is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskOptions {
    /// Jump ahead to a later token that accepts a mismatched character.
    pub lookahead: bool,
    /// Discard characters that match nothing instead of stopping.
    pub eat_invalid: bool,
    /// Keep emitting default literals after the value runs out.
    pub append_literals: bool,
}

impl Default for MaskOptions {
    fn default() -> Self {
        Self {
            lookahead: true,
            eat_invalid: true,
            append_literals: false,
        }
    }
}

// ─── Public API ─────────────────────────────────────────────────────────────

/// Evaluate `value` against `tokens`, accumulating into `ctx`.
///
/// On return `ctx` holds the masked text, the adjusted selection, the
/// captures and the completeness flag; `ctx.value_index()` tells how much of
/// `value` was consumed.
pub fn evaluate(tokens: &[Token], value: &[char], options: &MaskOptions, ctx: &mut MaskContext) {
    Evaluator { options, value }.evaluate(tokens, ctx);
}

// ─── Core evaluation ────────────────────────────────────────────────────────

struct Evaluator<'a> {
    options: &'a MaskOptions,
    value: &'a [char],
}

impl Evaluator<'_> {
    fn evaluate(&self, tokens: &[Token], ctx: &mut MaskContext) {
        ctx.depth += 1;
        let finished = self.run(tokens, ctx);
        ctx.flush_group_buffer();
        let complete = finished && !ctx.used_lookahead && ctx.pidx >= tokens.len();
        ctx.set_complete(complete);
        ctx.depth -= 1;
    }

    /// Step through `tokens` until they run out or a step asks to stop.
    ///
    /// The loop keeps going once the value is used up so that trailing
    /// literals can still be emitted. Returns false if a step stopped it,
    /// even when that step had already moved `pidx` past the last token.
    fn run(&self, tokens: &[Token], ctx: &mut MaskContext) -> bool {
        while let Some(token) = tokens.get(ctx.pidx) {
            let ch = self.value.get(ctx.vidx).copied();
            let before_selection = ctx.before_selection(ch.is_some());

            if let Some(c) = ch
                && ctx.depth == 1
                && is_valid_character(c, tokens, ctx.pidx, self.options.eat_invalid).is_rejected()
            {
                if !self.options.eat_invalid {
                    trace!(ch = ?c, vidx = ctx.vidx, "rejected character stops evaluation");
                    return false;
                }
                trace!(ch = ?c, vidx = ctx.vidx, "discarding rejected character");
                ctx.eat_invalid(before_selection);
                continue;
            }

            let more = match &token.kind {
                TokenKind::Class(class) => {
                    self.evaluate_class(*class, token.quantifier, tokens, ch, before_selection, ctx)
                }
                TokenKind::Literal(lit) => {
                    self.evaluate_literal(*lit, token.quantifier, ch, before_selection, ctx)
                }
                TokenKind::Group(inner) => self.evaluate_group(inner, token.quantifier, ctx),
            };
            if !more {
                return false;
            }
        }
        true
    }

    // ─── Token handlers ─────────────────────────────────────────────────────

    fn evaluate_class(
        &self,
        class: CharClass,
        quantifier: Quantifier,
        tokens: &[Token],
        ch: Option<char>,
        before_selection: bool,
        ctx: &mut MaskContext,
    ) -> bool {
        match ch {
            Some(c) if class.matches(c) => {
                ctx.push_captured(c);
                ctx.vidx += 1;
                advance_or_repeat(quantifier, ctx);
                true
            }
            Some(c) if quantifier.is_default() || quantifier.is_required() => {
                self.recover(tokens, c, before_selection, ctx)
            }
            _ => release(quantifier, ctx),
        }
    }

    fn evaluate_literal(
        &self,
        lit: char,
        quantifier: Quantifier,
        ch: Option<char>,
        before_selection: bool,
        ctx: &mut MaskContext,
    ) -> bool {
        if ch == Some(lit) {
            ctx.flush_group_buffer();
            ctx.push_output(lit);
            ctx.vidx += 1;
            advance_or_repeat(quantifier, ctx);
            return true;
        }

        // Insert a missing literal without consuming anything.
        if quantifier.is_default() && (ch.is_some() || self.options.append_literals) {
            ctx.flush_group_buffer();
            ctx.push_output(lit);
            ctx.pidx += 1;
            if before_selection {
                ctx.shift_selection(1);
            }
            return true;
        }

        match quantifier {
            Quantifier::Optional if ch.is_some() => {
                ctx.pidx += 1;
                true
            }
            Quantifier::Optional => false,
            _ => release(quantifier, ctx),
        }
    }

    /// Resynchronise after `ch` failed to match a mandatory class token.
    fn recover(
        &self,
        tokens: &[Token],
        ch: char,
        before_selection: bool,
        ctx: &mut MaskContext,
    ) -> bool {
        if self.options.lookahead
            && let Some(idx) = find_lookahead(tokens, ctx.pidx + 1, ch)
        {
            trace!(ch = ?ch, from = ctx.pidx, to = idx, "lookahead");
            ctx.pidx = idx;
            ctx.used_lookahead = true;
            true
        } else if self.options.eat_invalid {
            trace!(ch = ?ch, vidx = ctx.vidx, "discarding unmatched character");
            ctx.eat_invalid(before_selection);
            true
        } else {
            false
        }
    }

    // ─── Capture groups ─────────────────────────────────────────────────────

    fn evaluate_group(&self, inner: &[Token], quantifier: Quantifier, ctx: &mut MaskContext) -> bool {
        let scope = ctx.enter_group();
        let captured = if quantifier.is_repeating() {
            self.repeat_group(inner, ctx)
        } else {
            self.attempt_group(inner, ctx)
        };
        ctx.leave_group(scope);
        ctx.pidx += 1;

        let matched = captured.is_some();
        trace!(pidx = ctx.pidx, matched, vidx = ctx.vidx, "group evaluated");
        ctx.push_group(Capture::Group(captured));

        match quantifier {
            Quantifier::Optional | Quantifier::ZeroOrMore => true,
            _ => matched,
        }
    }

    /// Evaluate a group body once, rolling back if it does not complete.
    fn attempt_group(&self, inner: &[Token], ctx: &mut MaskContext) -> Option<Vec<Capture>> {
        let before = ctx.checkpoint();
        ctx.pidx = 0;
        self.evaluate(inner, ctx);
        if ctx.complete() {
            Some(ctx.take_groups())
        } else {
            ctx.rollback(&before);
            None
        }
    }

    /// Evaluate a `+`/`*` group body for as long as it keeps completing.
    ///
    /// Leaves `ctx` where the last completed iteration ended and returns the
    /// captures as they stood at that point. A trailing attempt that fails
    /// contributes nothing, not even the characters it had captured before
    /// failing. `None` if no iteration completed.
    fn repeat_group(&self, inner: &[Token], ctx: &mut MaskContext) -> Option<Vec<Capture>> {
        let mut iterations = 0usize;
        let last_completed = loop {
            let before = ctx.checkpoint();
            ctx.pidx = 0;
            self.evaluate(inner, ctx);
            if !ctx.complete() {
                break before;
            }
            iterations += 1;
            // An iteration that consumed nothing would repeat forever.
            if ctx.vidx == before.value_index() {
                break ctx.checkpoint();
            }
        };
        ctx.rollback(&last_completed);
        (iterations > 0).then_some(last_completed.groups)
    }
}

// ─── Quantifier helpers ─────────────────────────────────────────────────────

/// After a match: stay on a repeating token, otherwise move on.
fn advance_or_repeat(quantifier: Quantifier, ctx: &mut MaskContext) {
    if quantifier.is_repeating() {
        ctx.consecutive_reads += 1;
    } else {
        ctx.pidx += 1;
    }
}

/// Leave a quantified token that has nothing (more) to match.
///
/// Returns false when the token still needs a match, which stops evaluation.
fn release(quantifier: Quantifier, ctx: &mut MaskContext) -> bool {
    match quantifier {
        Quantifier::Optional => {}
        Quantifier::ZeroOrMore => ctx.consecutive_reads = 0,
        Quantifier::OneOrMore if ctx.consecutive_reads > 0 => ctx.consecutive_reads = 0,
        _ => return false,
    }
    ctx.pidx += 1;
    true
}

// ─── Tests ──────────────────────────────────────────────────────────────────
