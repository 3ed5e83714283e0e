//! `MaskContext`: the per-call evaluation state.
//!
//! A fresh context is built for every [`crate::EditMask::process`] call and
//! threaded by `&mut` through the evaluator, including its recursive group
//! evaluations. The pre/post hooks see the same object.

use crate::mask_result::Capture;

/// Evaluation state for a single `process` call.
///
/// Selection offsets are signed while evaluation is in flight; discarding
/// characters before the cursor can move them below their starting point.
/// They are clamped when the result is built.
#[derive(Debug, Clone, Default)]
pub struct MaskContext {
    text: String,
    /// Length of `text` in characters.
    text_len: usize,
    selection_start: isize,
    selection_end: isize,
    complete: bool,
    groups: Vec<Capture>,

    /// Token index into the (sub-)mask being evaluated.
    pub(crate) pidx: usize,
    /// Character index into the value.
    pub(crate) vidx: usize,
    pub(crate) used_lookahead: bool,
    /// Matches made by the current `+`/`*` token.
    pub(crate) consecutive_reads: usize,
    /// Characters of the current capture not yet flushed into `groups`.
    pub(crate) group_buffer: String,
    /// Evaluator nesting: 1 at the top level, +1 per group.
    pub(crate) depth: usize,
}

/// Group-local fields swapped out while a group is evaluated.
pub(crate) struct GroupScope {
    pidx: usize,
    groups: Vec<Capture>,
    used_lookahead: bool,
    consecutive_reads: usize,
}

/// Immutable copy of everything a group attempt may need to undo.
#[derive(Debug, Clone)]
pub(crate) struct Checkpoint {
    text: String,
    text_len: usize,
    vidx: usize,
    selection_start: isize,
    selection_end: isize,
    pub(crate) groups: Vec<Capture>,
}

impl MaskContext {
    pub fn new(selection_start: usize, selection_end: usize) -> Self {
        Self {
            selection_start: to_signed(selection_start),
            selection_end: to_signed(selection_end),
            ..Self::default()
        }
    }

    /// The masked text produced so far.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the masked text, e.g. from a postprocess hook.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.text_len = self.text.chars().count();
    }

    /// Length of the masked text in characters.
    pub fn text_len(&self) -> usize {
        self.text_len
    }

    pub fn selection_start(&self) -> isize {
        self.selection_start
    }

    pub fn selection_end(&self) -> isize {
        self.selection_end
    }

    pub fn set_selection(&mut self, start: isize, end: isize) {
        self.selection_start = start;
        self.selection_end = end;
    }

    /// Move both selection offsets by `delta`.
    pub fn shift_selection(&mut self, delta: isize) {
        self.selection_start += delta;
        self.selection_end += delta;
    }

    /// Whether the mask was fully satisfied. Only meaningful after evaluation.
    pub fn complete(&self) -> bool {
        self.complete
    }

    /// Captures made at the current nesting level.
    pub fn groups(&self) -> &[Capture] {
        &self.groups
    }

    /// Index of the next unconsumed value character.
    pub fn value_index(&self) -> usize {
        self.vidx
    }

    pub(crate) fn set_complete(&mut self, complete: bool) {
        self.complete = complete;
    }

    pub(crate) fn push_group(&mut self, capture: Capture) {
        self.groups.push(capture);
    }

    pub(crate) fn take_groups(&mut self) -> Vec<Capture> {
        std::mem::take(&mut self.groups)
    }

    /// Append one character of masked output.
    pub(crate) fn push_output(&mut self, ch: char) {
        self.text.push(ch);
        self.text_len += 1;
    }

    /// Append a character that also belongs to the current capture.
    pub(crate) fn push_captured(&mut self, ch: char) {
        self.push_output(ch);
        self.group_buffer.push(ch);
    }

    /// True while the output is still before the caller's cursor.
    ///
    /// With no input left, a cursor sitting exactly at the end of the output
    /// also counts, so appended literals carry the cursor along.
    pub(crate) fn before_selection(&self, input_left: bool) -> bool {
        let len = to_signed(self.text_len);
        len < self.selection_start || (!input_left && len == self.selection_start)
    }

    /// Flush the pending capture into `groups`.
    ///
    /// Runs matched outside of any group are not captures and are dropped.
    pub(crate) fn flush_group_buffer(&mut self) {
        if self.group_buffer.is_empty() {
            return;
        }
        let run = std::mem::take(&mut self.group_buffer);
        if self.depth > 1 {
            self.groups.push(Capture::Text(run));
        }
    }

    /// Discard the current value character.
    pub(crate) fn eat_invalid(&mut self, before_selection: bool) {
        self.vidx += 1;
        if before_selection {
            self.shift_selection(-1);
        }
    }

    /// Swap in a fresh group-local scope, returning the outer one.
    pub(crate) fn enter_group(&mut self) -> GroupScope {
        self.flush_group_buffer();
        let scope = GroupScope {
            pidx: self.pidx,
            groups: std::mem::take(&mut self.groups),
            used_lookahead: self.used_lookahead,
            consecutive_reads: self.consecutive_reads,
        };
        self.used_lookahead = false;
        self.consecutive_reads = 0;
        scope
    }

    /// Restore the outer scope saved by [`Self::enter_group`].
    pub(crate) fn leave_group(&mut self, scope: GroupScope) {
        self.pidx = scope.pidx;
        self.groups = scope.groups;
        self.used_lookahead = scope.used_lookahead;
        self.consecutive_reads = scope.consecutive_reads;
    }

    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            text: self.text.clone(),
            text_len: self.text_len,
            vidx: self.vidx,
            selection_start: self.selection_start,
            selection_end: self.selection_end,
            groups: self.groups.clone(),
        }
    }

    /// Roll output, cursor and value position back to `cp`.
    ///
    /// Captures are left alone; the caller decides what to record.
    pub(crate) fn rollback(&mut self, cp: &Checkpoint) {
        self.text.clone_from(&cp.text);
        self.text_len = cp.text_len;
        self.vidx = cp.vidx;
        self.selection_start = cp.selection_start;
        self.selection_end = cp.selection_end;
        self.group_buffer.clear();
    }
}

impl Checkpoint {
    pub(crate) fn value_index(&self) -> usize {
        self.vidx
    }
}

fn to_signed(n: usize) -> isize {
    isize::try_from(n).unwrap_or(isize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_context_is_empty() {
        let ctx = MaskContext::new(2, 3);
        assert_eq!(ctx.text(), "");
        assert_eq!(ctx.selection_start(), 2);
        assert_eq!(ctx.selection_end(), 3);
        assert!(!ctx.complete());
        assert!(ctx.groups().is_empty());
    }

    #[test]
    fn set_text_tracks_char_length() {
        let mut ctx = MaskContext::new(0, 0);
        ctx.set_text("1,234");
        assert_eq!(ctx.text_len(), 5);
        ctx.set_text("été");
        assert_eq!(ctx.text_len(), 3);
    }

    #[test]
    fn before_selection_rules() {
        let mut ctx = MaskContext::new(1, 1);
        assert!(ctx.before_selection(true));
        ctx.push_output('x');
        assert!(!ctx.before_selection(true));
        // Cursor at the end of output with nothing left to read
        assert!(ctx.before_selection(false));
    }

    #[test]
    fn eat_invalid_moves_cursor_back() {
        let mut ctx = MaskContext::new(3, 4);
        ctx.eat_invalid(true);
        assert_eq!(ctx.vidx, 1);
        assert_eq!((ctx.selection_start(), ctx.selection_end()), (2, 3));
        ctx.eat_invalid(false);
        assert_eq!(ctx.vidx, 2);
        assert_eq!((ctx.selection_start(), ctx.selection_end()), (2, 3));
    }

    #[test]
    fn top_level_runs_are_not_captured() {
        let mut ctx = MaskContext::new(0, 0);
        ctx.depth = 1;
        ctx.push_captured('5');
        ctx.flush_group_buffer();
        assert!(ctx.groups().is_empty());

        ctx.depth = 2;
        ctx.push_captured('6');
        ctx.push_captured('7');
        ctx.flush_group_buffer();
        assert_eq!(ctx.groups(), &[Capture::Text("67".to_string())]);
        assert_eq!(ctx.text(), "567");
    }

    #[test]
    fn group_scope_round_trip() {
        let mut ctx = MaskContext::new(0, 0);
        ctx.pidx = 4;
        ctx.used_lookahead = true;
        ctx.push_group(Capture::Group(None));

        let scope = ctx.enter_group();
        assert!(ctx.groups().is_empty());
        assert!(!ctx.used_lookahead);
        ctx.pidx = 1;
        ctx.push_group(Capture::Text("x".to_string()));

        ctx.leave_group(scope);
        assert_eq!(ctx.pidx, 4);
        assert!(ctx.used_lookahead);
        assert_eq!(ctx.groups(), &[Capture::Group(None)]);
    }

    #[test]
    fn rollback_restores_output_and_cursor() {
        let mut ctx = MaskContext::new(1, 1);
        ctx.push_output('a');
        let cp = ctx.checkpoint();
        ctx.push_output('b');
        ctx.vidx = 5;
        ctx.shift_selection(1);
        ctx.rollback(&cp);
        assert_eq!(ctx.text(), "a");
        assert_eq!(ctx.text_len(), 1);
        assert_eq!(ctx.vidx, 0);
        assert_eq!(ctx.selection_start(), 1);
    }
}
