use std::fmt;

use itertools::Itertools;

/// One entry in a capture list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capture {
    /// A run of class-matched characters inside a group.
    Text(String),
    /// A group slot; `None` when the group matched zero times.
    Group(Option<Vec<Capture>>),
}

impl Capture {
    /// The captured text, for [`Capture::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Capture::Text(s) => Some(s),
            Capture::Group(_) => None,
        }
    }

    /// The captures made inside a group that matched.
    pub fn items(&self) -> Option<&[Capture]> {
        match self {
            Capture::Group(Some(items)) => Some(items),
            _ => None,
        }
    }

    /// True for a group slot that matched zero times.
    pub fn is_unmatched(&self) -> bool {
        matches!(self, Capture::Group(None))
    }
}

impl fmt::Display for Capture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capture::Text(s) => write!(f, "{s:?}"),
            Capture::Group(None) => write!(f, "-"),
            Capture::Group(Some(items)) => write!(f, "[{}]", items.iter().join(", ")),
        }
    }
}

/// Input left over once the mask was exhausted or evaluation stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truncated {
    /// The unconsumed remainder of the value.
    pub value: String,
    /// Cursor position reported alongside the remainder.
    pub cursor: usize,
}

/// The outcome of masking a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskResult {
    pub text: String,
    /// True if the whole mask was satisfied without relying on lookahead.
    pub complete: bool,
    pub selection_start: usize,
    pub selection_end: usize,
    /// One slot per group token at the top level, in mask order.
    pub groups: Vec<Capture>,
    pub truncated: Option<Truncated>,
}

impl MaskResult {
    /// The result for a missing value.
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            complete: false,
            selection_start: 0,
            selection_end: 0,
            groups: Vec::new(),
            truncated: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// The truncated remainder of the value, if any.
    pub fn truncated_value(&self) -> Option<&str> {
        self.truncated.as_ref().map(|t| t.value.as_str())
    }

    pub fn truncated_cursor(&self) -> Option<usize> {
        self.truncated.as_ref().map(|t| t.cursor)
    }
}

impl fmt::Display for MaskResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} {} cursor={}..{}",
            self.text,
            if self.complete { "complete" } else { "incomplete" },
            self.selection_start,
            self.selection_end
        )?;
        if !self.groups.is_empty() {
            write!(f, " groups=[{}]", self.groups.iter().join(", "))?;
        }
        if let Some(t) = &self.truncated {
            write!(f, " truncated={:?}@{}", t.value, t.cursor)?;
        }
        Ok(())
    }
}
