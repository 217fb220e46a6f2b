//! Positions, ranges and selections.
//!
//! All columns are counted in Unicode scalar values (`char`), matching the character offsets
//! produced by the scanner. Range containment is inclusive at both ends, which is how host
//! editors compare a caret against a decorated range.

use std::cmp::Ordering;

/// Logical position (line number and column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Zero-based logical line index.
    pub line: usize,
    /// Zero-based column in characters within the logical line.
    pub column: usize,
}

impl Position {
    /// Create a new logical position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A half-open character-offset range (`start..end`) in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OffsetRange {
    /// Range start offset (inclusive), in Unicode scalar values (`char`) from the start of the document.
    pub start: usize,
    /// Range end offset (exclusive), in Unicode scalar values (`char`) from the start of the document.
    pub end: usize,
}

impl OffsetRange {
    /// Create a new offset range.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length of the range in characters.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` if the range covers no characters.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// A line/column range with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Range {
    /// Range start (inclusive).
    pub start: Position,
    /// Range end.
    pub end: Position,
}

impl Range {
    /// Create a range, swapping the endpoints if they are given out of order.
    pub fn new(a: Position, b: Position) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// Returns `true` if the two ranges share at least one position (touching counts).
    pub fn intersects(&self, other: &Range) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Returns `true` if the line spans of the two ranges overlap.
    pub fn shares_line_with(&self, other: &Range) -> bool {
        self.start.line <= other.end.line && other.start.line <= self.end.line
    }
}

/// A half-open line range (`start..end`), e.g. the host's visible lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LineRange {
    /// First line (inclusive).
    pub start: usize,
    /// Last line.
    pub end: usize,
}

impl LineRange {
    /// Create a new line range.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Selection range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selection {
    /// Selection start position (the anchor)
    pub start: Position,
    /// Selection end position (the caret)
    pub end: Position,
    /// Selection direction
    pub direction: SelectionDirection,
}

/// Selection direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionDirection {
    /// Forward selection (from start to end)
    Forward,
    /// Backward selection (from end to start)
    Backward,
}

impl Selection {
    /// Create a selection from anchor to caret.
    pub fn new(start: Position, end: Position) -> Self {
        Self {
            start,
            end,
            direction: selection_direction(start, end),
        }
    }

    /// An empty selection (a bare caret).
    pub fn caret(pos: Position) -> Self {
        Self::new(pos, pos)
    }

    /// Returns `true` if the selection covers no text.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The selection as an ordered range.
    pub fn range(&self) -> Range {
        let (min, max) = selection_min_max(self);
        Range {
            start: min,
            end: max,
        }
    }
}

/// Direction implied by an anchor/caret pair.
fn selection_direction(start: Position, end: Position) -> SelectionDirection {
    if start <= end {
        SelectionDirection::Forward
    } else {
        SelectionDirection::Backward
    }
}

/// The ordered endpoints of a selection.
fn selection_min_max(selection: &Selection) -> (Position, Position) {
    if selection.start <= selection.end {
        (selection.start, selection.end)
    } else {
        (selection.end, selection.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backward_selection_range_is_ordered() {
        let sel = Selection::new(Position::new(3, 1), Position::new(1, 4));
        assert_eq!(sel.direction, SelectionDirection::Backward);
        assert_eq!(
            sel.range(),
            Range::new(Position::new(1, 4), Position::new(3, 1))
        );
    }

    #[test]
    fn test_range_relations_are_inclusive() {
        let range = Range::new(Position::new(0, 3), Position::new(0, 6));
        let caret = Range::new(Position::new(0, 6), Position::new(0, 6));
        assert!(range.intersects(&caret));
        assert!(caret.intersects(&range));

        let touching = Range::new(Position::new(0, 6), Position::new(0, 9));
        assert!(range.intersects(&touching));
        let past = Range::new(Position::new(0, 7), Position::new(0, 9));
        assert!(!range.intersects(&past));

        let other_line = Range::new(Position::new(0, 20), Position::new(2, 0));
        assert!(range.shares_line_with(&other_line));
        assert!(!range.intersects(&other_line));
    }
}
